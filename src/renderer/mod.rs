//! WebGPU rendering module
//!
//! `scene` adapts simulation state into boxes and a camera; `pipeline` draws them.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{BoxShape, Camera, Scene};
