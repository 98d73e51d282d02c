//! Vertex types for lit 3D boxes

use bytemuck::{Pod, Zeroable};

/// World-space vertex with a face normal and flat color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 4]) -> Self {
        Self {
            position,
            normal,
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const FROG: [f32; 4] = [0.0, 0.5, 0.0, 1.0];
    pub const CAR: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const LOG: [f32; 4] = [0.65, 0.16, 0.16, 1.0];
    pub const TURTLE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const FLY: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
    pub const ROAD: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const RIVER: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const SIDEWALK: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
    pub const GRASS: [f32; 4] = [0.56, 0.93, 0.56, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}
