//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (cars, then logs, then turtles)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{car_hits, fly_touched, in_river_region, is_drowning, platform_supports};
pub use state::{
    Car, DeathCause, Fly, Frog, GameEvent, GamePhase, GameState, Heading, Mover, Platform,
    PlatformKind, SpawnZone,
};
pub use tick::{Hop, TickInput, tick};
