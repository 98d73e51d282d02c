//! Frogger - hop across the road and the river
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, overlap checks, lives/points)
//! - `renderer`: Scene adapter and WebGPU rendering pipeline
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per logic frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield bounds (x spans [-WIDTH/2, WIDTH/2], forward is -z)
    pub const BOUNDS_WIDTH: f32 = 14.0;
    pub const BOUNDS_DEPTH: f32 = 14.0;
    pub const HALF_WIDTH: f32 = BOUNDS_WIDTH / 2.0;

    /// Road occupies rows 1..=ROAD_LANES
    pub const ROAD_ROW: u32 = 1;
    pub const ROAD_LANES: u32 = 3;
    /// Sidewalk rows and how many flies each one hosts
    pub const START_WALK_ROW: u32 = 0;
    pub const MIDDLE_WALK_ROW: u32 = 4;
    /// River occupies rows RIVER_ROW..RIVER_ROW + RIVER_LANES
    pub const RIVER_ROW: u32 = 5;
    pub const RIVER_LANES: u32 = 5;
    /// Grass strip at the far side; reaching it scores
    pub const GOAL_ROW: u32 = 10;
    pub const GOAL_DEPTH: u32 = 5;

    /// Entity sizes
    pub const FROG_SIZE: f32 = 0.5;
    pub const CAR_LENGTH: f32 = 1.5;
    pub const PLATFORM_MIN_WIDTH: i32 = 3;
    pub const PLATFORM_MAX_WIDTH: i32 = 5;

    /// Lane-axis tolerance shared by every overlap check
    pub const LANE_TOLERANCE: f32 = 0.125;
    /// Slack on the swept car centre against the frog's column
    pub const CAR_TOLERANCE: f32 = 0.001;
    /// Column-axis tolerance for snapping up a fly
    pub const FLY_TOLERANCE: f32 = FROG_SIZE / 2.0;

    /// Spawn offset drawn past the edge the entity enters from
    pub const SPAWN_OFFSET_MIN: i32 = 1;
    pub const SPAWN_OFFSET_MAX: i32 = 10;
}

/// Z coordinate of a grid row (rows run away from the camera)
#[inline]
pub fn row_z(row: u32) -> f32 {
    -(row as f32)
}

/// Uniform integer in `[min, max]`, both ends inclusive
#[inline]
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    rng.random_range(min..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_int_inclusive() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..1000 {
            let v = random_int(&mut rng, 1, 3);
            assert!((1..=3).contains(&v));
            seen_min |= v == 1;
            seen_max |= v == 3;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn test_row_z() {
        assert_eq!(row_z(0), 0.0);
        assert_eq!(row_z(consts::GOAL_ROW), -10.0);
    }
}
