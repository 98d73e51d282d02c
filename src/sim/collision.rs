//! Overlap checks between the frog and everything else on the grid
//!
//! Every test is an axis-aligned proximity check with a tolerance per axis.
//! Lists are tiny (at most nine of anything) so they are scanned brute force.

use glam::Vec2;

use super::state::{Car, Fly, Platform};
use crate::consts::*;
use crate::row_z;

/// Strict per-axis proximity test
#[inline]
pub fn within(a: Vec2, b: Vec2, tol_x: f32, tol_z: f32) -> bool {
    (a.x - b.x).abs() < tol_x && (a.y - b.y).abs() < tol_z
}

/// Car centre swept across the frog's column this tick
///
/// `dx` is the displacement the car just moved, so the span runs from where
/// it started the tick to where it is now.
pub fn car_hits(car: &Car, dx: f32, frog: Vec2) -> bool {
    let now = car.body.pos.x;
    let before = now - dx;
    let (lo, hi) = (before.min(now), before.max(now));
    (car.body.pos.y - frog.y).abs() < LANE_TOLERANCE
        && frog.x >= lo - CAR_TOLERANCE
        && frog.x <= hi + CAR_TOLERANCE
}

/// Platform is afloat and spans the frog's column on the frog's lane
pub fn platform_supports(platform: &Platform, frog: Vec2) -> bool {
    platform.is_afloat() && within(platform.body.pos, frog, platform.width / 2.0, LANE_TOLERANCE)
}

/// A visible fly sits on the frog's square
pub fn fly_touched(fly: &Fly, frog: Vec2) -> bool {
    fly.visible && within(fly.pos(), frog, FLY_TOLERANCE, LANE_TOLERANCE)
}

/// Lane-axis centre of the river band
pub fn river_center_z() -> f32 {
    -(RIVER_ROW as f32 - 0.5 + RIVER_LANES as f32 / 2.0)
}

/// Frog is somewhere over the water (ignores platforms)
pub fn in_river_region(frog: Vec2) -> bool {
    (river_center_z() - frog.y).abs() <= RIVER_LANES as f32 / 2.0
}

/// Frog is over the water with nothing afloat underneath
pub fn is_drowning<'a>(frog: Vec2, platforms: impl IntoIterator<Item = &'a Platform>) -> bool {
    in_river_region(frog) && !platforms.into_iter().any(|p| platform_supports(p, frog))
}

/// Frog has left the lateral play area
pub fn out_of_lateral_bounds(frog: Vec2) -> bool {
    frog.x.abs() > HALF_WIDTH
}

/// Frog has reached the far row
pub fn at_goal(frog: Vec2) -> bool {
    frog.y <= row_z(GOAL_ROW)
}
