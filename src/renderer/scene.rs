//! Render adapter: turns simulation state into lit boxes and a follow camera
//!
//! The simulation never sees any of this. Boxes are emitted back to front so
//! the pipeline can draw them painter-style without a depth buffer.

use glam::{Mat4, Vec2, Vec3};

use super::shapes::cuboid;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::row_z;
use crate::sim::{GameState, PlatformKind};

/// Ground strips are wide enough to hide the edges while the camera pans
const STRIP_WIDTH: f32 = BOUNDS_WIDTH * 3.0;
const STRIP_HEIGHT: f32 = 0.5;

/// One renderable box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    pub center: Vec3,
    pub size: Vec3,
    pub color: [f32; 4],
}

/// Perspective camera trailing the frog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    /// Vertical field of view (radians)
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Sit just above and behind the frog, looking up the playfield
    pub fn follow(frog: Vec2, far: f32) -> Self {
        Self {
            eye: Vec3::new(frog.x, 1.0, frog.y + 1.5),
            fov_y: 75f32.to_radians(),
            near: 0.1,
            far,
        }
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far);
        let view = Mat4::look_to_rh(self.eye, Vec3::NEG_Z, Vec3::Y);
        proj * view
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct Scene {
    /// Ground first, then entities ordered far to near
    pub boxes: Vec<BoxShape>,
    pub camera: Camera,
}

/// A ground strip covering `lanes` rows starting at `row`
fn strip(row: u32, lanes: u32, color: [f32; 4]) -> BoxShape {
    let z = -(row as f32 - 0.5 + lanes as f32 / 2.0);
    BoxShape {
        center: Vec3::new(0.0, 0.0, z),
        size: Vec3::new(STRIP_WIDTH, STRIP_HEIGHT, lanes as f32),
        color,
    }
}

impl Scene {
    pub fn build(state: &GameState, draw_distance: f32) -> Self {
        // Far strips first; all strips share a top face so order only matters at the seams
        let mut boxes = vec![
            strip(GOAL_ROW, GOAL_DEPTH, colors::GRASS),
            strip(RIVER_ROW, RIVER_LANES, colors::RIVER),
            strip(MIDDLE_WALK_ROW, 1, colors::SIDEWALK),
            strip(ROAD_ROW, ROAD_LANES, colors::ROAD),
            strip(START_WALK_ROW, 1, colors::SIDEWALK),
        ];

        let mut entities = Vec::new();

        for car in &state.cars {
            entities.push(BoxShape {
                center: Vec3::new(car.body.pos.x, 0.375, car.body.pos.y),
                size: Vec3::new(CAR_LENGTH, 1.0, 0.5),
                color: colors::CAR,
            });
        }

        for platform in state.logs.iter().chain(&state.turtles) {
            // Submerged turtles are under water and out of sight
            if !platform.is_afloat() {
                continue;
            }
            let color = match platform.kind {
                PlatformKind::Log => colors::LOG,
                PlatformKind::Turtle { .. } => colors::TURTLE,
            };
            entities.push(BoxShape {
                center: Vec3::new(platform.body.pos.x, 0.2, platform.body.pos.y),
                size: Vec3::new(platform.width, 0.3, 0.5),
                color,
            });
        }

        for fly in state.flies.iter().filter(|f| f.visible) {
            entities.push(BoxShape {
                center: Vec3::new(fly.column, 0.75, row_z(fly.row)),
                size: Vec3::splat(FROG_SIZE),
                color: colors::FLY,
            });
        }

        // Frog last so it wins ties with the platform it rides
        let frog = state.frog.pos;
        entities.push(BoxShape {
            center: Vec3::new(frog.x, 0.25, frog.y),
            size: Vec3::splat(FROG_SIZE),
            color: colors::FROG,
        });

        // Stable sort keeps the frog after anything sharing its lane
        entities.sort_by(|a, b| a.center.z.total_cmp(&b.center.z));
        boxes.extend(entities);

        Self {
            boxes,
            camera: Camera::follow(frog, draw_distance),
        }
    }

    /// Triangle list for the whole scene
    pub fn vertices(&self) -> Vec<Vertex> {
        self.boxes
            .iter()
            .flat_map(|b| cuboid(b.center, b.size, b.color))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;
    use crate::tuning::Tuning;

    fn quiet_state() -> GameState {
        GameState::with_tuning(
            1,
            Tuning {
                turtle_toggle_chance: 0.0,
                fly_toggle_chance: 0.0,
                ..Tuning::default()
            },
        )
    }

    #[test]
    fn test_scene_counts() {
        let state = quiet_state();
        let scene = Scene::build(&state, 20.0);
        // 5 strips + 5 cars + 18 platforms + frog, flies start hidden
        assert_eq!(scene.boxes.len(), 5 + 5 + 18 + 1);
        assert_eq!(scene.vertices().len(), scene.boxes.len() * 36);
    }

    #[test]
    fn test_hidden_things_are_not_drawn() {
        let mut state = quiet_state();
        state.turtles[0].toggle_dive();
        state.flies[0].show();
        let scene = Scene::build(&state, 20.0);
        assert_eq!(scene.boxes.len(), 5 + 5 + 17 + 1 + 1);
    }

    #[test]
    fn test_entities_ordered_far_to_near() {
        let state = quiet_state();
        let scene = Scene::build(&state, 20.0);
        let zs: Vec<f32> = scene.boxes[5..].iter().map(|b| b.center.z).collect();
        assert!(zs.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(scene.boxes.last().map(|b| b.color), Some(colors::FROG));
    }

    #[test]
    fn test_strip_layout() {
        assert_eq!(strip(ROAD_ROW, ROAD_LANES, colors::ROAD).center.z, -2.0);
        assert_eq!(strip(RIVER_ROW, RIVER_LANES, colors::RIVER).center.z, -7.0);
        assert_eq!(strip(GOAL_ROW, GOAL_DEPTH, colors::GRASS).center.z, -12.0);
    }

    #[test]
    fn test_camera_follows_frog() {
        let mut state = quiet_state();
        state.frog.pos = Vec2::new(3.0, -6.0);
        let scene = Scene::build(&state, 14.0);
        assert_eq!(scene.camera.eye, Vec3::new(3.0, 1.0, -4.5));
        assert_eq!(scene.camera.far, 14.0);

        // A point straight ahead of the camera lands in the middle of the screen
        let clip = scene.camera.view_proj(2.0) * Vec3::new(3.0, 1.0, -8.0).extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
