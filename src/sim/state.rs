//! Game state and core simulation types
//!
//! Entities are plain data on the lane/column grid. `Vec2::x` is the column
//! axis and `Vec2::y` is the lane axis (world z, forward is negative).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::tuning::Tuning;
use crate::{random_int, row_z};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Frog has lives left, simulation runs
    Alive,
    /// Out of lives; ticks are no-ops
    GameOver,
}

/// What killed the frog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Run over on the road
    Car,
    /// In the river with nothing underneath
    Drowned,
    /// Carried or hopped past the side of the playfield
    OutOfBounds,
}

/// Things that happened during a tick, for audio and HUD feedback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Hopped,
    Died { cause: DeathCause },
    ReachedGoal { points: f32 },
    AteFly { points: f32 },
    GameOver,
}

/// Direction an entity travels along the column axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    /// Towards +x
    East,
    /// Towards -x
    West,
}

impl Heading {
    pub fn sign(self) -> f32 {
        match self {
            Heading::East => 1.0,
            Heading::West => -1.0,
        }
    }
}

/// Where a recycled entity re-enters the playfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnZone {
    /// Inclusive x range
    pub x_min: f32,
    pub x_max: f32,
    /// Inclusive row range
    pub row_min: u32,
    pub row_max: u32,
}

impl SpawnZone {
    /// Cars enter from the west edge onto a road lane
    pub const fn road() -> Self {
        Self {
            x_min: -HALF_WIDTH - SPAWN_OFFSET_MAX as f32,
            x_max: -HALF_WIDTH - SPAWN_OFFSET_MIN as f32,
            row_min: ROAD_ROW,
            row_max: ROAD_ROW + ROAD_LANES - 1,
        }
    }

    /// Logs and turtles enter from the east edge onto a river lane
    pub const fn river() -> Self {
        Self {
            x_min: HALF_WIDTH + SPAWN_OFFSET_MIN as f32,
            x_max: HALF_WIDTH + SPAWN_OFFSET_MAX as f32,
            row_min: RIVER_ROW,
            row_max: RIVER_ROW + RIVER_LANES - 1,
        }
    }

    /// True if `pos` is a position this zone can produce
    pub fn contains(&self, pos: Vec2) -> bool {
        let row = -pos.y;
        pos.x >= self.x_min
            && pos.x <= self.x_max
            && row >= self.row_min as f32
            && row <= self.row_max as f32
            && row.fract() == 0.0
    }

    /// Draw a spawn position: whole-unit x inside the zone, random lane
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let steps = (self.x_max - self.x_min) as i32;
        let x = self.x_min + random_int(rng, 0, steps) as f32;
        let row = random_int(rng, self.row_min as i32, self.row_max as i32) as u32;
        Vec2::new(x, row_z(row))
    }
}

/// Position and velocity shared by everything that drifts across a lane
#[derive(Debug, Clone, PartialEq)]
pub struct Mover {
    pub pos: Vec2,
    /// Displacement per tick (always positive, direction from `heading`)
    pub speed: f32,
    pub heading: Heading,
}

impl Mover {
    /// Signed displacement applied each tick
    pub fn velocity(&self) -> f32 {
        self.speed * self.heading.sign()
    }

    /// Advance one tick, returning the displacement applied
    pub fn advance(&mut self) -> f32 {
        let dx = self.velocity();
        self.pos.x += dx;
        dx
    }

    /// False once past the far edge on the direction of travel
    pub fn within_bounds(&self) -> bool {
        match self.heading {
            Heading::East => self.pos.x < BOUNDS_WIDTH,
            Heading::West => self.pos.x > -BOUNDS_WIDTH,
        }
    }
}

/// The player
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frog {
    pub pos: Vec2,
}

impl Frog {
    /// Back to the start square
    pub fn reset(&mut self) {
        self.pos = Vec2::ZERO;
    }

    /// Jump one square, snapping to the grid. Returns false if blocked by the bounds.
    pub fn hop(&mut self, hop: super::tick::Hop) -> bool {
        use super::tick::Hop;

        let Vec2 { x, y: z } = self.pos;
        let moved = match hop {
            Hop::Forward if z > -BOUNDS_DEPTH => Vec2::new(snap(x), snap(z - 1.0)),
            Hop::Backward if z < 0.0 => Vec2::new(snap(x), snap(z + 1.0)),
            Hop::Left if x > -HALF_WIDTH => Vec2::new(snap(x - 1.0), snap(z)),
            Hop::Right if x < HALF_WIDTH => Vec2::new(snap(x + 1.0), snap(z)),
            _ => return false,
        };
        self.pos = moved;
        true
    }
}

/// Nearest grid line, halves rounding toward +x
#[inline]
fn snap(v: f32) -> f32 {
    (v + 0.5).floor()
}

/// A car on the road
#[derive(Debug, Clone, PartialEq)]
pub struct Car {
    pub body: Mover,
}

impl Car {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, speed: f32) -> Self {
        let mut car = Self {
            body: Mover {
                pos: Vec2::ZERO,
                speed,
                heading: Heading::East,
            },
        };
        car.respawn(rng);
        car
    }

    /// New lane and spawn offset; speed is fixed for cars
    pub fn respawn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.body.pos = SpawnZone::road().sample(rng);
    }

    /// Drive one tick, recycling once off the far edge
    /// Advance one tick, returning the displacement applied before any respawn
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f32 {
        let dx = self.body.advance();
        if !self.body.within_bounds() {
            self.respawn(rng);
        }
        dx
    }
}

/// Log or turtle raft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    Log,
    Turtle { submerged: bool },
}

/// A river platform the frog can ride
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub kind: PlatformKind,
    pub body: Mover,
    /// Length along the column axis, fixed for the platform's lifetime
    pub width: f32,
}

impl Platform {
    pub fn log<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Self {
        Self::new(rng, tuning, PlatformKind::Log)
    }

    pub fn turtle<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Self {
        Self::new(rng, tuning, PlatformKind::Turtle { submerged: false })
    }

    fn new<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning, kind: PlatformKind) -> Self {
        let width = random_int(rng, PLATFORM_MIN_WIDTH, PLATFORM_MAX_WIDTH) as f32;
        let mut platform = Self {
            kind,
            body: Mover {
                pos: Vec2::ZERO,
                speed: 0.0,
                heading: Heading::West,
            },
            width,
        };
        platform.respawn(rng, tuning);
        platform
    }

    /// New speed, lane and spawn offset
    pub fn respawn<R: Rng + ?Sized>(&mut self, rng: &mut R, tuning: &Tuning) {
        let span = tuning.platform_speed_max - tuning.platform_speed_min;
        self.body.speed = tuning.platform_speed_min + span * rng.random::<f32>();
        self.body.pos = SpawnZone::river().sample(rng);
    }

    /// Drift one tick, recycling once off the far edge. Returns the displacement.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R, tuning: &Tuning) -> f32 {
        let dx = self.body.advance();
        if !self.body.within_bounds() {
            self.respawn(rng, tuning);
        }
        dx
    }

    /// Whether the frog can stand on it
    pub fn is_afloat(&self) -> bool {
        !matches!(self.kind, PlatformKind::Turtle { submerged: true })
    }

    /// Turtles dive or surface; logs ignore this
    pub fn toggle_dive(&mut self) {
        if let PlatformKind::Turtle { submerged } = &mut self.kind {
            *submerged = !*submerged;
        }
    }
}

/// A bonus fly on a sidewalk
#[derive(Debug, Clone, PartialEq)]
pub struct Fly {
    pub row: u32,
    pub column: f32,
    pub visible: bool,
}

impl Fly {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, row: u32) -> Self {
        let mut fly = Self {
            row,
            column: 0.0,
            visible: false,
        };
        fly.reset(rng);
        fly
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.column, row_z(self.row))
    }

    /// Move to a fresh column and hide until the next show
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.column = (random_int(rng, 0, BOUNDS_WIDTH as i32) - HALF_WIDTH as i32) as f32;
        self.visible = false;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub lives: u8,
    /// Goal crossings count whole points, flies add fractions
    pub points: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub frog: Frog,
    pub cars: Vec<Car>,
    pub logs: Vec<Platform>,
    pub turtles: Vec<Platform>,
    pub flies: Vec<Fly>,
    /// Pending events, drained by the frontend each frame
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let cars = (0..tuning.car_count)
            .map(|_| Car::new(&mut rng, tuning.car_speed))
            .collect();
        let logs = (0..tuning.log_count)
            .map(|_| Platform::log(&mut rng, &tuning))
            .collect();
        let turtles = (0..tuning.turtle_count)
            .map(|_| Platform::turtle(&mut rng, &tuning))
            .collect();
        let flies = (0..tuning.fly_count)
            .map(|_| Fly::new(&mut rng, MIDDLE_WALK_ROW))
            .collect();

        Self {
            seed,
            rng,
            lives: tuning.initial_lives,
            tuning,
            points: 0.0,
            time_ticks: 0,
            phase: GamePhase::Alive,
            frog: Frog::default(),
            cars,
            logs,
            turtles,
            flies,
            events: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take a life and send the frog home. Ends the run on the last life.
    pub fn lose_life(&mut self, cause: DeathCause) {
        self.lives = self.lives.saturating_sub(1);
        self.frog.reset();
        self.events.push(GameEvent::Died { cause });
        log::debug!("Frog died ({:?}), {} lives left", cause, self.lives);

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver);
            log::info!("Game over with {} points", self.points);
        }
    }

    /// Frog made it across
    pub fn reach_goal(&mut self) {
        let points = self.tuning.goal_points;
        self.points += points;
        self.frog.reset();
        self.events.push(GameEvent::ReachedGoal { points });
    }

    /// Frog snapped up the fly at `index`
    pub fn eat_fly(&mut self, index: usize) {
        let points = self.tuning.fly_points;
        self.points += points;
        if let Some(fly) = self.flies.get_mut(index) {
            fly.reset(&mut self.rng);
        }
        self.events.push(GameEvent::AteFly { points });
    }

    /// Hand pending events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
