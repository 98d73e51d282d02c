//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Entity speeds
//! are per tick, so callers run this at `SIM_DT` intervals.

use rand::Rng;

use super::collision::{at_goal, car_hits, fly_touched, is_drowning, out_of_lateral_bounds, platform_supports};
use super::state::{DeathCause, GameEvent, GameState};

/// A one-square jump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hop {
    Forward,
    Backward,
    Left,
    Right,
}

impl Hop {
    /// Map a DOM `KeyboardEvent.key` to a hop
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Hop::Forward),
            "ArrowDown" => Some(Hop::Backward),
            "ArrowLeft" => Some(Hop::Left),
            "ArrowRight" => Some(Hop::Right),
            _ => None,
        }
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Hop queued since the last tick
    pub hop: Option<Hop>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.is_over() {
        return;
    }

    state.time_ticks += 1;

    if let Some(hop) = input.hop {
        apply_hop(state, hop);
    }

    update_flies(state);

    // Road
    let frog = state.frog.pos;
    let mut run_over = false;
    for car in &mut state.cars {
        let dx = car.step(&mut state.rng);
        run_over |= car_hits(car, dx, frog);
    }
    if run_over {
        state.lose_life(DeathCause::Car);
        if state.is_over() {
            return;
        }
    }

    // River: platforms drift and carry the frog; at most one carries per tick
    let mut carried = false;
    for log in &mut state.logs {
        let dx = log.step(&mut state.rng, &state.tuning);
        if !carried && platform_supports(log, state.frog.pos) {
            state.frog.pos.x += dx;
            carried = true;
        }
    }
    let turtle_chance = f64::from(state.tuning.turtle_toggle_chance).clamp(0.0, 1.0);
    for turtle in &mut state.turtles {
        let dx = turtle.step(&mut state.rng, &state.tuning);
        if !carried && platform_supports(turtle, state.frog.pos) {
            state.frog.pos.x += dx;
            carried = true;
        }
        if state.rng.random_bool(turtle_chance) {
            turtle.toggle_dive();
        }
    }

    if is_drowning(state.frog.pos, state.logs.iter().chain(&state.turtles)) {
        state.lose_life(DeathCause::Drowned);
        if state.is_over() {
            return;
        }
    }

    if out_of_lateral_bounds(state.frog.pos) {
        state.lose_life(DeathCause::OutOfBounds);
    }
}

/// Jump, then score for the far row or any fly landed on
fn apply_hop(state: &mut GameState, hop: Hop) {
    if !state.frog.hop(hop) {
        return;
    }
    state.events.push(GameEvent::Hopped);

    if at_goal(state.frog.pos) {
        state.reach_goal();
    }

    let frog = state.frog.pos;
    let eaten: Vec<usize> = state
        .flies
        .iter()
        .enumerate()
        .filter(|(_, fly)| fly_touched(fly, frog))
        .map(|(i, _)| i)
        .collect();
    for i in eaten {
        state.eat_fly(i);
    }
}

/// Flies blink in and out on their own timers
fn update_flies(state: &mut GameState) {
    let chance = f64::from(state.tuning.fly_toggle_chance).clamp(0.0, 1.0);
    for fly in &mut state.flies {
        if state.rng.random_bool(chance) {
            if fly.visible {
                fly.reset(&mut state.rng);
            } else {
                fly.show();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, PlatformKind, SpawnZone};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    /// Tuning with the random timers switched off so tests control every event
    fn quiet() -> Tuning {
        Tuning {
            turtle_toggle_chance: 0.0,
            fly_toggle_chance: 0.0,
            ..Tuning::default()
        }
    }

    fn hop(h: Hop) -> TickInput {
        TickInput { hop: Some(h) }
    }

    /// Park every car far off in a lane the frog never reaches in the test
    fn clear_road(state: &mut GameState) {
        for car in &mut state.cars {
            car.body.pos = Vec2::new(-16.0, -3.0);
        }
    }

    #[test]
    fn test_hop_from_key() {
        assert_eq!(Hop::from_key("ArrowUp"), Some(Hop::Forward));
        assert_eq!(Hop::from_key("ArrowDown"), Some(Hop::Backward));
        assert_eq!(Hop::from_key("ArrowLeft"), Some(Hop::Left));
        assert_eq!(Hop::from_key("ArrowRight"), Some(Hop::Right));
        assert_eq!(Hop::from_key("w"), None);
    }

    #[test]
    fn test_car_collision_costs_a_life() {
        let mut state = GameState::with_tuning(1, quiet());
        clear_road(&mut state);
        state.frog.pos = Vec2::new(0.0, -2.0);
        state.cars[0].body.pos = Vec2::new(-0.05, -2.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 4);
        assert_eq!(state.frog.pos, Vec2::ZERO);
        assert!(state.events.contains(&GameEvent::Died {
            cause: DeathCause::Car
        }));
    }

    #[test]
    fn test_car_past_the_frog_is_harmless() {
        let mut state = GameState::with_tuning(1, quiet());
        clear_road(&mut state);
        state.frog.pos = Vec2::new(0.0, -2.0);
        state.cars[0].body.pos = Vec2::new(0.8, -2.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 5);
        assert_eq!(state.frog.pos, Vec2::new(0.0, -2.0));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_car_driving_through_column_hits_once_reached() {
        let mut state = GameState::with_tuning(1, quiet());
        clear_road(&mut state);
        state.frog.pos = Vec2::new(0.0, -2.0);
        state.cars[0].body.pos = Vec2::new(-1.0, -2.0);

        let mut ticks = 0;
        while state.lives == 5 && ticks < 20 {
            tick(&mut state, &TickInput::default());
            ticks += 1;
        }

        assert_eq!(state.lives, 4);
        assert!((9..=11).contains(&ticks), "hit after {ticks} ticks");
    }

    #[test]
    fn test_lives_drain_to_game_over_then_halt() {
        let mut state = GameState::with_tuning(2, quiet());
        let initial = state.lives;

        for n in 1..=initial {
            clear_road(&mut state);
            state.frog.pos = Vec2::new(0.0, -1.0);
            state.cars[0].body.pos = Vec2::new(0.0, -1.0);
            tick(&mut state, &TickInput::default());
            assert_eq!(state.lives, initial - n);
            assert_eq!(state.frog.pos, Vec2::ZERO);
        }

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.events.last(), Some(&GameEvent::GameOver));

        let ticks = state.time_ticks;
        let cars_before: Vec<_> = state.cars.iter().map(|c| c.body.pos).collect();
        tick(&mut state, &hop(Hop::Forward));
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.lives, 0);
        assert_eq!(state.frog.pos, Vec2::ZERO);
        let cars_after: Vec<_> = state.cars.iter().map(|c| c.body.pos).collect();
        assert_eq!(cars_before, cars_after);
    }

    #[test]
    fn test_jumping_into_river_drowns() {
        let mut state = GameState::with_tuning(3, quiet());
        clear_road(&mut state);
        for p in state.logs.iter_mut().chain(&mut state.turtles) {
            p.body.pos = Vec2::new(12.0, -9.0);
        }
        state.frog.pos = Vec2::new(0.0, -4.0);

        tick(&mut state, &hop(Hop::Forward));

        assert_eq!(state.lives, 4);
        assert_eq!(state.frog.pos, Vec2::ZERO);
        assert!(state.events.contains(&GameEvent::Died {
            cause: DeathCause::Drowned
        }));
    }

    #[test]
    fn test_log_carries_frog() {
        let mut state = GameState::with_tuning(4, quiet());
        clear_road(&mut state);
        for p in state.logs.iter_mut().chain(&mut state.turtles) {
            p.body.pos = Vec2::new(12.0, -9.0);
        }
        state.logs[0].body.pos = Vec2::new(1.0, -6.0);
        state.logs[0].width = 5.0;
        state.logs[0].body.speed = 0.02;
        state.frog.pos = Vec2::new(1.0, -6.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 5);
        assert!((state.frog.pos.x - 0.98).abs() < 1e-5);
        assert_eq!(state.frog.pos.y, -6.0);
    }

    #[test]
    fn test_overlapping_platforms_carry_once() {
        let mut state = GameState::with_tuning(4, quiet());
        clear_road(&mut state);
        for p in state.logs.iter_mut().chain(&mut state.turtles) {
            p.body.pos = Vec2::new(12.0, -9.0);
        }
        for p in [&mut state.logs[0], &mut state.turtles[0]] {
            p.body.pos = Vec2::new(0.0, -5.0);
            p.body.speed = 0.01;
        }
        state.frog.pos = Vec2::new(0.0, -5.0);

        tick(&mut state, &TickInput::default());

        assert!((state.frog.pos.x + 0.01).abs() < 1e-5);
    }

    #[test]
    fn test_submerged_turtle_drowns_rider() {
        let mut state = GameState::with_tuning(5, quiet());
        clear_road(&mut state);
        for p in state.logs.iter_mut().chain(&mut state.turtles) {
            p.body.pos = Vec2::new(12.0, -9.0);
        }
        state.turtles[0].body.pos = Vec2::new(0.0, -7.0);
        state.turtles[0].kind = PlatformKind::Turtle { submerged: true };
        state.frog.pos = Vec2::new(0.0, -7.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 4);
        assert_eq!(state.frog.pos, Vec2::ZERO);
    }

    #[test]
    fn test_drifting_off_the_side_kills() {
        let mut state = GameState::with_tuning(6, quiet());
        clear_road(&mut state);
        for p in state.logs.iter_mut().chain(&mut state.turtles) {
            p.body.pos = Vec2::new(12.0, -9.0);
        }
        state.logs[0].body.pos = Vec2::new(-7.0, -6.0);
        state.logs[0].width = 5.0;
        state.frog.pos = Vec2::new(-7.0, -6.0);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 4);
        assert!(state.events.contains(&GameEvent::Died {
            cause: DeathCause::OutOfBounds
        }));
    }

    #[test]
    fn test_hopping_off_the_right_edge_kills() {
        let mut state = GameState::with_tuning(6, quiet());
        clear_road(&mut state);
        for p in state.logs.iter_mut().chain(&mut state.turtles) {
            p.body.pos = Vec2::new(12.0, -9.0);
        }
        state.logs[0].body.pos = Vec2::new(6.98, -6.0);
        state.logs[0].width = 5.0;
        state.frog.pos = Vec2::new(6.98, -6.0);

        tick(&mut state, &hop(Hop::Right));

        assert_eq!(state.lives, 4);
        assert_eq!(state.frog.pos, Vec2::ZERO);
        assert_eq!(
            state.events,
            vec![
                GameEvent::Hopped,
                GameEvent::Died {
                    cause: DeathCause::OutOfBounds
                }
            ]
        );
    }

    #[test]
    fn test_reaching_goal_scores_one() {
        let mut state = GameState::with_tuning(7, quiet());
        clear_road(&mut state);
        state.frog.pos = Vec2::new(2.0, -9.0);
        state.logs[0].body.pos = Vec2::new(2.0, -9.0);
        state.logs[0].width = 5.0;

        tick(&mut state, &hop(Hop::Forward));

        assert_eq!(state.points, 1.0);
        assert_eq!(state.lives, 5);
        assert_eq!(state.frog.pos, Vec2::ZERO);
        assert!(state.events.contains(&GameEvent::ReachedGoal { points: 1.0 }));
    }

    #[test]
    fn test_eating_fly_scores_half_and_hides_it() {
        let mut state = GameState::with_tuning(8, quiet());
        clear_road(&mut state);
        state.frog.pos = Vec2::new(3.0, -3.0);
        state.flies[0].column = 3.0;
        state.flies[0].show();

        tick(&mut state, &hop(Hop::Forward));

        assert_eq!(state.points, 0.5);
        assert!(!state.flies[0].visible);
        assert_eq!(state.frog.pos, Vec2::new(3.0, -4.0));

        // Standing still on the same square scores nothing more
        tick(&mut state, &TickInput::default());
        assert_eq!(state.points, 0.5);
    }

    #[test]
    fn test_hidden_fly_is_ignored() {
        let mut state = GameState::with_tuning(8, quiet());
        clear_road(&mut state);
        state.frog.pos = Vec2::new(3.0, -3.0);
        state.flies[0].column = 3.0;

        tick(&mut state, &hop(Hop::Forward));

        assert_eq!(state.points, 0.0);
    }

    #[test]
    fn test_fly_timer_shows_then_moves_on() {
        let tuning = Tuning {
            fly_toggle_chance: 1.0,
            turtle_toggle_chance: 0.0,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(9, tuning);
        clear_road(&mut state);

        tick(&mut state, &TickInput::default());
        assert!(state.flies.iter().all(|f| f.visible));

        tick(&mut state, &TickInput::default());
        assert!(state.flies.iter().all(|f| !f.visible));
    }

    #[test]
    fn test_turtles_toggle_on_timer() {
        let tuning = Tuning {
            fly_toggle_chance: 0.0,
            turtle_toggle_chance: 1.0,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(10, tuning);
        tick(&mut state, &TickInput::default());
        assert!(state.turtles.iter().all(|t| !t.is_afloat()));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            hop(Hop::Forward),
            TickInput::default(),
            hop(Hop::Left),
            hop(Hop::Forward),
            TickInput::default(),
        ];

        for _ in 0..200 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.points, state2.points);
        assert_eq!(state1.frog, state2.frog);
        assert_eq!(state1.cars, state2.cars);
        assert_eq!(state1.logs, state2.logs);
        assert_eq!(state1.turtles, state2.turtles);
    }

    proptest! {
        #[test]
        fn prop_wrapped_entities_land_in_spawn_zone(seed in any::<u64>()) {
            let mut state = GameState::new(seed);
            // Push every mover onto its exit edge so the next tick recycles it
            for car in &mut state.cars {
                car.body.pos.x = 13.95;
            }
            for p in state.logs.iter_mut().chain(&mut state.turtles) {
                p.body.pos.x = -13.995;
            }

            tick(&mut state, &TickInput::default());

            for car in &state.cars {
                prop_assert!(SpawnZone::road().contains(car.body.pos), "{:?}", car.body.pos);
                prop_assert_eq!(car.body.speed, 0.1);
            }
            for p in state.logs.iter().chain(&state.turtles) {
                prop_assert!(SpawnZone::river().contains(p.body.pos), "{:?}", p.body.pos);
                prop_assert!(p.body.speed >= 0.01 && p.body.speed <= 0.02);
            }
        }

        #[test]
        fn prop_frog_stays_on_grid_after_hops(hops in proptest::collection::vec(0u8..4, 0..40)) {
            let mut state = GameState::with_tuning(17, quiet());
            for h in hops {
                let h = match h {
                    0 => Hop::Forward,
                    1 => Hop::Backward,
                    2 => Hop::Left,
                    _ => Hop::Right,
                };
                state.frog.hop(h);
                let pos = state.frog.pos;
                prop_assert!(pos.x.abs() <= 7.0);
                prop_assert!(pos.y <= 0.0 && pos.y >= -14.0);
                prop_assert_eq!(pos.x.fract(), 0.0);
                prop_assert_eq!(pos.y.fract(), 0.0);
            }
        }

        #[test]
        fn prop_lives_count_collisions(hits in 0u8..5) {
            let mut state = GameState::with_tuning(23, quiet());
            for _ in 0..hits {
                clear_road(&mut state);
                state.frog.pos = Vec2::new(1.0, -3.0);
                state.cars[0].body.pos = Vec2::new(1.0, -3.0);
                tick(&mut state, &TickInput::default());
            }
            prop_assert_eq!(state.lives, 5 - hits);
            prop_assert_eq!(state.frog.pos, Vec2::ZERO);
            prop_assert!(!state.is_over());
        }
    }
}
