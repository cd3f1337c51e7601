//! Property tests for the deterministic core

use std::cell::Cell;

use burrow_snake::consts::CHUNK_SIZE;
use burrow_snake::manhattan;
use burrow_snake::sim::world::{chunk_of, chunk_origin};
use burrow_snake::sim::{Direction, GameState, find_path, generate, generate_base, WorldMap};
use burrow_snake::SessionConfig;
use glam::IVec2;
use proptest::prelude::*;

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

proptest! {
    #[test]
    fn generator_is_deterministic(
        x in -2_000i32..2_000,
        y in -2_000i32..2_000,
        level in 1u32..30,
        tutorial in any::<bool>(),
    ) {
        let cell = IVec2::new(x, y);
        let first = generate_base(cell, level, tutorial);
        prop_assert_eq!(first, generate_base(cell, level, tutorial));
        prop_assert_eq!(first, generate(cell, level, tutorial, &WorldMap::default()));
    }

    #[test]
    fn reversal_is_always_rejected(heading in direction()) {
        let mut state = GameState::new(SessionConfig::default());
        state.snake.direction = heading;
        prop_assert!(!state.register_direction(heading.opposite()));
        prop_assert!(!state.register_direction(heading));
        prop_assert!(state.input_queue.is_empty());
    }

    #[test]
    fn pathfinding_cost_is_bounded(
        sx in -60i32..60, sy in -60i32..60,
        gx in -60i32..60, gy in -60i32..60,
        budget in 1usize..300,
    ) {
        let start = IVec2::new(sx, sy);
        let goal = IVec2::new(gx, gy);
        let calls = Cell::new(0usize);
        let path = find_path(start, goal, budget, |_| {
            calls.set(calls.get() + 1);
            true
        });
        // Goal check plus at most four neighbour checks per expansion
        prop_assert!(calls.get() <= 1 + 4 * budget);
        if let Some(path) = path {
            prop_assert_eq!(path.len() as i32, manhattan(start, goal) + 1);
            prop_assert_eq!(path[0], start);
            prop_assert_eq!(*path.last().unwrap(), goal);
            for pair in path.windows(2) {
                prop_assert_eq!(manhattan(pair[0], pair[1]), 1);
            }
        }
    }

    #[test]
    fn enclosed_goal_has_no_path(
        sx in -30i32..30, sy in -30i32..30,
        gx in -30i32..30, gy in -30i32..30,
    ) {
        let start = IVec2::new(sx, sy);
        let goal = IVec2::new(gx, gy);
        prop_assume!(manhattan(start, goal) > 1);
        // Every neighbour of the goal is a wall
        let path = find_path(start, goal, 500, |c| manhattan(c, goal) != 1);
        prop_assert!(path.is_none());
    }

    #[test]
    fn chunk_contains_its_cells(x in -10_000i32..10_000, y in -10_000i32..10_000) {
        let cell = IVec2::new(x, y);
        let local = cell - chunk_origin(chunk_of(cell));
        prop_assert!((0..CHUNK_SIZE).contains(&local.x));
        prop_assert!((0..CHUNK_SIZE).contains(&local.y));
    }
}
