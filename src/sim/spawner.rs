//! Pickup spawning around the head
//!
//! The generator never places pickups; they are dropped into the overlay a
//! few at a time near the snake and culled once it wanders off.

use glam::IVec2;
use rand::Rng;

use super::state::GameState;
use super::terrain::{BiomeType, BlockType, biome_at};

/// Cap on live pickups in the overlay
pub const MAX_ITEMS: u32 = 40;
/// Ticks between spawn attempts
pub const SPAWN_INTERVAL_TICKS: u64 = 4;
/// Cadence of the far-item cull
pub const CULL_INTERVAL_TICKS: u64 = 15;
const SPAWN_ATTEMPTS: usize = 15;
const SPAWN_RANGE: i32 = 18;
/// Spawns closer than this (on both axes) are rejected
const SPAWN_MIN_DISTANCE: i32 = 5;
const CULL_DISTANCE: f32 = 24.0;

/// Pick an item kind for a fresh spawn
fn roll_item(state: &mut GameState, biome: BiomeType) -> BlockType {
    // (dirt cutoff, gold cutoff); the rest are boxes
    let (dirt, gold) = match biome {
        BiomeType::Desert => (0.70, 0.90),
        BiomeType::ObsidianWaste => (0.76, 0.86),
        BiomeType::Grassland | BiomeType::Tundra => (0.76, 0.90),
    };
    let roll: f64 = state.rng.random();
    let item = if roll < dirt {
        BlockType::Dirt
    } else if roll < gold {
        BlockType::Gold
    } else {
        BlockType::PowerupBox
    };

    if item == BlockType::Dirt {
        let lucky = state.config.upgrades.lucky_gold_chance();
        if lucky > 0.0 && state.rng.random_bool(lucky) {
            return BlockType::Gold;
        }
    }
    item
}

/// Try to drop one pickup on an empty cell near the head
pub fn spawn_item_near_head(state: &mut GameState) -> Option<IVec2> {
    let head = state.snake.head();
    for _ in 0..SPAWN_ATTEMPTS {
        let offset = IVec2::new(
            state.rng.random_range(-SPAWN_RANGE..SPAWN_RANGE),
            state.rng.random_range(-SPAWN_RANGE..SPAWN_RANGE),
        );
        if offset.x.abs() < SPAWN_MIN_DISTANCE && offset.y.abs() < SPAWN_MIN_DISTANCE {
            continue;
        }
        let cell = head + offset;
        if state.block_at(cell) != BlockType::Empty || state.snake.body.contains(&cell) {
            continue;
        }
        let biome = biome_at(cell, state.tutorial);
        let item = roll_item(state, biome);
        state.set_block(cell, item);
        return Some(cell);
    }
    None
}

/// Periodic spawn step; never in the tutorial
pub fn update_spawner(state: &mut GameState) {
    if state.tutorial {
        return;
    }
    if state.time_ticks % CULL_INTERVAL_TICKS == 0 {
        cull_far_items(state);
    }
    if state.time_ticks % SPAWN_INTERVAL_TICKS == 0 && state.world.count_items() < MAX_ITEMS {
        spawn_item_near_head(state);
    }
}

/// Drop DIRT and GOLD that drifted out of reach of the head
pub fn cull_far_items(state: &mut GameState) -> usize {
    let head = state.snake.head().as_vec2();
    let mut far: Vec<IVec2> = state
        .world
        .iter()
        .filter(|(_, block)| matches!(block, BlockType::Dirt | BlockType::Gold))
        .filter(|(cell, _)| cell.as_vec2().distance(head) > CULL_DISTANCE)
        .map(|(cell, _)| cell)
        .collect();
    far.sort_by_key(|c| (c.x, c.y));
    for &cell in &far {
        state.clear_cell(cell);
    }
    far.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;

    #[test]
    fn test_spawns_outside_inner_square() {
        let mut s = GameState::new(SessionConfig {
            seed: 7,
            ..Default::default()
        });
        for _ in 0..200 {
            if let Some(cell) = spawn_item_near_head(&mut s) {
                let d = cell.abs();
                assert!(d.x >= SPAWN_MIN_DISTANCE || d.y >= SPAWN_MIN_DISTANCE);
                assert!(d.x <= SPAWN_RANGE && d.y <= SPAWN_RANGE);
                assert!(s.block_at(cell).is_item());
            }
        }
        assert!(s.world.count_items() > 0);
    }

    #[test]
    fn test_spawner_respects_cap() {
        let mut s = GameState::new(SessionConfig::default());
        let mut peak = 0;
        for t in 1..5_000 {
            s.time_ticks = t;
            update_spawner(&mut s);
            peak = peak.max(s.world.count_items());
        }
        assert!(peak > 0);
        assert!(peak <= MAX_ITEMS);
    }

    #[test]
    fn test_no_spawns_in_tutorial() {
        let mut s = GameState::new(SessionConfig {
            tutorial: true,
            ..Default::default()
        });
        for t in 0..100 {
            s.time_ticks = t;
            update_spawner(&mut s);
        }
        assert!(s.world.is_empty());
    }

    #[test]
    fn test_cull_keeps_boxes_and_near_items() {
        let mut s = GameState::new(SessionConfig::default());
        s.set_block(IVec2::new(30, 0), BlockType::Dirt);
        s.set_block(IVec2::new(0, 30), BlockType::PowerupBox);
        s.set_block(IVec2::new(10, 0), BlockType::Gold);
        assert_eq!(cull_far_items(&mut s), 1);
        assert_eq!(s.block_at(IVec2::new(0, 30)), BlockType::PowerupBox);
        assert_eq!(s.block_at(IVec2::new(10, 0)), BlockType::Gold);
    }

    #[test]
    fn test_lucky_find_max_turns_dirt_gold() {
        let mut cfg = SessionConfig::default();
        cfg.upgrades.lucky_find = 10;
        let mut s = GameState::new(cfg);
        for _ in 0..50 {
            assert_ne!(roll_item(&mut s, BiomeType::Grassland), BlockType::Dirt);
        }
    }
}
