//! Burrow Snake - an endless burrowing snake arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, chunks, collisions, boss AI)
//! - `tuning`: Data-driven per-level balance
//! - `config`: Read-only session bundle from the progression/shop layer
//! - `game_loop`: Fixed timestep driver with pause/resume
//!
//! Rendering, audio and persistence are collaborators outside this crate:
//! they read `sim::RenderSnapshot` and drain `sim::GameEvent`s.

pub mod config;
pub mod game_loop;
pub mod sim;
pub mod tuning;

pub use config::{ConfigError, Consumables, SessionConfig, UpgradeLevels, UpgradeType};
pub use game_loop::{GameLoop, GameOutcome};

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Baseline tick interval (ms)
    pub const TICK_MS: u32 = 120;
    /// Tick interval under SPEED_BOOST
    pub const TICK_MS_SPEED_BOOST: u32 = 80;
    /// Tick interval while the head sits on ICE
    pub const TICK_MS_ICE: u32 = 160;
    /// Tick interval in the TUNDRA biome (cold)
    pub const TICK_MS_TUNDRA: u32 = 150;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame deltas above this are clamped (tab switch, debugger)
    pub const MAX_FRAME_MS: f32 = 250.0;

    /// Chunk edge length in cells
    pub const CHUNK_SIZE: i32 = 16;
    /// Chunks loaded in each direction around the head chunk
    pub const CHUNK_LOAD_RADIUS: i32 = 2;
    /// Chunks unvisited for this long are evicted
    pub const CHUNK_TIMEOUT_MS: u64 = 10_000;
    /// Eviction sweep cadence
    pub const CHUNK_SWEEP_TICKS: u64 = 60;
    /// Soft cap on loaded chunks (oldest evicted first)
    pub const MAX_LOADED_CHUNKS: usize = 256;

    /// Spawn safety: |x|,|y| below this is always EMPTY
    pub const SPAWN_CLEAR_RADIUS: i32 = 8;
    /// No hazards within this distance of the origin
    pub const HAZARD_SAFE_RADIUS: f64 = 20.0;

    /// Pickups needed per extra segment
    pub const GROWTH_THRESHOLD: u32 = 3;
    pub const INITIAL_SNAKE_LENGTH: usize = 3;
    pub const HEAD_START_LENGTH: usize = 10;
    pub const INITIAL_HEALTH: i32 = 100;
    /// Pending direction changes kept in the input buffer
    pub const INPUT_QUEUE_DEPTH: usize = 2;

    /// Score and combo
    pub const DIRT_POINTS: f32 = 1.0;
    pub const GOLD_POINTS: f32 = 25.0;
    pub const COMBO_WINDOW_TICKS: u32 = 60;
    pub const SCORE_BOOSTER_TICKS: u32 = 3600;

    /// Damage values
    pub const SELF_HIT_DAMAGE: i32 = 20;
    pub const WALL_DAMAGE: i32 = 20;
    pub const LAVA_DAMAGE: i32 = 30;
    pub const MAGMA_DAMAGE: i32 = 3;
    pub const TRAP_DAMAGE: i32 = 15;
    /// Damage reduced per IRON_SCALE level
    pub const ARMOR_PER_LEVEL: i32 = 2;
    pub const BURN_TICKS: u32 = 200;
    /// Burn deals 1 damage every N ticks
    pub const BURN_PERIOD_TICKS: u64 = 5;
    /// Heat/toxic biome damage cadence
    pub const BIOME_DAMAGE_INTERVAL_TICKS: u64 = 50;

    /// Power-ups
    pub const POWERUP_TICKS: u32 = 600;
    pub const HEAL_AMOUNT: i32 = 50;
    /// Health after a PHOENIX_EYE revive
    pub const PHOENIX_REVIVE_HEALTH: i32 = 50;

    /// Highest level a session may start at; later levels reuse its tuning
    pub const MAX_LEVEL: u32 = 999;

    /// Boss
    pub const BOSS_SPAWN_SCORE: u64 = 500;
    pub const BOSS_DEFEAT_BONUS: u64 = 1000;
    pub const BOSS_TELEPORT_DISTANCE: f32 = 18.0;
    pub const BOSS_SPAWN_OFFSET: i32 = 10;
    pub const PATH_ITERATION_BUDGET: usize = 200;

    /// Entity caps (oldest dropped first)
    pub const MAX_PROJECTILES: usize = 64;
    pub const MAX_AOE_ZONES: usize = 16;
    pub const MAX_PARTICLES: usize = 256;
}

/// The four grid neighbours of a cell, in up/down/left/right order
#[inline]
pub fn neighbors(cell: IVec2) -> [IVec2; 4] {
    [
        cell + IVec2::NEG_Y,
        cell + IVec2::Y,
        cell + IVec2::NEG_X,
        cell + IVec2::X,
    ]
}

/// Manhattan distance between two cells
#[inline]
pub fn manhattan(a: IVec2, b: IVec2) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}

/// Cell centre in continuous world units
#[inline]
pub fn cell_center(cell: IVec2) -> Vec2 {
    cell.as_vec2() + Vec2::splat(0.5)
}

/// Squared distance from point `p` to segment `a..b`
pub fn dist_to_segment_sq(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance_squared(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_squared(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan() {
        assert_eq!(manhattan(IVec2::new(1, 2), IVec2::new(-2, 6)), 7);
        assert_eq!(manhattan(IVec2::ZERO, IVec2::ZERO), 0);
    }

    #[test]
    fn test_segment_distance() {
        let d = dist_to_segment_sq(Vec2::new(0.5, 1.0), Vec2::ZERO, Vec2::new(1.0, 0.0));
        assert!((d - 1.0).abs() < 1e-6);
        // Degenerate segment collapses to point distance
        let d = dist_to_segment_sq(Vec2::new(3.0, 4.0), Vec2::ZERO, Vec2::ZERO);
        assert!((d - 25.0).abs() < 1e-6);
    }
}
