//! Per-level game balance
//!
//! Levels cycle through the five boss archetypes; every full cycle raises a
//! tier, which bumps wall density, boss hp and boss damage.

use serde::{Deserialize, Serialize};

use crate::consts::{BOSS_SPAWN_SCORE, MAX_LEVEL};
use crate::sim::BossKind;

/// Boss archetypes in level order
pub const BOSS_ROTATION: [BossKind; 5] = [
    BossKind::Golem,
    BossKind::CyberWorm,
    BossKind::PumpkinKing,
    BossKind::Shadow,
    BossKind::Phoenix,
];

const LEVEL_NAMES: [&str; 5] = [
    "Grasslands",
    "Neon City",
    "Haunted Manor",
    "Crystal Planet",
    "Nether Core",
];

/// Difficulty parameters for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level: u32,
    /// Full cycles through the boss rotation (0-based tier)
    pub tier: u32,
    pub name: String,
    /// Probability that a sparse-grid cell holds a wall (before the 4x grid factor)
    pub wall_frequency: f64,
    pub boss_kind: BossKind,
    pub boss_hp: i32,
    pub boss_damage_multiplier: f32,
    /// Score needed within this level before the boss appears
    pub boss_spawn_score: u64,
}

/// (rotation index, tier) for a 1-based level
fn rotation(level: u32) -> (usize, u32) {
    let level = level.max(1);
    let len = BOSS_ROTATION.len() as u32;
    (((level - 1) % len) as usize, (level - 1) / len)
}

/// Wall density for `level`; the terrain hot path calls this per cell
pub fn wall_frequency(level: u32) -> f64 {
    let (index, tier) = rotation(level);
    (0.04 + tier as f64 * 0.015 + index as f64 * 0.01).min(0.20)
}

/// Tuning for `level` (1-based; 0 is treated as 1, and anything past
/// `MAX_LEVEL` as `MAX_LEVEL`)
pub fn level_config(level: u32) -> LevelConfig {
    let level = level.clamp(1, MAX_LEVEL);
    let (index, tier) = rotation(level);

    let wall_frequency = wall_frequency(level);

    let name = if tier > 0 {
        format!("{} (Tier {})", LEVEL_NAMES[index], tier + 1)
    } else {
        LEVEL_NAMES[index].to_string()
    };

    LevelConfig {
        level,
        tier,
        name,
        wall_frequency,
        boss_kind: BOSS_ROTATION[index],
        boss_hp: 200 + level as i32 * 50 + tier as i32 * 100,
        boss_damage_multiplier: 1.0 + tier as f32 * 0.2,
        boss_spawn_score: BOSS_SPAWN_SCORE + (level as u64 - 1) * 200,
    }
}
