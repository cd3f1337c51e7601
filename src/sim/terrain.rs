//! Procedural terrain
//!
//! Pure function of (x, y, level): a coordinate hash decides walls on a sparse
//! sub-grid, continuous trig noise gated by biome decides hazard pools. The
//! only state consulted is the world overlay, which always wins.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::world::WorldMap;
use crate::consts::{HAZARD_SAFE_RADIUS, SPAWN_CLEAR_RADIUS};
use crate::tuning;

/// Terrain and item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockType {
    #[default]
    Empty,
    /// Common pickup
    Dirt,
    /// Rare pickup, higher value
    Gold,
    /// Breakable obstacle, damages on contact
    Stone,
    /// Indestructible, fatal on contact
    Bedrock,
    /// Heavy damage plus burn
    Lava,
    /// Minor damage
    Magma,
    /// Slows the tick, no damage
    Ice,
    /// Damage plus shrink
    Trap,
    /// Random power-up
    PowerupBox,
    /// Reserved
    Event,
}

impl BlockType {
    /// Solid for movement and pathfinding
    pub fn is_solid(&self) -> bool {
        matches!(self, BlockType::Stone | BlockType::Bedrock)
    }

    /// Placed by the spawner, counted against the item cap
    pub fn is_item(&self) -> bool {
        matches!(
            self,
            BlockType::Dirt | BlockType::Gold | BlockType::PowerupBox
        )
    }

    /// 0xRRGGBB tint used for particle bursts
    pub fn color(&self) -> u32 {
        match self {
            BlockType::Empty => 0x000000,
            BlockType::Dirt => 0x5d4037,
            BlockType::Gold => 0xffd700,
            BlockType::Stone => 0x546e7a,
            BlockType::Bedrock => 0x263238,
            BlockType::Lava => 0xd32f2f,
            BlockType::Magma => 0xe65100,
            BlockType::Ice => 0x81d4fa,
            BlockType::Trap => 0x424242,
            BlockType::PowerupBox => 0xab47bc,
            BlockType::Event => 0xffffff,
        }
    }
}

/// Biomes are concentric rings around the origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiomeType {
    Grassland,
    Desert,
    Tundra,
    ObsidianWaste,
}

impl BiomeType {
    /// Environmental damage applied periodically while inside the biome
    pub fn environment_damage(&self) -> i32 {
        match self {
            BiomeType::Desert => 2,
            BiomeType::ObsidianWaste => 3,
            BiomeType::Grassland | BiomeType::Tundra => 0,
        }
    }
}

/// Deterministic value in [0, 1) for a cell
#[inline]
pub fn pseudo_random(x: i32, y: i32) -> f64 {
    let n = (x as f64 * 12.9898 + y as f64 * 78.233).sin() * 43758.5453123;
    n - n.floor()
}

/// Biome for a cell (tutorial is all grassland)
pub fn biome_at(cell: IVec2, tutorial: bool) -> BiomeType {
    if tutorial {
        return BiomeType::Grassland;
    }
    let dist = cell.as_dvec2().length();
    if dist < 150.0 {
        BiomeType::Grassland
    } else if dist < 400.0 {
        BiomeType::Desert
    } else if dist < 800.0 {
        BiomeType::Tundra
    } else {
        BiomeType::ObsidianWaste
    }
}

/// Block at `cell`, consulting the overlay first
pub fn generate(cell: IVec2, level: u32, tutorial: bool, overrides: &WorldMap) -> BlockType {
    match overrides.get(cell) {
        Some(block) => block,
        None => generate_base(cell, level, tutorial),
    }
}

/// Block the generator produces for `cell`, ignoring every mutation
pub fn generate_base(cell: IVec2, level: u32, tutorial: bool) -> BlockType {
    if tutorial {
        return BlockType::Empty;
    }

    let (x, y) = (cell.x, cell.y);
    if x.abs() < SPAWN_CLEAR_RADIUS && y.abs() < SPAWN_CLEAR_RADIUS {
        return BlockType::Empty;
    }

    if let Some(block) = starter_pool(x, y) {
        return block;
    }

    let biome = biome_at(cell, tutorial);
    let roll = pseudo_random(x, y);

    // Walls only on even/even cells so corridors always exist between them
    let grid_point = x.rem_euclid(2) == 0 && y.rem_euclid(2) == 0;
    if grid_point {
        let freq = tuning::wall_frequency(level) * 4.0;
        if roll < freq {
            if biome == BiomeType::ObsidianWaste && roll < freq * 0.2 {
                return BlockType::Bedrock;
            }
            return BlockType::Stone;
        }
    }

    let dist = cell.as_dvec2().length();
    let outside_safe = dist > HAZARD_SAFE_RADIUS;
    let (xf, yf) = (x as f64, y as f64);

    match biome {
        BiomeType::Grassland | BiomeType::ObsidianWaste => {
            let scale = 0.08;
            let organic = (xf * scale).sin()
                + (yf * scale * 0.9).cos()
                + ((xf * 0.5 + yf * 0.5) * scale).sin() * 0.5;
            let magma_ring = (xf * 0.02).sin() + (yf * 0.02).cos() > 0.7;
            let (lava_threshold, magma_threshold) = if biome == BiomeType::Grassland {
                (2.6, 2.45)
            } else {
                (1.0, 0.9)
            };
            if outside_safe {
                if organic > lava_threshold {
                    return BlockType::Lava;
                }
                if organic > magma_threshold && magma_ring {
                    return BlockType::Magma;
                }
            }
        }
        BiomeType::Tundra => {
            if (xf * 0.2).cos() + (yf * 0.2).sin() > 0.8 {
                return BlockType::Ice;
            }
        }
        BiomeType::Desert => {
            if (xf * 0.15).sin() + (yf * 0.15).cos() > 1.5 && outside_safe {
                return BlockType::Trap;
            }
        }
    }

    BlockType::Empty
}

/// Fixed lava splat (eyes and mouth left open, magma rim) near spawn
fn starter_pool(x: i32, y: i32) -> Option<BlockType> {
    let dx = (x - 14) as f64;
    let dy = (y - 4) as f64;

    let body = dx * dx + dy * dy * 0.9;
    let in_blob = body < 16.0;
    let left_eye = (dx + 1.5).abs() < 0.6 && (dy + 1.0).abs() < 0.6;
    let right_eye = (dx - 1.5).abs() < 0.6 && (dy + 1.0).abs() < 0.6;
    let mouth = dx.abs() < 1.5 && (dy - 2.0).abs() < 0.8;
    let drip = dx * dx * 4.0 + (dy - 5.5) * (dy - 5.5) < 3.0;

    if (in_blob && !left_eye && !right_eye && !mouth) || drip {
        if body > 12.0 && body < 16.0 {
            return Some(BlockType::Magma);
        }
        return Some(BlockType::Lava);
    }
    None
}
