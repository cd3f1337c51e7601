//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One grid step per tick
//! - Seeded RNG only (terrain uses a coordinate hash, never the RNG)
//! - Stable iteration order (by entity ID, sorted cells)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod boss;
pub mod collision;
pub mod pathfinding;
pub mod powerups;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod tutorial;
pub mod world;

pub use boss::{damage_boss, try_spawn_boss};
pub use collision::MoveOutcome;
pub use pathfinding::{find_path, next_step, smart_move};
pub use snapshot::{RenderSnapshot, snapshot};
pub use state::{
    AoeZone, Beam, Boss, BossKind, BossPhase, Direction, GameEvent, GamePhase, GameState,
    Particle, PowerUpType, Projectile, Snake,
};
pub use terrain::{BiomeType, BlockType, biome_at, generate, generate_base};
pub use tick::{TickInput, set_paused, tick, tick_interval_ms};
pub use world::{ChunkManager, WorldMap, chunk_of};
