//! Collision response for the snake head
//!
//! Resolves a candidate head cell against the body and the terrain: scoring,
//! damage, wall bounces and power-up boxes. The tick engine commits (or
//! withholds) the move based on the returned outcome.

use glam::IVec2;

use super::powerups::{HARVEST_HEAL, claw_area, grant_power_up, roll_power_up};
use super::state::{GameEvent, GameState, PowerUpType};
use super::terrain::BlockType;
use crate::consts::*;

/// What happened when the head tried to enter a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Move proceeds
    Moved,
    /// Wall bounce: head stays put, snake stunned
    Blocked,
    /// Unrecoverable crash (health zeroed)
    Fatal,
}

/// Score multiplier from the booster consumable and SHADOW_TRACE
pub fn score_multiplier(state: &GameState) -> f32 {
    let mut mult = 1.0;
    if state.score_booster_ticks > 0 {
        mult *= 2.0;
    }
    if state.has_power(PowerUpType::ShadowTrace) {
        mult *= 2.0;
    }
    mult
}

/// Eat a DIRT or GOLD cell: score with combo and greed, fill the growth
/// bucket, consume the block. Other blocks are ignored.
pub fn collect_pickup(state: &mut GameState, cell: IVec2, block: BlockType) -> bool {
    let (base, growth, burst) = match block {
        BlockType::Dirt => (DIRT_POINTS, 1, 5),
        BlockType::Gold => (GOLD_POINTS, 2, 8),
        _ => return false,
    };
    let greed = state.config.upgrades.greed_bonus();
    let points = ((base + state.combo as f32 + greed) * score_multiplier(state)).floor();
    state.score += points as u64;
    state.combo += 1;
    state.combo_timer = COMBO_WINDOW_TICKS;
    state.snake.growth_bucket += growth;
    if state.has_power(PowerUpType::LunarHarvest) {
        state.heal(HARVEST_HEAL);
    }
    state.clear_cell(cell);
    state.emit_particles(cell, block.color(), burst);
    state.push_event(GameEvent::Eat);
    true
}

/// Resolve the head entering `cell`
pub fn resolve_move(state: &mut GameState, cell: IVec2) -> MoveOutcome {
    check_self_collision(state, cell);

    let block = state.block_at(cell);
    let flying = state.has_power(PowerUpType::MistWings);
    let shielded = state.has_power(PowerUpType::GhostShield);

    match block {
        BlockType::Empty | BlockType::Ice | BlockType::Event => MoveOutcome::Moved,

        BlockType::Dirt | BlockType::Gold => {
            collect_pickup(state, cell, block);
            MoveOutcome::Moved
        }

        BlockType::Stone => {
            if flying {
                MoveOutcome::Moved
            } else if shielded {
                break_wall(state, cell);
                MoveOutcome::Moved
            } else if state.has_power(PowerUpType::FuryClaws) {
                for c in claw_area(cell) {
                    if state.block_at(c) == BlockType::Stone {
                        break_wall(state, c);
                    }
                }
                MoveOutcome::Moved
            } else {
                bounce(state)
            }
        }

        BlockType::Bedrock => {
            if flying || shielded {
                MoveOutcome::Moved
            } else if state.tutorial {
                bounce(state)
            } else {
                log::info!("Crashed into bedrock at ({}, {})", cell.x, cell.y);
                state.health = 0;
                state.push_event(GameEvent::Damage);
                MoveOutcome::Fatal
            }
        }

        BlockType::Lava => {
            if !flying && !state.tutorial {
                state.damage_player(LAVA_DAMAGE);
                state.burn_ticks = BURN_TICKS;
            }
            MoveOutcome::Moved
        }

        BlockType::Magma => {
            if !flying {
                state.damage_player(MAGMA_DAMAGE);
            }
            MoveOutcome::Moved
        }

        BlockType::Trap => {
            let damage = state.config.upgrades.armored(TRAP_DAMAGE);
            state.damage_player(damage);
            let min_len = state.config.start_length();
            state.snake.shrink(min_len);
            state.clear_cell(cell);
            MoveOutcome::Moved
        }

        BlockType::PowerupBox => {
            let power = roll_power_up(state);
            grant_power_up(state, power);
            state.clear_cell(cell);
            state.emit_particles(cell, block.color(), 10);
            MoveOutcome::Moved
        }
    }
}

/// Damage-only self collision; GHOST_SHIELD ignores it
fn check_self_collision(state: &mut GameState, cell: IVec2) {
    let growing = state.snake.growth_bucket >= GROWTH_THRESHOLD;
    if state.snake.hits_body(cell, growing) && !state.has_power(PowerUpType::GhostShield) {
        state.damage_player(SELF_HIT_DAMAGE);
    }
}

fn break_wall(state: &mut GameState, cell: IVec2) {
    state.clear_cell(cell);
    state.emit_particles(cell, BlockType::Stone.color(), 8);
    state.push_event(GameEvent::Break);
}

/// Wall bounce: armored damage, stun, and drop any buffered turns
fn bounce(state: &mut GameState) -> MoveOutcome {
    let damage = state.config.upgrades.armored(WALL_DAMAGE);
    state.damage_player(damage);
    state.stunned = true;
    state.input_queue.clear();
    MoveOutcome::Blocked
}

/// MAGNET: pull DIRT/GOLD within Chebyshev range of the head
pub fn apply_magnet(state: &mut GameState) {
    let range = state.config.upgrades.magnet as i32;
    if range == 0 {
        return;
    }
    let head = state.snake.head();
    for dy in -range..=range {
        for dx in -range..=range {
            if dx == 0 && dy == 0 {
                continue;
            }
            let cell = head + IVec2::new(dx, dy);
            let block = state.block_at(cell);
            if matches!(block, BlockType::Dirt | BlockType::Gold) {
                collect_pickup(state, cell, block);
            }
        }
    }
}
