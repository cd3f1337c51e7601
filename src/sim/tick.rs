//! Fixed timestep simulation tick
//!
//! Advances the run by one grid step. The interval between ticks depends on
//! the state (speed boost, ice, tundra) and is reported by `tick_interval_ms`.

use serde::{Deserialize, Serialize};

use super::autopilot;
use super::boss::{try_spawn_boss, update_aoe_zones, update_boss, update_projectiles};
use super::collision::{MoveOutcome, apply_magnet, resolve_move};
use super::powerups::{advance_power_timer, apply_power_effects, fire_laser, update_beams};
use super::spawner::update_spawner;
use super::state::{Direction, GameEvent, GamePhase, GameState, PowerUpType};
use super::terrain::{BiomeType, BlockType, biome_at};
use super::tutorial::update_tutorial;
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Fire the laser (ability key)
    pub ability: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Milliseconds until the next tick for the current state
pub fn tick_interval_ms(state: &GameState) -> u32 {
    if state.has_power(PowerUpType::SpeedBoost) {
        return TICK_MS_SPEED_BOOST;
    }
    let head = state.snake.head();
    if state.block_at(head) == BlockType::Ice {
        return TICK_MS_ICE;
    }
    if biome_at(head, state.tutorial) == BiomeType::Tundra {
        return TICK_MS_TUNDRA;
    }
    TICK_MS
}

/// Enter or leave the paused state. Pausing drops buffered turns.
/// Returns whether the phase changed.
pub fn set_paused(state: &mut GameState, paused: bool) -> bool {
    match (state.phase, paused) {
        (GamePhase::Playing, true) => {
            state.phase = GamePhase::Paused;
            state.input_queue.clear();
            log::debug!("Paused at tick {}", state.time_ticks);
            true
        }
        (GamePhase::Paused, false) => {
            state.phase = GamePhase::Playing;
            log::debug!("Resumed at tick {}", state.time_ticks);
            true
        }
        _ => false,
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Handle pause toggle
    if input.pause {
        let paused = state.phase == GamePhase::Playing;
        set_paused(state, paused);
        if paused {
            return;
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    let mut input = *input;
    if input.idle_mode {
        autopilot::drive(state);
        input.ability |= autopilot::wants_laser(state);
    }

    // The tutorial holds still until the first direction input
    if !state.started {
        return;
    }

    // A bounced snake is frozen until a turn picks a way out
    if state.stunned {
        if !state.input_queue.is_empty() {
            recover_from_stun(state);
        }
        return;
    }

    state.time_ticks += 1;
    state.time_ms += tick_interval_ms(state) as u64;

    if input.ability {
        fire_laser(state);
    }

    apply_burn(state);
    apply_environment(state);

    // Move
    if let Some(dir) = state.input_queue.pop_front() {
        state.snake.direction = dir;
    }
    let candidate = state.snake.head() + state.snake.direction.delta();
    match resolve_move(state, candidate) {
        MoveOutcome::Moved => {
            let grow = state.snake.growth_bucket >= GROWTH_THRESHOLD;
            if grow {
                state.snake.growth_bucket -= GROWTH_THRESHOLD;
            }
            state.snake.advance(candidate, grow);
            apply_magnet(state);
        }
        MoveOutcome::Blocked | MoveOutcome::Fatal => state.snake.hold(),
    }

    update_tutorial(state);
    update_spawner(state);
    manage_chunks(state);

    // Enemies; TIME_FREEZE lets them act on even ticks only
    let frozen = state.has_power(PowerUpType::TimeFreeze) && state.time_ticks % 2 == 1;
    if !frozen {
        update_boss(state);
        update_projectiles(state);
        update_aoe_zones(state);
    }
    try_spawn_boss(state);

    apply_power_effects(state);
    update_particles(state);
    update_beams(state);

    // Timers
    if state.combo_timer > 0 {
        state.combo_timer -= 1;
    } else {
        state.combo = 0;
    }
    advance_power_timer(state);
    state.score_booster_ticks = state.score_booster_ticks.saturating_sub(1);

    check_death(state);
    state.normalize_order();
}

/// Turn out of a wall bounce: an open perpendicular side, else reverse
fn recover_from_stun(state: &mut GameState) {
    let head = state.snake.head();
    let heading = state.snake.direction;
    let open = heading
        .perpendicular()
        .into_iter()
        .find(|d| !state.block_at(head + d.delta()).is_solid());
    let dir: Direction = open.unwrap_or(heading.opposite());

    log::debug!("Stun recovery: {:?} -> {:?}", heading, dir);
    state.snake.direction = dir;
    state.input_queue.clear();
    state.stunned = false;
}

/// LAVA burn: 1 damage every `BURN_PERIOD_TICKS` while the timer runs
fn apply_burn(state: &mut GameState) {
    if state.burn_ticks == 0 {
        return;
    }
    if state.time_ticks % BURN_PERIOD_TICKS == 0 {
        state.damage_player(1);
    }
    state.burn_ticks -= 1;
}

/// Heat and toxic biomes chip away at health
pub(crate) fn apply_environment(state: &mut GameState) {
    if state.tutorial || state.time_ticks % BIOME_DAMAGE_INTERVAL_TICKS != 0 {
        return;
    }
    if state.has_power(PowerUpType::GhostShield) || state.has_power(PowerUpType::MistWings) {
        return;
    }
    let damage = biome_at(state.snake.head(), false).environment_damage();
    if damage > 0 {
        state.damage_player(damage);
    }
}

/// Keep chunks around the head loaded; evict stale ones periodically
fn manage_chunks(state: &mut GameState) {
    let head = state.snake.head();
    let loaded = state
        .chunks
        .update(head, state.time_ms, state.level, state.tutorial);
    if loaded > 0 {
        log::trace!("Loaded {} chunks around ({}, {})", loaded, head.x, head.y);
    }
    if state.time_ticks % CHUNK_SWEEP_TICKS == 0 {
        state.chunks.sweep(head, state.time_ms, &mut state.world);
    }
}

fn update_particles(state: &mut GameState) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel *= 0.9;
        particle.life -= 0.05;
    }
    state.particles.retain(|p| p.life > 0.0);
}

/// Health at zero ends the run unless PHOENIX_EYE burns to revive
fn check_death(state: &mut GameState) {
    if state.health > 0 || state.phase == GamePhase::GameOver {
        return;
    }
    if state.has_power(PowerUpType::PhoenixEye) {
        log::info!("PHOENIX_EYE revive at tick {}", state.time_ticks);
        state.health = PHOENIX_REVIVE_HEALTH;
        state.active_power = PowerUpType::None;
        state.power_timer = 0;
        state.burn_ticks = 0;
        let head = state.snake.head();
        state.emit_particles(head, 0xff5722, 20);
        return;
    }

    state.health = 0;
    state.phase = GamePhase::GameOver;
    state.input_queue.clear();
    state.push_event(GameEvent::GameOver { score: state.score });
    log::info!(
        "Game over: score {}, level {}, bosses defeated {}, tick {}",
        state.score,
        state.level,
        state.bosses_defeated,
        state.time_ticks
    );
}
