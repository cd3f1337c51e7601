//! Power-up lifecycle and the laser ability

use glam::IVec2;
use rand::Rng;

use super::boss::damage_boss;
use super::state::{Beam, GameEvent, GameState, PowerUpType};
use super::terrain::BlockType;
use crate::cell_center;
use crate::consts::*;

/// Cells a laser beam can travel
pub const LASER_RANGE: i32 = 15;
pub const LASER_DAMAGE: i32 = 20;
pub const LASER_COOLDOWN_TICKS: u32 = 10;
/// Score for every pickup or trap the beam destroys
const LASER_ITEM_POINTS: u64 = 5;

/// ECHO_BOMB pulse cadence, reach and damage
const ECHO_PULSE_TICKS: u64 = 30;
const ECHO_RADIUS: i32 = 6;
const ECHO_DAMAGE: i32 = 15;
/// DRAGON_HEART heals 1 every N ticks
const REGEN_PERIOD_TICKS: u64 = 10;
/// LUNAR_HARVEST heal per pickup
pub const HARVEST_HEAL: i32 = 2;

/// Roll a power-up for an opened box. Tutorial boxes always hold the laser.
pub fn roll_power_up(state: &mut GameState) -> PowerUpType {
    if state.tutorial {
        return PowerUpType::LaserEyes;
    }
    let index = state.rng.random_range(0..PowerUpType::CATALOG.len());
    PowerUpType::CATALOG[index]
}

/// Apply a power-up. HEAL is instant; everything else replaces the active
/// power with a fresh timer scaled by EXTENDED_POWER.
pub fn grant_power_up(state: &mut GameState, power: PowerUpType) {
    match power {
        PowerUpType::None => return,
        PowerUpType::Heal => state.heal(HEAL_AMOUNT),
        _ => {
            let factor = state.config.upgrades.power_duration_factor();
            state.active_power = power;
            state.power_timer = (POWERUP_TICKS as f32 * factor) as u32;
        }
    }
    log::debug!("Power-up {} ({} ticks)", power.as_str(), state.power_timer);
    state.push_event(GameEvent::PowerUp(power));
}

/// Count the active power down; once it sits at zero it expires.
/// The tutorial never runs the timer down.
pub fn advance_power_timer(state: &mut GameState) {
    if state.power_timer > 0 {
        if !state.tutorial {
            state.power_timer -= 1;
        }
    } else if state.active_power != PowerUpType::None {
        log::debug!("Power-up {} expired", state.active_power.as_str());
        state.active_power = PowerUpType::None;
    }
}

/// Per-tick effects of the active power (pulses, regeneration)
pub fn apply_power_effects(state: &mut GameState) {
    match state.active_power {
        PowerUpType::EchoBomb => {
            if state.time_ticks % ECHO_PULSE_TICKS != 0 {
                return;
            }
            let head = state.snake.head();
            let in_range = state.boss.as_ref().is_some_and(|boss| {
                let d = (boss.pos - head).abs();
                d.x.max(d.y) <= ECHO_RADIUS
            });
            state.emit_particles(head, 0x4fc3f7, 12);
            if in_range {
                damage_boss(state, ECHO_DAMAGE);
            }
        }
        PowerUpType::DragonHeart => {
            if state.time_ticks % REGEN_PERIOD_TICKS == 0 {
                state.heal(1);
            }
        }
        _ => {}
    }
}

/// Whether the ability signal should fire a beam right now
pub fn laser_ready(state: &GameState) -> bool {
    let armed = state.has_power(PowerUpType::LaserEyes)
        || (state.tutorial && state.tutorial_step == super::tutorial::LASER_STEP);
    armed && state.laser_cooldown == 0
}

/// Cast a beam along the heading. Stops at BEDROCK and at the boss, breaks
/// STONE and destroys pickups and traps on the way. Returns the beam length
/// in cells, or `None` if the laser is not available.
pub fn fire_laser(state: &mut GameState) -> Option<i32> {
    if !laser_ready(state) {
        return None;
    }
    state.laser_cooldown = LASER_COOLDOWN_TICKS;
    state.push_event(GameEvent::Laser);

    let head = state.snake.head();
    let step = state.snake.direction.delta();
    let damage = if state.has_power(PowerUpType::ShadowTrace) {
        LASER_DAMAGE * 2
    } else {
        LASER_DAMAGE
    };

    let mut length = 0;
    for i in 1..=LASER_RANGE {
        let cell = head + step * i;
        let block = state.block_at(cell);
        if block == BlockType::Bedrock {
            break;
        }
        length = i;

        match block {
            BlockType::Stone => {
                state.clear_cell(cell);
                state.emit_particles(cell, block.color(), 8);
                state.push_event(GameEvent::Break);
                state.score += LASER_ITEM_POINTS;
            }
            BlockType::Dirt | BlockType::Gold | BlockType::PowerupBox | BlockType::Trap => {
                state.clear_cell(cell);
                state.emit_particles(cell, block.color(), 6);
                state.score += LASER_ITEM_POINTS;
            }
            _ => {}
        }

        let hits_boss = state.boss.as_ref().is_some_and(|boss| {
            let d = (boss.pos - cell).abs();
            d.x.max(d.y) <= 1
        });
        if hits_boss {
            state.emit_particles(cell, 0xffa500, 5);
            damage_boss(state, damage);
            break;
        }
    }

    state.beams.push(Beam {
        from: cell_center(head),
        to: cell_center(head + step * length),
        life: 1.0,
    });
    Some(length)
}

/// Fade beams and tick the laser cooldown
pub fn update_beams(state: &mut GameState) {
    state.laser_cooldown = state.laser_cooldown.saturating_sub(1);
    for beam in &mut state.beams {
        beam.life -= 0.1;
    }
    state.beams.retain(|b| b.life > 0.0);
}

/// Cells broken by FURY_CLAWS around an impact
pub fn claw_area(center: IVec2) -> impl Iterator<Item = IVec2> {
    (-1..=1).flat_map(move |dy| (-1..=1).map(move |dx| center + IVec2::new(dx, dy)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::sim::state::{Boss, BossKind};

    fn state() -> GameState {
        GameState::new(SessionConfig::default())
    }

    #[test]
    fn test_heal_is_instant_and_capped() {
        let mut s = state();
        s.health = 70;
        grant_power_up(&mut s, PowerUpType::Heal);
        assert_eq!(s.health, INITIAL_HEALTH);
        assert_eq!(s.active_power, PowerUpType::None);
        assert_eq!(s.power_timer, 0);
    }

    #[test]
    fn test_duration_scales_with_extended_power() {
        let mut cfg = SessionConfig::default();
        cfg.upgrades.extended_power = 5;
        let mut s = GameState::new(cfg);
        grant_power_up(&mut s, PowerUpType::SpeedBoost);
        assert_eq!(s.active_power, PowerUpType::SpeedBoost);
        assert_eq!(s.power_timer, 1200);
    }

    #[test]
    fn test_timer_expiry_takes_a_tick_at_zero() {
        let mut s = state();
        s.active_power = PowerUpType::SpeedBoost;
        s.power_timer = 1;
        advance_power_timer(&mut s);
        assert_eq!(s.power_timer, 0);
        assert_eq!(s.active_power, PowerUpType::SpeedBoost);
        advance_power_timer(&mut s);
        assert_eq!(s.active_power, PowerUpType::None);
    }

    #[test]
    fn test_tutorial_timer_frozen() {
        let mut s = GameState::new(SessionConfig {
            tutorial: true,
            ..Default::default()
        });
        let power = roll_power_up(&mut s);
        grant_power_up(&mut s, power);
        assert_eq!(s.active_power, PowerUpType::LaserEyes);
        let before = s.power_timer;
        advance_power_timer(&mut s);
        assert_eq!(s.power_timer, before);
    }

    #[test]
    fn test_laser_requires_power() {
        let mut s = state();
        assert_eq!(fire_laser(&mut s), None);
        s.active_power = PowerUpType::LaserEyes;
        s.power_timer = 100;
        assert_eq!(fire_laser(&mut s), Some(LASER_RANGE));
        // Cooldown
        assert_eq!(fire_laser(&mut s), None);
    }

    #[test]
    fn test_laser_breaks_stone_and_stops_at_bedrock() {
        let mut s = state();
        s.active_power = PowerUpType::LaserEyes;
        s.power_timer = 100;
        s.set_block(IVec2::new(2, 0), BlockType::Stone);
        s.set_block(IVec2::new(3, 0), BlockType::Dirt);
        s.set_block(IVec2::new(5, 0), BlockType::Bedrock);
        let len = fire_laser(&mut s).unwrap();
        assert_eq!(len, 4);
        assert_eq!(s.block_at(IVec2::new(2, 0)), BlockType::Empty);
        assert_eq!(s.block_at(IVec2::new(3, 0)), BlockType::Empty);
        assert_eq!(s.block_at(IVec2::new(5, 0)), BlockType::Bedrock);
        assert_eq!(s.score, 10);
        assert_eq!(s.beams.len(), 1);
    }

    #[test]
    fn test_laser_hits_boss() {
        let mut s = state();
        s.active_power = PowerUpType::LaserEyes;
        s.power_timer = 100;
        s.boss = Some(Boss::new(BossKind::Golem, IVec2::new(6, 1), 250, 1.0));
        let len = fire_laser(&mut s).unwrap();
        assert_eq!(len, 5);
        assert_eq!(s.boss.as_ref().unwrap().hp, 250 - LASER_DAMAGE);
    }

    #[test]
    fn test_echo_bomb_pulses_nearby_boss() {
        let mut s = state();
        s.active_power = PowerUpType::EchoBomb;
        s.boss = Some(Boss::new(BossKind::Golem, IVec2::new(4, 4), 250, 1.0));
        s.time_ticks = ECHO_PULSE_TICKS;
        apply_power_effects(&mut s);
        assert_eq!(s.boss.as_ref().unwrap().hp, 250 - ECHO_DAMAGE);
    }

    #[test]
    fn test_claw_area_is_three_by_three() {
        let cells: Vec<_> = claw_area(IVec2::new(4, 4)).collect();
        assert_eq!(cells.len(), 9);
        assert!(cells.contains(&IVec2::new(3, 3)));
        assert!(cells.contains(&IVec2::new(5, 5)));
    }
}
