//! Boss lifecycle and AI
//!
//! Spawn on the level's score threshold, an attack-roll state machine
//! (projectile / charge-and-burst / trap summon), A*-driven chase with a
//! teleport leash, and the projectiles and zones it leaves behind.

use glam::{IVec2, Vec2};
use rand::Rng;

use super::pathfinding::next_step;
use super::state::{AoeZone, Boss, BossKind, BossPhase, GameEvent, GameState, Projectile};
use super::terrain::BlockType;
use crate::consts::*;
use crate::{cell_center, dist_to_segment_sq};

/// Squared hit radius of a projectile against the head centre
const PROJECTILE_HIT_RADIUS_SQ: f32 = 0.64;
/// Projectiles this far from the head on either axis are culled
const PROJECTILE_CULL_DISTANCE: f32 = 30.0;
const PROJECTILE_BASE_DAMAGE: f32 = 20.0;
const CONTACT_DAMAGE: f32 = 5.0;
const CHARGE_TICKS: u32 = 30;
/// Rest between the end of a cooldown and the next attack roll
pub const IDLE_TICKS: u32 = 10;
const PHOENIX_SPREAD: f32 = 0.3;

/// Spawn the level's boss once enough score was earned this level.
/// Never in the tutorial and never while a boss is alive.
pub fn try_spawn_boss(state: &mut GameState) -> bool {
    if state.tutorial || state.boss.is_some() {
        return false;
    }
    let cfg = &state.level_config;
    if state.level_score() < cfg.boss_spawn_score {
        return false;
    }

    let pos = state.snake.head() + IVec2::splat(BOSS_SPAWN_OFFSET);
    let boss = Boss::new(cfg.boss_kind, pos, cfg.boss_hp, cfg.boss_damage_multiplier);
    log::info!(
        "Boss {} spawned at ({}, {}) with {} hp (level {})",
        boss.kind.as_str(),
        pos.x,
        pos.y,
        boss.hp,
        state.level
    );
    state.push_event(GameEvent::BossSpawn(boss.kind));
    state.boss = Some(boss);
    true
}

/// Hurt the boss. On defeat the bonus is paid exactly once, the boss and all
/// of its projectiles and zones are cleared, and the level advances.
/// Returns whether this hit defeated it.
pub fn damage_boss(state: &mut GameState, amount: i32) -> bool {
    let Some(boss) = state.boss.as_mut() else {
        return false;
    };
    boss.hp -= amount;
    let defeated = boss.hp <= 0;
    let pos = boss.pos;
    let kind = boss.kind;
    state.push_event(GameEvent::BossHit);

    if defeated {
        state.boss = None;
        state.projectiles.clear();
        state.aoe_zones.clear();
        state.score += BOSS_DEFEAT_BONUS;
        state.bosses_defeated += 1;
        state.emit_particles(pos, kind.color(), 30);
        state.push_event(GameEvent::BossDefeated {
            bonus: BOSS_DEFEAT_BONUS,
        });
        log::info!(
            "Boss {} defeated, +{} (score {})",
            kind.as_str(),
            BOSS_DEFEAT_BONUS,
            state.score
        );
        advance_level(state);
    }
    defeated
}

/// Move on to the next level; the boss threshold counts from here
pub fn advance_level(state: &mut GameState) {
    state.level += 1;
    state.level_config = crate::tuning::level_config(state.level);
    state.level_score_base = state.score;
    state.push_event(GameEvent::LevelUp(state.level));
    log::info!("Level {}: {}", state.level, state.level_config.name);
}

/// One tick of boss AI: attack state machine, movement, contact damage
pub fn update_boss(state: &mut GameState) {
    let Some(mut boss) = state.boss.take() else {
        return;
    };
    let head = state.snake.head();

    boss.attack_timer = boss.attack_timer.saturating_sub(1);
    match boss.phase {
        BossPhase::Attack => boss.phase = BossPhase::Cooldown,
        BossPhase::Cooldown if boss.attack_timer == 0 => {
            boss.phase = BossPhase::Idle;
            boss.attack_timer = IDLE_TICKS;
        }
        _ => {}
    }
    let enraged = boss.is_enraged();

    if boss.phase == BossPhase::Charging {
        // Rooted while charging; bursts when the wind-up ends
        if boss.attack_timer == 0 {
            state.aoe_zones.push(AoeZone {
                pos: cell_center(boss.pos),
                radius: 1.0,
                max_radius: if enraged { 10.0 } else { 7.0 },
                growth: 0.3,
                damage: (2.0 * boss.damage_multiplier) as i32,
                opacity: 0.8,
                color: 0xff0000,
            });
            if state.aoe_zones.len() > MAX_AOE_ZONES {
                state.aoe_zones.remove(0);
            }
            state.push_event(GameEvent::Break);
            boss.phase = BossPhase::Attack;
            boss.attack_timer = 80;
        }
        ease_visual(&mut boss);
        state.boss = Some(boss);
        return;
    }

    if boss.phase == BossPhase::Idle && boss.attack_timer == 0 {
        roll_attack(state, &mut boss, head, enraged);
    }

    if boss.phase != BossPhase::Charging {
        let interval = boss.kind.move_interval(enraged) as u64;
        if state.time_ticks % interval == 0 {
            move_boss(state, &mut boss, head);
        }
    }

    let d = (boss.pos - head).abs();
    if d.x <= 1 && d.y <= 1 {
        state.damage_player((CONTACT_DAMAGE * boss.damage_multiplier) as i32);
    }

    ease_visual(&mut boss);
    state.boss = Some(boss);
}

fn roll_attack(state: &mut GameState, boss: &mut Boss, head: IVec2, enraged: bool) {
    let roll: f32 = state.rng.random();

    if roll < 0.4 {
        fire_projectiles(state, boss, head, enraged);
        boss.phase = BossPhase::Attack;
        boss.attack_timer = if enraged { 40 } else { 60 };
    } else if roll < 0.7 && enraged {
        boss.phase = BossPhase::Charging;
        boss.attack_timer = CHARGE_TICKS;
    } else {
        let count = if enraged { 4 } else { 2 };
        for _ in 0..count {
            let offset = IVec2::new(
                state.rng.random_range(-4..4),
                state.rng.random_range(-4..4),
            );
            // Never directly on or beside the head
            if offset.x.abs() <= 1 && offset.y.abs() <= 1 {
                continue;
            }
            let cell = head + offset;
            if state.block_at(cell) == BlockType::Empty {
                state.set_block(cell, BlockType::Trap);
            }
        }
        boss.phase = BossPhase::Attack;
        boss.attack_timer = 50;
    }
}

fn fire_projectiles(state: &mut GameState, boss: &Boss, head: IVec2, enraged: bool) {
    let origin = cell_center(boss.pos);
    let aim = cell_center(head) - origin;
    let base_angle = aim.y.atan2(aim.x);
    let speed = boss.kind.projectile_speed() * if enraged { 1.75 } else { 1.0 };
    let damage =
        (PROJECTILE_BASE_DAMAGE * boss.damage_multiplier * boss.kind.projectile_factor()) as i32;
    let color = if enraged { 0xff00ff } else { 0xff4400 };

    let spread: &[f32] = if boss.kind == BossKind::Phoenix {
        &[-PHOENIX_SPREAD, 0.0, PHOENIX_SPREAD]
    } else {
        &[0.0]
    };
    for &offset in spread {
        let angle = base_angle + offset;
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            size: 1.0,
            damage,
            color,
        });
    }
    if state.projectiles.len() > MAX_PROJECTILES {
        let excess = state.projectiles.len() - MAX_PROJECTILES;
        state.projectiles.drain(..excess);
    }
    state.push_event(GameEvent::Laser);
}

fn move_boss(state: &mut GameState, boss: &mut Boss, head: IVec2) {
    let dist = (boss.pos - head).as_vec2().length();
    if dist > BOSS_TELEPORT_DISTANCE {
        let sx = if state.rng.random_bool(0.5) { 8 } else { -8 };
        let sy = if state.rng.random_bool(0.5) { 8 } else { -8 };
        boss.pos = head + IVec2::new(sx, sy);
        boss.visual_pos = boss.pos.as_vec2();
        log::debug!("Boss teleported to ({}, {})", boss.pos.x, boss.pos.y);
        return;
    }
    boss.pos = next_step(boss.pos, head, PATH_ITERATION_BUDGET, |c| {
        state.is_walkable(c)
    });
}

fn ease_visual(boss: &mut Boss) {
    let target = boss.pos.as_vec2();
    boss.visual_pos += (target - boss.visual_pos) * 0.2;
}

/// Advance boss projectiles, hitting the head along their swept segment
pub fn update_projectiles(state: &mut GameState) {
    let head = cell_center(state.snake.head());
    let mut hits = Vec::new();
    state.projectiles.retain_mut(|p| {
        let from = p.pos;
        p.pos += p.vel;
        if dist_to_segment_sq(head, from, p.pos) < PROJECTILE_HIT_RADIUS_SQ {
            hits.push(p.damage);
            return false;
        }
        let d = (p.pos - head).abs();
        d.x <= PROJECTILE_CULL_DISTANCE && d.y <= PROJECTILE_CULL_DISTANCE
    });
    for damage in hits {
        state.damage_player(damage);
    }
}

/// Grow and fade area zones, damaging the head while inside a live zone
pub fn update_aoe_zones(state: &mut GameState) {
    let head = cell_center(state.snake.head());
    let mut hits = Vec::new();
    state.aoe_zones.retain_mut(|zone| {
        zone.radius += zone.growth;
        zone.opacity -= 0.015;
        if zone.pos.distance(head) < zone.radius && zone.opacity > 0.2 {
            hits.push(zone.damage);
        }
        zone.radius < zone.max_radius && zone.opacity > 0.0
    });
    for damage in hits {
        state.damage_player(damage);
    }
}
