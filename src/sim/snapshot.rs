//! Per-frame render snapshot
//!
//! Flattens the state into plain data for the renderer, interpolating
//! snake segments between the previous and current tick.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::state::{AoeZone, Beam, BossKind, BossPhase, GameState, Particle, PowerUpType, Projectile};
use super::terrain::{BiomeType, BlockType, biome_at};
use crate::cell_center;

/// One visible non-empty cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellView {
    pub cell: IVec2,
    pub block: BlockType,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossView {
    pub kind: BossKind,
    /// Smoothed centre in world units
    pub pos: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub phase: BossPhase,
    pub enraged: bool,
}

/// Scalar UI state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub health: i32,
    pub combo: u32,
    pub power: PowerUpType,
    pub power_ticks: u32,
    pub level: u32,
    pub biome: BiomeType,
    pub stunned: bool,
    pub tutorial_step: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSnapshot {
    /// Segment centres, head first
    pub segments: Vec<Vec2>,
    pub boss: Option<BossView>,
    pub cells: Vec<CellView>,
    pub projectiles: Vec<Projectile>,
    pub zones: Vec<AoeZone>,
    pub beams: Vec<Beam>,
    pub particles: Vec<Particle>,
    pub hud: Hud,
}

/// Segment centres blended from the previous tick toward the current one.
/// A segment added by growth starts from the old tail.
pub fn interpolated_segments(state: &GameState, alpha: f32) -> Vec<Vec2> {
    let alpha = alpha.clamp(0.0, 1.0);
    let prev = &state.snake.prev_body;
    state
        .snake
        .body
        .iter()
        .enumerate()
        .map(|(i, &cell)| {
            let from = prev.get(i).or(prev.last()).copied().unwrap_or(cell);
            cell_center(from).lerp(cell_center(cell), alpha)
        })
        .collect()
}

/// Non-empty cells within `radius` (Chebyshev) of the head, row-major
pub fn visible_cells(state: &GameState, radius: i32) -> Vec<CellView> {
    let head = state.snake.head();
    let mut cells = Vec::new();
    for y in -radius..=radius {
        for x in -radius..=radius {
            let cell = head + IVec2::new(x, y);
            let block = state.block_at(cell);
            if block != BlockType::Empty {
                cells.push(CellView { cell, block });
            }
        }
    }
    cells
}

/// Everything the renderer needs for one frame
pub fn snapshot(state: &GameState, alpha: f32, radius: i32) -> RenderSnapshot {
    let boss = state.boss.as_ref().map(|boss| BossView {
        kind: boss.kind,
        pos: boss.visual_pos + Vec2::splat(0.5),
        hp: boss.hp,
        max_hp: boss.max_hp,
        phase: boss.phase,
        enraged: boss.is_enraged(),
    });

    let hud = Hud {
        score: state.score,
        health: state.health.max(0),
        combo: state.combo,
        power: state.active_power,
        power_ticks: state.power_timer,
        level: state.level,
        biome: biome_at(state.snake.head(), state.tutorial),
        stunned: state.stunned,
        tutorial_step: state.tutorial.then_some(state.tutorial_step),
    };

    RenderSnapshot {
        segments: interpolated_segments(state, alpha),
        boss,
        cells: visible_cells(state, radius),
        projectiles: state.projectiles.clone(),
        zones: state.aoe_zones.clone(),
        beams: state.beams.clone(),
        particles: state.particles.clone(),
        hud,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::sim::state::Boss;

    fn state() -> GameState {
        GameState::new(SessionConfig::default())
    }

    #[test]
    fn test_segments_interpolate() {
        let mut s = state();
        s.snake.advance(IVec2::new(1, 0), false);

        let start = interpolated_segments(&s, 0.0);
        assert_eq!(start[0], Vec2::new(0.5, 0.5));
        let mid = interpolated_segments(&s, 0.5);
        assert_eq!(mid[0], Vec2::new(1.0, 0.5));
        let end = interpolated_segments(&s, 2.0);
        assert_eq!(end[0], Vec2::new(1.5, 0.5));
        assert_eq!(end.len(), s.snake.len());
    }

    #[test]
    fn test_grown_segment_starts_at_old_tail() {
        let mut s = state();
        let old_tail = *s.snake.body.back().unwrap();
        s.snake.advance(IVec2::new(1, 0), true);
        let segs = interpolated_segments(&s, 0.0);
        assert_eq!(segs.len(), 4);
        assert_eq!(segs[3], cell_center(old_tail));
    }

    #[test]
    fn test_visible_cells_window() {
        let mut s = state();
        s.set_block(IVec2::new(2, 2), BlockType::Gold);
        s.set_block(IVec2::new(6, 0), BlockType::Dirt);
        let cells = visible_cells(&s, 3);
        assert_eq!(
            cells,
            vec![CellView {
                cell: IVec2::new(2, 2),
                block: BlockType::Gold
            }]
        );
    }

    #[test]
    fn test_hud_and_boss() {
        let mut s = state();
        s.score = 42;
        s.active_power = PowerUpType::SpeedBoost;
        s.power_timer = 12;
        s.boss = Some(Boss::new(BossKind::Shadow, IVec2::new(3, 3), 100, 1.0));

        let snap = snapshot(&s, 1.0, 4);
        assert_eq!(snap.hud.score, 42);
        assert_eq!(snap.hud.power, PowerUpType::SpeedBoost);
        assert_eq!(snap.hud.power_ticks, 12);
        assert_eq!(snap.hud.biome, BiomeType::Grassland);
        assert_eq!(snap.hud.tutorial_step, None);
        let boss = snap.boss.unwrap();
        assert_eq!(boss.pos, Vec2::new(3.5, 3.5));
        assert!(!boss.enraged);
    }
}
