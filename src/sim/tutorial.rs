//! Scripted tutorial
//!
//! The tutorial world is empty; each step injects its own target into the
//! overlay and waits for the player to deal with it.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::state::{Direction, GameState, PowerUpType};
use super::terrain::BlockType;

pub const MOVE_STEP: u8 = 0;
pub const EAT_DIRT_STEP: u8 = 1;
pub const EAT_GOLD_STEP: u8 = 2;
pub const POWERUP_STEP: u8 = 3;
pub const LASER_STEP: u8 = 4;
pub const DONE_STEP: u8 = 5;

/// Cells the current step is waiting on
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TutorialTargets {
    pub cells: Vec<IVec2>,
    pub block: Option<BlockType>,
}

impl TutorialTargets {
    fn set(&mut self, cells: Vec<IVec2>, block: BlockType) {
        self.cells = cells;
        self.block = Some(block);
    }

    /// Every target cell no longer holds its injected block
    fn cleared(&self, state: &GameState) -> bool {
        match self.block {
            Some(block) => self.cells.iter().all(|&c| state.block_at(c) != block),
            None => false,
        }
    }

    /// At least one target cell was broken
    fn breached(&self, state: &GameState) -> bool {
        match self.block {
            Some(block) => self.cells.iter().any(|&c| state.block_at(c) != block),
            None => false,
        }
    }
}

/// Human-readable prompt for a step
pub fn prompt(step: u8) -> &'static str {
    match step {
        MOVE_STEP => "Use the arrow keys to move",
        EAT_DIRT_STEP => "Eat the dirt",
        EAT_GOLD_STEP => "Gold is worth more",
        POWERUP_STEP => "Grab the power-up box",
        LASER_STEP => "Fire your laser at the wall",
        _ => "Tutorial complete",
    }
}

/// Advance the script for the head position at the end of a tick.
/// Returns the new step when it changed.
pub fn update_tutorial(state: &mut GameState) -> Option<u8> {
    if !state.tutorial || state.tutorial_step >= DONE_STEP {
        return None;
    }
    let head = state.snake.head();
    let heading = state.snake.direction;
    let mut targets = std::mem::take(&mut state.tutorial_targets);

    let next = match state.tutorial_step {
        MOVE_STEP if head != IVec2::ZERO => {
            let dx = if heading == Direction::Left { -5 } else { 5 };
            let cell = head + IVec2::new(dx, 0);
            state.set_block(cell, BlockType::Dirt);
            targets.set(vec![cell], BlockType::Dirt);
            Some(EAT_DIRT_STEP)
        }
        EAT_DIRT_STEP if targets.cleared(state) => {
            let cell = head + IVec2::new(5, 2);
            state.set_block(cell, BlockType::Gold);
            targets.set(vec![cell], BlockType::Gold);
            Some(EAT_GOLD_STEP)
        }
        EAT_GOLD_STEP if targets.cleared(state) => {
            let cell = head + IVec2::new(5, -2);
            state.set_block(cell, BlockType::PowerupBox);
            targets.set(vec![cell], BlockType::PowerupBox);
            Some(POWERUP_STEP)
        }
        POWERUP_STEP if state.active_power != PowerUpType::None => {
            // Three-cell wall across the heading, four cells ahead
            let ahead = head + heading.delta() * 4;
            let across = heading.perpendicular()[0].delta();
            let wall: Vec<IVec2> = (-1..=1).map(|i| ahead + across * i).collect();
            for &cell in &wall {
                state.set_block(cell, BlockType::Stone);
            }
            targets.set(wall, BlockType::Stone);
            Some(LASER_STEP)
        }
        // The beam only crosses the wall at one cell
        LASER_STEP if targets.breached(state) => {
            targets = TutorialTargets::default();
            Some(DONE_STEP)
        }
        _ => None,
    };

    state.tutorial_targets = targets;
    if let Some(step) = next {
        state.tutorial_step = step;
        log::info!("Tutorial step {}: {}", step, prompt(step));
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::sim::collision::resolve_move;
    use crate::sim::powerups::{LASER_RANGE, fire_laser};

    fn tutorial() -> GameState {
        GameState::new(SessionConfig {
            tutorial: true,
            ..Default::default()
        })
    }

    fn walk_to(state: &mut GameState, cell: IVec2) {
        resolve_move(state, cell);
        state.snake.advance(cell, false);
    }

    #[test]
    fn test_full_script() {
        let mut s = tutorial();
        assert_eq!(update_tutorial(&mut s), None);

        walk_to(&mut s, IVec2::new(1, 0));
        assert_eq!(update_tutorial(&mut s), Some(EAT_DIRT_STEP));
        let dirt = IVec2::new(6, 0);
        assert_eq!(s.block_at(dirt), BlockType::Dirt);

        walk_to(&mut s, dirt);
        assert_eq!(update_tutorial(&mut s), Some(EAT_GOLD_STEP));
        let gold = dirt + IVec2::new(5, 2);
        assert_eq!(s.block_at(gold), BlockType::Gold);

        walk_to(&mut s, gold);
        assert_eq!(update_tutorial(&mut s), Some(POWERUP_STEP));
        let gold_head = gold;
        let pbox = gold_head + IVec2::new(5, -2);
        walk_to(&mut s, pbox);
        assert_eq!(s.active_power, PowerUpType::LaserEyes);
        assert_eq!(update_tutorial(&mut s), Some(LASER_STEP));

        // Wall is perpendicular to the heading (Right), four cells ahead
        let ahead = pbox + IVec2::new(4, 0);
        for dy in -1..=1 {
            assert_eq!(s.block_at(ahead + IVec2::new(0, dy)), BlockType::Stone);
        }
        assert_eq!(update_tutorial(&mut s), None);

        assert_eq!(fire_laser(&mut s), Some(LASER_RANGE));
        assert_eq!(s.block_at(ahead), BlockType::Empty);
        assert_eq!(s.block_at(ahead + IVec2::new(0, 1)), BlockType::Stone);
        assert_eq!(update_tutorial(&mut s), Some(DONE_STEP));
        assert_eq!(update_tutorial(&mut s), None);
    }

    #[test]
    fn test_inactive_outside_tutorial() {
        let mut s = GameState::new(SessionConfig::default());
        s.snake.advance(IVec2::new(1, 0), false);
        assert_eq!(update_tutorial(&mut s), None);
        assert_eq!(s.tutorial_step, MOVE_STEP);
    }
}
