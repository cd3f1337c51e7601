//! Demo autopilot
//!
//! Idle-mode input: heads for the nearest pickup over safe cells and
//! otherwise keeps moving without hitting anything.

use glam::IVec2;

use super::pathfinding::find_path;
use super::powerups::{LASER_RANGE, laser_ready};
use super::state::{Direction, GameState};
use super::terrain::BlockType;
use crate::manhattan;

/// Pickups further than this (Chebyshev) are ignored
pub const SEARCH_RADIUS: i32 = 20;
const PATH_BUDGET: usize = 400;

/// Not a wall, not a hazard, not the body
fn is_safe(state: &GameState, cell: IVec2) -> bool {
    let block = state.block_at(cell);
    !block.is_solid()
        && !matches!(block, BlockType::Lava | BlockType::Magma | BlockType::Trap)
        && !state.snake.hits_body(cell, false)
}

/// Closest pickup to the head, ties broken by coordinate
pub fn nearest_pickup(state: &GameState) -> Option<IVec2> {
    let head = state.snake.head();
    state
        .world
        .iter()
        .filter(|(_, block)| block.is_item())
        .map(|(cell, _)| cell)
        .filter(|&cell| {
            let d = (cell - head).abs();
            d.x.max(d.y) <= SEARCH_RADIUS
        })
        .min_by_key(|&cell| (manhattan(cell, head), cell.x, cell.y))
}

/// Direction the autopilot wants to travel this tick
pub fn choose_direction(state: &GameState) -> Option<Direction> {
    let head = state.snake.head();
    let heading = state.snake.direction;

    // Any turn triggers recovery; the engine picks a side that is open
    if state.stunned {
        return Some(heading.perpendicular()[0]);
    }

    if let Some(target) = nearest_pickup(state) {
        let path = find_path(head, target, PATH_BUDGET, |cell| is_safe(state, cell));
        if let Some(&step) = path.as_ref().and_then(|p| p.get(1)) {
            let toward = Direction::ALL
                .into_iter()
                .find(|d| head + d.delta() == step && *d != heading.opposite());
            if toward.is_some() {
                return toward;
            }
        }
    }

    if is_safe(state, head + heading.delta()) {
        return Some(heading);
    }
    Direction::ALL
        .into_iter()
        .filter(|&d| d != heading.opposite())
        .find(|&d| is_safe(state, head + d.delta()))
}

/// Fire when a wall sits right ahead or the boss is lined up with the beam
pub fn wants_laser(state: &GameState) -> bool {
    if !laser_ready(state) {
        return false;
    }
    let head = state.snake.head();
    let step = state.snake.direction.delta();
    if state.block_at(head + step) == BlockType::Stone {
        return true;
    }
    state.boss.as_ref().is_some_and(|boss| {
        (1..=LASER_RANGE).any(|i| {
            let d = (boss.pos - (head + step * i)).abs();
            d.x.max(d.y) <= 1
        })
    })
}

/// Queue the autopilot's choice when nothing is buffered
pub fn drive(state: &mut GameState) {
    if !state.input_queue.is_empty() {
        return;
    }
    if let Some(dir) = choose_direction(state) {
        if dir != state.snake.direction {
            state.register_direction(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;

    fn state() -> GameState {
        GameState::new(SessionConfig::default())
    }

    #[test]
    fn test_heads_for_pickup() {
        let mut s = state();
        s.set_block(IVec2::new(0, -4), BlockType::Dirt);
        assert_eq!(nearest_pickup(&s), Some(IVec2::new(0, -4)));
        assert_eq!(choose_direction(&s), Some(Direction::Up));
    }

    #[test]
    fn test_never_reverses() {
        let mut s = state();
        // Pickup directly behind the snake
        s.set_block(IVec2::new(-6, 0), BlockType::Gold);
        let dir = choose_direction(&s).unwrap();
        assert_ne!(dir, Direction::Left);
    }

    #[test]
    fn test_avoids_wall_ahead() {
        let mut s = state();
        s.set_block(IVec2::new(1, 0), BlockType::Stone);
        let dir = choose_direction(&s).unwrap();
        assert!(matches!(dir, Direction::Up | Direction::Down));
    }

    #[test]
    fn test_ignores_far_pickups() {
        let mut s = state();
        s.set_block(IVec2::new(SEARCH_RADIUS + 5, 0), BlockType::Dirt);
        assert_eq!(nearest_pickup(&s), None);
        assert_eq!(choose_direction(&s), Some(Direction::Right));
    }

    #[test]
    fn test_wants_laser_at_wall() {
        let mut s = state();
        s.set_block(IVec2::new(1, 0), BlockType::Stone);
        assert!(!wants_laser(&s));
        s.active_power = crate::sim::state::PowerUpType::LaserEyes;
        s.power_timer = 10;
        assert!(wants_laser(&s));
    }

    #[test]
    fn test_drive_queues_turn() {
        let mut s = state();
        s.set_block(IVec2::new(0, 5), BlockType::Dirt);
        drive(&mut s);
        assert_eq!(s.input_queue.front(), Some(&Direction::Down));
    }
}
