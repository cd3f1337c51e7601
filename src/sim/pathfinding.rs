//! Grid pathfinding for boss movement
//!
//! A* over the 4-connected grid with a Manhattan heuristic and a hard
//! iteration budget, plus a cheap greedy single-step fallback.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use glam::IVec2;

use crate::{manhattan, neighbors};

/// Open-set entry. Ordered as a min-heap on f, then h, then insertion order,
/// so expansion is deterministic regardless of hash iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f: i32,
    h: i32,
    seq: u32,
    cell: IVec2,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest 4-connected path from `start` to `goal`, both included.
///
/// Returns `None` when the goal is not walkable, when the open set runs dry
/// (goal enclosed), or when `max_iterations` node expansions are exhausted.
/// The start cell itself is never tested for walkability.
pub fn find_path(
    start: IVec2,
    goal: IVec2,
    max_iterations: usize,
    is_walkable: impl Fn(IVec2) -> bool,
) -> Option<Vec<IVec2>> {
    if start == goal {
        return Some(vec![start]);
    }
    if !is_walkable(goal) {
        return None;
    }

    let mut open = BinaryHeap::new();
    let mut g_score: HashMap<IVec2, i32> = HashMap::new();
    let mut came_from: HashMap<IVec2, IVec2> = HashMap::new();
    let mut closed: HashSet<IVec2> = HashSet::new();
    let mut seq = 0u32;

    let h = manhattan(start, goal);
    open.push(OpenNode {
        f: h,
        h,
        seq,
        cell: start,
    });
    g_score.insert(start, 0);

    let mut iterations = 0;
    while let Some(node) = open.pop() {
        if iterations >= max_iterations {
            return None;
        }
        // Stale heap entries for cells already expanded via a better route
        if !closed.insert(node.cell) {
            continue;
        }
        iterations += 1;

        if node.cell == goal {
            return Some(reconstruct(&came_from, goal));
        }

        let g = g_score.get(&node.cell).copied().unwrap_or(0);
        for next in neighbors(node.cell) {
            if closed.contains(&next) || !is_walkable(next) {
                continue;
            }
            let tentative = g + 1;
            let better = g_score.get(&next).is_none_or(|&old| tentative < old);
            if better {
                g_score.insert(next, tentative);
                came_from.insert(next, node.cell);
                let h = manhattan(next, goal);
                seq += 1;
                open.push(OpenNode {
                    f: tentative + h,
                    h,
                    seq,
                    cell: next,
                });
            }
        }
    }

    None
}

fn reconstruct(came_from: &HashMap<IVec2, IVec2>, goal: IVec2) -> Vec<IVec2> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Single greedy step toward `target`: primary axis, then secondary axis,
/// then any open neighbour, else stay put.
pub fn smart_move(current: IVec2, target: IVec2, is_walkable: impl Fn(IVec2) -> bool) -> IVec2 {
    let d = target - current;
    let step_x = IVec2::new(d.x.signum(), 0);
    let step_y = IVec2::new(0, d.y.signum());
    let (primary, secondary) = if d.x.abs() > d.y.abs() {
        (step_x, step_y)
    } else {
        (step_y, step_x)
    };

    for step in [primary, secondary] {
        if step != IVec2::ZERO && is_walkable(current + step) {
            return current + step;
        }
    }
    if current == target {
        return current;
    }
    for step in [IVec2::X, IVec2::NEG_X, IVec2::Y, IVec2::NEG_Y] {
        if is_walkable(current + step) {
            return current + step;
        }
    }
    current
}

/// Next cell toward `goal`: A* first step, greedy step if A* gives up
pub fn next_step(
    start: IVec2,
    goal: IVec2,
    max_iterations: usize,
    is_walkable: impl Fn(IVec2) -> bool,
) -> IVec2 {
    match find_path(start, goal, max_iterations, &is_walkable) {
        Some(path) if path.len() >= 2 => path[1],
        Some(_) => start,
        None => smart_move(start, goal, &is_walkable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(_: IVec2) -> bool {
        true
    }

    #[test]
    fn test_straight_line() {
        let path = find_path(IVec2::ZERO, IVec2::new(5, 0), 200, open).unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(path[0], IVec2::ZERO);
        assert_eq!(path[5], IVec2::new(5, 0));
    }

    #[test]
    fn test_path_is_contiguous() {
        let path = find_path(IVec2::new(-3, 2), IVec2::new(4, -5), 500, open).unwrap();
        assert_eq!(path.len() as i32, manhattan(IVec2::new(-3, 2), IVec2::new(4, -5)) + 1);
        for pair in path.windows(2) {
            assert_eq!(manhattan(pair[0], pair[1]), 1);
        }
    }

    #[test]
    fn test_routes_around_wall() {
        // Vertical wall at x = 2 from y = -3..=3
        let walkable = |c: IVec2| !(c.x == 2 && (-3..=3).contains(&c.y));
        let path = find_path(IVec2::ZERO, IVec2::new(4, 0), 500, walkable).unwrap();
        assert!(path.iter().all(|&c| walkable(c)));
        assert_eq!(*path.last().unwrap(), IVec2::new(4, 0));
        assert!(path.len() > 5);
    }

    #[test]
    fn test_blocked_goal_short_circuits() {
        let goal = IVec2::new(3, 3);
        assert!(find_path(IVec2::ZERO, goal, 200, |c| c != goal).is_none());
    }

    #[test]
    fn test_enclosed_goal_returns_none() {
        let goal = IVec2::new(5, 5);
        // Ring of walls around the goal
        let walkable = |c: IVec2| {
            let d = (c - goal).abs();
            d.x.max(d.y) != 1
        };
        assert!(find_path(IVec2::ZERO, goal, 10_000, walkable).is_none());
    }

    #[test]
    fn test_budget_exhaustion() {
        assert!(find_path(IVec2::ZERO, IVec2::new(100, 100), 20, open).is_none());
    }

    #[test]
    fn test_smart_move_primary_axis() {
        assert_eq!(smart_move(IVec2::ZERO, IVec2::new(5, 1), open), IVec2::new(1, 0));
        assert_eq!(smart_move(IVec2::ZERO, IVec2::new(1, -5), open), IVec2::new(0, -1));
    }

    #[test]
    fn test_smart_move_falls_back() {
        let blocked = IVec2::new(1, 0);
        // Primary blocked, secondary axis is zero, so any open neighbour
        let step = smart_move(IVec2::ZERO, IVec2::new(5, 0), |c| c != blocked);
        assert_eq!(step, IVec2::new(-1, 0));
        // Fully boxed in stays put
        assert_eq!(smart_move(IVec2::ZERO, IVec2::new(5, 0), |_| false), IVec2::ZERO);
    }

    #[test]
    fn test_next_step_at_goal_stays() {
        assert_eq!(next_step(IVec2::ONE, IVec2::ONE, 200, open), IVec2::ONE);
    }
}
