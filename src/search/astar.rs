//! A* over the cells the player has already walked.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::coord::Coord;

/// Shortest route from `start` toward `goal` through visited cells only.
///
/// Every node other than `start` must be in `visited`. Edges cost 1 and the
/// heuristic is the Manhattan distance to `goal`. The search stops at the
/// first popped node that is `goal` itself or, when `goal` is unvisited, a
/// 4-neighbor of it. The returned path excludes `start` and, in the second
/// case, excludes `goal` too: callers append it.
///
/// Returns `None` if no visited route reaches `goal`. Among equal scores the
/// node discovered first is expanded first.
#[must_use]
pub fn a_star_on_known(start: Coord, goal: Coord, visited: &[Coord], size: usize) -> Option<Vec<Coord>> {
    let walkable: HashSet<Coord> = visited.iter().copied().collect();
    let goal_reachable_from_edge = goal.in_bounds(size) && !walkable.contains(&goal);

    let mut open = BinaryHeap::new();
    let mut best_f: HashMap<Coord, usize> = HashMap::new();
    let mut cost: HashMap<Coord, usize> = HashMap::new();
    let mut seq: HashMap<Coord, usize> = HashMap::new();
    let mut parent: HashMap<Coord, Coord> = HashMap::new();
    let mut closed: HashSet<Coord> = HashSet::new();

    let h0 = start.manhattan(goal);
    open.push(Reverse((h0, 0, start)));
    best_f.insert(start, h0);
    cost.insert(start, 0);
    seq.insert(start, 0);

    while let Some(Reverse((f, _, current))) = open.pop() {
        // Stale entry superseded by a cheaper one.
        if closed.contains(&current) || best_f.get(&current) != Some(&f) {
            continue;
        }
        closed.insert(current);

        if current == goal || (goal_reachable_from_edge && current.is_adjacent(goal)) {
            let mut path = Vec::new();
            let mut node = current;
            while let Some(&prev) = parent.get(&node) {
                path.push(node);
                node = prev;
            }
            path.reverse();
            return Some(path);
        }

        let g = cost.get(&current).copied().unwrap_or(0) + 1;
        for next in current.neighbors(size).filter(|c| walkable.contains(c)) {
            if closed.contains(&next) {
                continue;
            }
            let candidate = g + next.manhattan(goal);
            let improves = best_f.get(&next).map_or(true, |&old| candidate < old);
            if !improves {
                continue;
            }
            let next_seq = seq.len();
            let order = *seq.entry(next).or_insert(next_seq);
            best_f.insert(next, candidate);
            cost.insert(next, g);
            parent.insert(next, current);
            open.push(Reverse((candidate, order, next)));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(rows: usize, cols: usize) -> Vec<Coord> {
        (0..rows)
            .flat_map(|r| (0..cols).map(move |c| Coord::new(r, c)))
            .collect()
    }

    #[test]
    fn visited_goal_is_reached_exactly() {
        let visited = block(3, 3);
        let path = a_star_on_known(Coord::new(0, 0), Coord::new(2, 2), &visited, 4).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.last(), Some(&Coord::new(2, 2)));
        for pair in path.windows(2) {
            assert!(pair[0].is_adjacent(pair[1]));
        }
    }

    #[test]
    fn unvisited_goal_stops_next_to_it() {
        let visited = block(1, 3);
        let path = a_star_on_known(Coord::new(0, 0), Coord::new(0, 3), &visited, 4).unwrap();
        assert_eq!(path, vec![Coord::new(0, 1), Coord::new(0, 2)]);
    }

    #[test]
    fn start_next_to_goal_gives_empty_path() {
        let visited = [Coord::new(0, 0)];
        let path = a_star_on_known(Coord::new(0, 0), Coord::new(0, 1), &visited, 3).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn start_equal_goal_gives_empty_path() {
        let visited = [Coord::new(1, 1)];
        assert_eq!(a_star_on_known(Coord::new(1, 1), Coord::new(1, 1), &visited, 3), Some(vec![]));
    }

    #[test]
    fn disconnected_components_have_no_path() {
        let visited = [Coord::new(0, 0), Coord::new(2, 2)];
        assert_eq!(a_star_on_known(Coord::new(0, 0), Coord::new(2, 2), &visited, 3), None);
    }

    #[test]
    fn routes_around_unvisited_cells() {
        // U-shaped corridor: (0,0) -> (1,0) -> (2,0) -> (2,1) -> (2,2) -> (1,2) -> (0,2).
        let visited = [
            Coord::new(0, 0),
            Coord::new(1, 0),
            Coord::new(2, 0),
            Coord::new(2, 1),
            Coord::new(2, 2),
            Coord::new(1, 2),
            Coord::new(0, 2),
        ];
        let path = a_star_on_known(Coord::new(0, 0), Coord::new(0, 2), &visited, 3).unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(path.last(), Some(&Coord::new(0, 2)));
    }
}
