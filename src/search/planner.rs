//! Move planner: turns cell knowledge into one action per turn.
//!
//! The engine keeps the exploration frontier and a queue of pending actions.
//! When the queue is empty it either plans the route out (goal object found
//! and exit known) or picks a frontier target, routes to it over visited
//! cells with A*, and queues the resulting moves.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::action::{actions_for_path, Action};
use crate::agent::bayesian::BeliefGrid;
use crate::coord::Coord;
use crate::error::{ExecutionError, MazeError, MazeResult, ValidationError};
use crate::search::astar::a_star_on_known;
use crate::search::frontier::Frontier;

/// Planner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanState {
    /// No queued actions; the next call plans.
    NoPlan,
    /// Walking toward a frontier target.
    FollowingPlan,
    /// Walking to the exit. Terminal.
    HeadingToExit,
}

/// What the caller knows about the maze this turn.
#[derive(Debug, Clone, Copy)]
pub enum Knowledge<'a> {
    /// Cells proven safe by the logical agent.
    Safe(&'a [Coord]),
    /// Beliefs of the Bayesian agent.
    Beliefs(&'a BeliefGrid),
}

/// Search engine for one maze.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    size: usize,
    frontier: Frontier,
    queue: VecDeque<Action>,
    goal_found: bool,
    exit: Option<Coord>,
    previous_goal: Option<Coord>,
    state: PlanState,
}

impl SearchEngine {
    /// Creates an engine for a `size × size` grid with an empty frontier.
    pub fn new(size: usize) -> Result<Self, ValidationError> {
        if size == 0 {
            return Err(ValidationError::GridTooSmall { size, min: 1 });
        }
        Ok(Self {
            size,
            frontier: Frontier::new(),
            queue: VecDeque::new(),
            goal_found: false,
            exit: None,
            previous_goal: None,
            state: PlanState::NoPlan,
        })
    }

    /// Creates an engine whose frontier starts with `cells`, in order.
    pub fn with_frontier(size: usize, cells: &[Coord]) -> Result<Self, ValidationError> {
        let mut engine = Self::new(size)?;
        for &cell in cells {
            cell.ensure_in_bounds(size)?;
            engine.frontier.push(cell);
        }
        Ok(engine)
    }

    #[must_use]
    pub const fn state(&self) -> PlanState {
        self.state
    }

    /// Frontier cells in insertion order.
    #[must_use]
    pub fn frontier(&self) -> &[Coord] {
        self.frontier.as_slice()
    }

    /// Number of actions still queued.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Records that the player carries the goal object.
    pub fn mark_goal_found(&mut self) {
        self.goal_found = true;
    }

    /// Records where the exit is.
    pub fn set_exit(&mut self, exit: Coord) -> Result<(), ValidationError> {
        exit.ensure_in_bounds(self.size)?;
        self.exit = Some(exit);
        Ok(())
    }

    /// First frontier cell known to be safe, else the oldest frontier cell.
    #[must_use]
    pub fn choose_bfs_move(&self, safe: &[Coord]) -> Option<Coord> {
        self.frontier
            .iter()
            .find(|c| safe.contains(c))
            .or_else(|| self.frontier.first())
    }

    /// Frontier cell with the lowest probability of death. Ties go to the
    /// older cell.
    pub fn choose_greedy_move(&self, beliefs: &BeliefGrid) -> Result<Option<Coord>, ValidationError> {
        let mut best: Option<(Coord, f64)> = None;
        for cell in self.frontier.iter() {
            let risk = beliefs.death_probability(cell)?;
            if best.map_or(true, |(_, lowest)| risk < lowest) {
                best = Some((cell, risk));
            }
        }
        Ok(best.map(|(cell, _)| cell))
    }

    /// Returns the next action, planning first if nothing is queued.
    ///
    /// `visited` is every cell the player has stood on, `pos` included.
    pub fn plan_next_move(
        &mut self,
        knowledge: Knowledge<'_>,
        pos: Coord,
        visited: &[Coord],
    ) -> MazeResult<Action> {
        pos.ensure_in_bounds(self.size)?;
        self.refresh_frontier(pos, visited);

        if self.queue.is_empty() {
            let routed_out = match self.exit {
                Some(exit) if self.goal_found => self.plan_exit(exit, pos, visited)?,
                _ => false,
            };
            if !routed_out {
                self.plan_exploration(knowledge, pos, visited)?;
            }
        }

        let action = self
            .queue
            .pop_front()
            .ok_or_else(|| MazeError::internal("planner produced no action"))?;
        if self.queue.is_empty() && self.state == PlanState::FollowingPlan {
            self.state = PlanState::NoPlan;
        }
        Ok(action)
    }

    fn refresh_frontier(&mut self, pos: Coord, visited: &[Coord]) {
        for next in pos.neighbors(self.size) {
            if !visited.contains(&next) {
                self.frontier.push(next);
            }
        }
        self.frontier.retain(|c| c != pos && !visited.contains(&c));
    }

    /// Queues the route to `exit` followed by `Exit`. Returns false if the
    /// exit cannot be reached over visited cells.
    fn plan_exit(&mut self, exit: Coord, pos: Coord, visited: &[Coord]) -> MazeResult<bool> {
        let path = if exit == pos {
            Some(vec![exit])
        } else {
            a_star_on_known(pos, exit, visited, self.size).map(|mut path| {
                if path.last() != Some(&exit) {
                    path.push(exit);
                }
                path
            })
        };
        let Some(path) = path else {
            warn!(%pos, %exit, "exit unreachable over visited cells, exploring instead");
            return Ok(false);
        };

        self.queue.extend(actions_for_path(&path, pos)?);
        self.queue.push_back(Action::Exit);
        self.state = PlanState::HeadingToExit;
        debug!(%pos, %exit, steps = self.queue.len(), "heading to exit");
        Ok(true)
    }

    fn plan_exploration(&mut self, knowledge: Knowledge<'_>, pos: Coord, visited: &[Coord]) -> MazeResult<()> {
        if let Some(previous) = self.previous_goal.take() {
            self.frontier.remove(previous);
        }

        loop {
            let target = match knowledge {
                Knowledge::Safe(safe) => self.choose_bfs_move(safe),
                Knowledge::Beliefs(beliefs) => self.choose_greedy_move(beliefs)?,
            }
            .ok_or(ExecutionError::FrontierExhausted { position: pos })?;

            let path = if pos.is_adjacent(target) && !visited.contains(&target) {
                Some(Vec::new())
            } else {
                a_star_on_known(pos, target, visited, self.size)
            };
            let Some(mut path) = path else {
                debug!(%pos, %target, "frontier target unreachable, dropping it");
                self.frontier.remove(target);
                continue;
            };

            path.push(target);
            self.queue.extend(actions_for_path(&path, pos)?);
            self.previous_goal = Some(target);
            self.state = PlanState::FollowingPlan;
            debug!(%pos, %target, steps = self.queue.len(), "new exploration target");
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BayesianConfig;

    #[test]
    fn bfs_prefers_first_safe_frontier_cell() {
        let engine = SearchEngine::with_frontier(3, &[Coord::new(0, 1), Coord::new(1, 0)]).unwrap();
        assert_eq!(engine.choose_bfs_move(&[Coord::new(0, 1)]), Some(Coord::new(0, 1)));
        assert_eq!(engine.choose_bfs_move(&[Coord::new(1, 0)]), Some(Coord::new(1, 0)));
        assert_eq!(engine.choose_bfs_move(&[]), Some(Coord::new(0, 1)));
    }

    #[test]
    fn bfs_on_empty_frontier_is_none() {
        let engine = SearchEngine::new(3).unwrap();
        assert_eq!(engine.choose_bfs_move(&[]), None);
    }

    #[test]
    fn greedy_picks_lowest_death_probability() {
        let mut beliefs = BeliefGrid::new(BayesianConfig::with_size(3)).unwrap();
        // A silent reading at (0,0) clears (1,0) and (0,1).
        beliefs.update([false; 5], Coord::origin()).unwrap();
        let engine =
            SearchEngine::with_frontier(3, &[Coord::new(2, 2), Coord::new(0, 1), Coord::new(1, 0)]).unwrap();
        assert_eq!(engine.choose_greedy_move(&beliefs).unwrap(), Some(Coord::new(0, 1)));
    }

    #[test]
    fn first_move_steps_into_safe_neighbor() {
        let mut engine = SearchEngine::new(3).unwrap();
        let start = Coord::origin();
        let safe = [Coord::new(1, 0), Coord::new(0, 1)];
        let action = engine
            .plan_next_move(Knowledge::Safe(&safe), start, &[start])
            .unwrap();
        // (1,0) is discovered first; moving to a larger row is "DOWN".
        assert_eq!(action, Action::Down);
        assert_eq!(engine.state(), PlanState::NoPlan);
        assert_eq!(engine.frontier(), &[Coord::new(1, 0), Coord::new(0, 1)]);
    }

    #[test]
    fn previous_goal_leaves_frontier_on_replan() {
        let mut engine = SearchEngine::new(3).unwrap();
        let safe = [Coord::new(1, 0), Coord::new(0, 1)];
        engine
            .plan_next_move(Knowledge::Safe(&safe), Coord::origin(), &[Coord::origin()])
            .unwrap();
        let visited = [Coord::origin(), Coord::new(1, 0)];
        let action = engine
            .plan_next_move(Knowledge::Safe(&safe), Coord::new(1, 0), &visited)
            .unwrap();
        // Back up to (0,0), then right to (0,1).
        assert_eq!(action, Action::Up);
        assert_eq!(engine.state(), PlanState::FollowingPlan);
        assert_eq!(engine.queued(), 1);
        assert!(!engine.frontier().contains(&Coord::new(1, 0)));
    }

    #[test]
    fn exit_route_ends_with_exit() {
        let mut engine = SearchEngine::new(3).unwrap();
        let visited = [Coord::origin(), Coord::new(0, 1), Coord::new(0, 2)];
        engine.mark_goal_found();
        engine.set_exit(Coord::origin()).unwrap();
        let first = engine
            .plan_next_move(Knowledge::Safe(&[]), Coord::new(0, 2), &visited)
            .unwrap();
        // Moving to a smaller column is "LEFT".
        assert_eq!(first, Action::Left);
        assert_eq!(engine.state(), PlanState::HeadingToExit);
        let rest: Vec<Action> = (0..2)
            .map(|_| engine.plan_next_move(Knowledge::Safe(&[]), Coord::new(0, 1), &visited).unwrap())
            .collect();
        assert_eq!(rest, vec![Action::Left, Action::Exit]);
    }

    #[test]
    fn standing_on_exit_queues_exit_twice() {
        let mut engine = SearchEngine::new(2).unwrap();
        engine.mark_goal_found();
        engine.set_exit(Coord::origin()).unwrap();
        let pos = Coord::origin();
        assert_eq!(engine.plan_next_move(Knowledge::Safe(&[]), pos, &[pos]).unwrap(), Action::Exit);
        assert_eq!(engine.queued(), 1);
    }

    #[test]
    fn unreachable_target_is_dropped() {
        // (2,2) is on the frontier but no visited route leads next to it.
        let mut engine = SearchEngine::with_frontier(3, &[Coord::new(2, 2)]).unwrap();
        let start = Coord::origin();
        let action = engine
            .plan_next_move(Knowledge::Safe(&[Coord::new(2, 2)]), start, &[start])
            .unwrap();
        assert!(matches!(action, Action::Down | Action::Right));
        assert!(!engine.frontier().contains(&Coord::new(2, 2)));
    }

    #[test]
    fn exhausted_frontier_is_an_error() {
        let mut engine = SearchEngine::new(1).unwrap();
        let pos = Coord::origin();
        let err = engine
            .plan_next_move(Knowledge::Safe(&[]), pos, &[pos])
            .unwrap_err();
        assert!(err.is_execution());
    }
}
