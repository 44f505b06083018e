//! Discrete player actions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::error::{MazeError, MazeResult};

/// One discrete action per turn.
///
/// The planner only ever emits the movement actions and `Exit`; `Grenade` and
/// `Blowgun` are the variant-specific weapon actions a human driver may issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Exit,
    Grenade,
    Blowgun,
}

impl Action {
    /// Maps a `(from - to)` coordinate delta to the action naming that step.
    ///
    /// The table is fixed: `(+1, 0)` is `Up`, `(-1, 0)` is `Down`, `(0, +1)` is
    /// `Left`, `(0, -1)` is `Right` and a zero delta is `Exit`. Any other delta
    /// is not a single step and yields `None`.
    #[must_use]
    pub const fn from_delta(delta: (isize, isize)) -> Option<Self> {
        match delta {
            (1, 0) => Some(Self::Up),
            (-1, 0) => Some(Self::Down),
            (0, 1) => Some(Self::Left),
            (0, -1) => Some(Self::Right),
            (0, 0) => Some(Self::Exit),
            _ => None,
        }
    }

    /// Stable upper-case name, as consumed by the maze driver.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Exit => "EXIT",
            Self::Grenade => "GRENADE",
            Self::Blowgun => "BLOWGUN",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts a node sequence into the actions that walk it, starting at `pos`.
///
/// Each consecutive pair must be a single step (or a repeat of the same cell,
/// which becomes `Exit`).
pub fn actions_for_path(path: &[Coord], pos: Coord) -> MazeResult<Vec<Action>> {
    let mut actions = Vec::with_capacity(path.len());
    let mut current = pos;
    for &node in path {
        let action = Action::from_delta(current.delta_from(node)).ok_or_else(|| {
            MazeError::internal(format!("path step {current} -> {node} is not a single move"))
        })?;
        actions.push(action);
        current = node;
    }
    Ok(actions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_table_is_fixed() {
        assert_eq!(Action::from_delta((1, 0)), Some(Action::Up));
        assert_eq!(Action::from_delta((-1, 0)), Some(Action::Down));
        assert_eq!(Action::from_delta((0, 1)), Some(Action::Left));
        assert_eq!(Action::from_delta((0, -1)), Some(Action::Right));
        assert_eq!(Action::from_delta((0, 0)), Some(Action::Exit));
        assert_eq!(Action::from_delta((1, 1)), None);
    }

    #[test]
    fn path_to_actions() {
        let path = [Coord::new(1, 0), Coord::new(1, 1), Coord::new(0, 1)];
        let actions = actions_for_path(&path, Coord::origin()).unwrap();
        assert_eq!(actions, vec![Action::Down, Action::Right, Action::Up]);
    }

    #[test]
    fn staying_put_is_exit() {
        let actions = actions_for_path(&[Coord::new(2, 2)], Coord::new(2, 2)).unwrap();
        assert_eq!(actions, vec![Action::Exit]);
    }

    #[test]
    fn jump_is_rejected() {
        let err = actions_for_path(&[Coord::new(2, 2)], Coord::origin()).unwrap_err();
        assert!(err.is_internal());
    }

    #[test]
    fn serializes_upper_case() {
        assert_eq!(serde_json::to_string(&Action::Left).unwrap(), "\"LEFT\"");
        assert_eq!(Action::Blowgun.to_string(), "BLOWGUN");
    }
}
