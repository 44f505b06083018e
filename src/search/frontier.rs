//! Exploration frontier: discovered but unvisited cells.

use std::collections::HashSet;

use crate::coord::Coord;

/// Set of cells with deterministic insertion-order iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontier {
    order: Vec<Coord>,
    members: HashSet<Coord>,
}

impl Frontier {
    /// Creates an empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `cell` unless it is already present. Returns true if added.
    pub fn push(&mut self, cell: Coord) -> bool {
        if !self.members.insert(cell) {
            return false;
        }
        self.order.push(cell);
        true
    }

    /// Removes `cell` if present. Returns true if it was present.
    pub fn remove(&mut self, cell: Coord) -> bool {
        if !self.members.remove(&cell) {
            return false;
        }
        self.order.retain(|&c| c != cell);
        true
    }

    /// Keeps only the cells for which `keep` returns true, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(Coord) -> bool) {
        let members = &mut self.members;
        self.order.retain(|&c| {
            let kept = keep(c);
            if !kept {
                members.remove(&c);
            }
            kept
        });
    }

    #[must_use]
    pub fn contains(&self, cell: Coord) -> bool {
        self.members.contains(&cell)
    }

    /// Oldest cell still on the frontier.
    #[must_use]
    pub fn first(&self) -> Option<Coord> {
        self.order.first().copied()
    }

    /// Cells in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.order.iter().copied()
    }

    /// Cells in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Coord] {
        &self.order
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl FromIterator<Coord> for Frontier {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        let mut frontier = Self::new();
        for cell in iter {
            frontier.push(cell);
        }
        frontier
    }
}
