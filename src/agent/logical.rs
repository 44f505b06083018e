//! SAT-backed percept interpreter for the logical maze.
//!
//! On construction the agent encodes the maze topology as clauses:
//!
//! - a stimulus is sensed on a cell iff its cause occupies a 4-neighbor;
//! - the monster and the exit each occupy at most one cell;
//! - no two causes share a cell.
//!
//! Each turn, `process_percept` asserts what the player senses and where it
//! stands, then asks the knowledge base which cells it can now classify.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LogicalConfig;
use crate::coord::Coord;
use crate::error::MazeResult;
use crate::logic::{Cause, KnowledgeBase, Proposition, TraceSink};
use crate::percept::{LogicalPercept, StimulusChannel};

/// Cells the knowledge base could classify in one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Unvisited neighbors of known cells proven free of every cause.
    pub safe: Vec<Coord>,
    /// Cells proven to hold the monster.
    pub monster: Vec<Coord>,
    /// Cells proven to hold a precipice.
    pub precipice: Vec<Coord>,
    /// Cells proven to hold the exit.
    pub exit: Vec<Coord>,
}

impl Classification {
    /// Returns true if nothing was classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.safe.is_empty()
            && self.monster.is_empty()
            && self.precipice.is_empty()
            && self.exit.is_empty()
    }

    /// Cells classified as holding `cause`.
    #[must_use]
    pub fn cells_of(&self, cause: Cause) -> &[Coord] {
        match cause {
            Cause::Precipice => &self.precipice,
            Cause::Monster => &self.monster,
            Cause::Exit => &self.exit,
        }
    }

    fn push(&mut self, cause: Cause, cell: Coord) {
        match cause {
            Cause::Precipice => self.precipice.push(cell),
            Cause::Monster => self.monster.push(cell),
            Cause::Exit => self.exit.push(cell),
        }
    }
}

/// Classification priority when querying an unknown cell.
const QUERY_ORDER: [Cause; 3] = [Cause::Monster, Cause::Precipice, Cause::Exit];

/// Logical agent for one maze.
#[derive(Debug)]
pub struct LogicalAgent {
    config: LogicalConfig,
    kb: KnowledgeBase,
    /// Precipices confirmed since the last saturation.
    found_precipices: usize,
    /// Every precipice ever confirmed.
    confirmed_precipices: HashSet<Coord>,
    /// Rule out precipices on unknown cells during the next call.
    saturated: bool,
}

impl LogicalAgent {
    /// Creates an agent and encodes the maze axioms.
    pub fn new(config: LogicalConfig) -> MazeResult<Self> {
        Self::with_kb(config, KnowledgeBase::new())
    }

    /// Creates an agent whose knowledge base reports to `trace`.
    pub fn with_trace(config: LogicalConfig, trace: Box<dyn TraceSink>) -> MazeResult<Self> {
        Self::with_kb(config, KnowledgeBase::with_trace(trace))
    }

    /// Creates an agent over a caller-supplied (empty) knowledge base.
    pub fn with_kb(config: LogicalConfig, kb: KnowledgeBase) -> MazeResult<Self> {
        config.validate()?;
        let mut agent = Self {
            config,
            kb,
            found_precipices: 0,
            confirmed_precipices: HashSet::new(),
            saturated: false,
        };
        agent.add_axioms()?;
        Ok(agent)
    }

    /// The agent's configuration.
    #[must_use]
    pub const fn config(&self) -> &LogicalConfig {
        &self.config
    }

    /// The knowledge base backing the agent.
    #[must_use]
    pub const fn kb(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Forgets everything learned and re-encodes the axioms.
    pub fn reset(&mut self) -> MazeResult<()> {
        self.kb.reset();
        self.found_precipices = 0;
        self.confirmed_precipices.clear();
        self.saturated = false;
        self.add_axioms()
    }

    /// Topology axioms for the configured grid, as literal-name clauses.
    #[must_use]
    pub fn axioms(&self) -> Vec<Vec<String>> {
        maze_axioms(self.config.size)
    }

    fn add_axioms(&mut self) -> MazeResult<()> {
        let axioms = self.axioms();
        self.kb.add_clauses(&axioms)?;
        debug!(
            kb = %self.kb.id(),
            size = self.config.size,
            clauses = self.kb.len(),
            symbols = self.kb.symbols().len(),
            "maze axioms encoded"
        );
        Ok(())
    }

    /// Decodes a raw 9-bit percept and processes it.
    pub fn process_bits(
        &mut self,
        bits: &[u8],
        position: Coord,
        known_cells: &[Coord],
        at_exit: bool,
        at_monster: bool,
    ) -> MazeResult<Classification> {
        let percept = LogicalPercept::from_bits(bits)?;
        self.process_percept(&percept, position, known_cells, at_exit, at_monster)
    }

    /// Asserts one turn's evidence and classifies what can now be deduced.
    ///
    /// `known_cells` are cells whose content the driver already knows
    /// (normally the visited cells). Unknown cells are classified as monster,
    /// precipice or exit, first entailed category wins. Unknown neighbors of
    /// known cells are reported safe when the knowledge base rules out all
    /// three causes there.
    pub fn process_percept(
        &mut self,
        percept: &LogicalPercept,
        position: Coord,
        known_cells: &[Coord],
        at_exit: bool,
        at_monster: bool,
    ) -> MazeResult<Classification> {
        let size = self.config.size;
        position.ensure_in_bounds(size)?;

        for channel in StimulusChannel::ALL {
            let stimulus = Proposition::stimulus(Cause::of_channel(channel), position);
            self.kb.add_unit(&stimulus.literal(percept.sensed(channel)))?;
        }
        // Standing here alive is hard evidence.
        if !at_monster {
            self.kb
                .add_unit(&Proposition::cause(Cause::Monster, position).neg())?;
        }
        self.kb
            .add_unit(&Proposition::cause(Cause::Precipice, position).neg())?;
        if !at_exit {
            self.kb
                .add_unit(&Proposition::cause(Cause::Exit, position).neg())?;
        }

        let known: HashSet<Coord> = known_cells.iter().copied().collect();
        let mut out = Classification::default();

        for cell in Coord::all(size) {
            if known.contains(&cell) {
                for next in cell.neighbors(size).filter(|c| !known.contains(c)) {
                    if !out.safe.contains(&next) && self.is_safe(next)? {
                        out.safe.push(next);
                    }
                }
            } else {
                if self.saturated {
                    self.rule_out_precipice(cell)?;
                }
                if let Some(cause) = self.entailed_cause(cell)? {
                    out.push(cause, cell);
                }
            }
        }

        self.saturated = false;
        for &cell in &out.precipice {
            if self.confirmed_precipices.insert(cell) {
                self.found_precipices += 1;
            }
        }
        if self.found_precipices >= self.config.max_precipices {
            debug!(
                kb = %self.kb.id(),
                confirmed = self.confirmed_precipices.len(),
                "precipice count reached, ruling out the rest next turn"
            );
            self.saturated = true;
            self.found_precipices = 0;
        }

        Ok(out)
    }

    /// First cause entailed at `cell`, in monster, precipice, exit order.
    fn entailed_cause(&self, cell: Coord) -> MazeResult<Option<Cause>> {
        for cause in QUERY_ORDER {
            if self.kb.entails_literal(&Proposition::cause(cause, cell).pos())? {
                return Ok(Some(cause));
            }
        }
        Ok(None)
    }

    fn is_safe(&self, cell: Coord) -> MazeResult<bool> {
        for cause in QUERY_ORDER {
            if !self.kb.entails_literal(&Proposition::cause(cause, cell).neg())? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Asserts `¬P` at `cell` unless the cell is a confirmed precipice or the
    /// assertion would contradict what is already known.
    fn rule_out_precipice(&mut self, cell: Coord) -> MazeResult<()> {
        if self.confirmed_precipices.contains(&cell) {
            return Ok(());
        }
        let literal = Proposition::cause(Cause::Precipice, cell).neg();
        if self.kb.is_consistent_with(&[vec![literal.as_str()]])? {
            self.kb.add_unit(&literal)?;
        }
        Ok(())
    }
}

/// Topology axioms of an `size × size` maze.
///
/// Cells are visited in row-major order. For each cell and cause the
/// "stimulus implies some adjacent cause" clause comes first, followed by one
/// "adjacent cause implies stimulus" clause per neighbor and, for unique
/// causes, one exclusion clause per later cell. Each cell ends with the three
/// pairwise co-occupancy exclusions.
#[must_use]
pub fn maze_axioms(size: usize) -> Vec<Vec<String>> {
    let cells: Vec<Coord> = Coord::all(size).collect();
    let mut clauses = Vec::new();

    for (i, &cell) in cells.iter().enumerate() {
        for cause in Cause::ALL {
            let stimulus = Proposition::stimulus(cause, cell);
            let adjacent: Vec<Proposition> = cell
                .neighbors(size)
                .map(|n| Proposition::cause(cause, n))
                .collect();

            let mut forward = vec![stimulus.neg()];
            forward.extend(adjacent.iter().map(Proposition::pos));
            clauses.push(forward);
            clauses.extend(adjacent.iter().map(|a| vec![stimulus.pos(), a.neg()]));

            if cause.is_unique() {
                let here = Proposition::cause(cause, cell);
                clauses.extend(
                    cells[i + 1..]
                        .iter()
                        .map(|&other| vec![here.neg(), Proposition::cause(cause, other).neg()]),
                );
            }
        }

        let m = Proposition::cause(Cause::Monster, cell);
        let p = Proposition::cause(Cause::Precipice, cell);
        let s = Proposition::cause(Cause::Exit, cell);
        clauses.push(vec![m.neg(), p.neg()]);
        clauses.push(vec![m.neg(), s.neg()]);
        clauses.push(vec![s.neg(), p.neg()]);
    }

    clauses
}
