//! Typed propositions of the maze vocabulary.
//!
//! The knowledge base identifies atoms by name. Maze propositions render to
//! names such as `P(1,2)` (a precipice at row 1, column 2) or `EM(0,3)` (the
//! monster's smell sensed at row 0, column 3) and parse back from them.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::error::ValidationError;
use crate::logic::symbols::NEGATION;
use crate::percept::StimulusChannel;

const NAME_PATTERN: &str = r"^(E?)([PMS])\((\d+),(\d+)\)$";

static NAME_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn name_regex() -> Option<&'static Regex> {
    NAME_RE.get_or_init(|| Regex::new(NAME_PATTERN).ok()).as_ref()
}

/// Something that can occupy a cell and be sensed from its neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cause {
    /// Sensed as a breeze. Any number may exist.
    Precipice,
    /// Sensed as a stench.
    Monster,
    /// Sensed as light.
    Exit,
}

impl Cause {
    /// All causes, in stimulus channel order.
    pub const ALL: [Self; 3] = [Self::Precipice, Self::Monster, Self::Exit];

    /// Single-letter tag used in proposition names.
    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            Self::Precipice => 'P',
            Self::Monster => 'M',
            Self::Exit => 'S',
        }
    }

    /// The cause announced by a stimulus channel.
    #[must_use]
    pub const fn of_channel(channel: StimulusChannel) -> Self {
        match channel {
            StimulusChannel::Breeze => Self::Precipice,
            StimulusChannel::Stench => Self::Monster,
            StimulusChannel::Light => Self::Exit,
        }
    }

    /// Precipices are the only cause that may appear more than once.
    #[must_use]
    pub const fn is_unique(self) -> bool {
        !matches!(self, Self::Precipice)
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "P" => Some(Self::Precipice),
            "M" => Some(Self::Monster),
            "S" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// A boolean atom about one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Proposition {
    /// The cause occupies the cell.
    Cause { cause: Cause, at: Coord },
    /// The cause's stimulus is sensed on the cell.
    Stimulus { cause: Cause, at: Coord },
}

impl Proposition {
    /// "`cause` occupies `at`".
    #[must_use]
    pub const fn cause(cause: Cause, at: Coord) -> Self {
        Self::Cause { cause, at }
    }

    /// "`cause`'s stimulus is sensed at `at`".
    #[must_use]
    pub const fn stimulus(cause: Cause, at: Coord) -> Self {
        Self::Stimulus { cause, at }
    }

    /// Positive literal name.
    #[must_use]
    pub fn pos(&self) -> String {
        self.to_string()
    }

    /// Negative literal name.
    #[must_use]
    pub fn neg(&self) -> String {
        format!("{NEGATION}{self}")
    }

    /// Literal name with the given polarity.
    #[must_use]
    pub fn literal(&self, positive: bool) -> String {
        if positive {
            self.pos()
        } else {
            self.neg()
        }
    }

    /// Parse a proposition from its name, e.g. `P(1,2)` or `ES(0,0)`.
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        let unknown = || ValidationError::UnknownProposition {
            name: name.to_string(),
        };
        let caps = name_regex()
            .and_then(|re| re.captures(name))
            .ok_or_else(unknown)?;

        let cause = Cause::from_tag(&caps[2]).ok_or_else(unknown)?;
        let row = caps[3].parse::<usize>().map_err(|_| unknown())?;
        let col = caps[4].parse::<usize>().map_err(|_| unknown())?;
        let at = Coord::new(row, col);

        Ok(if caps[1].is_empty() {
            Self::cause(cause, at)
        } else {
            Self::stimulus(cause, at)
        })
    }

    /// Parse a literal name into its polarity and proposition.
    pub fn parse_literal(literal: &str) -> Result<(bool, Self), ValidationError> {
        match literal.strip_prefix(NEGATION) {
            Some(rest) => Ok((false, Self::parse(rest)?)),
            None => Ok((true, Self::parse(literal)?)),
        }
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cause { cause, at } => write!(f, "{}({},{})", cause.tag(), at.row, at.col),
            Self::Stimulus { cause, at } => write!(f, "E{}({},{})", cause.tag(), at.row, at.col),
        }
    }
}
