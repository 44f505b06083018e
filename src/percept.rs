//! Percepts delivered by the maze driver each turn.
//!
//! The driver hands over a fixed-length bit vector whose layout depends on the
//! maze variant. The layouts are decoded once into typed structs so the
//! inference code addresses channels by enum rather than by position.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Stimulus channels of the logical variant, in percept order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StimulusChannel {
    /// A breeze: a precipice is adjacent.
    Breeze,
    /// A smell: the monster is adjacent.
    Stench,
    /// A light: the exit is adjacent.
    Light,
}

impl StimulusChannel {
    /// All channels in percept order.
    pub const ALL: [Self; 3] = [Self::Breeze, Self::Stench, Self::Light];

    /// Position of the channel in the percept vector.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Breeze => 0,
            Self::Stench => 1,
            Self::Light => 2,
        }
    }
}

/// Belief channels of the Bayesian variant, in percept order.
///
/// The first four are lethal; the last is the exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeliefChannel {
    Fire,
    Spikes,
    Darts,
    Monster,
    Exit,
}

impl BeliefChannel {
    /// Number of belief channels.
    pub const COUNT: usize = 5;

    /// All channels in percept order.
    pub const ALL: [Self; Self::COUNT] =
        [Self::Fire, Self::Spikes, Self::Darts, Self::Monster, Self::Exit];

    /// Position of the channel in the percept vector and the belief vector.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Fire => 0,
            Self::Spikes => 1,
            Self::Darts => 2,
            Self::Monster => 3,
            Self::Exit => 4,
        }
    }

    /// Returns true for channels whose cause kills the player.
    #[must_use]
    pub const fn is_lethal(self) -> bool {
        !matches!(self, Self::Exit)
    }
}

/// Which sides of the current cell are the outer wall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Decoded percept of the logical variant.
///
/// Layout: `[breeze, stench, light, wall_up, wall_down, wall_left,
/// wall_right, scream, goal_found]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalPercept {
    pub breeze: bool,
    pub stench: bool,
    pub light: bool,
    pub walls: Walls,
    /// The monster was killed this game.
    pub scream: bool,
    /// The player carries the goal object.
    pub goal_found: bool,
}

impl LogicalPercept {
    /// Length of the raw percept vector.
    pub const LEN: usize = 9;

    /// Decode a raw percept vector.
    pub fn from_bits(bits: &[u8]) -> Result<Self, ValidationError> {
        let b = decode_bits(bits, Self::LEN)?;
        Ok(Self {
            breeze: b[0],
            stench: b[1],
            light: b[2],
            walls: Walls {
                up: b[3],
                down: b[4],
                left: b[5],
                right: b[6],
            },
            scream: b[7],
            goal_found: b[8],
        })
    }

    /// Stimuli in channel order.
    #[must_use]
    pub const fn stimuli(&self) -> [bool; 3] {
        [self.breeze, self.stench, self.light]
    }

    /// Whether the given channel was sensed.
    #[must_use]
    pub const fn sensed(&self, channel: StimulusChannel) -> bool {
        match channel {
            StimulusChannel::Breeze => self.breeze,
            StimulusChannel::Stench => self.stench,
            StimulusChannel::Light => self.light,
        }
    }
}

/// Decoded percept of the Bayesian variant.
///
/// Layout: `[fire, spikes, darts, stench, light, wall_up, wall_down,
/// wall_left, wall_right, scream, goal_found]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BayesianPercept {
    /// One flag per belief channel.
    pub channels: [bool; BeliefChannel::COUNT],
    pub walls: Walls,
    pub scream: bool,
    pub goal_found: bool,
}

impl BayesianPercept {
    /// Length of the raw percept vector.
    pub const LEN: usize = 11;

    /// Decode a raw percept vector.
    pub fn from_bits(bits: &[u8]) -> Result<Self, ValidationError> {
        let b = decode_bits(bits, Self::LEN)?;
        Ok(Self {
            channels: [b[0], b[1], b[2], b[3], b[4]],
            walls: Walls {
                up: b[5],
                down: b[6],
                left: b[7],
                right: b[8],
            },
            scream: b[9],
            goal_found: b[10],
        })
    }

    /// Whether the given channel was sensed.
    #[must_use]
    pub const fn sensed(&self, channel: BeliefChannel) -> bool {
        self.channels[channel.index()]
    }
}

fn decode_bits(bits: &[u8], expected: usize) -> Result<Vec<bool>, ValidationError> {
    if bits.len() != expected {
        return Err(ValidationError::PerceptLength {
            actual: bits.len(),
            expected,
        });
    }
    bits.iter()
        .enumerate()
        .map(|(index, &value)| match value {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(ValidationError::PerceptBit { index, value }),
        })
        .collect()
}
