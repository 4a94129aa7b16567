#![no_std]

extern crate alloc;

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use controller::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use ranking::*;
pub use store::*;
pub use timer::*;
pub use types::*;

mod card;
mod controller;
mod engine;
mod error;
mod generator;
mod ranking;
mod store;
mod timer;
mod types;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub const fn config(self) -> RoundConfig {
        RoundConfig::get(self)
    }

    /// Parses a difficulty name, falling back to the default when it is unknown.
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::warn!("Unknown difficulty {:?}, using {}", name, Self::default());
            Self::default()
        })
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("easy") || s.eq_ignore_ascii_case("facil") {
            Ok(Self::Easy)
        } else if s.eq_ignore_ascii_case("medium") || s.eq_ignore_ascii_case("medio") {
            Ok(Self::Medium)
        } else if s.eq_ignore_ascii_case("hard") || s.eq_ignore_ascii_case("dificil") {
            Ok(Self::Hard)
        } else {
            Err(GameError::UnknownDifficulty)
        }
    }
}

/// Fixed parameters of a round at a given difficulty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub difficulty: Difficulty,
    pub pair_count: PairCount,
    pub time_limit: Seconds,
    pub score_value: u32,
}

impl RoundConfig {
    const TABLE: [RoundConfig; 3] = [
        RoundConfig::new_unchecked(Difficulty::Easy, 6, 90, 10),
        RoundConfig::new_unchecked(Difficulty::Medium, 9, 75, 20),
        RoundConfig::new_unchecked(Difficulty::Hard, 12, 30, 30),
    ];

    const fn new_unchecked(
        difficulty: Difficulty,
        pair_count: PairCount,
        time_limit: Seconds,
        score_value: u32,
    ) -> Self {
        Self {
            difficulty,
            pair_count,
            time_limit,
            score_value,
        }
    }

    pub const fn get(difficulty: Difficulty) -> Self {
        Self::TABLE[difficulty as usize]
    }

    /// Looks up a difficulty by name, see [`Difficulty::from_str`].
    pub fn lookup(name: &str) -> Result<Self> {
        name.parse().map(Self::get)
    }

    pub const fn card_count(&self) -> usize {
        self.pair_count as usize * 2
    }

    /// Layout hint for the grid: boards up to six pairs use four columns.
    pub const fn columns(&self) -> usize {
        if self.pair_count <= 6 { 4 } else { 6 }
    }
}

/// Outcome of selecting a card
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Selection rejected, nothing changed
    Ignored,
    /// First card of a turn turned face-up
    Revealed(CardIndex),
    /// Second card matched the first
    MatchFound(CardIndex, CardIndex),
    /// Second card differs, both stay face-up until the mismatch is resolved
    Mismatch(CardIndex, CardIndex),
}

impl SelectOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}
