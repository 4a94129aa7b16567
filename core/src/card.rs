use serde::{Deserialize, Serialize};

use crate::Symbol;

/// A single card on the board; identity is its position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub symbol: Symbol,
    pub revealed: bool,
    pub matched: bool,
}

impl Card {
    pub const fn face_down(symbol: Symbol) -> Self {
        Self {
            symbol,
            revealed: false,
            matched: false,
        }
    }

    /// Whether the card is currently showing its face.
    pub const fn is_face_up(self) -> bool {
        self.revealed || self.matched
    }
}
