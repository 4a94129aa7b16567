use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Selection phase of the current turn.
///
/// Valid transitions:
/// - Idle -> OneSelected
/// - OneSelected -> Idle (second card matched)
/// - OneSelected -> Resolving (second card differs)
/// - Resolving -> Idle
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    #[default]
    Idle,
    OneSelected(CardIndex),
    Resolving(CardIndex, CardIndex),
}

/// Flip/compare/resolve state machine for one board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchEngine {
    board: Vec<Card>,
    phase: TurnPhase,
    matched_count: PairCount,
    pair_count: PairCount,
    locked: bool,
}

impl MatchEngine {
    pub fn new(board: Vec<Card>) -> Self {
        let pair_count = (board.len() / 2).try_into().unwrap_or(PairCount::MAX);
        Self {
            board,
            phase: TurnPhase::Idle,
            matched_count: 0,
            pair_count,
            locked: false,
        }
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn card_at(&self, index: CardIndex) -> Option<Card> {
        self.board.get(index).copied()
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn matched_count(&self) -> PairCount {
        self.matched_count
    }

    pub fn pair_count(&self) -> PairCount {
        self.pair_count
    }

    /// Indices of the face-up, not yet resolved cards.
    pub fn selection(&self) -> Vec<CardIndex> {
        match self.phase {
            TurnPhase::Idle => Vec::new(),
            TurnPhase::OneSelected(first) => alloc::vec![first],
            TurnPhase::Resolving(first, second) => alloc::vec![first, second],
        }
    }

    pub fn is_resolving(&self) -> bool {
        matches!(self.phase, TurnPhase::Resolving(..))
    }

    pub fn is_round_complete(&self) -> bool {
        self.matched_count == self.pair_count
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Locks or unlocks selection, used while every card is shown during the preview.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn can_select(&self, index: CardIndex) -> bool {
        if self.locked || self.is_resolving() || self.is_round_complete() {
            return false;
        }

        match self.board.get(index) {
            None => false,
            Some(card) if card.matched || card.revealed => false,
            Some(_) => true,
        }
    }

    pub fn select(&mut self, index: CardIndex) -> SelectOutcome {
        use SelectOutcome::*;

        if !self.can_select(index) {
            log::trace!("Selection of card {} ignored in {:?}", index, self.phase);
            return Ignored;
        }

        self.board[index].revealed = true;

        match self.phase {
            TurnPhase::Idle => {
                self.phase = TurnPhase::OneSelected(index);
                Revealed(index)
            }
            TurnPhase::OneSelected(first) => self.evaluate(first, index),
            TurnPhase::Resolving(..) => unreachable!("selection is guarded while resolving"),
        }
    }

    fn evaluate(&mut self, first: CardIndex, second: CardIndex) -> SelectOutcome {
        if self.board[first].symbol == self.board[second].symbol {
            self.board[first].matched = true;
            self.board[second].matched = true;
            self.matched_count += 1;
            self.phase = TurnPhase::Idle;
            log::debug!(
                "Matched {:?} at {} and {}, {}/{} pairs",
                self.board[first].symbol,
                first,
                second,
                self.matched_count,
                self.pair_count
            );
            SelectOutcome::MatchFound(first, second)
        } else {
            self.phase = TurnPhase::Resolving(first, second);
            SelectOutcome::Mismatch(first, second)
        }
    }

    /// Turns a mismatched pair face-down again, returning the hidden indices.
    pub fn resolve_mismatch(&mut self) -> Option<(CardIndex, CardIndex)> {
        let TurnPhase::Resolving(first, second) = self.phase else {
            return None;
        };

        self.board[first].revealed = false;
        self.board[second].revealed = false;
        self.phase = TurnPhase::Idle;
        Some((first, second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Symbol::*;

    fn engine(symbols: &[Symbol]) -> MatchEngine {
        MatchEngine::new(symbols.iter().copied().map(Card::face_down).collect())
    }

    #[test]
    fn matching_pair_stays_face_up() {
        let mut engine = engine(&[Car, Bus, Car, Bus]);

        assert_eq!(engine.select(0), SelectOutcome::Revealed(0));
        assert_eq!(engine.select(2), SelectOutcome::MatchFound(0, 2));

        assert!(engine.card_at(0).unwrap().matched);
        assert!(engine.card_at(2).unwrap().matched);
        assert!(engine.selection().is_empty());
        assert_eq!(engine.matched_count(), 1);
        assert_eq!(engine.phase(), TurnPhase::Idle);
    }

    #[test]
    fn mismatched_pair_is_hidden_on_resolution() {
        let mut engine = engine(&[Car, Bus, Car, Bus]);

        engine.select(0);
        assert_eq!(engine.select(1), SelectOutcome::Mismatch(0, 1));
        assert!(engine.card_at(0).unwrap().revealed);
        assert!(engine.card_at(1).unwrap().revealed);
        assert_eq!(engine.selection(), [0, 1]);

        assert_eq!(engine.resolve_mismatch(), Some((0, 1)));
        assert!(!engine.card_at(0).unwrap().revealed);
        assert!(!engine.card_at(1).unwrap().revealed);
        assert!(engine.selection().is_empty());
        assert_eq!(engine.matched_count(), 0);
    }

    #[test]
    fn resolving_without_pending_mismatch_does_nothing() {
        let mut engine = engine(&[Car, Car]);
        assert_eq!(engine.resolve_mismatch(), None);
        engine.select(0);
        assert_eq!(engine.resolve_mismatch(), None);
        assert_eq!(engine.selection(), [0]);
    }

    #[test]
    fn reselecting_sole_selected_card_is_ignored() {
        let mut engine = engine(&[Car, Bus, Car, Bus]);

        engine.select(0);
        assert_eq!(engine.select(0), SelectOutcome::Ignored);
        assert_eq!(engine.phase(), TurnPhase::OneSelected(0));
    }

    #[test]
    fn matched_card_is_ignored() {
        let mut engine = engine(&[Car, Bus, Car, Bus]);

        engine.select(0);
        engine.select(2);
        assert_eq!(engine.select(0), SelectOutcome::Ignored);
        assert_eq!(engine.select(2), SelectOutcome::Ignored);
        assert_eq!(engine.phase(), TurnPhase::Idle);
    }

    #[test]
    fn third_card_while_resolving_is_ignored() {
        let mut engine = engine(&[Car, Bus, Ship, Car, Bus, Ship]);

        engine.select(0);
        engine.select(1);
        assert_eq!(engine.select(2), SelectOutcome::Ignored);
        assert!(!engine.card_at(2).unwrap().revealed);
        assert_eq!(engine.selection(), [0, 1]);
    }

    #[test]
    fn out_of_range_and_locked_selections_are_ignored() {
        let mut engine = engine(&[Car, Car]);

        assert_eq!(engine.select(5), SelectOutcome::Ignored);
        engine.set_locked(true);
        assert_eq!(engine.select(0), SelectOutcome::Ignored);
        engine.set_locked(false);
        assert_eq!(engine.select(0), SelectOutcome::Revealed(0));
    }

    #[test]
    fn round_completes_after_last_pair() {
        let mut engine = engine(&[Car, Bus, Bus, Car]);

        engine.select(0);
        engine.select(3);
        assert!(!engine.is_round_complete());
        engine.select(1);
        engine.select(2);
        assert!(engine.is_round_complete());
        assert_eq!(engine.matched_count(), engine.pair_count());
    }
}
