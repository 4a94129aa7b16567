use super::*;

/// Generation strategy that deals the first `pair_count` symbols of the pool twice and shuffles the
/// result, deterministic for a given seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, pair_count: PairCount, pool: &[Symbol]) -> Result<Vec<Card>> {
        use rand::prelude::*;

        let needed = usize::from(pair_count);
        if pool.len() < needed {
            log::error!(
                "Symbol pool too small, requested {} pairs but only {} symbols",
                needed,
                pool.len()
            );
            return Err(GameError::InsufficientSymbols {
                needed,
                available: pool.len(),
            });
        }

        let selected = &pool[..needed];
        let mut board: Vec<Card> = selected
            .iter()
            .chain(selected)
            .copied()
            .map(Card::face_down)
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        shuffle(&mut board, &mut rng);

        log::debug!("Generated board of {} cards from seed {}", board.len(), self.seed);
        Ok(board)
    }
}
