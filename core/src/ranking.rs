use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fastest completion times in ascending order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestTimes(Vec<Seconds>);

impl BestTimes {
    pub const CAPACITY: usize = 10;

    pub fn as_slice(&self) -> &[Seconds] {
        &self.0
    }

    /// Inserts keeping the order and capacity, returns the 0-based position if the time was kept.
    pub fn insert(&mut self, elapsed: Seconds) -> Option<usize> {
        let position = self.0.partition_point(|&time| time <= elapsed);
        if position >= Self::CAPACITY {
            return None;
        }
        self.0.insert(position, elapsed);
        self.0.truncate(Self::CAPACITY);
        Some(position)
    }
}

impl StorageKey for BestTimes {
    const KEY: &'static str = "memora:best-times";
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub points: u32,
    /// Order in which the player first scored, breaks ties between equal totals.
    #[serde(default)]
    pub joined: u32,
}

/// Cumulative points per player, highest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreBoard(Vec<ScoreEntry>);

impl ScoreBoard {
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.0
    }

    pub fn points_of(&self, name: &str) -> Option<u32> {
        self.0
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.points)
    }

    /// Adds `points` to the player's total, inserting the player when new; returns the new total.
    pub fn add(&mut self, name: &str, points: u32) -> u32 {
        let total = match self.0.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => {
                entry.points = entry.points.saturating_add(points);
                entry.points
            }
            None => {
                let joined = self
                    .0
                    .iter()
                    .map(|entry| entry.joined + 1)
                    .max()
                    .unwrap_or(0);
                self.0.push(ScoreEntry {
                    name: name.to_string(),
                    points,
                    joined,
                });
                points
            }
        };
        self.0.sort_by(|a, b| b.points.cmp(&a.points).then(a.joined.cmp(&b.joined)));
        total
    }
}

impl StorageKey for ScoreBoard {
    const KEY: &'static str = "memora:scores";
}

/// Best-times and score rankings, read and written through the store on every call.
#[derive(Debug)]
pub struct RankingService<S> {
    store: S,
}

impl<S: PersistentStore> RankingService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn best_times(&self) -> BestTimes {
        self.store.load_or_default()
    }

    pub fn scores(&self) -> ScoreBoard {
        self.store.load_or_default()
    }

    pub fn record_time(&mut self, elapsed: Seconds) -> Result<Option<usize>> {
        let mut times = self.best_times();
        let position = times.insert(elapsed);
        match position {
            Some(position) => {
                log::debug!("Recorded {}s at position {}", elapsed, position + 1);
                self.store.save(&times)?;
            }
            None => log::debug!("{}s does not enter the best times", elapsed),
        }
        Ok(position)
    }

    pub fn record_score(&mut self, player: &str, difficulty: Difficulty) -> Result<u32> {
        let points = RoundConfig::get(difficulty).score_value;
        let mut scores = self.scores();
        let total = scores.add(player, points);
        self.store.save(&scores)?;
        log::debug!("{} scored {} on {}, total {}", player, points, difficulty, total);
        Ok(total)
    }

    /// Deletes both rankings; irreversible.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear::<BestTimes>()?;
        self.store.clear::<ScoreBoard>()?;
        log::info!("Rankings reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn service() -> RankingService<MemoryStore> {
        RankingService::new(MemoryStore::new())
    }

    #[test]
    fn times_are_kept_ascending() {
        let mut ranking = service();
        for time in [50, 30, 70] {
            ranking.record_time(time).unwrap();
        }
        assert_eq!(ranking.best_times().as_slice(), [30, 50, 70]);
    }

    #[test]
    fn full_ranking_rejects_slower_and_evicts_max_for_faster() {
        let mut ranking = service();
        for time in (1..=10).map(|i| i * 10) {
            ranking.record_time(time).unwrap();
        }

        assert_eq!(ranking.record_time(200).unwrap(), None);
        assert_eq!(ranking.record_time(100).unwrap(), None);
        assert_eq!(ranking.best_times().as_slice().len(), BestTimes::CAPACITY);
        assert_eq!(ranking.best_times().as_slice().last(), Some(&100));

        assert_eq!(ranking.record_time(15).unwrap(), Some(1));
        let times = ranking.best_times();
        assert_eq!(times.as_slice().len(), BestTimes::CAPACITY);
        assert_eq!(times.as_slice()[..3], [10, 15, 20]);
        assert_eq!(times.as_slice().last(), Some(&90));
    }

    #[test]
    fn scores_accumulate_per_player() {
        let mut ranking = service();
        ranking.record_score("Ana", Difficulty::Easy).unwrap();
        let total = ranking.record_score("Ana", Difficulty::Easy).unwrap();

        assert_eq!(total, 20);
        assert_eq!(ranking.scores().points_of("Ana"), Some(20));
    }

    #[test]
    fn scores_sort_descending_with_ties_by_insertion_order() {
        let mut ranking = service();
        ranking.record_score("Ana", Difficulty::Easy).unwrap();
        ranking.record_score("Ana", Difficulty::Easy).unwrap();
        ranking.record_score("Bo", Difficulty::Medium).unwrap();
        ranking.record_score("Cy", Difficulty::Hard).unwrap();

        let names: Vec<_> = ranking
            .scores()
            .entries()
            .iter()
            .map(|entry| (entry.name.clone(), entry.points))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Cy".to_string(), 30),
                ("Ana".to_string(), 20),
                ("Bo".to_string(), 20),
            ]
        );
    }

    #[test]
    fn late_tie_keeps_first_recorded_player_ahead() {
        let mut board = ScoreBoard::default();
        board.add("Ana", 10);
        board.add("Bo", 20);
        board.add("Ana", 10);

        let names: Vec<_> = board.entries().iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, ["Ana", "Bo"]);
    }

    #[test]
    fn reset_clears_both_rankings() {
        let mut ranking = service();
        ranking.record_time(42).unwrap();
        ranking.record_score("Ana", Difficulty::Hard).unwrap();

        ranking.reset().unwrap();

        assert!(ranking.store().is_empty());
        assert_eq!(ranking.best_times(), BestTimes::default());
        assert_eq!(ranking.scores(), ScoreBoard::default());
    }

    #[test]
    fn corrupt_ranking_reads_as_empty() {
        let mut store = MemoryStore::new();
        store
            .set(BestTimes::KEY, serde_json::Value::from("garbage"))
            .unwrap();
        let mut ranking = RankingService::new(store);

        assert_eq!(ranking.best_times(), BestTimes::default());
        assert_eq!(ranking.record_time(12).unwrap(), Some(0));
        assert_eq!(ranking.best_times().as_slice(), [12]);
    }
}
