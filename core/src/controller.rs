use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Interval between two countdown ticks.
pub const TICK_MS: Millis = 1000;

/// Name used when the host does not supply one.
pub const DEFAULT_PLAYER: &str = "Player";

/// Events the controller emits towards the view layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted {
        difficulty: Difficulty,
        pair_count: PairCount,
        time_limit: Seconds,
    },
    CardRevealed(CardIndex),
    CardHidden(CardIndex),
    CardMatched(CardIndex, CardIndex),
    MatchFailed(CardIndex, CardIndex),
    TickUpdated(Seconds),
    RoundWon {
        elapsed: Seconds,
    },
    RoundTimedOut,
}

pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

impl<T: EventSink + ?Sized> EventSink for &mut T {
    fn emit(&mut self, event: GameEvent) {
        (**self).emit(event);
    }
}

/// Adapts a closure into an [`EventSink`].
pub struct FnSink<F>(pub F);

impl<F: FnMut(GameEvent)> EventSink for FnSink<F> {
    fn emit(&mut self, event: GameEvent) {
        (self.0)(event);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// How long every card is shown when a round starts, 0 disables the preview
    pub preview_ms: Millis,
    /// How long a mismatched pair stays face-up
    pub hide_delay_ms: Millis,
    /// Start the round over when the countdown runs out
    pub restart_on_timeout: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            preview_ms: 3000,
            hide_delay_ms: 1000,
            restart_on_timeout: true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Won,
    TimedOut,
}

/// Valid transitions:
/// - NotStarted -> Active
/// - Active -> Finished(Won)
/// - Active -> Finished(TimedOut)
///
/// Any state goes back to NotStarted only by starting a new round.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    #[default]
    NotStarted,
    Active,
    Finished(RoundOutcome),
}

impl RoundStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

/// Parameters the current round was started with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundInfo {
    pub config: RoundConfig,
    pub player: String,
    pub seed: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum DeferredAction {
    HidePair,
    EndPreview,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Deferred {
    due: Millis,
    generation: u32,
    action: DeferredAction,
}

/// Drives one round at a time: board setup, selections, countdown and result recording.
///
/// Time only moves through [`GameController::advance`], which runs countdown ticks and deferred
/// actions in order on a single virtual clock.
#[derive(Debug)]
pub struct GameController<S> {
    settings: ControllerSettings,
    ranking: RankingService<S>,
    rng: SmallRng,
    engine: MatchEngine,
    timer: RoundTimer,
    status: RoundStatus,
    round: Option<RoundInfo>,
    generation: u32,
    previewing: bool,
    clock: Millis,
    next_tick: Millis,
    deferred: VecDeque<Deferred>,
}

impl<S: PersistentStore> GameController<S> {
    pub fn new(store: S, settings: ControllerSettings, seed: u64) -> Self {
        Self {
            settings,
            ranking: RankingService::new(store),
            rng: SmallRng::seed_from_u64(seed),
            engine: MatchEngine::new(Vec::new()),
            timer: RoundTimer::new(),
            status: RoundStatus::NotStarted,
            round: None,
            generation: 0,
            previewing: false,
            clock: 0,
            next_tick: 0,
            deferred: VecDeque::new(),
        }
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn round(&self) -> Option<&RoundInfo> {
        self.round.as_ref()
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn remaining(&self) -> Seconds {
        self.timer.remaining()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_previewing(&self) -> bool {
        self.previewing
    }

    /// Whether the view should show the face of the card at `index`.
    pub fn is_face_up(&self, index: CardIndex) -> bool {
        self.previewing
            || self
                .engine
                .card_at(index)
                .is_some_and(|card| card.is_face_up())
    }

    pub fn ranking(&self) -> &RankingService<S> {
        &self.ranking
    }

    pub fn ranking_mut(&mut self) -> &mut RankingService<S> {
        &mut self.ranking
    }

    pub fn start_round(
        &mut self,
        difficulty: Difficulty,
        player: &str,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let config = RoundConfig::get(difficulty);
        let seed = self.rng.random();

        self.timer.stop();
        self.status = RoundStatus::NotStarted;

        let board = RandomBoardGenerator::new(seed).generate(config.pair_count, &Symbol::POOL)?;

        // invalidates every deferred action of the previous round
        self.generation = self.generation.wrapping_add(1);
        self.engine = MatchEngine::new(board);
        self.round = Some(RoundInfo {
            config,
            player: player.to_string(),
            seed,
        });
        self.timer.start(config.time_limit);
        self.next_tick = self.clock + TICK_MS;
        self.status = RoundStatus::Active;
        log::debug!(
            "Round {} started for {} on {}, seed {}",
            self.generation,
            player,
            difficulty,
            seed
        );

        sink.emit(GameEvent::RoundStarted {
            difficulty,
            pair_count: config.pair_count,
            time_limit: config.time_limit,
        });

        self.previewing = self.settings.preview_ms > 0;
        if self.previewing {
            self.engine.set_locked(true);
            for index in 0..self.engine.board().len() {
                sink.emit(GameEvent::CardRevealed(index));
            }
            self.schedule(self.settings.preview_ms, DeferredAction::EndPreview);
        }

        Ok(())
    }

    /// Starts the last round over with the same difficulty and player.
    pub fn restart(&mut self, sink: &mut impl EventSink) -> Result<()> {
        let Some(round) = self.round.clone() else {
            log::debug!("Nothing to restart");
            return Ok(());
        };
        self.start_round(round.config.difficulty, &round.player, sink)
    }

    pub fn select(&mut self, index: CardIndex, sink: &mut impl EventSink) -> SelectOutcome {
        use SelectOutcome::*;

        if self.status != RoundStatus::Active {
            return Ignored;
        }

        let outcome = self.engine.select(index);
        match outcome {
            Ignored => {}
            Revealed(index) => sink.emit(GameEvent::CardRevealed(index)),
            MatchFound(first, second) => {
                sink.emit(GameEvent::CardRevealed(second));
                sink.emit(GameEvent::CardMatched(first, second));
                if self.engine.is_round_complete() {
                    self.finish_won(sink);
                }
            }
            Mismatch(_, second) => {
                sink.emit(GameEvent::CardRevealed(second));
                self.schedule(self.settings.hide_delay_ms, DeferredAction::HidePair);
            }
        }
        outcome
    }

    /// Moves the virtual clock forward, firing due ticks and deferred actions in time order.
    pub fn advance(&mut self, delta_ms: Millis, sink: &mut impl EventSink) {
        let target = self.clock.saturating_add(delta_ms);

        loop {
            let next_deferred = self.deferred.front().map(|deferred| deferred.due);
            let next_tick = self.timer.is_running().then_some(self.next_tick);

            match (next_deferred, next_tick) {
                (Some(due), tick) if due <= target && tick.is_none_or(|tick| due <= tick) => {
                    self.clock = due;
                    if let Some(deferred) = self.deferred.pop_front() {
                        if let Err(err) = self.fire(deferred, sink) {
                            log::trace!("Dropped {:?}: {}", deferred, err);
                        }
                    }
                }
                (_, Some(tick)) if tick <= target => {
                    self.clock = tick;
                    self.next_tick = tick + TICK_MS;
                    self.on_tick(sink);
                }
                _ => break,
            }
        }

        self.clock = target;
    }

    fn schedule(&mut self, delay: Millis, action: DeferredAction) {
        let deferred = Deferred {
            due: self.clock + delay,
            generation: self.generation,
            action,
        };
        let position = self
            .deferred
            .partition_point(|queued| queued.due <= deferred.due);
        self.deferred.insert(position, deferred);
    }

    fn fire(&mut self, deferred: Deferred, sink: &mut impl EventSink) -> Result<()> {
        if deferred.generation != self.generation {
            return Err(GameError::StaleCallback);
        }

        match deferred.action {
            DeferredAction::HidePair => {
                if let Some((first, second)) = self.engine.resolve_mismatch() {
                    sink.emit(GameEvent::CardHidden(first));
                    sink.emit(GameEvent::CardHidden(second));
                    sink.emit(GameEvent::MatchFailed(first, second));
                }
            }
            DeferredAction::EndPreview => {
                self.previewing = false;
                self.engine.set_locked(false);
                for (index, card) in self.engine.board().iter().enumerate() {
                    if !card.is_face_up() {
                        sink.emit(GameEvent::CardHidden(index));
                    }
                }
            }
        }
        Ok(())
    }

    fn on_tick(&mut self, sink: &mut impl EventSink) {
        match self.timer.tick() {
            Some(TimerEvent::Tick(remaining)) => {
                log::trace!("{} seconds left", remaining);
                sink.emit(GameEvent::TickUpdated(remaining));
            }
            Some(TimerEvent::Timeout) => self.on_timeout(sink),
            None => {}
        }
    }

    fn on_timeout(&mut self, sink: &mut impl EventSink) {
        log::debug!("Round {} timed out", self.generation);
        self.status = RoundStatus::Finished(RoundOutcome::TimedOut);
        self.previewing = false;
        self.engine.set_locked(true);
        sink.emit(GameEvent::RoundTimedOut);

        if self.settings.restart_on_timeout {
            if let Err(err) = self.restart(sink) {
                log::error!("Could not restart round: {}", err);
            }
        }
    }

    fn finish_won(&mut self, sink: &mut impl EventSink) {
        self.timer.stop();
        let elapsed = self.timer.elapsed();
        self.status = RoundStatus::Finished(RoundOutcome::Won);

        if let Some(round) = &self.round {
            if let Err(err) = self.ranking.record_time(elapsed) {
                log::error!("Could not record time: {}", err);
            }
            if let Err(err) = self
                .ranking
                .record_score(&round.player, round.config.difficulty)
            {
                log::error!("Could not record score: {}", err);
            }
        }

        log::debug!("Round {} won in {} seconds", self.generation, elapsed);
        sink.emit(GameEvent::RoundWon { elapsed });
    }
}
