use serde::{Deserialize, Serialize};

use crate::*;

/// What a single one-second tick produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    Tick(Seconds),
    Timeout,
}

/// Countdown clock for one round, advanced one second per [`RoundTimer::tick`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTimer {
    limit: Seconds,
    remaining: Seconds,
    running: bool,
}

impl RoundTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts counting down from `limit`, replacing any countdown already in progress.
    pub fn start(&mut self, limit: Seconds) {
        if self.running {
            log::debug!("Replacing running timer with {} seconds left", self.remaining);
        }
        *self = Self {
            limit,
            remaining: limit,
            running: true,
        };
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn limit(&self) -> Seconds {
        self.limit
    }

    pub fn remaining(&self) -> Seconds {
        self.remaining
    }

    pub fn elapsed(&self) -> Seconds {
        self.limit - self.remaining
    }

    /// Advances one second; the tick that reaches zero reports a timeout instead and halts.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            log::debug!("Timer ran out after {} seconds", self.limit);
            Some(TimerEvent::Timeout)
        } else {
            Some(TimerEvent::Tick(self.remaining))
        }
    }

    /// Callback-style [`RoundTimer::tick`].
    pub fn tick_with(&mut self, on_tick: impl FnOnce(Seconds), on_timeout: impl FnOnce()) {
        match self.tick() {
            Some(TimerEvent::Tick(remaining)) => on_tick(remaining),
            Some(TimerEvent::Timeout) => on_timeout(),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn counts_down_then_times_out_after_limit() {
        let mut timer = RoundTimer::new();
        timer.start(5);

        let events: Vec<_> = (0..5).map(|_| timer.tick()).collect();

        assert_eq!(
            events,
            [
                Some(TimerEvent::Tick(4)),
                Some(TimerEvent::Tick(3)),
                Some(TimerEvent::Tick(2)),
                Some(TimerEvent::Tick(1)),
                Some(TimerEvent::Timeout),
            ]
        );
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 0);
        assert_eq!(timer.tick(), None);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut timer = RoundTimer::new();
        timer.start(1);
        assert_eq!(timer.tick(), Some(TimerEvent::Timeout));

        timer.stop();
        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn stopped_timer_keeps_elapsed_time() {
        let mut timer = RoundTimer::new();
        timer.start(90);
        timer.tick();
        timer.tick();
        timer.stop();

        assert_eq!(timer.tick(), None);
        assert_eq!(timer.elapsed(), 2);
    }

    #[test]
    fn restarting_replaces_previous_countdown() {
        let mut timer = RoundTimer::new();
        timer.start(10);
        timer.tick();
        timer.start(3);

        assert_eq!(timer.remaining(), 3);
        assert_eq!(timer.tick(), Some(TimerEvent::Tick(2)));
    }

    #[test]
    fn callbacks_receive_tick_and_timeout() {
        let mut timer = RoundTimer::new();
        timer.start(2);
        let mut ticks = Vec::new();
        let mut timed_out = false;

        timer.tick_with(|remaining| ticks.push(remaining), || timed_out = true);
        assert!(!timed_out);
        timer.tick_with(|remaining| ticks.push(remaining), || timed_out = true);

        assert_eq!(ticks, [1]);
        assert!(timed_out);
    }
}
