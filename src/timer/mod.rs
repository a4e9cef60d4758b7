//! Pomodoro countdown and the focus view's exit gesture.
//!
//! ```text
//! Idle(Work) --start--> Running(Work) --0s--> Idle(Break) --start--> Running(Break) --0s--> Idle(Work)
//! ```
//!
//! Nothing here owns a thread or reads the clock on its own: the app's event
//! loop converts wall-clock time into `tick` calls.

pub mod exit_hold;
pub mod pomodoro;

pub use exit_hold::{ExitDecision, ExitHold};
pub use pomodoro::{Phase, PhaseComplete, PomodoroTimer};

use crate::domain::PomodoroDurations;
use crate::ticker::SecondTicker;
use std::time::Instant;

/// A countdown together with the wall-clock driver that feeds it seconds
#[derive(Debug, Clone)]
pub struct DrivenTimer {
    pub timer: PomodoroTimer,
    ticker: SecondTicker,
}

impl DrivenTimer {
    pub fn new(durations: PomodoroDurations, now: Instant) -> Self {
        Self {
            timer: PomodoroTimer::new(durations),
            ticker: SecondTicker::new(now),
        }
    }

    pub fn toggle(&mut self, now: Instant) {
        // The first second is counted from the moment of starting
        if self.timer.toggle() {
            self.ticker.restart(now);
        }
    }

    pub fn reset(&mut self) {
        self.timer.reset();
    }

    /// Feed every whole second elapsed since the last call.
    /// Stops early when a phase completes.
    pub fn advance(&mut self, now: Instant) -> Option<PhaseComplete> {
        let due = self.ticker.due(now);
        if !self.timer.is_running() {
            return None;
        }
        for _ in 0..due {
            if let Some(done) = self.timer.tick() {
                return Some(done);
            }
        }
        None
    }
}

/// State of the full-screen focus view.
///
/// Created when the view opens and dropped when it closes, so its countdown
/// cannot outlive the view.
#[derive(Debug, Clone)]
pub struct FocusSession {
    pub clock: DrivenTimer,
    pub exit: ExitHold,
}

impl FocusSession {
    pub fn new(durations: PomodoroDurations, now: Instant, infer_release: bool) -> Self {
        Self {
            clock: DrivenTimer::new(durations, now),
            exit: ExitHold::new(infer_release),
        }
    }
}
