use std::time::{Duration, Instant};

/// How long the exit key must be held while the shield is up
pub const EXIT_HOLD: Duration = Duration::from_secs(3);

/// Without key-release events, a hold ends after this long with no repeat
pub const HOLD_RELEASE_GRACE: Duration = Duration::from_millis(500);

/// Result of asking to leave the focus view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDecision {
    /// Leave now
    Exit,
    /// Shield is up; keep holding
    Holding,
}

/// The "hold to dismiss" gesture guarding the focus view.
///
/// Progress grows linearly from the first press to 100% after [`EXIT_HOLD`].
/// Releasing early drops progress back to 0. Completion is reported once.
#[derive(Debug, Clone)]
pub struct ExitHold {
    shield: bool,
    held_since: Option<Instant>,
    last_signal: Option<Instant>,
    infer_release: bool,
    fired: bool,
}

impl ExitHold {
    /// `infer_release` is set when the terminal cannot report key releases
    pub fn new(infer_release: bool) -> Self {
        Self {
            shield: false,
            held_since: None,
            last_signal: None,
            infer_release,
            fired: false,
        }
    }

    pub fn shield(&self) -> bool {
        self.shield
    }

    pub fn set_shield(&mut self, on: bool) {
        self.shield = on;
        self.release();
    }

    pub fn is_holding(&self) -> bool {
        self.held_since.is_some()
    }

    /// Exit key pressed (or auto-repeated)
    pub fn press(&mut self, now: Instant) -> ExitDecision {
        if !self.shield {
            return ExitDecision::Exit;
        }
        if self.held_since.is_none() {
            self.held_since = Some(now);
        }
        self.last_signal = Some(now);
        ExitDecision::Holding
    }

    /// Exit key released: cancel and reset progress
    pub fn release(&mut self) {
        self.held_since = None;
        self.last_signal = None;
    }

    /// Hold progress in [0, 1]
    pub fn progress(&self, now: Instant) -> f64 {
        match self.held_since {
            Some(since) => {
                let held = now.saturating_duration_since(since).as_secs_f64();
                (held / EXIT_HOLD.as_secs_f64()).min(1.0)
            }
            None => 0.0,
        }
    }

    /// Advance the gesture; true exactly once, when the hold completes
    pub fn update(&mut self, now: Instant) -> bool {
        if self.fired || self.held_since.is_none() {
            return false;
        }

        if self.infer_release {
            if let Some(last) = self.last_signal {
                if now.saturating_duration_since(last) > HOLD_RELEASE_GRACE {
                    self.release();
                    return false;
                }
            }
        }

        if self.progress(now) >= 1.0 {
            self.fired = true;
            self.release();
            return true;
        }
        false
    }
}
