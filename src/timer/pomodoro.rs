use crate::domain::PomodoroDurations;
use serde::{Deserialize, Serialize};

/// Which half of the cycle the countdown belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    pub fn flipped(&self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Work => "Focus Time",
            Self::Break => "Break Time",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
}

/// Emitted by `tick` when a countdown reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseComplete {
    pub finished: Phase,
    pub next: Phase,
}

/// Work/break countdown.
///
/// Driven externally: the caller invokes `tick` once per elapsed second. A
/// finished phase flips to the other one and stops; the next phase only
/// starts on an explicit `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomodoroTimer {
    durations: PomodoroDurations,
    phase: Phase,
    state: RunState,
    /// Seconds remaining in the current phase
    time_left: u32,
}

impl PomodoroTimer {
    pub fn new(durations: PomodoroDurations) -> Self {
        let durations = sanitize(durations);
        Self {
            durations,
            phase: Phase::Work,
            state: RunState::Idle,
            time_left: durations.work,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state() == RunState::Running
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn durations(&self) -> PomodoroDurations {
        self.durations
    }

    /// Configured length of a phase, in seconds
    pub fn duration_of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.durations.work,
            Phase::Break => self.durations.break_secs,
        }
    }

    /// Idle -> Running; returns whether the state changed
    pub fn start(&mut self) -> bool {
        if self.state == RunState::Running {
            return false;
        }
        self.state = RunState::Running;
        true
    }

    /// Running -> Idle; returns whether the state changed
    pub fn pause(&mut self) -> bool {
        if self.state == RunState::Idle {
            return false;
        }
        self.state = RunState::Idle;
        true
    }

    /// Start or pause; returns whether the timer is now running
    pub fn toggle(&mut self) -> bool {
        if self.is_running() {
            self.pause();
            false
        } else {
            self.start()
        }
    }

    /// One elapsed second. Ignored while idle.
    pub fn tick(&mut self) -> Option<PhaseComplete> {
        if self.state != RunState::Running {
            return None;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left > 0 {
            return None;
        }

        let finished = self.phase;
        self.phase = finished.flipped();
        self.time_left = self.duration_of(self.phase);
        self.state = RunState::Idle;
        Some(PhaseComplete {
            finished,
            next: self.phase,
        })
    }

    /// Back to an idle work phase with a full countdown
    pub fn reset(&mut self) {
        self.state = RunState::Idle;
        self.phase = Phase::Work;
        self.time_left = self.durations.work;
    }

    /// Apply new phase lengths.
    ///
    /// While idle the countdown re-bases to the new length of the current
    /// phase. A running countdown is never truncated; the new lengths take
    /// effect at the next phase flip or reset.
    pub fn set_durations(&mut self, durations: PomodoroDurations) {
        self.durations = sanitize(durations);
        if self.state == RunState::Idle {
            self.time_left = self.duration_of(self.phase);
        }
    }

    /// Elapsed share of the current phase, in [0, 1]
    pub fn progress(&self) -> f64 {
        let total = self.duration_of(self.phase);
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.time_left);
        (f64::from(elapsed) / f64::from(total)).clamp(0.0, 1.0)
    }

    /// Remaining time as "MM:SS"
    pub fn display(&self) -> String {
        let left = self.time_left();
        format!("{:02}:{:02}", left / 60, left % 60)
    }
}

/// A zero-length phase would never tick down; treat it as one second
fn sanitize(durations: PomodoroDurations) -> PomodoroDurations {
    PomodoroDurations {
        work: durations.work.max(1),
        break_secs: durations.break_secs.max(1),
    }
}
