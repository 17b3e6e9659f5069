//! Elapsed-time collaborators.
//!
//! The engine never reads the clock. It emits [`TimerSignal`]s as effects
//! and the host forwards them to whatever [`Timer`]s it runs.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Which of the two clocks a signal targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerScope {
    /// Time spent on the current round.
    Round,
    /// Time spent on the whole match.
    Overall,
}

/// Instruction for a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerSignal {
    /// Freeze the readout.
    Stop(TimerScope),
    /// Zero the readout and keep counting.
    Reset(TimerScope),
}

impl TimerSignal {
    /// Forwards the signal to the matching timer.
    #[instrument(skip(round, overall))]
    pub fn apply(self, round: &mut impl Timer, overall: &mut impl Timer) {
        match self {
            TimerSignal::Stop(TimerScope::Round) => round.stop(),
            TimerSignal::Stop(TimerScope::Overall) => overall.stop(),
            TimerSignal::Reset(TimerScope::Round) => round.reset(),
            TimerSignal::Reset(TimerScope::Overall) => overall.reset(),
        }
    }
}

/// A running clock the host can start, stop and zero.
pub trait Timer {
    /// Starts (or resumes) counting.
    fn start(&mut self);
    /// Freezes the current reading.
    fn stop(&mut self);
    /// Zeroes the reading and starts counting again.
    fn reset(&mut self);
    /// Time counted so far.
    fn elapsed(&self) -> Duration;

    /// Reading as `MM:SS`, minutes growing past 99 if needed.
    fn formatted(&self) -> String {
        format_elapsed(self.elapsed())
    }
}

/// Formats a duration as zero-padded `MM:SS`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Wall-clock [`Timer`] backed by [`Instant`].
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
    banked: Duration,
}

impl Stopwatch {
    /// A stopwatch that is already running.
    pub fn started() -> Self {
        let mut watch = Self::default();
        watch.start();
        watch
    }

    /// True while counting.
    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }
}

impl Timer for Stopwatch {
    fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.banked += started.elapsed();
            debug!(elapsed = ?self.banked, "Stopwatch stopped");
        }
    }

    fn reset(&mut self) {
        self.banked = Duration::ZERO;
        self.started = Some(Instant::now());
    }

    fn elapsed(&self) -> Duration {
        self.banked + self.started.map(|s| s.elapsed()).unwrap_or_default()
    }
}
