//! Execution-time accounting

use std::fmt;
use std::time::{Duration, Instant};

/// Wall-clock timer that can be paused while the engine waits for input
#[derive(Debug)]
pub struct Stopwatch {
    started: Instant,
    paused_total: Duration,
    paused_at: Option<Instant>,
}

impl Stopwatch {
    pub fn start() -> Self {
        Stopwatch {
            started: Instant::now(),
            paused_total: Duration::ZERO,
            paused_at: None,
        }
    }

    pub fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(Instant::now());
        }
    }

    pub fn resume(&mut self) {
        if let Some(at) = self.paused_at.take() {
            self.paused_total += at.elapsed();
        }
    }

    /// Time spent running, excluding every pause so far
    pub fn elapsed(&self) -> Duration {
        let now = Instant::now();
        let paused = self.paused_total + self.paused_at.map_or(Duration::ZERO, |at| now - at);
        (now - self.started).saturating_sub(paused)
    }
}

/// What a completed run reports next to the terminal title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub instructions: u64,
    pub elapsed: Duration,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Truncated, not rounded, to the millisecond
        let millis = self.elapsed.as_millis();
        write!(
            f,
            "{}.{:03} sec. {} ins.",
            millis / 1000,
            millis % 1000,
            self.instructions
        )
    }
}
