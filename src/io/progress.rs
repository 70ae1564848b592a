//! Collapse progress display with one bar per grid attempt

use crate::spatial::Position;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:30.cyan/blue}] {pos}/{len} cells {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks collapsed cells for the current attempt
///
/// Each restart after a contradiction reuses the same bar with a fresh
/// length and an updated `attempt n/m` prefix.
pub struct ProgressManager {
    bar: ProgressBar,
    attempt: usize,
    attempts: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with an empty bar
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(PROGRESS_STYLE.clone());
        Self {
            bar,
            attempt: 0,
            attempts: 0,
        }
    }

    /// Reset the bar for a new attempt over `cell_count` cells
    pub fn start_attempt(&mut self, attempt: usize, attempts: usize, cell_count: usize) {
        self.attempt = attempt;
        self.attempts = attempts;
        self.bar.reset();
        self.bar.set_length(cell_count as u64);
        self.bar.set_position(0);
        self.bar.set_message(String::new());
        self.bar.set_prefix(format!("attempt {attempt}/{attempts}"));
    }

    /// Report the number of collapsed cells
    pub fn update(&self, collapsed: usize) {
        self.bar.set_position(collapsed as u64);
    }

    /// Note a contradiction that ended the current attempt
    pub fn report_contradiction(&self, position: Position) {
        self.bar
            .set_message(format!("contradiction at {position}"));
        if self.attempt < self.attempts {
            self.bar.println(format!(
                "attempt {}/{} hit a contradiction at {position}, restarting",
                self.attempt, self.attempts
            ));
        }
    }

    /// Mark the run as finished
    pub fn finish(&self, elapsed: Duration) {
        self.bar
            .finish_with_message(format!("done in {:.2}s", elapsed.as_secs_f64()));
    }
}
