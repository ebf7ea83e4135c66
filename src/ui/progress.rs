//! Progress display for the load pass

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// How progress lines reach the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Live spinner with group lines printed above it
    Interactive,
    /// Plain stdout lines (stdout is not a terminal)
    Plain,
    /// No output at all (tests)
    Silent,
}

/// Spinner that ticks per processed XML element, with per-group progress
/// lines. Falls back to plain printing when stdout is not a terminal.
pub struct LoadProgress {
    bar: ProgressBar,
    mode: Mode,
}

impl LoadProgress {
    pub fn new() -> Self {
        if !console::Term::stdout().is_term() {
            return Self {
                bar: ProgressBar::hidden(),
                mode: Mode::Plain,
            };
        }

        let bar = ProgressBar::new_spinner().with_message("Loading UCD elements");
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg} ({pos} elements)")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Self {
            bar,
            mode: Mode::Interactive,
        }
    }

    /// Progress sink that emits nothing (for tests)
    pub fn disabled() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            mode: Mode::Silent,
        }
    }

    /// Record one processed XML element
    pub fn element(&self) {
        self.bar.inc(1);
    }

    /// Announce a newly inserted group above the live bar
    pub fn group(&self, name: &str) {
        match self.mode {
            Mode::Interactive => self.bar.println(format!("Group {}", name)),
            Mode::Plain => println!("Group {}", name),
            Mode::Silent => {}
        }
    }

    /// Clear the spinner once the pass is complete
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for LoadProgress {
    fn default() -> Self {
        Self::new()
    }
}
