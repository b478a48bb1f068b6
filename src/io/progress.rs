//! Progress reporting for long-running engine loops
//!
//! Engines never talk to a terminal directly; they push `(current, total)`
//! estimates into an injected [`ProgressSink`]. The console implementation
//! renders an `indicatif` bar, the silent one is used under `--quiet` and in
//! tests. Reported positions are clamped monotonically non-decreasing so the
//! display never runs backwards even when an engine's estimate is rough.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Observer for engine completion estimates
///
/// Purely observational; implementations must not influence algorithm state.
pub trait ProgressSink {
    /// Report the current completion estimate out of `total`
    fn update(&mut self, current: u64, total: u64);

    /// Signal that the engine has terminated
    fn finished(&mut self);
}

static EFFECT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Terminal progress bar for a single effect run
pub struct ConsoleProgress {
    bar: ProgressBar,
    highest: u64,
}

impl ConsoleProgress {
    /// Create a bar labeled with the effect name
    pub fn new(label: &str) -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(EFFECT_STYLE.clone());
        bar.set_message(label.to_string());
        Self { bar, highest: 0 }
    }
}

impl ProgressSink for ConsoleProgress {
    fn update(&mut self, current: u64, total: u64) {
        // Engine totals are estimates; cap the display at the stated total
        self.highest = self.highest.max(current.min(total));
        self.bar.set_length(total);
        self.bar.set_position(self.highest);
    }

    fn finished(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Sink that discards all reports
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl ProgressSink for SilentSink {
    fn update(&mut self, _current: u64, _total: u64) {}

    fn finished(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every report, for asserting engine progress behavior
    struct Recorder {
        updates: Vec<(u64, u64)>,
        done: bool,
    }

    impl ProgressSink for Recorder {
        fn update(&mut self, current: u64, total: u64) {
            self.updates.push((current, total));
        }

        fn finished(&mut self) {
            self.done = true;
        }
    }

    #[test]
    fn test_sink_object_safety() {
        let mut recorder = Recorder {
            updates: Vec::new(),
            done: false,
        };
        let sink: &mut dyn ProgressSink = &mut recorder;
        sink.update(1, 10);
        sink.update(5, 10);
        sink.finished();
        assert_eq!(recorder.updates, vec![(1, 10), (5, 10)]);
        assert!(recorder.done);
    }
}
