//! Terminal progress display for annealing runs

use crate::algorithm::annealer::StepReport;
use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_UPDATE_INTERVAL};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over annealing steps showing temperature and best energy
///
/// Redraws are throttled to every `interval` steps; the hot loop only pays
/// for a modulo check in between.
pub struct AnnealProgress {
    bar: ProgressBar,
    interval: usize,
}

impl AnnealProgress {
    /// Create a visible bar for a run of `steps` steps
    pub fn new(steps: usize) -> Self {
        let bar = ProgressBar::new(steps as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        Self {
            bar,
            interval: PROGRESS_UPDATE_INTERVAL,
        }
    }

    /// Create a bar that never draws
    pub fn hidden(steps: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(steps as u64);
        Self {
            bar,
            interval: PROGRESS_UPDATE_INTERVAL,
        }
    }

    /// Change how often the bar is refreshed
    #[must_use]
    pub fn with_interval(mut self, interval: usize) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Record a completed step
    pub fn observe(&self, report: &StepReport) {
        let done = report.step + 1;
        if done % self.interval == 0 || done == report.steps {
            self.bar.set_position(done as u64);
            self.bar.set_message(format!(
                "T={:.4} best={:.2}",
                report.temperature, report.best_energy
            ));
        }
    }

    /// Last position drawn
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Finish the bar with a closing message
    pub fn finish(&self, best_energy: f64) {
        self.bar
            .finish_with_message(format!("done, best energy {best_energy:.2}"));
    }
}
