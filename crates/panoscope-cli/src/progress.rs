use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use panoscope_core::session::{BuildReporter, BuildStage};

/// Shows panorama build stages on a terminal progress bar.
pub struct BarReporter {
    bar: ProgressBar,
    total: AtomicUsize,
    /// Highest percentage shown in the current stage.
    shown: AtomicU64,
}

impl BarReporter {
    pub fn new() -> Result<Self> {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg:20} [{bar:40}] {pos}%")?
                .progress_chars("=> "),
        );
        Ok(Self {
            bar,
            total: AtomicUsize::new(0),
            shown: AtomicU64::new(0),
        })
    }

    pub fn finish(&self, message: &'static str) {
        self.bar.finish_with_message(message);
    }
}

impl BuildReporter for BarReporter {
    fn begin_stage(&self, stage: BuildStage, total_items: Option<usize>) {
        self.total.store(total_items.unwrap_or(0), Ordering::Relaxed);
        self.shown.store(0, Ordering::Release);
        self.bar.set_message(stage.to_string());
        self.bar.set_position(0);
    }

    fn advance(&self, items_done: usize) {
        let total = self.total.load(Ordering::Relaxed);
        if total == 0 {
            return;
        }
        let pct = (items_done.min(total) * 100 / total) as u64;
        // Parallel workers report out of order. Each caller only adds the
        // part above the previous maximum, so the bar never moves back.
        let previous = self.shown.fetch_max(pct, Ordering::AcqRel);
        if pct > previous {
            self.bar.inc(pct - previous);
        }
    }

    fn finish_stage(&self) {
        self.shown.store(100, Ordering::Release);
        self.bar.set_position(100);
    }
}
