//! Progress display for long-running map operations

use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_MIN_CELLS};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static CELL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{prefix:>10}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Drives a single progress bar over constructed cells
///
/// Small grids finish faster than a bar can render, so nothing is drawn
/// below [`PROGRESS_MIN_CELLS`].
pub struct ProgressManager {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager that draws to stderr
    pub const fn new() -> Self {
        Self {
            enabled: true,
            bar: None,
        }
    }

    /// Create a progress manager that never draws
    pub const fn hidden() -> Self {
        Self {
            enabled: false,
            bar: None,
        }
    }

    /// Begin tracking an operation over `total` cells
    pub fn start(&mut self, label: &str, total: u64) {
        self.clear();

        let target = if self.enabled && total >= PROGRESS_MIN_CELLS {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };

        let bar = ProgressBar::with_draw_target(Some(total), target);
        bar.set_style(CELL_STYLE.clone());
        bar.set_prefix(label.to_string());
        self.bar = Some(bar);
    }

    /// Record one constructed cell
    pub fn tick(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Number of cells recorded since the last `start`
    pub fn position(&self) -> u64 {
        self.bar.as_ref().map_or(0, ProgressBar::position)
    }

    /// Complete the current operation with a closing message
    pub fn finish(&mut self, message: &str) {
        if let Some(bar) = self.bar.take() {
            bar.finish_with_message(message.to_string());
        }
    }

    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
