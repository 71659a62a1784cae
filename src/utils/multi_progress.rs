use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

pub trait MultiProgressNew {
    fn add_with_style(&self, pb: ProgressBar, style: ProgressStyle) -> ProgressBar;
    fn add_repository(&self, name: &str) -> ProgressBar;
}

impl MultiProgressNew for MultiProgress {
    fn add_with_style(&self, pb: ProgressBar, style: ProgressStyle) -> ProgressBar {
        let pb = self.add(pb);
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    fn add_repository(&self, name: &str) -> ProgressBar {
        let pb = self.add_with_style(
            ProgressBar::new_spinner(),
            super::progress_style::ProgressStyleTemplate::repository(),
        );
        pb.set_prefix(name.to_string());
        pb
    }
}

/// Progress output for tests and non-interactive runs.
pub fn hidden_progress() -> MultiProgress {
    MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
}
