mod multi_progress;
mod progress_style;

pub use multi_progress::{hidden_progress, MultiProgressNew};
