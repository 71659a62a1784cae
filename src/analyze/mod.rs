pub mod analyzer;
pub mod classifier;
pub mod contribution;
pub mod filter;
mod model;
pub mod ranker;
pub mod review_tally;
pub mod window;

pub use analyzer::Analyzer;
pub use classifier::Bucket;
pub use model::*;
pub use ranker::{rank, Ranking};
