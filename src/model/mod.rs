mod contributor;
mod pull_request;
mod repository;
mod result;
mod settings;

pub use contributor::{ContributorWeeks, StatsPoll, WeekBucket};
pub use pull_request::{PullRequest, PullState, Review, ReviewState};
pub use repository::Repository;
pub use result::{Error, Result};
pub use settings::{compile_regex, split_list, RankOrder, RetryPolicy, Settings, BLOCKED_LABEL};
