mod client;
mod host;
#[cfg(test)]
pub mod testing;

pub use client::GitHubClient;

use crate::model::{PullRequest, Repository, Result, StatsPoll};

/// Read-only view of the source-control hosting platform.
pub trait SourceHost {
    async fn repositories(&self) -> Result<Vec<Repository>>;

    async fn open_pull_requests(&self, repo: &Repository) -> Result<Vec<PullRequest>>;

    /// Newest first, at most `max`, regardless of state.
    async fn all_pull_requests(&self, repo: &Repository, max: usize) -> Result<Vec<PullRequest>>;

    async fn collaborators(&self, repo: &Repository) -> Result<Vec<String>>;

    async fn contributor_stats(&self, repo: &Repository) -> Result<StatsPoll>;
}
