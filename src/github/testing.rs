//! In-memory host for exercising the pipeline without a network.

use crate::github::SourceHost;
use crate::model::{ContributorWeeks, Error, PullRequest, Repository, Result, StatsPoll};
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Default)]
pub struct FakeHost {
    repos: Vec<Repository>,
    pulls: HashMap<String, Vec<PullRequest>>,
    collaborators: HashMap<String, Vec<String>>,
    stats: HashMap<String, (u32, Vec<ContributorWeeks>)>,
    broken: Vec<String>,
    stats_calls: AtomicU32,
}

impl FakeHost {
    pub fn with_repo(mut self, repo: &Repository, pulls: Vec<PullRequest>) -> Self {
        self.repos.push(repo.clone());
        self.pulls.insert(repo.name.clone(), pulls);
        self
    }

    pub fn with_collaborators(mut self, repo: &Repository, logins: &[&str]) -> Self {
        self.collaborators.insert(
            repo.name.clone(),
            logins.iter().map(|l| l.to_string()).collect(),
        );
        self
    }

    /// Answers `Pending` `pending` times before the statistics are ready.
    pub fn with_stats(mut self, repo: &Repository, pending: u32, weeks: Vec<ContributorWeeks>) -> Self {
        self.stats.insert(repo.name.clone(), (pending, weeks));
        self
    }

    /// Every fetch for this repository fails.
    pub fn with_broken(mut self, repo: &Repository) -> Self {
        self.broken.push(repo.name.clone());
        self
    }

    pub fn stats_calls(&self) -> u32 {
        self.stats_calls.load(Ordering::SeqCst)
    }

    fn check(&self, repo: &Repository) -> Result<()> {
        if self.broken.contains(&repo.name) {
            return Err(Error::api(StatusCode::INTERNAL_SERVER_ERROR, &repo.name, "boom"));
        }
        Ok(())
    }
}

impl SourceHost for FakeHost {
    async fn repositories(&self) -> Result<Vec<Repository>> {
        Ok(self.repos.clone())
    }

    async fn open_pull_requests(&self, repo: &Repository) -> Result<Vec<PullRequest>> {
        self.check(repo)?;
        let pulls = self.pulls.get(&repo.name).cloned().unwrap_or_default();
        Ok(pulls.into_iter().filter(PullRequest::is_open).collect())
    }

    async fn all_pull_requests(&self, repo: &Repository, max: usize) -> Result<Vec<PullRequest>> {
        self.check(repo)?;
        let mut pulls = self.pulls.get(&repo.name).cloned().unwrap_or_default();
        pulls.truncate(max);
        Ok(pulls)
    }

    async fn collaborators(&self, repo: &Repository) -> Result<Vec<String>> {
        self.check(repo)?;
        Ok(self.collaborators.get(&repo.name).cloned().unwrap_or_default())
    }

    async fn contributor_stats(&self, repo: &Repository) -> Result<StatsPoll> {
        self.check(repo)?;
        let call = self.stats_calls.fetch_add(1, Ordering::SeqCst);
        match self.stats.get(&repo.name) {
            Some((pending, _)) if call < *pending => Ok(StatsPoll::Pending),
            Some((_, weeks)) => Ok(StatsPoll::Ready(weeks.clone())),
            None => Ok(StatsPoll::Ready(vec![])),
        }
    }
}
