use crate::model::{ContributorWeeks, PullRequest, Repository};
use indexmap::IndexMap;

pub type RepoPullRequests = IndexMap<Repository, Vec<PullRequest>>;
pub type RepoCollaborators = IndexMap<Repository, Vec<String>>;
pub type RepoContributors = IndexMap<Repository, Vec<ContributorWeeks>>;

/// Fetched snapshots of one run, reduced into tallies only after every
/// repository has been fetched.
#[derive(Debug, Clone, Default)]
pub struct DataAnalysis {
    pub repos: Vec<Repository>,
    pub pull_requests: RepoPullRequests,
    pub collaborators: RepoCollaborators,
    pub contributors: RepoContributors,
}

impl DataAnalysis {
    pub fn new(repos: Vec<Repository>) -> Self {
        Self {
            repos,
            ..Self::default()
        }
    }

    pub fn insert_pull_requests(&mut self, repository: &Repository, pull_requests: Vec<PullRequest>) {
        self.pull_requests.insert(repository.clone(), pull_requests);
    }

    pub fn insert_collaborators(&mut self, repository: &Repository, logins: Vec<String>) {
        self.collaborators.insert(repository.clone(), logins);
    }

    pub fn insert_contributors(&mut self, repository: &Repository, contributors: Vec<ContributorWeeks>) {
        self.contributors.insert(repository.clone(), contributors);
    }

    pub fn pull_request_count(&self) -> usize {
        self.pull_requests.values().map(Vec::len).sum()
    }
}

pub type UserTally<T> = IndexMap<String, T>;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ReviewActivity {
    pub reviews: u64,
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Contribution {
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Authorship {
    pub pull_requests: u64,
}

#[derive(Debug, Clone)]
pub struct ClassifiedPull {
    pub repository: Repository,
    pub pull: PullRequest,
    pub bucket: crate::analyze::Bucket,
}
