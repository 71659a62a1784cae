use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Pending,
    Dismissed,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Review {
    pub reviewer: String,
    pub state: ReviewState,
}

impl Review {
    pub fn new(reviewer: impl ToString, state: ReviewState) -> Self {
        Self {
            reviewer: reviewer.to_string(),
            state,
        }
    }
}

/// Snapshot of a pull request with its labels and reviews, as fetched.
#[derive(Debug, Clone)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub state: PullState,
    pub labels: Vec<String>,
    /// In submission order.
    pub reviews: Vec<Review>,
    pub url: String,
}

impl PullRequest {
    pub fn is_open(&self) -> bool {
        self.state == PullState::Open
    }

    /// Label names are matched upper-cased against `marker`.
    pub fn has_label(&self, marker: &str) -> bool {
        self.labels.iter().any(|label| label.to_uppercase() == marker)
    }
}
