use regex::Regex;
use std::fmt;
use std::time::Duration;

pub const BLOCKED_LABEL: &str = "BLOCKED";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RankOrder {
    Top,
    Bottom,
}

impl RankOrder {
    /// Anything other than `top` (any case) ranks ascending.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("top") {
            Self::Top
        } else {
            Self::Bottom
        }
    }
}

impl fmt::Display for RankOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankOrder::Top => write!(f, "Top"),
            RankOrder::Bottom => write!(f, "Bottom"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    /// Doubles per attempt, capped at eight times the base delay.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.delay * 2u32.pow(attempt.min(3))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 10,
            delay: Duration::from_millis(1000),
        }
    }
}

/// Run configuration, built once at startup and shared by reference.
#[derive(Debug, Clone)]
pub struct Settings {
    pub organization: String,
    pub github_url: String,
    pub github_token: String,
    pub slack_token: Option<String>,
    pub slack_channel: String,
    /// Evaluation window, in days for pull requests and in weeks for statistics.
    pub window_days: u32,
    pub max_pulls: usize,
    pub min_approvals: u32,
    pub order: RankOrder,
    pub ranking_size: usize,
    pub ignore_words: Vec<String>,
    pub ignore_users: Vec<String>,
    pub user_names: Vec<String>,
    pub repositories: Vec<String>,
    pub repository_regex: Option<Regex>,
    pub retry: RetryPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            organization: String::new(),
            github_url: "https://api.github.com".to_string(),
            github_token: String::new(),
            slack_token: None,
            slack_channel: "general".to_string(),
            window_days: 30,
            max_pulls: 200,
            min_approvals: 0,
            order: RankOrder::Top,
            ranking_size: 5,
            ignore_words: vec![],
            ignore_users: vec![],
            user_names: vec![],
            repositories: vec![],
            repository_regex: None,
            retry: RetryPolicy::default(),
        }
    }
}

/// Splits a comma separated list into trimmed, lower-cased, non-empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}

/// An empty pattern means no regex is configured.
pub fn compile_regex(raw: Option<&str>) -> crate::model::Result<Option<Regex>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(pattern) => Regex::new(pattern)
            .map(Some)
            .map_err(|e| crate::model::Error::config(format!("REPOSITORY_REGEX: {e}"))),
    }
}
