//! REST client for the GitHub v3 API.
//!
//! Wire records are deserialized into the private `Api*` structs below and
//! converted into the crate model right away, so a missing field fails here.

use crate::model::{
    ContributorWeeks, Error, PullRequest, PullState, Repository, Result, Review, ReviewState,
    WeekBucket,
};
use chrono::{DateTime, Utc};
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

const PER_PAGE: usize = 100;

#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    organization: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiRepository {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiUser {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiLabel {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiPullRequest {
    pub number: u64,
    pub title: String,
    pub user: ApiUser,
    pub created_at: DateTime<Utc>,
    pub state: PullState,
    pub labels: Vec<ApiLabel>,
    pub html_url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiReview {
    pub user: ApiUser,
    pub state: ReviewState,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiWeek {
    pub c: u64,
    pub a: u64,
    pub d: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiContributor {
    pub author: ApiUser,
    pub weeks: Vec<ApiWeek>,
}

impl ApiPullRequest {
    pub fn into_model(self, reviews: Vec<ApiReview>) -> PullRequest {
        PullRequest {
            number: self.number,
            title: self.title,
            author: self.user.login,
            created_at: self.created_at,
            state: self.state,
            labels: self.labels.into_iter().map(|label| label.name).collect(),
            reviews: reviews
                .into_iter()
                .map(|review| Review::new(review.user.login, review.state))
                .collect(),
            url: self.html_url,
        }
    }
}

impl From<ApiContributor> for ContributorWeeks {
    fn from(contributor: ApiContributor) -> Self {
        let weeks = contributor
            .weeks
            .iter()
            .map(|week| WeekBucket::new(week.c, week.a, week.d))
            .collect();
        ContributorWeeks::new(contributor.author.login, weeks)
    }
}

impl GitHubClient {
    pub fn new(base_url: &str, token: &str, organization: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        let auth = header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| Error::config("GITHUB_API_TOKEN is not a valid header value"))?;
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("pr-digest/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            organization: organization.to_string(),
        })
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response> {
        debug!(path, ?query, "GET");
        let response = self.client.get(self.api_url(path)).query(query).send().await?;
        Ok(response)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self.get(path, query).await?;
        Self::read_json(response, path).await
    }

    /// Follows `page` until a short page or until `limit` items are collected.
    pub(crate) async fn get_pages<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        limit: Option<usize>,
    ) -> Result<Vec<T>> {
        let mut items: Vec<T> = vec![];
        if limit == Some(0) {
            return Ok(items);
        }
        let mut page = 1;
        loop {
            let mut paged = query.to_vec();
            paged.push(("per_page", PER_PAGE.to_string()));
            paged.push(("page", page.to_string()));
            let batch: Vec<T> = self.get_json(path, &paged).await?;
            if accumulate_page(&mut items, batch, limit) == PageStep::Done {
                break;
            }
            page += 1;
        }
        Ok(items)
    }

    pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::api(status, endpoint, api_message(status, &body)));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageStep {
    More,
    Done,
}

/// Appends one page and truncates to `limit`. A page shorter than
/// `PER_PAGE` is the last one.
pub(crate) fn accumulate_page<T>(items: &mut Vec<T>, batch: Vec<T>, limit: Option<usize>) -> PageStep {
    let short = batch.len() < PER_PAGE;
    items.extend(batch);
    if let Some(limit) = limit {
        if items.len() >= limit {
            items.truncate(limit);
            return PageStep::Done;
        }
    }
    if short {
        PageStep::Done
    } else {
        PageStep::More
    }
}

/// GitHub reports failures as `{"message": "..."}`.
fn api_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| match status {
            StatusCode::UNAUTHORIZED => "Bad credentials".to_string(),
            StatusCode::NOT_FOUND => "Resource not found".to_string(),
            _ => body.to_string(),
        })
}

pub(crate) fn repository(owner: &str, api: ApiRepository) -> Repository {
    Repository::new(owner, api.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pull_request_wire_record_maps_to_model() {
        let json = r#"{
            "number": 42,
            "title": "WIP: fix bug",
            "user": {"login": "alice", "id": 1},
            "created_at": "2024-03-01T10:00:00Z",
            "state": "open",
            "labels": [{"name": "Blocked", "color": "ff0000"}],
            "html_url": "https://github.com/acme/api/pull/42"
        }"#;
        let reviews = r#"[
            {"user": {"login": "bob"}, "state": "COMMENTED"},
            {"user": {"login": "bob"}, "state": "APPROVED"},
            {"user": {"login": "carol"}, "state": "DISMISSED"},
            {"user": {"login": "dan"}, "state": "SOMETHING_NEW"}
        ]"#;
        let api: ApiPullRequest = serde_json::from_str(json).unwrap();
        let reviews: Vec<ApiReview> = serde_json::from_str(reviews).unwrap();
        let pull = api.into_model(reviews);

        assert_eq!(pull.author, "alice");
        assert!(pull.is_open());
        assert!(pull.has_label("BLOCKED"));
        assert_eq!(
            pull.reviews.iter().map(|r| r.state).collect::<Vec<_>>(),
            vec![
                ReviewState::Commented,
                ReviewState::Approved,
                ReviewState::Dismissed,
                ReviewState::Other
            ]
        );
    }

    #[test]
    fn missing_author_is_rejected() {
        let json = r#"{
            "number": 1, "title": "x", "user": null,
            "created_at": "2024-03-01T10:00:00Z", "state": "open",
            "labels": [], "html_url": "u"
        }"#;
        assert!(serde_json::from_str::<ApiPullRequest>(json).is_err());
    }

    #[test]
    fn contributor_weeks_keep_chronological_order() {
        let json = r#"{
            "author": {"login": "alice"},
            "total": 6,
            "weeks": [{"w": 1, "a": 1, "d": 0, "c": 1}, {"w": 2, "a": 20, "d": 3, "c": 5}]
        }"#;
        let api: ApiContributor = serde_json::from_str(json).unwrap();
        let weeks = ContributorWeeks::from(api);
        assert_eq!(weeks.author, "alice");
        assert_eq!(weeks.weeks, vec![WeekBucket::new(1, 1, 0), WeekBucket::new(5, 20, 3)]);
    }

    fn page(start: usize, len: usize) -> Vec<usize> {
        (start..start + len).collect()
    }

    #[test]
    fn limit_inside_first_page_truncates() {
        let mut items = vec![];
        assert_eq!(accumulate_page(&mut items, page(0, PER_PAGE), Some(30)), PageStep::Done);
        assert_eq!(items, page(0, 30));
    }

    #[test]
    fn limit_on_page_boundary_stops_without_another_request() {
        let mut items = vec![];
        assert_eq!(accumulate_page(&mut items, page(0, PER_PAGE), Some(2 * PER_PAGE)), PageStep::More);
        assert_eq!(
            accumulate_page(&mut items, page(PER_PAGE, PER_PAGE), Some(2 * PER_PAGE)),
            PageStep::Done
        );
        assert_eq!(items.len(), 2 * PER_PAGE);
        assert_eq!(items.last(), Some(&(2 * PER_PAGE - 1)));
    }

    #[test]
    fn limit_spanning_pages_truncates_second_page() {
        let mut items = vec![];
        assert_eq!(accumulate_page(&mut items, page(0, PER_PAGE), Some(150)), PageStep::More);
        assert_eq!(accumulate_page(&mut items, page(PER_PAGE, PER_PAGE), Some(150)), PageStep::Done);
        assert_eq!(items, page(0, 150));
    }

    #[test]
    fn zero_limit_keeps_nothing() {
        let mut items = vec![];
        assert_eq!(accumulate_page(&mut items, page(0, PER_PAGE), Some(0)), PageStep::Done);
        assert!(items.is_empty());
    }

    #[test]
    fn short_final_page_ends_pagination() {
        let mut items = vec![];
        assert_eq!(accumulate_page(&mut items, page(0, PER_PAGE), None), PageStep::More);
        assert_eq!(accumulate_page(&mut items, page(PER_PAGE, 7), None), PageStep::Done);
        assert_eq!(items.len(), PER_PAGE + 7);

        let mut bounded = vec![];
        assert_eq!(accumulate_page(&mut bounded, page(0, 7), Some(200)), PageStep::Done);
        assert_eq!(bounded.len(), 7);
    }

    #[test]
    fn error_message_prefers_api_message() {
        assert_eq!(
            api_message(StatusCode::FORBIDDEN, r#"{"message": "API rate limit exceeded"}"#),
            "API rate limit exceeded"
        );
        assert_eq!(api_message(StatusCode::NOT_FOUND, ""), "Resource not found");
    }
}
