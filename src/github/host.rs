use crate::github::client::{
    repository, ApiContributor, ApiPullRequest, ApiRepository, ApiReview, ApiUser, GitHubClient,
};
use crate::github::SourceHost;
use crate::model::{Error, PullRequest, Repository, Result, StatsPoll};
use futures::future;
use reqwest::StatusCode;

impl GitHubClient {
    /// Reviews are fetched concurrently and attached in submission order.
    async fn with_reviews(
        &self,
        repo: &Repository,
        pulls: Vec<ApiPullRequest>,
    ) -> Result<Vec<PullRequest>> {
        let reviews = future::try_join_all(pulls.iter().map(|pull| {
            let path = format!(
                "/repos/{}/{}/pulls/{}/reviews",
                repo.owner, repo.name, pull.number
            );
            async move { self.get_pages::<ApiReview>(&path, &[], None).await }
        }))
        .await?;
        Ok(pulls
            .into_iter()
            .zip(reviews)
            .map(|(pull, reviews)| pull.into_model(reviews))
            .collect())
    }
}

impl SourceHost for GitHubClient {
    async fn repositories(&self) -> Result<Vec<Repository>> {
        let path = format!("/orgs/{}/repos", self.organization());
        let repos: Vec<ApiRepository> = self.get_pages(&path, &[], None).await?;
        Ok(repos
            .into_iter()
            .map(|api| repository(self.organization(), api))
            .collect())
    }

    async fn open_pull_requests(&self, repo: &Repository) -> Result<Vec<PullRequest>> {
        let path = format!("/repos/{}/{}/pulls", repo.owner, repo.name);
        let query = [("state", "open".to_string())];
        let pulls: Vec<ApiPullRequest> = self.get_pages(&path, &query, None).await?;
        self.with_reviews(repo, pulls).await
    }

    async fn all_pull_requests(&self, repo: &Repository, max: usize) -> Result<Vec<PullRequest>> {
        let path = format!("/repos/{}/{}/pulls", repo.owner, repo.name);
        let query = [
            ("state", "all".to_string()),
            ("sort", "created".to_string()),
            ("direction", "desc".to_string()),
        ];
        let pulls: Vec<ApiPullRequest> = self.get_pages(&path, &query, Some(max)).await?;
        self.with_reviews(repo, pulls).await
    }

    async fn collaborators(&self, repo: &Repository) -> Result<Vec<String>> {
        let path = format!("/repos/{}/{}/collaborators", repo.owner, repo.name);
        let users: Vec<ApiUser> = self.get_pages(&path, &[], None).await?;
        Ok(users.into_iter().map(|user| user.login).collect())
    }

    /// 202 means the statistics are still being computed upstream.
    async fn contributor_stats(&self, repo: &Repository) -> Result<StatsPoll> {
        let path = format!("/repos/{}/{}/stats/contributors", repo.owner, repo.name);
        let response = self.get(&path, &[]).await?;
        match response.status() {
            StatusCode::ACCEPTED => Ok(StatsPoll::Pending),
            StatusCode::NO_CONTENT => Ok(StatsPoll::Ready(vec![])),
            status if status.is_success() => {
                let contributors: Vec<ApiContributor> =
                    GitHubClient::read_json(response, &path).await?;
                Ok(StatsPoll::Ready(
                    contributors.into_iter().map(Into::into).collect(),
                ))
            }
            status => {
                let body = response.text().await?;
                Err(Error::api(status, &path, body))
            }
        }
    }
}
