//! Read-only fetch stage. Repositories are fetched concurrently, but results
//! are inserted into the `DataAnalysis` in repository order once every fetch
//! has completed, so tallies never depend on network timing.

use crate::analyze::contribution::await_contributor_stats;
use crate::analyze::filter::{repository_included, title_valid, user_included};
use crate::analyze::window::recent_pulls;
use crate::analyze::DataAnalysis;
use crate::github::SourceHost;
use crate::model::{ContributorWeeks, PullRequest, Repository, Result, Settings};
use crate::utils::MultiProgressNew;
use chrono::{DateTime, Utc};
use futures::future;
use indicatif::MultiProgress;
use tracing::{debug, info};

pub async fn included_repositories<H: SourceHost>(
    host: &H,
    settings: &Settings,
) -> Result<Vec<Repository>> {
    let repos = host.repositories().await?;
    let total = repos.len();
    let included = repos
        .into_iter()
        .filter(|repo| {
            repository_included(
                &repo.name,
                &settings.repositories,
                settings.repository_regex.as_ref(),
            )
        })
        .collect::<Vec<_>>();
    info!(total, included = included.len(), "repositories selected");
    Ok(included)
}

/// Open pull requests by allow-listed authors with a valid title.
pub async fn open_pulls<H: SourceHost>(
    host: &H,
    repos: Vec<Repository>,
    settings: &Settings,
    progress: &MultiProgress,
) -> Result<DataAnalysis> {
    let fetched = future::try_join_all(repos.iter().map(|repo| async move {
        let pb = progress.add_repository(&repo.full_name());
        pb.set_message("Fetching open pull requests ...");
        let pulls = host
            .open_pull_requests(repo)
            .await?
            .into_iter()
            .filter(|pull| pull.is_open())
            .filter(|pull| user_included(&pull.author, &settings.user_names))
            .filter(|pull| title_valid(&pull.title, &settings.ignore_words))
            .collect::<Vec<_>>();
        pb.finish_with_message(format!("✅ {} open pull requests", pulls.len()));
        Ok::<_, crate::model::Error>(pulls)
    }))
    .await?;

    let mut data = DataAnalysis::new(repos.clone());
    for (repo, pulls) in repos.iter().zip(fetched) {
        debug!(repository = %repo.name, pulls = pulls.len(), "open pull requests");
        data.insert_pull_requests(repo, pulls);
    }
    Ok(data)
}

/// Pull requests of any state created inside the window, with a valid title,
/// and optionally every repository's collaborators.
pub async fn recent_activity<H: SourceHost>(
    host: &H,
    repos: Vec<Repository>,
    settings: &Settings,
    now: DateTime<Utc>,
    with_collaborators: bool,
    progress: &MultiProgress,
) -> Result<DataAnalysis> {
    let fetched = future::try_join_all(repos.iter().map(|repo| async move {
        let pb = progress.add_repository(&repo.full_name());
        pb.set_message("Fetching pull requests ...");
        let pulls: Vec<PullRequest> =
            recent_pulls(host.all_pull_requests(repo, settings.max_pulls).await?, now, settings.window_days)
                .into_iter()
                .filter(|pull| title_valid(&pull.title, &settings.ignore_words))
                .collect();
        let collaborators = if with_collaborators {
            pb.set_message("Fetching collaborators ...");
            host.collaborators(repo).await?
        } else {
            vec![]
        };
        pb.finish_with_message(format!("✅ {} recent pull requests", pulls.len()));
        Ok::<_, crate::model::Error>((pulls, collaborators))
    }))
    .await?;

    let mut data = DataAnalysis::new(repos.clone());
    for (repo, (pulls, collaborators)) in repos.iter().zip(fetched) {
        debug!(repository = %repo.name, pulls = pulls.len(), "recent pull requests");
        data.insert_pull_requests(repo, pulls);
        if with_collaborators {
            data.insert_collaborators(repo, collaborators);
        }
    }
    Ok(data)
}

pub async fn contributor_stats<H: SourceHost>(
    host: &H,
    repos: Vec<Repository>,
    settings: &Settings,
    progress: &MultiProgress,
) -> Result<DataAnalysis> {
    let fetched = future::try_join_all(repos.iter().map(|repo| async move {
        let pb = progress.add_repository(&repo.full_name());
        pb.set_message("Waiting for contributor statistics ...");
        let contributors: Vec<ContributorWeeks> =
            await_contributor_stats(host, repo, &settings.retry).await?;
        pb.finish_with_message(format!("✅ {} contributors", contributors.len()));
        Ok::<_, crate::model::Error>(contributors)
    }))
    .await?;

    let mut data = DataAnalysis::new(repos.clone());
    for (repo, contributors) in repos.iter().zip(fetched) {
        data.insert_contributors(repo, contributors);
    }
    Ok(data)
}
