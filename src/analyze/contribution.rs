use crate::analyze::filter::{user_excluded, user_included};
use crate::analyze::window::windowed_sum;
use crate::analyze::{Contribution, UserTally};
use crate::github::SourceHost;
use crate::model::{ContributorWeeks, Error, Repository, Result, RetryPolicy, Settings, StatsPoll};
use tracing::{debug, warn};

/// Adds the windowed sums of every admitted contributor into `tally`, keyed
/// by login as reported by the host.
pub fn accumulate_contributions(
    tally: &mut UserTally<Contribution>,
    contributors: &[ContributorWeeks],
    settings: &Settings,
) {
    let window = settings.window_days;
    for contributor in contributors {
        let login = &contributor.author;
        if user_excluded(login, &settings.ignore_users) || !user_included(login, &settings.user_names) {
            continue;
        }
        let entry = tally.entry(login.clone()).or_default();
        entry.commits += windowed_sum(&contributor.weeks, window, |w| w.commits);
        entry.additions += windowed_sum(&contributor.weeks, window, |w| w.additions);
        entry.deletions += windowed_sum(&contributor.weeks, window, |w| w.deletions);
    }
}

/// Polls the host until statistics are computed, sleeping between attempts.
pub async fn await_contributor_stats<H: SourceHost>(
    host: &H,
    repository: &Repository,
    retry: &RetryPolicy,
) -> Result<Vec<ContributorWeeks>> {
    let mut attempt = 0;
    loop {
        match host.contributor_stats(repository).await? {
            StatsPoll::Ready(contributors) => {
                debug!(repository = %repository.name, attempt, "contributor statistics ready");
                return Ok(contributors);
            }
            StatsPoll::Pending => {
                attempt += 1;
                if attempt >= retry.attempts {
                    return Err(Error::StatsNotReady {
                        repository: repository.full_name(),
                        attempts: attempt,
                    });
                }
                let delay = retry.delay_for(attempt - 1);
                warn!(repository = %repository.name, ?delay, "statistics still computing, retrying");
                tokio::time::sleep(delay).await;
            }
        }
    }
}
