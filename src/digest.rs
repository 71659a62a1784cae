use crate::analyze::{rank, Analyzer};
use crate::fetch;
use crate::github::SourceHost;
use crate::model::{Result, Settings};
use crate::report::assembler::{
    author_ranking_message, contribution_ranking_message, reminder_message,
    reviewer_ranking_message,
};
use crate::report::{Message, ReportKind, ReportSink};
use chrono::{DateTime, Utc};
use indicatif::MultiProgress;
use tracing::info;

/// One digest run: fetch, aggregate, assemble, deliver.
pub struct Digest<'a, H, S> {
    host: &'a H,
    sink: &'a S,
    settings: &'a Settings,
    progress: MultiProgress,
}

impl<'a, H: SourceHost, S: ReportSink> Digest<'a, H, S> {
    pub fn new(host: &'a H, sink: &'a S, settings: &'a Settings, progress: MultiProgress) -> Self {
        Self {
            host,
            sink,
            settings,
            progress,
        }
    }

    /// Returns whether a message was delivered. Nothing is delivered when the
    /// report has no content or when any fetch fails.
    pub async fn run(&self, kind: ReportKind, now: DateTime<Utc>) -> Result<bool> {
        info!(report = kind.name(), "building report");
        let Some(message) = self.build(kind, now).await? else {
            info!(report = kind.name(), "nothing to report");
            return Ok(false);
        };
        self.sink.deliver(kind, &message).await?;
        Ok(true)
    }

    pub async fn build(&self, kind: ReportKind, now: DateTime<Utc>) -> Result<Option<Message>> {
        let settings = self.settings;
        let repos = fetch::included_repositories(self.host, settings).await?;
        let message = match kind {
            ReportKind::Reminder => {
                let data = fetch::open_pulls(self.host, repos, settings, &self.progress).await?;
                reminder_message(&data.classify_pulls(settings), now)
            }
            ReportKind::Reviewers => {
                let data = fetch::recent_activity(self.host, repos, settings, now, true, &self.progress).await?;
                let ranking = rank(
                    &data.reviewer_tally(settings),
                    |activity| activity.reviews,
                    settings.order,
                    settings.ranking_size,
                );
                reviewer_ranking_message(&ranking, settings.order, settings.ranking_size, data.pull_request_count())
            }
            ReportKind::Contributions => {
                let data = fetch::contributor_stats(self.host, repos, settings, &self.progress).await?;
                let ranking = rank(
                    &data.contribution_tally(settings),
                    |contribution| contribution.commits,
                    settings.order,
                    settings.ranking_size,
                );
                contribution_ranking_message(&ranking, settings.order, settings.ranking_size)
            }
            ReportKind::Authors => {
                let data = fetch::recent_activity(self.host, repos, settings, now, false, &self.progress).await?;
                let ranking = rank(
                    &data.author_tally(settings),
                    |authorship| authorship.pull_requests,
                    settings.order,
                    settings.ranking_size,
                );
                author_ranking_message(&ranking, settings.order, settings.ranking_size, data.pull_request_count())
            }
        };
        Ok(message)
    }
}
