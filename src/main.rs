mod analyze;
mod digest;
mod fetch;
mod github;
mod model;
mod report;
mod utils;

use crate::digest::Digest;
use crate::github::{GitHubClient, SourceHost};
use crate::model::{compile_regex, split_list, Error, RankOrder, Result, RetryPolicy, Settings};
use crate::report::markdown::MarkdownSink;
use crate::report::slack::SlackSink;
use crate::report::{ReportKind, ReportSink};
use crate::utils::hidden_progress;
use chrono::Utc;
use clap::{Parser, Subcommand};
use indicatif::MultiProgress;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Pull request reminders and review leaderboards for Slack")]
struct Args {
    #[command(subcommand)]
    report: Option<ReportCommand>,
    #[arg(long, env = "GITHUB_API_TOKEN", hide_env_values = true)]
    github_token: String,
    #[arg(long, env = "ORGANIZATION")]
    organization: String,
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    github_url: String,
    #[arg(long, env = "SLACK_API_TOKEN", hide_env_values = true, required_unless_present = "dry_run")]
    slack_token: Option<String>,
    #[arg(long, env = "SLACK_CHANNEL", default_value = "general")]
    slack_channel: String,
    /// Days of pull requests, and weeks of commit statistics, to evaluate
    #[arg(long, env = "TIME_EVALUATED", default_value_t = 30)]
    time_evaluated: u32,
    #[arg(long, env = "MAX_PR_TO_CHECK", default_value_t = 200)]
    max_pr_to_check: usize,
    /// Approvals needed before a pull request is ready to merge
    #[arg(long, env = "MIN_OF_REVIEW", default_value_t = 0)]
    min_of_review: u32,
    /// `top` ranks descending, anything else ascending
    #[arg(long, env = "ORDER_CRITERIA", default_value = "Top")]
    order_criteria: String,
    #[arg(long, env = "RANKING_QTY", default_value_t = 5)]
    ranking_qty: usize,
    #[arg(long, env = "IGNORE_WORDS", default_value = "")]
    ignore_words: String,
    #[arg(long, env = "IGNORE_USERS", default_value = "")]
    ignore_users: String,
    #[arg(long, env = "USER_NAMES", default_value = "")]
    user_names: String,
    #[arg(long, env = "REPOSITORIES", default_value = "")]
    repositories: String,
    #[arg(long, env = "REPOSITORY_REGEX")]
    repository_regex: Option<String>,
    #[arg(long, env = "STATS_RETRY_ATTEMPTS", default_value_t = 10)]
    stats_retry_attempts: u32,
    #[arg(long, env = "STATS_RETRY_DELAY_MS", default_value_t = 1000)]
    stats_retry_delay_ms: u64,
    /// Write Markdown previews into this directory instead of posting to Slack
    #[arg(long, value_name = "DIR")]
    dry_run: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq)]
enum ReportCommand {
    /// Open pull requests grouped by what they are waiting for
    Reminder,
    /// Reviews performed per user
    Reviewers,
    /// Commits, additions and deletions per user
    Contributions,
    /// Pull requests opened per user
    Authors,
    /// Every report above
    All,
}

impl ReportCommand {
    fn kinds(self) -> Vec<ReportKind> {
        match self {
            ReportCommand::Reminder => vec![ReportKind::Reminder],
            ReportCommand::Reviewers => vec![ReportKind::Reviewers],
            ReportCommand::Contributions => vec![ReportKind::Contributions],
            ReportCommand::Authors => vec![ReportKind::Authors],
            ReportCommand::All => ReportKind::ALL.to_vec(),
        }
    }
}

impl TryFrom<&Args> for Settings {
    type Error = Error;

    fn try_from(args: &Args) -> Result<Self> {
        if args.organization.trim().is_empty() {
            return Err(Error::config("ORGANIZATION must not be empty"));
        }
        Ok(Settings {
            organization: args.organization.trim().to_string(),
            github_url: args.github_url.clone(),
            github_token: args.github_token.clone(),
            slack_token: args.slack_token.clone(),
            slack_channel: args.slack_channel.clone(),
            window_days: args.time_evaluated,
            max_pulls: args.max_pr_to_check,
            min_approvals: args.min_of_review,
            order: RankOrder::parse(&args.order_criteria),
            ranking_size: args.ranking_qty,
            ignore_words: split_list(&args.ignore_words),
            ignore_users: split_list(&args.ignore_users),
            user_names: split_list(&args.user_names),
            repositories: split_list(&args.repositories),
            repository_regex: compile_regex(args.repository_regex.as_deref())?,
            retry: RetryPolicy {
                attempts: args.stats_retry_attempts.max(1),
                delay: Duration::from_millis(args.stats_retry_delay_ms),
            },
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let settings = match Settings::try_from(&args) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    match run(&args, &settings).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// `Ok(false)` when at least one report failed.
async fn run(args: &Args, settings: &Settings) -> Result<bool> {
    let kinds = args.report.unwrap_or(ReportCommand::Reminder).kinds();
    let host = GitHubClient::new(&settings.github_url, &settings.github_token, &settings.organization)?;

    match &args.dry_run {
        Some(dir) => {
            let sink = MarkdownSink::new(dir);
            Ok(run_reports(&host, &sink, settings, &kinds).await)
        }
        None => {
            let token = settings
                .slack_token
                .as_deref()
                .ok_or_else(|| Error::config("SLACK_API_TOKEN is required"))?;
            let sink = SlackSink::new(token, &settings.slack_channel);
            Ok(run_reports(&host, &sink, settings, &kinds).await)
        }
    }
}

/// Reports are independent: a failed one is logged and the rest still run.
async fn run_reports<H: SourceHost, S: ReportSink>(
    host: &H,
    sink: &S,
    settings: &Settings,
    kinds: &[ReportKind],
) -> bool {
    let progress = if std::io::stderr().is_terminal() {
        MultiProgress::new()
    } else {
        hidden_progress()
    };
    let digest = Digest::new(host, sink, settings, progress);
    let mut succeeded = true;
    for kind in kinds {
        match digest.run(*kind, Utc::now()).await {
            Ok(delivered) => info!(report = kind.name(), delivered, "report finished"),
            Err(e) => {
                error!(report = kind.name(), error = %e, "report failed");
                succeeded = false;
            }
        }
    }
    succeeded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> std::result::Result<Args, clap::Error> {
        let mut argv = vec![
            "pr-digest",
            "--github-token",
            "ghp_test",
            "--organization",
            "acme",
            "--slack-token",
            "xoxb-test",
        ];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv)
    }

    #[test]
    fn settings_from_flags() {
        let args = args(&[
            "--ignore-words",
            "WIP, Draft",
            "--repositories",
            "API,web",
            "--repository-regex",
            "^svc-",
            "--order-criteria",
            "bottom",
            "--min-of-review",
            "2",
            "contributions",
        ])
        .unwrap();
        let settings = Settings::try_from(&args).unwrap();
        assert_eq!(settings.organization, "acme");
        assert_eq!(settings.ignore_words, vec!["wip", "draft"]);
        assert_eq!(settings.repositories, vec!["api", "web"]);
        assert!(settings.repository_regex.is_some());
        assert_eq!(settings.order, RankOrder::Bottom);
        assert_eq!(settings.min_approvals, 2);
        assert_eq!(settings.window_days, 30);
        assert_eq!(args.report, Some(ReportCommand::Contributions));
    }

    #[test]
    fn invalid_regex_is_a_configuration_error() {
        let args = args(&["--repository-regex", "(unclosed"]).unwrap();
        assert!(matches!(Settings::try_from(&args), Err(Error::Config(_))));
    }

    #[test]
    fn all_runs_every_report() {
        assert_eq!(ReportCommand::All.kinds().len(), 4);
        assert_eq!(ReportCommand::Reviewers.kinds(), vec![ReportKind::Reviewers]);
    }
}
