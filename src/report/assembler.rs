//! Turns classified pull requests and rankings into messages. Every builder
//! returns `None` when there is nothing worth posting.

use crate::analyze::review_tally::review_summary;
use crate::analyze::window::age_in_days;
use crate::analyze::{Authorship, Bucket, ClassifiedPull, Contribution, Ranking, ReviewActivity};
use crate::model::RankOrder;
use crate::report::Message;
use chrono::{DateTime, Utc};

const REMINDER_GROUPS: [(Bucket, &str); 4] = [
    (Bucket::Blocked, "*Blocked:*"),
    (Bucket::ReadyToMerge, "*Ready to Merge:*"),
    (Bucket::WaitingForApproval, "*Waiting for approvals:*"),
    (Bucket::ChangesNeeded, "*Changes Needed:*"),
];

pub fn pull_line(classified: &ClassifiedPull, now: DateTime<Utc>) -> String {
    let pull = &classified.pull;
    format!(
        " » *[{}]* <{}|{} - by {}> - *since {} day(s)* - {}",
        classified.repository.full_name(),
        pull.url,
        pull.title,
        pull.author,
        age_in_days(pull.created_at, now),
        review_summary(&pull.reviews),
    )
}

pub fn reminder_message(pulls: &[ClassifiedPull], now: DateTime<Utc>) -> Option<Message> {
    let mut message = Message::titled("🚧 *Open Pull Requests Waiting for Merge* 🚧");
    let mut any = false;
    for (bucket, heading) in REMINDER_GROUPS {
        let lines = pulls
            .iter()
            .filter(|classified| classified.bucket == bucket)
            .map(|classified| pull_line(classified, now))
            .collect::<Vec<_>>();
        if !lines.is_empty() {
            message.push_group(heading, &lines);
            any = true;
        }
    }
    any.then_some(message)
}

fn ranked_lines<T>(ranking: &Ranking<T>, describe: impl Fn(&T) -> String) -> Vec<String> {
    ranking
        .entries
        .iter()
        .enumerate()
        .map(|(index, (login, value))| {
            let crown = if index == 0 { ":crown: " } else { "" };
            format!("» {}{}{}", crown, login, describe(value))
        })
        .collect()
}

fn shown(ranking_size: usize, len: usize) -> usize {
    ranking_size.min(len)
}

pub fn reviewer_ranking_message(
    ranking: &Ranking<ReviewActivity>,
    order: RankOrder,
    ranking_size: usize,
    pull_count: usize,
) -> Option<Message> {
    if ranking.is_empty() {
        return None;
    }
    let mut message = Message::titled(format!(
        "🚧 *{} {} - Ranking of Reviewers* 🚧",
        order,
        shown(ranking_size, ranking.entries.len())
    ));
    let lines = ranked_lines(ranking, |activity| format!(" ({} reviews)", activity.reviews));
    message.push_group("*GitHub User - (Reviews):*", &lines);
    if pull_count > 0 && ranking.total > 0 {
        message.push_group(
            "*Statistics:*",
            &[
                format!("» Total Pull Request Evaluated: {pull_count}"),
                format!("» Total Reviews performed: {}", ranking.total),
            ],
        );
    }
    Some(message)
}

pub fn contribution_ranking_message(
    ranking: &Ranking<Contribution>,
    order: RankOrder,
    ranking_size: usize,
) -> Option<Message> {
    if ranking.is_empty() {
        return None;
    }
    let mut message = Message::titled(format!(
        ":female-technologist: *{} {} - Commits Count* :male-technologist:",
        order,
        shown(ranking_size, ranking.entries.len())
    ));
    let lines = ranked_lines(ranking, |c| {
        format!(
            " ( {} commits: `+{}`  `-{}` )",
            c.commits, c.additions, c.deletions
        )
    });
    message.push_group("*GitHub User - (Contributions):*", &lines);
    if ranking.total > 0 {
        message.push_group(
            "*Statistics:*",
            &[format!("» Total Commits: {}", ranking.total)],
        );
    }
    Some(message)
}

pub fn author_ranking_message(
    ranking: &Ranking<Authorship>,
    order: RankOrder,
    ranking_size: usize,
    pull_count: usize,
) -> Option<Message> {
    if ranking.is_empty() {
        return None;
    }
    let mut message = Message::titled(format!(
        ":female-technologist: *{} {} - Pull Request Authors* :male-technologist:",
        order,
        shown(ranking_size, ranking.entries.len())
    ));
    let lines = ranked_lines(ranking, |a| format!("    `{} pull requests`", a.pull_requests));
    message.push_group("*GitHub User - (Pull Requests):*", &lines);
    if pull_count > 0 {
        message.push_group(
            "*Statistics:*",
            &[format!("» Total Pull Requests: {pull_count}")],
        );
    }
    Some(message)
}
