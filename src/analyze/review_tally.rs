//! Two independent views over a pull request's reviews: the deduplicated
//! per-reviewer decision used for classification, and the raw grouping used
//! only for display.

use crate::model::{Review, ReviewState};
use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ReviewCounts {
    pub approved: u32,
    pub changes_requested: u32,
    pub pending: u32,
    pub commented: u32,
}

impl ReviewCounts {
    fn record(&mut self, state: ReviewState) {
        match state {
            ReviewState::Approved => self.approved += 1,
            ReviewState::ChangesRequested => self.changes_requested += 1,
            ReviewState::Pending => self.pending += 1,
            ReviewState::Commented => self.commented += 1,
            ReviewState::Dismissed | ReviewState::Other => {}
        }
    }
}

/// One decision per distinct reviewer, self-reviews skipped. The first review
/// of a reviewer is recorded verbatim; later ones replace it unless they are
/// plain comments.
pub fn reviewer_decisions(reviews: &[Review], author: &str) -> IndexMap<String, ReviewState> {
    let mut decisions: IndexMap<String, ReviewState> = IndexMap::new();
    for review in reviews.iter().filter(|r| r.reviewer != author) {
        match decisions.get_mut(&review.reviewer) {
            None => {
                decisions.insert(review.reviewer.clone(), review.state);
            }
            Some(decided) if review.state != ReviewState::Commented => *decided = review.state,
            Some(_) => {}
        }
    }
    decisions
}

pub fn count_reviews(reviews: &[Review], author: &str) -> ReviewCounts {
    reviewer_decisions(reviews, author)
        .values()
        .fold(ReviewCounts::default(), |mut counts, state| {
            counts.record(*state);
            counts
        })
}

/// Every reviewer who ever approved or requested changes, grouped by that
/// raw state in order of first appearance. No deduplication across states.
pub fn display_grouping(reviews: &[Review]) -> IndexMap<ReviewState, IndexSet<String>> {
    let mut groups: IndexMap<ReviewState, IndexSet<String>> = IndexMap::new();
    for review in reviews {
        if matches!(
            review.state,
            ReviewState::Approved | ReviewState::ChangesRequested
        ) {
            groups
                .entry(review.state)
                .or_default()
                .insert(format!("@{}", review.reviewer));
        }
    }
    groups
}

pub fn review_summary(reviews: &[Review]) -> String {
    let groups = display_grouping(reviews);
    if groups.is_empty() {
        return "No reviews :warning:".to_string();
    }
    let parts = groups
        .iter()
        .map(|(state, reviewers)| {
            let emoji = match state {
                ReviewState::Approved => ":white_check_mark:",
                _ => ":o:",
            };
            format!("{} by {}", emoji, reviewers.iter().join(", "))
        })
        .join(" ");
    format!("Reviews: {parts}")
}
