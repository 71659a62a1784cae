use crate::analyze::review_tally::ReviewCounts;
use crate::model::{PullRequest, BLOCKED_LABEL};

#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum Bucket {
    Blocked,
    ChangesNeeded,
    ReadyToMerge,
    WaitingForApproval,
}

/// The blocked label wins over any review state.
pub fn classify(pull: &PullRequest, counts: &ReviewCounts, min_approvals: u32) -> Bucket {
    if pull.has_label(BLOCKED_LABEL) {
        Bucket::Blocked
    } else if counts.changes_requested > 0 || counts.commented > 0 {
        Bucket::ChangesNeeded
    } else if counts.approved >= min_approvals {
        Bucket::ReadyToMerge
    } else {
        Bucket::WaitingForApproval
    }
}
