pub mod assembler;
pub mod markdown;
mod message;
pub mod slack;

pub use message::{Block, Message};

use crate::model::Result;

#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum ReportKind {
    Reminder,
    Reviewers,
    Contributions,
    Authors,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Reminder,
        ReportKind::Reviewers,
        ReportKind::Contributions,
        ReportKind::Authors,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::Reminder => "reminder",
            ReportKind::Reviewers => "reviewers",
            ReportKind::Contributions => "contributions",
            ReportKind::Authors => "authors",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Reminder => "Pull request reminder",
            ReportKind::Reviewers => "Reviewer ranking",
            ReportKind::Contributions => "Contribution ranking",
            ReportKind::Authors => "Pull request author ranking",
        }
    }
}

/// Write-only view of the messaging platform.
pub trait ReportSink {
    async fn deliver(&self, kind: ReportKind, message: &Message) -> Result<()>;
}
