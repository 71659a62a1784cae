#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct WeekBucket {
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
}

impl WeekBucket {
    pub fn new(commits: u64, additions: u64, deletions: u64) -> Self {
        Self {
            commits,
            additions,
            deletions,
        }
    }
}

/// Weekly statistics of one author in one repository, oldest week first.
#[derive(Debug, Clone)]
pub struct ContributorWeeks {
    pub author: String,
    pub weeks: Vec<WeekBucket>,
}

impl ContributorWeeks {
    pub fn new(author: impl ToString, weeks: Vec<WeekBucket>) -> Self {
        Self {
            author: author.to_string(),
            weeks,
        }
    }
}

/// Answer of the statistics source, which computes lazily.
#[derive(Debug, Clone)]
pub enum StatsPoll {
    Ready(Vec<ContributorWeeks>),
    Pending,
}
