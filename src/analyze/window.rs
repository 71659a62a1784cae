use crate::model::{PullRequest, WeekBucket};
use chrono::{DateTime, Duration, Utc};

/// Keeps pull requests created at or after `now - days`. All timestamps are UTC.
pub fn recent_pulls(pulls: Vec<PullRequest>, now: DateTime<Utc>, days: u32) -> Vec<PullRequest> {
    let floor = window_floor(now, days);
    pulls
        .into_iter()
        .filter(|pull| pull.created_at >= floor)
        .collect()
}

pub fn window_floor(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now - Duration::days(i64::from(days))
}

/// Sums `field` over the most recent `min(window, weeks.len())` buckets.
pub fn windowed_sum<F>(weeks: &[WeekBucket], window: u32, field: F) -> u64
where
    F: Fn(&WeekBucket) -> u64,
{
    let take = (window as usize).min(weeks.len());
    weeks[weeks.len() - take..].iter().map(field).sum()
}

pub fn age_in_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_at).num_days().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PullState;
    use chrono::TimeZone;

    fn pull(number: u64, created_at: DateTime<Utc>) -> PullRequest {
        PullRequest {
            number,
            title: format!("pull {number}"),
            author: "alice".to_string(),
            created_at,
            state: PullState::Closed,
            labels: vec![],
            reviews: vec![],
            url: String::new(),
        }
    }

    #[test]
    fn recent_pulls_includes_the_boundary() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        let pulls = vec![
            pull(1, now - Duration::days(30)),
            pull(2, now - Duration::days(30) - Duration::seconds(1)),
            pull(3, now - Duration::days(2)),
        ];
        let numbers = recent_pulls(pulls, now, 30)
            .iter()
            .map(|p| p.number)
            .collect::<Vec<_>>();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn windowed_sum_reads_the_most_recent_suffix() {
        let weeks = vec![WeekBucket::new(1, 1, 0), WeekBucket::new(5, 20, 3)];
        assert_eq!(windowed_sum(&weeks, 1, |w| w.commits), 5);
        assert_eq!(windowed_sum(&weeks, 1, |w| w.additions), 20);
    }

    #[test]
    fn windowed_sum_clamps_to_length() {
        let weeks = vec![
            WeekBucket::new(1, 2, 3),
            WeekBucket::new(4, 5, 6),
            WeekBucket::new(7, 8, 9),
        ];
        assert_eq!(windowed_sum(&weeks, 30, |w| w.commits), 12);
        assert_eq!(windowed_sum(&weeks, 0, |w| w.commits), 0);
        assert_eq!(windowed_sum(&[], 4, |w| w.deletions), 0);
    }

    #[test]
    fn age_floors_partial_days() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();
        assert_eq!(age_in_days(now - Duration::hours(47), now), 1);
        assert_eq!(age_in_days(now, now), 0);
    }
}
