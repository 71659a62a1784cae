use crate::model::RankOrder;
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Ranking<T> {
    pub entries: Vec<(String, T)>,
    /// Sum of the metric over every entry, before truncation.
    pub total: u64,
}

impl<T> Ranking<T> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stable sort by `metric`, so ties keep the tally's insertion order, then
/// truncation to `limit`.
pub fn rank<T, F>(tally: &IndexMap<String, T>, metric: F, order: RankOrder, limit: usize) -> Ranking<T>
where
    T: Clone,
    F: Fn(&T) -> u64,
{
    let total = tally.values().map(&metric).sum();
    let mut entries = tally
        .iter()
        .map(|(login, value)| (login.clone(), value.clone()))
        .collect::<Vec<_>>();
    match order {
        RankOrder::Top => entries.sort_by(|(_, a), (_, b)| metric(b).cmp(&metric(a))),
        RankOrder::Bottom => entries.sort_by_key(|(_, value)| metric(value)),
    }
    entries.truncate(limit);
    Ranking { entries, total }
}
