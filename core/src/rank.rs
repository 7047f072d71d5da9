//! Ranking of bins by their estimates.

use crate::row::Value;

/// A rank, where `None` means that the value was missing and so unranked.
pub type Rank = Option<usize>;

/// Ranks values in descending order.
///
/// The largest value has rank 1. Tied values share the lowest rank of the tied group, and the
/// next distinct value skips the ranks taken by the group, so that ranks of `[3, 2, 2, 1]` are
/// `[1, 2, 2, 4]`. Missing values are left unranked and do not take up any rank.
pub fn rank(values: &[Value]) -> Vec<Rank> {
    let mut order = values
        .iter()
        .enumerate()
        .filter_map(|(i, value)| value.map(|value| (i, value)))
        .collect::<Vec<_>>();

    order.sort_by(|(_, a), (_, b)| b.total_cmp(a));

    let mut ranks = vec![None; values.len()];
    let mut previous: Option<(f64, usize)> = None;

    for (position, &(i, value)) in order.iter().enumerate() {
        let rank = match previous {
            Some((previous_value, previous_rank)) if previous_value == value => previous_rank,
            _ => position + 1,
        };

        ranks[i] = Some(rank);
        previous = Some((value, rank));
    }

    ranks
}

/// Ranks each column independently.
pub fn rank_columns<'a, I>(columns: I) -> Vec<Vec<Rank>>
where
    I: IntoIterator<Item = &'a [Value]>,
{
    columns.into_iter().map(rank).collect()
}
