use super::interval::Interval;

/// Size of the largest set of pairwise non-overlapping stays.
///
/// Intervals are sorted by exit time (stable), then
/// `dp[i] = 1 + max(dp[j] | j < i, exit[j] <= entry[i])`, or 1 when no such
/// `j` exists. Quadratic in the number of intervals.
pub fn max_non_overlapping(intervals: &[Interval]) -> usize {
    let sorted = sorted_by_exit(intervals);
    let (dp, _) = chain_table(&sorted);
    dp.into_iter().max().unwrap_or(0)
}

/// Same answer as [`max_non_overlapping`] in `O(n log n)`.
///
/// `best[k]` holds the smallest exit time that ends a chain of `k + 1`
/// stays. Because intervals arrive in exit order, `best` is non-decreasing
/// and a binary search finds the longest chain each stay can extend.
pub fn max_non_overlapping_fast(intervals: &[Interval]) -> usize {
    let sorted = sorted_by_exit(intervals);
    let mut best: Vec<u64> = Vec::new();
    for interval in sorted {
        let extends = best.partition_point(|&exit| exit <= interval.entry());
        if extends == best.len() {
            best.push(interval.exit());
        } else if interval.exit() < best[extends] {
            best[extends] = interval.exit();
        }
    }
    best.len()
}

/// One maximum set of non-overlapping stays, in ascending exit order.
///
/// Ties between equally long chains go to the earliest interval in exit
/// order.
pub fn select_non_overlapping(intervals: &[Interval]) -> Vec<Interval> {
    let sorted = sorted_by_exit(intervals);
    let (dp, pred) = chain_table(&sorted);
    let Some(best) = dp.iter().max().copied() else {
        return Vec::new();
    };
    let mut cursor = dp.iter().position(|&len| len == best);
    let mut chain = Vec::with_capacity(best);
    while let Some(i) = cursor {
        chain.push(sorted[i]);
        cursor = pred[i];
    }
    chain.reverse();
    chain
}

fn sorted_by_exit(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted = intervals.to_vec();
    sorted.sort_by_key(Interval::exit);
    sorted
}

fn chain_table(sorted: &[Interval]) -> (Vec<usize>, Vec<Option<usize>>) {
    let mut dp = vec![1usize; sorted.len()];
    let mut pred = vec![None; sorted.len()];
    for i in 0..sorted.len() {
        for j in 0..i {
            if sorted[j].precedes(&sorted[i]) && dp[j] + 1 > dp[i] {
                dp[i] = dp[j] + 1;
                pred[i] = Some(j);
            }
        }
    }
    (dp, pred)
}
