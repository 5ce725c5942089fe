use crate::AlgoError;

/// The k-th smallest (1-indexed) value in `{x * y | x in a, y in b}`.
///
/// Binary search over the product value. For each candidate `p`, `count`
/// tallies how many products are `<= p`; the tally is monotone in `p`, so
/// the answer is the smallest `p` whose tally reaches `k`. Positive,
/// negative, and zero factors in `a` are counted with separate monotone
/// scans of `b`.
pub fn kth_smallest_product(a: &[i32], b: &[i32], k: u64) -> Result<i64, AlgoError> {
    if a.is_empty() || b.is_empty() {
        return Err(AlgoError::InvalidArgument("arrays must be non-empty".into()));
    }
    if !is_sorted(a) || !is_sorted(b) {
        return Err(AlgoError::InvalidArgument("arrays must be sorted".into()));
    }
    let total = a.len() as u64 * b.len() as u64;
    if k == 0 || k > total {
        return Err(AlgoError::InvalidArgument(format!(
            "k must be in 1..={}, got {}",
            total, k
        )));
    }

    let bound_a = a[0].unsigned_abs().max(a[a.len() - 1].unsigned_abs()) as i64;
    let bound_b = b[0].unsigned_abs().max(b[b.len() - 1].unsigned_abs()) as i64;

    let mut lo = -bound_a * bound_b;
    let mut hi = bound_a * bound_b;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if count_at_most(a, b, mid) >= k {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    Ok(lo)
}

/// Number of products `x * y` with `x in a`, `y in b` that are `<= p`.
fn count_at_most(a: &[i32], b: &[i32], p: i64) -> u64 {
    let n = b.len();
    let mut count = 0u64;
    for &x in a {
        let x = x as i64;
        if x > 0 {
            // Products grow with y; everything left of the first overshoot
            // qualifies.
            count += b.partition_point(|&y| x * y as i64 <= p) as u64;
        } else if x < 0 {
            // Products shrink with y; everything from the first qualifying
            // y onward counts.
            count += (n - b.partition_point(|&y| x * y as i64 > p)) as u64;
        } else if p >= 0 {
            count += n as u64;
        }
    }
    count
}

fn is_sorted(xs: &[i32]) -> bool {
    xs.windows(2).all(|w| w[0] <= w[1])
}
