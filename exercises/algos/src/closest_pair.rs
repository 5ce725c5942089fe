use crate::AlgoError;

/// Indices `(i, j)` with `i < j` minimizing the Manhattan distance
/// `|xs[i] - xs[j]| + |ys[i] - ys[j]|`; distance ties go to the
/// lexicographically smallest index pair.
pub fn closest_lexicographical_pair(
    xs: &[i32],
    ys: &[i32],
) -> Result<(usize, usize), AlgoError> {
    if xs.len() != ys.len() {
        return Err(AlgoError::InvalidArgument(
            "coordinate arrays differ in length".into(),
        ));
    }
    let n = xs.len();
    if n < 2 {
        return Err(AlgoError::InvalidArgument(
            "at least two points are required".into(),
        ));
    }

    let mut best = (0, 1);
    let mut best_distance = u64::MAX;
    for i in 0..n {
        for j in i + 1..n {
            let distance =
                xs[i].abs_diff(xs[j]) as u64 + ys[i].abs_diff(ys[j]) as u64;
            // Scanning in lexicographic order, so only a strict improvement
            // may displace the incumbent.
            if distance < best_distance {
                best_distance = distance;
                best = (i, j);
            }
        }
    }
    Ok(best)
}
