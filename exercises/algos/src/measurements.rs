use crate::AlgoError;

/// Minimum number of measurements needed to cover `n` levels with `k`
/// materials.
///
/// Keeps a single row of the table `f(k, s) = 1 + f(k-1, s-1) + f(k, s-1)`
/// and raises `s` until `f(k, s) >= n`. Updating the row from the high end
/// lets `f(k-1, s-1)` be read before it is overwritten.
pub fn min_measurements(k: usize, n: u64) -> Result<u64, AlgoError> {
    if k == 0 {
        return Err(AlgoError::InvalidArgument(
            "at least one material is required".into(),
        ));
    }

    let mut row = vec![0u64; k + 1];
    let mut s = 0;
    while row[k] < n {
        s += 1;
        for materials in (1..=k).rev() {
            row[materials] = row[materials]
                .saturating_add(row[materials - 1])
                .saturating_add(1);
        }
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_examples() {
        assert_eq!(min_measurements(1, 2), Ok(2));
        assert_eq!(min_measurements(2, 6), Ok(3));
        assert_eq!(min_measurements(3, 14), Ok(4));
    }

    #[test]
    fn zero_levels_need_no_measurements() {
        assert_eq!(min_measurements(3, 0), Ok(0));
    }

    #[test]
    fn single_material_probes_every_level() {
        assert_eq!(min_measurements(1, 100), Ok(100));
    }

    #[test]
    fn zero_materials_is_rejected() {
        assert!(min_measurements(0, 5).is_err());
    }
}
