use rust_decimal::{Decimal, prelude::ToPrimitive as _};

use crate::{
    StatsError,
    percentiles::{check_percentile, mass_limit, series_total},
};

/// Count-based percentile thresholds with linear interpolation between
/// order statistics (the `numpy.percentile` default).
///
/// `sorted_values` must be ascending and non-empty.
pub(crate) fn count_percentile_thresholds(
    sorted_values: &[Decimal],
    percentiles: &[Decimal],
) -> Result<Vec<Decimal>, StatsError> {
    percentiles
        .iter()
        .map(|&perc| Ok(interpolate(sorted_values, check_percentile(perc)?)))
        .collect()
}

fn interpolate(sorted_values: &[Decimal], perc: Decimal) -> Decimal {
    let last = sorted_values.len() - 1;
    let position = Decimal::from(last) * perc / Decimal::ONE_HUNDRED;
    let floor = position.floor();
    let lo = floor.to_usize().unwrap_or(0).min(last);
    let hi = (lo + 1).min(last);
    let fraction = position - floor;
    // convex combination, stays inside [lo, hi] without overflowing
    sorted_values[lo] * (Decimal::ONE - fraction) + sorted_values[hi] * fraction
}

/// Mass-based percentile thresholds.
///
/// Walks the ascending series accumulating a running sum; the threshold for
/// `p` is the last value whose cumulative share of the total is still
/// strictly below `p` percent. A percentile that the first value already
/// reaches produces no threshold.
pub(crate) fn cumulative_sum_thresholds(
    sorted_values: &[Decimal],
    percentiles: &[Decimal],
) -> Result<Vec<Decimal>, StatsError> {
    let total = series_total(sorted_values)?;
    if total.is_zero() {
        return Err(StatsError::DivisionByZero);
    }

    let mut thresholds = Vec::with_capacity(percentiles.len());
    for &perc in percentiles {
        let limit = mass_limit(total, check_percentile(perc)?)?;
        let mut acc = Decimal::ZERO;
        let mut threshold = None;
        for &value in sorted_values {
            acc = acc.checked_add(value).ok_or(StatsError::Overflow)?;
            if acc >= limit {
                break;
            }
            threshold = Some(value);
        }
        thresholds.extend(threshold);
    }
    Ok(thresholds)
}

/// Percentile points whose successive gaps halve, from `min_percentile` to
/// `max_percentile`, `num_breaks + 1` points in total.
pub(crate) fn shrinking_percentile_points(
    num_breaks: usize,
    min_percentile: Decimal,
    max_percentile: Decimal,
) -> Result<Vec<Decimal>, StatsError> {
    if num_breaks == 0 {
        return Err(StatsError::InvalidBreakCount);
    }
    check_percentile(min_percentile)?;
    check_percentile(max_percentile)?;
    if min_percentile >= max_percentile {
        return Err(StatsError::InvalidRange {
            from_pc: Some(min_percentile),
            to_pc: Some(max_percentile),
        });
    }

    // Widths w, w/2, w/4, ... sum to w * (2 - 2^(1 - num_breaks)).
    let mut halvings = Vec::with_capacity(num_breaks);
    let mut factor = Decimal::ONE;
    for _ in 0..num_breaks {
        halvings.push(factor);
        factor /= Decimal::TWO;
    }
    let span = max_percentile - min_percentile;
    let first_width = span / (Decimal::TWO - halvings[num_breaks - 1]);

    let mut points = Vec::with_capacity(num_breaks + 1);
    let mut point = min_percentile;
    for width_factor in &halvings {
        points.push(point);
        point += first_width * width_factor;
    }
    points.push(max_percentile);
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decimals(values: &[i64]) -> Vec<Decimal> {
        values.iter().copied().map(Decimal::from).collect()
    }

    #[test]
    fn test_count_percentile_interpolates() {
        let sorted = decimals(&[1, 2, 3, 4]);
        let thresholds =
            count_percentile_thresholds(&sorted, &decimals(&[0, 25, 50, 100])).unwrap();
        assert_eq!(
            thresholds,
            vec![
                Decimal::ONE,
                Decimal::new(175, 2),
                Decimal::new(25, 1),
                Decimal::from(4)
            ]
        );
    }

    #[test]
    fn test_count_percentile_single_value() {
        let thresholds =
            count_percentile_thresholds(&decimals(&[7]), &decimals(&[10, 90])).unwrap();
        assert_eq!(thresholds, decimals(&[7, 7]));
    }

    #[test]
    fn test_count_percentile_rejects_bad_percentile() {
        assert!(count_percentile_thresholds(&decimals(&[1, 2]), &decimals(&[-1])).is_err());
    }

    #[test]
    fn test_cumulative_sum_uses_mass() {
        // total 20: cumulative 1, 2, 3, 4, 20
        let sorted = decimals(&[1, 1, 1, 1, 16]);
        let thresholds = cumulative_sum_thresholds(&sorted, &decimals(&[10, 25, 50])).unwrap();
        // 10% = 2: only the first value stays below
        // 25% = 5 and 50% = 10: the four small values stay below
        assert_eq!(thresholds, decimals(&[1, 1, 1]));
    }

    #[test]
    fn test_cumulative_sum_boundary_is_strict() {
        let sorted = decimals(&[1, 1, 2]);
        // 50% = 2: cumulative 1 < 2, cumulative 2 is not below
        let thresholds = cumulative_sum_thresholds(&sorted, &decimals(&[50])).unwrap();
        assert_eq!(thresholds, decimals(&[1]));
        // 20% = 0.8: the first value already reaches it
        let thresholds = cumulative_sum_thresholds(&sorted, &decimals(&[20])).unwrap();
        assert!(thresholds.is_empty());
    }

    #[test]
    fn test_cumulative_sum_zero_total() {
        assert_eq!(
            cumulative_sum_thresholds(&decimals(&[0, 0]), &decimals(&[50])),
            Err(StatsError::DivisionByZero)
        );
    }

    #[test]
    fn test_interpolation_across_full_range() {
        let sorted = vec![Decimal::MIN, Decimal::MAX];
        let thresholds = count_percentile_thresholds(&sorted, &decimals(&[0, 50, 100])).unwrap();
        assert_eq!(thresholds[0], Decimal::MIN);
        assert!(thresholds[1].abs() <= Decimal::ONE);
        assert_eq!(thresholds[2], Decimal::MAX);
    }

    #[test]
    fn test_cumulative_sum_overflow() {
        assert_eq!(
            cumulative_sum_thresholds(&[Decimal::MAX, Decimal::MAX], &decimals(&[50])),
            Err(StatsError::Overflow)
        );
    }

    #[test]
    fn test_shrinking_points_halve() {
        let points = shrinking_percentile_points(3, Decimal::ZERO, Decimal::from(70)).unwrap();
        assert_eq!(points, decimals(&[0, 40, 60, 70]));
    }

    #[test]
    fn test_shrinking_points_single_break() {
        let points =
            shrinking_percentile_points(1, Decimal::from(10), Decimal::from(90)).unwrap();
        assert_eq!(points, decimals(&[10, 90]));
    }

    #[test]
    fn test_shrinking_points_validation() {
        assert_eq!(
            shrinking_percentile_points(0, Decimal::ZERO, Decimal::ONE_HUNDRED),
            Err(StatsError::InvalidBreakCount)
        );
        assert!(shrinking_percentile_points(2, Decimal::from(50), Decimal::from(50)).is_err());
        assert!(shrinking_percentile_points(2, Decimal::ZERO, Decimal::from(120)).is_err());
    }
}
