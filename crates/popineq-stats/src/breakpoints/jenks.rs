//! Jenks natural breaks.
//!
//! Dynamic programming over the sorted series: `lower_class_limits[l][j]` is
//! the 1-based start of the last class in the best `j`-class split of the
//! first `l` values, and `variance_combinations[l][j]` is the summed
//! within-class squared deviation of that split. Each row `l` grows the last
//! class backwards from `l` one value at a time and keeps the split that does
//! not increase the total; ties move the class start further left.

use rust_decimal::{Decimal, prelude::ToPrimitive as _};

use crate::StatsError;

/// Upper bound on the series length. The inner loops touch `n² / 2 · k`
/// cells.
pub const MAX_VALUES: usize = 1 << 15;

/// Upper bound on `(n + 1) * (k + 1)` scratch cells per matrix.
pub const MAX_SCRATCH_CELLS: usize = 1 << 25;

/// Returns the `classes - 1` interior class boundaries of `sorted_values`.
///
/// Each boundary is the largest value of its class, so the bands
/// `(.., b1], (b1, b2], ..., (b_{k-1}, max]` reproduce the optimal classes.
pub(crate) fn jenks_breaks(
    sorted_values: &[Decimal],
    classes: usize,
) -> Result<Vec<Decimal>, StatsError> {
    let n = sorted_values.len();
    if classes == 0 || classes > n {
        return Err(StatsError::InvalidClassCount { classes, len: n });
    }
    if n > MAX_VALUES {
        return Err(StatsError::TooManyValues {
            len: n,
            limit: MAX_VALUES,
        });
    }
    let cells = (n + 1).saturating_mul(classes + 1);
    if cells > MAX_SCRATCH_CELLS {
        return Err(StatsError::ScratchTooLarge {
            cells,
            limit: MAX_SCRATCH_CELLS,
        });
    }
    log::debug!("jenks: {n} values, {classes} classes, {cells} cells per matrix");

    let data = sorted_values
        .iter()
        .map(|value| value.to_f64().unwrap_or(f64::NAN))
        .collect::<Vec<_>>();

    let mut lower_class_limits = vec![vec![0_usize; classes + 1]; n + 1];
    let mut variance_combinations = vec![vec![0.0_f64; classes + 1]; n + 1];
    for j in 1..=classes {
        lower_class_limits[1][j] = 1;
        for row in variance_combinations.iter_mut().skip(2) {
            row[j] = f64::INFINITY;
        }
    }

    for l in 2..=n {
        let mut sum = 0.0;
        let mut sum_squares = 0.0;
        let mut weight = 0.0;
        let mut variance = 0.0;
        for m in 1..=l {
            let start = l - m + 1;
            let value = data[start - 1];
            sum_squares += value * value;
            sum += value;
            weight += 1.0;
            variance = sum_squares - (sum * sum) / weight;
            let prev = start - 1;
            if prev != 0 {
                for j in 2..=classes {
                    let candidate = variance + variance_combinations[prev][j - 1];
                    if variance_combinations[l][j] >= candidate {
                        lower_class_limits[l][j] = start;
                        variance_combinations[l][j] = candidate;
                    }
                }
            }
        }
        lower_class_limits[l][1] = 1;
        variance_combinations[l][1] = variance;
    }

    let mut breaks = vec![Decimal::ZERO; classes - 1];
    let mut k = n;
    for count in (2..=classes).rev() {
        let start = lower_class_limits[k][count];
        breaks[count - 2] = sorted_values[start.saturating_sub(2)];
        k = start.saturating_sub(1);
    }
    Ok(breaks)
}
