use rust_decimal::Decimal;

use crate::{StatsError, percentiles::series_total};

/// Head/tail breaks for heavy-tailed series.
///
/// Records the mean of the working set as a threshold, then keeps only the
/// head (values strictly above that mean) and repeats, until `num_breaks`
/// thresholds exist or the head has at most one value.
pub(crate) fn head_tail_breaks(
    values: &[Decimal],
    num_breaks: usize,
) -> Result<Vec<Decimal>, StatsError> {
    if num_breaks == 0 {
        return Err(StatsError::InvalidBreakCount);
    }
    let mut head = values.to_vec();
    let mut thresholds = Vec::with_capacity(num_breaks);
    while thresholds.len() < num_breaks && head.len() > 1 {
        let mean = series_total(&head)? / Decimal::from(head.len());
        thresholds.push(mean);
        head.retain(|&value| value > mean);
    }
    Ok(thresholds)
}
