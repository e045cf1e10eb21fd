use rust_decimal::Decimal;
use serde::Serialize;

use crate::percentiles;

/// Descriptive statistics summarizing a value series.
///
/// Totals and means are exact decimal arithmetic so that per-entity averages
/// over large populations do not drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptiveStats {
    /// Number of entities in the series.
    pub count: usize,
    /// Sum of all values.
    pub total: Decimal,
    /// The minimum value in the series.
    pub min: Decimal,
    /// The maximum value in the series.
    pub max: Decimal,
    /// The arithmetic mean of the series.
    pub mean: Decimal,
    /// The median of the series (mean of the two middle values for an even count).
    pub median: Decimal,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the series contains at least one value
    /// * `None` - if the series is empty or its total leaves the `Decimal` range
    ///
    /// # Examples
    ///
    /// ```
    /// # use popineq_stats::descriptive::DescriptiveStats;
    /// # use rust_decimal::Decimal;
    /// let values: Vec<Decimal> = [5, 2, 4, 1].into_iter().map(Decimal::from).collect();
    /// let stats = DescriptiveStats::new(&values).unwrap();
    /// assert_eq!(stats.min, Decimal::from(1));
    /// assert_eq!(stats.max, Decimal::from(5));
    /// assert_eq!(stats.mean, Decimal::from(3));
    /// assert_eq!(stats.median, Decimal::new(30, 1));
    /// ```
    #[must_use]
    pub fn new(values: &[Decimal]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        Self::from_sorted(&sorted)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[Decimal]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted(),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let total = percentiles::series_total(sorted_values).ok()?;
        let mean = total / Decimal::from(count);
        let median = median_of_sorted(sorted_values)?;

        Some(Self {
            count,
            total,
            min,
            max,
            mean,
            median,
        })
    }
}

/// Median of unsorted values, or `None` for an empty series.
#[must_use]
pub fn median(values: &[Decimal]) -> Option<Decimal> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    median_of_sorted(&sorted)
}

fn median_of_sorted(sorted_values: &[Decimal]) -> Option<Decimal> {
    let len = sorted_values.len();
    if len == 0 {
        return None;
    }
    let mid = len / 2;
    if len % 2 == 1 {
        Some(sorted_values[mid])
    } else {
        let (lo, hi) = (sorted_values[mid - 1], sorted_values[mid]);
        // lo + hi only overflows when both share a sign, then hi - lo cannot
        Some(lo.checked_add(hi).map_or_else(
            || lo + (hi - lo) / Decimal::TWO,
            |sum| sum / Decimal::TWO,
        ))
    }
}

/// Population standard deviation divided by the mean.
///
/// Used to compare how much a share varies across groups. Returns `None`
/// for an empty slice or a zero mean.
///
/// # Examples
///
/// ```
/// # use popineq_stats::descriptive::coefficient_of_variation;
/// assert_eq!(coefficient_of_variation(&[2.0, 2.0, 2.0]), Some(0.0));
/// assert_eq!(coefficient_of_variation(&[1.0, 3.0]), Some(0.5));
/// assert_eq!(coefficient_of_variation(&[]), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if mean.abs() < f64::EPSILON {
        return None;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt() / mean)
}
