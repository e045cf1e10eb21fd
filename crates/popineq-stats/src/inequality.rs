//! Inequality coefficients over a population of non-negative measurements.
//!
//! Two failure policies apply here:
//!
//! - Malformed input (negative values for Gini, Theil entries outside
//!   `[0, 1]`) is a hard [`StatsError`].
//! - Ratio scores whose denominator is zero for a sparse population
//!   ([`palma`], [`ratio_20_20`], [`ratio_to_median`]) return `None`, which
//!   report layers treat as "no data" for that cell.

use rust_decimal::{Decimal, prelude::ToPrimitive as _};
use serde::Serialize;

use crate::{
    StatsError, descriptive,
    percentiles::{self, Tail},
};

/// Gini coefficient of a non-negative series.
///
/// Accumulates the area under the Lorenz curve with the trapezoid rule over
/// the ascending series and compares it with the area under the line of
/// perfect equality.
///
/// # Errors
///
/// * [`StatsError::NegativeValue`] if any entry is negative
/// * [`StatsError::DivisionByZero`] if the series is empty or sums to zero
/// * [`StatsError::Overflow`] if the accumulated area leaves the `Decimal` range
///
/// # Examples
///
/// ```
/// use popineq_stats::inequality::gini;
/// use rust_decimal::Decimal;
///
/// let values: Vec<Decimal> = [0, 0, 0, 10].into_iter().map(Decimal::from).collect();
/// assert_eq!(gini(&values).unwrap(), Decimal::new(75, 2));
/// ```
pub fn gini(values: &[Decimal]) -> Result<Decimal, StatsError> {
    if let Some(&value) = values.iter().find(|v| v.is_sign_negative() && !v.is_zero()) {
        return Err(StatsError::NegativeValue { value });
    }
    let sorted = percentiles::ranked(values, percentiles::RankOrder::Ascending);

    let mut height = Decimal::ZERO;
    let mut area = Decimal::ZERO;
    for value in &sorted {
        height = height.checked_add(*value).ok_or(StatsError::Overflow)?;
        area = area
            .checked_add(height - value / Decimal::TWO)
            .ok_or(StatsError::Overflow)?;
    }
    let fair_area = (height / Decimal::TWO)
        .checked_mul(Decimal::from(sorted.len()))
        .ok_or(StatsError::Overflow)?;
    if fair_area.is_zero() {
        return Err(StatsError::DivisionByZero);
    }
    (fair_area - area)
        .checked_div(fair_area)
        .ok_or(StatsError::Overflow)
}

/// Theil index as a `(redundancy, inequality)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Theil {
    /// `ln(n)` minus the Shannon entropy of the shares.
    pub redundancy: f64,
    /// `1 - e^(-redundancy)`, in `[0, 1)`.
    pub inequality: f64,
}

/// Theil index of a probability vector.
///
/// `shares` must already be normalized (see [`normalize_shares`]); each entry
/// is range-checked, but the sum is not.
///
/// # Errors
///
/// * [`StatsError::OutOfUnitRange`] for any entry outside `[0, 1]`
/// * [`StatsError::EmptySeries`] for an empty vector
///
/// # Examples
///
/// ```
/// use popineq_stats::inequality::theil;
///
/// let index = theil(&[0.25, 0.25, 0.25, 0.25]).unwrap();
/// assert!(index.redundancy.abs() < 1e-12);
/// assert!(index.inequality.abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn theil(shares: &[f64]) -> Result<Theil, StatsError> {
    if shares.is_empty() {
        return Err(StatsError::EmptySeries);
    }
    let mut negentropy = 0.0;
    for &share in shares {
        if !(0.0..=1.0).contains(&share) {
            return Err(StatsError::OutOfUnitRange { value: share });
        }
        if share > 0.0 {
            negentropy += share * share.ln();
        }
    }
    let maximum_entropy = (shares.len() as f64).ln();
    let redundancy = maximum_entropy + negentropy;
    Ok(Theil {
        redundancy,
        inequality: 1.0 - (-redundancy).exp(),
    })
}

/// Divides every entry by the series total, producing the probability
/// vector [`theil`] expects.
///
/// # Errors
///
/// [`StatsError::DivisionByZero`] if the series sums to zero (or is empty),
/// [`StatsError::Overflow`] if the sum leaves the `Decimal` range.
pub fn normalize_shares(values: &[Decimal]) -> Result<Vec<f64>, StatsError> {
    let total = percentiles::series_total(values)?;
    if total.is_zero() {
        return Err(StatsError::DivisionByZero);
    }
    Ok(values
        .iter()
        .map(|value| (value / total).to_f64().unwrap_or(f64::NAN))
        .collect())
}

/// Palma ratio: the top 10% sum over the bottom 40% sum.
///
/// Returns `None` when the bottom 40% hold nothing or a tail sum overflows.
///
/// # Examples
///
/// ```
/// use popineq_stats::inequality::palma;
/// use rust_decimal::Decimal;
///
/// let values: Vec<Decimal> = (1..=10).map(Decimal::from).collect();
/// assert_eq!(palma(&values), Some(Decimal::ONE));
/// ```
#[must_use]
pub fn palma(values: &[Decimal]) -> Option<Decimal> {
    tail_ratio(values, Decimal::TEN, Decimal::from(40))
}

/// The top 20% sum over the bottom 20% sum, or `None` when the bottom 20%
/// hold nothing or a tail sum overflows.
#[must_use]
pub fn ratio_20_20(values: &[Decimal]) -> Option<Decimal> {
    tail_ratio(values, Decimal::from(20), Decimal::from(20))
}

/// The sum of a ranked percentile segment over the series median.
///
/// Returns `Ok(None)` for an empty series or a zero median.
pub fn ratio_to_median(
    values: &[Decimal],
    perc: Decimal,
    tail: Tail,
) -> Result<Option<Decimal>, StatsError> {
    let segment = percentiles::ranked_percentile_sum(values, perc, tail)?;
    Ok(descriptive::median(values).and_then(|median| segment.checked_div(median)))
}

fn tail_ratio(values: &[Decimal], top_pc: Decimal, bottom_pc: Decimal) -> Option<Decimal> {
    let top = ranked_sum(values, top_pc, Tail::Top)?;
    let bottom = ranked_sum(values, bottom_pc, Tail::Bottom)?;
    top.checked_div(bottom)
}

fn ranked_sum(values: &[Decimal], perc: Decimal, tail: Tail) -> Option<Decimal> {
    let sorted = percentiles::ranked(values, tail.into());
    let end = percentiles::percentile_index(sorted.len(), Some(perc)).unwrap_or(0);
    percentiles::series_total(&sorted[..end]).ok()
}

/// One point of a Lorenz curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LorenzPoint {
    /// Percent of the population, ranked from the lowest value up.
    pub population_pc: Decimal,
    /// Share of the total held by that part of the population.
    pub share: Decimal,
}

/// Samples the Lorenz curve of `values` at the given population percentiles.
///
/// # Examples
///
/// ```
/// use popineq_stats::inequality::lorenz_curve;
/// use rust_decimal::Decimal;
///
/// let values: Vec<Decimal> = [1, 1, 1, 1].into_iter().map(Decimal::from).collect();
/// let curve = lorenz_curve(&values, &[Decimal::from(50), Decimal::from(100)]).unwrap();
/// assert_eq!(curve[0].share, Decimal::new(5, 1));
/// assert_eq!(curve[1].share, Decimal::ONE);
/// ```
pub fn lorenz_curve(values: &[Decimal], steps: &[Decimal]) -> Result<Vec<LorenzPoint>, StatsError> {
    steps
        .iter()
        .map(|&step| {
            let share = percentiles::ranked_percentile_share(values, step, Tail::Bottom)?;
            Ok(LorenzPoint {
                population_pc: step,
                share,
            })
        })
        .collect()
}
