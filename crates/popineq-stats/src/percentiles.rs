//! Rank-percentile selection over value series.
//!
//! Percentiles here are positions in the ranked population, not interpolated
//! values. A cut point `p` maps to the index `floor(len * p / 100)`, so a
//! window `[from_pc, to_pc)` always starts and ends on an actual element and
//! two adjacent windows never share an entity.
//!
//! # Examples
//!
//! ```
//! use popineq_stats::percentiles::{self, Tail};
//! use rust_decimal::Decimal;
//!
//! let values: Vec<Decimal> = (1..=10).map(Decimal::from).collect();
//!
//! // The highest-ranked 20% of entities hold 19 of 55 units.
//! let top = percentiles::ranked_percentile_sum(&values, Decimal::from(20), Tail::Top).unwrap();
//! assert_eq!(top, Decimal::from(19));
//! ```

use rust_decimal::{Decimal, prelude::ToPrimitive as _};
use serde::Serialize;

use crate::StatsError;

/// Sort direction applied before a percentile window is cut.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RankOrder {
    #[default]
    Ascending,
    Descending,
}

/// Which end of the ranked population a ranked-percentile query selects.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tail {
    /// The lowest-ranked entities by value.
    #[default]
    Bottom,
    /// The highest-ranked entities by value.
    Top,
}

impl From<Tail> for RankOrder {
    fn from(tail: Tail) -> Self {
        match tail {
            Tail::Bottom => RankOrder::Ascending,
            Tail::Top => RankOrder::Descending,
        }
    }
}

/// A half-open rank window `[from_pc, to_pc)` in percent of the population.
///
/// An unset bound leaves that side of the window open. At least one bound is
/// set, each set bound lies in `[0, 100]`, and `from_pc < to_pc` when both
/// are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PercentileCut {
    from_pc: Option<Decimal>,
    to_pc: Option<Decimal>,
}

impl PercentileCut {
    pub fn new(from_pc: Option<Decimal>, to_pc: Option<Decimal>) -> Result<Self, StatsError> {
        for percentile in from_pc.iter().chain(to_pc.iter()) {
            check_percentile(*percentile)?;
        }
        match (from_pc, to_pc) {
            (None, None) => return Err(StatsError::InvalidRange { from_pc, to_pc }),
            (Some(from), Some(to)) if from >= to => {
                return Err(StatsError::InvalidRange { from_pc, to_pc });
            }
            _ => {}
        }
        Ok(Self { from_pc, to_pc })
    }

    /// Resolves the window to slice bounds over a population of `len`.
    #[must_use]
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        let from = percentile_index(len, self.from_pc).unwrap_or(0);
        let to = percentile_index(len, self.to_pc).unwrap_or(len);
        (from, to.max(from))
    }

    /// Cuts the window out of values already sorted in the desired rank order.
    #[must_use]
    pub fn slice<'a>(&self, ranked: &'a [Decimal]) -> &'a [Decimal] {
        let (from, to) = self.bounds(ranked.len());
        &ranked[from..to]
    }
}

pub(crate) fn check_percentile(percentile: Decimal) -> Result<Decimal, StatsError> {
    if percentile < Decimal::ZERO || percentile > Decimal::ONE_HUNDRED {
        return Err(StatsError::PercentileOutOfBounds { percentile });
    }
    Ok(percentile)
}

/// Maps a percentile to a position in a population of `length` entities.
///
/// Returns `floor(length * perc / 100)`, or `None` when `perc` is unset.
/// Percentiles outside `[0, 100]` are clamped to the population.
///
/// # Examples
///
/// ```
/// use popineq_stats::percentiles::percentile_index;
/// use rust_decimal::Decimal;
///
/// assert_eq!(percentile_index(10, Some(Decimal::from(25))), Some(2));
/// assert_eq!(percentile_index(10, None), None);
/// ```
#[must_use]
pub fn percentile_index(length: usize, perc: Option<Decimal>) -> Option<usize> {
    let perc = perc?;
    let index = (Decimal::from(length) * perc / Decimal::ONE_HUNDRED).floor();
    Some(index.to_usize().unwrap_or(0).min(length))
}

/// Sum of `values`, failing with [`StatsError::Overflow`] instead of
/// panicking when it leaves the `Decimal` range.
///
/// # Examples
///
/// ```
/// use popineq_stats::{StatsError, percentiles::series_total};
/// use rust_decimal::Decimal;
///
/// assert_eq!(series_total(&[Decimal::ONE, Decimal::TWO]), Ok(Decimal::from(3)));
/// assert_eq!(series_total(&[Decimal::MAX, Decimal::ONE]), Err(StatsError::Overflow));
/// ```
pub fn series_total(values: &[Decimal]) -> Result<Decimal, StatsError> {
    values.iter().try_fold(Decimal::ZERO, |acc, value| {
        acc.checked_add(*value).ok_or(StatsError::Overflow)
    })
}

/// Returns a sorted copy of `values` in the requested order.
#[must_use]
pub fn ranked(values: &[Decimal], order: RankOrder) -> Vec<Decimal> {
    let mut sorted = values.to_vec();
    match order {
        RankOrder::Ascending => sorted.sort_unstable(),
        RankOrder::Descending => sorted.sort_unstable_by(|a, b| b.cmp(a)),
    }
    sorted
}

/// Selects the entities ranked inside `[from_pc, to_pc)`.
///
/// # Examples
///
/// ```
/// use popineq_stats::percentiles::{percentile_range, RankOrder};
/// use rust_decimal::Decimal;
///
/// let values: Vec<Decimal> = [5, 3, 9, 1].into_iter().map(Decimal::from).collect();
/// let middle = percentile_range(
///     &values,
///     Some(Decimal::from(25)),
///     Some(Decimal::from(75)),
///     RankOrder::Ascending,
/// )
/// .unwrap();
/// assert_eq!(middle, vec![Decimal::from(3), Decimal::from(5)]);
/// ```
pub fn percentile_range(
    values: &[Decimal],
    from_pc: Option<Decimal>,
    to_pc: Option<Decimal>,
    order: RankOrder,
) -> Result<Vec<Decimal>, StatsError> {
    let cut = PercentileCut::new(from_pc, to_pc)?;
    let sorted = ranked(values, order);
    Ok(cut.slice(&sorted).to_vec())
}

/// Sum of the entities ranked inside `[from_pc, to_pc)`.
pub fn percentile_range_sum(
    values: &[Decimal],
    from_pc: Option<Decimal>,
    to_pc: Option<Decimal>,
    order: RankOrder,
) -> Result<Decimal, StatsError> {
    series_total(&percentile_range(values, from_pc, to_pc, order)?)
}

/// Share of the series total held by the entities inside `[from_pc, to_pc)`.
pub fn percentile_range_share(
    values: &[Decimal],
    from_pc: Option<Decimal>,
    to_pc: Option<Decimal>,
    order: RankOrder,
) -> Result<Decimal, StatsError> {
    let part = percentile_range_sum(values, from_pc, to_pc, order)?;
    share_of_total(part, values)
}

/// Sum of the lowest (`Tail::Bottom`) or highest (`Tail::Top`) ranked
/// `perc` percent of entities.
pub fn ranked_percentile_sum(
    values: &[Decimal],
    perc: Decimal,
    tail: Tail,
) -> Result<Decimal, StatsError> {
    percentile_range_sum(values, None, Some(perc), tail.into())
}

/// Share of the series total held by the lowest or highest ranked `perc`
/// percent of entities.
///
/// # Examples
///
/// ```
/// use popineq_stats::percentiles::{ranked_percentile_share, Tail};
/// use rust_decimal::Decimal;
///
/// let values: Vec<Decimal> = [1, 1, 2, 4].into_iter().map(Decimal::from).collect();
/// let share = ranked_percentile_share(&values, Decimal::from(25), Tail::Top).unwrap();
/// assert_eq!(share, Decimal::new(5, 1));
/// ```
pub fn ranked_percentile_share(
    values: &[Decimal],
    perc: Decimal,
    tail: Tail,
) -> Result<Decimal, StatsError> {
    let part = ranked_percentile_sum(values, perc, tail)?;
    share_of_total(part, values)
}

/// How many entities, taken in `order`, are needed before their running sum
/// reaches at least `perc` percent of the series total.
///
/// With [`RankOrder::Descending`] this counts the heaviest contributors that
/// together account for `perc` percent of all work. Returns the population
/// size when the target is never reached.
///
/// # Examples
///
/// ```
/// use popineq_stats::percentiles::{count_cumsum_percentile, RankOrder};
/// use rust_decimal::Decimal;
///
/// let values: Vec<Decimal> = [1, 1, 1, 7].into_iter().map(Decimal::from).collect();
/// let count = count_cumsum_percentile(&values, Decimal::from(70), RankOrder::Descending).unwrap();
/// assert_eq!(count, 1);
/// ```
pub fn count_cumsum_percentile(
    values: &[Decimal],
    perc: Decimal,
    order: RankOrder,
) -> Result<usize, StatsError> {
    let perc = check_percentile(perc)?;
    let sorted = ranked(values, order);
    let total = series_total(&sorted)?;
    if total.is_zero() {
        return Err(StatsError::DivisionByZero);
    }
    let limit = mass_limit(total, perc)?;
    let mut acc = Decimal::ZERO;
    for (idx, value) in sorted.iter().enumerate() {
        acc += value;
        if acc >= limit {
            return Ok(idx + 1);
        }
    }
    Ok(sorted.len())
}

/// `perc` percent of `total`.
pub(crate) fn mass_limit(total: Decimal, perc: Decimal) -> Result<Decimal, StatsError> {
    (total / Decimal::ONE_HUNDRED)
        .checked_mul(perc)
        .ok_or(StatsError::Overflow)
}

fn share_of_total(part: Decimal, values: &[Decimal]) -> Result<Decimal, StatsError> {
    let total = series_total(values)?;
    if total.is_zero() {
        return Err(StatsError::DivisionByZero);
    }
    part.checked_div(total).ok_or(StatsError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decimals(values: &[i64]) -> Vec<Decimal> {
        values.iter().copied().map(Decimal::from).collect()
    }

    fn pc(value: i64) -> Option<Decimal> {
        Some(Decimal::from(value))
    }

    #[test]
    fn test_percentile_index_floors() {
        assert_eq!(percentile_index(7, pc(50)), Some(3));
        assert_eq!(percentile_index(9, pc(10)), Some(0));
        assert_eq!(percentile_index(10, pc(100)), Some(10));
        assert_eq!(percentile_index(3, Some(Decimal::new(3334, 2))), Some(1));
        assert_eq!(percentile_index(0, pc(50)), Some(0));
    }

    #[test]
    fn test_range_requires_a_bound() {
        let values = decimals(&[1, 2, 3]);
        assert_eq!(
            percentile_range(&values, None, None, RankOrder::Ascending),
            Err(StatsError::InvalidRange {
                from_pc: None,
                to_pc: None
            })
        );
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let values = decimals(&[1, 2, 3]);
        let err = percentile_range(&values, pc(50), pc(50), RankOrder::Ascending).unwrap_err();
        assert!(matches!(err, StatsError::InvalidRange { .. }));
        let err = percentile_range(&values, pc(60), pc(40), RankOrder::Ascending).unwrap_err();
        assert!(matches!(err, StatsError::InvalidRange { .. }));
    }

    #[test]
    fn test_range_rejects_out_of_bounds_percentile() {
        let values = decimals(&[1, 2, 3]);
        let err = percentile_range(&values, None, pc(101), RankOrder::Ascending).unwrap_err();
        assert_eq!(
            err,
            StatsError::PercentileOutOfBounds {
                percentile: Decimal::from(101)
            }
        );
    }

    #[test]
    fn test_open_ended_ranges() {
        let values = decimals(&[4, 1, 3, 2, 5]);
        assert_eq!(
            percentile_range(&values, pc(60), None, RankOrder::Ascending).unwrap(),
            decimals(&[4, 5])
        );
        assert_eq!(
            percentile_range(&values, None, pc(40), RankOrder::Descending).unwrap(),
            decimals(&[5, 4])
        );
    }

    #[test]
    fn test_adjacent_windows_partition_population() {
        let values = decimals(&[9, 3, 7, 1, 8, 2, 6]);
        let mut all = Vec::new();
        for (from, to) in [(0, 20), (20, 40), (40, 60), (60, 80), (80, 100)] {
            all.extend(percentile_range(&values, pc(from), pc(to), RankOrder::Ascending).unwrap());
        }
        assert_eq!(all, ranked(&values, RankOrder::Ascending));
    }

    #[test]
    fn test_full_range_reproduces_total() {
        let values = decimals(&[3, 0, 12, 5, 5, 1]);
        let sum = percentile_range_sum(&values, pc(0), pc(100), RankOrder::Ascending).unwrap();
        assert_eq!(sum, Decimal::from(26));
    }

    #[test]
    fn test_full_ranked_share_is_one() {
        let values = decimals(&[3, 0, 12, 5, 5, 1]);
        for tail in [Tail::Top, Tail::Bottom] {
            let share = ranked_percentile_share(&values, Decimal::ONE_HUNDRED, tail).unwrap();
            assert_eq!(share, Decimal::ONE);
        }
    }

    #[test]
    fn test_share_of_zero_total_fails() {
        let values = decimals(&[0, 0, 0]);
        assert_eq!(
            percentile_range_share(&values, None, pc(50), RankOrder::Ascending),
            Err(StatsError::DivisionByZero)
        );
    }

    #[test]
    fn test_ranked_sums_pick_the_right_tail() {
        let values = decimals(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        let bottom = ranked_percentile_sum(&values, Decimal::from(30), Tail::Bottom).unwrap();
        let top = ranked_percentile_sum(&values, Decimal::from(30), Tail::Top).unwrap();
        assert_eq!(bottom, Decimal::from(6));
        assert_eq!(top, Decimal::from(27));
    }

    #[test]
    fn test_count_cumsum_percentile() {
        let values = decimals(&[10, 20, 30, 40]);
        let count = |perc| {
            count_cumsum_percentile(&values, Decimal::from(perc), RankOrder::Descending).unwrap()
        };
        assert_eq!(count(0), 1);
        assert_eq!(count(40), 1);
        assert_eq!(count(41), 2);
        assert_eq!(count(70), 2);
        assert_eq!(count(100), 4);
        let ascending =
            count_cumsum_percentile(&values, Decimal::from(30), RankOrder::Ascending).unwrap();
        assert_eq!(ascending, 2);
    }

    #[test]
    fn test_cut_bounds_resolve_open_sides() {
        let cut = PercentileCut::new(pc(40), None).unwrap();
        assert_eq!(cut.bounds(10), (4, 10));
        let cut = PercentileCut::new(None, pc(25)).unwrap();
        assert_eq!(cut.bounds(10), (0, 2));
        assert_eq!(cut.slice(&decimals(&[5, 6, 7, 8])), &decimals(&[5])[..]);
        assert_eq!(cut.bounds(0), (0, 0));
    }

    #[test]
    fn test_sums_report_overflow() {
        let values = vec![Decimal::MAX, Decimal::MAX, Decimal::ONE];
        assert_eq!(
            percentile_range_sum(&values, None, pc(100), RankOrder::Descending),
            Err(StatsError::Overflow)
        );
        assert_eq!(
            ranked_percentile_share(&values, Decimal::from(10), Tail::Bottom),
            Err(StatsError::Overflow)
        );
        assert_eq!(
            count_cumsum_percentile(&values, Decimal::from(50), RankOrder::Descending),
            Err(StatsError::Overflow)
        );
    }

    #[test]
    fn test_count_cumsum_percentile_zero_total() {
        let values = decimals(&[0, 0]);
        assert_eq!(
            count_cumsum_percentile(&values, Decimal::from(50), RankOrder::Descending),
            Err(StatsError::DivisionByZero)
        );
    }
}
