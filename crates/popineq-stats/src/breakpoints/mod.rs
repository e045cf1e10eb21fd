//! Band schemes that partition a population by value.
//!
//! A [`Strategy`] turns a value series into raw thresholds; [`segment`] then
//! sorts and deduplicates them, closes the scheme at the series maximum, and
//! assigns every value to the band `(low, high]` that contains it. All
//! strategies are deterministic.
//!
//! # Examples
//!
//! ```
//! use popineq_stats::breakpoints::{self, LowerBound, Strategy};
//! use rust_decimal::Decimal;
//!
//! let values: Vec<Decimal> = [1, 1, 1, 1, 1, 1, 1, 1, 1, 100]
//!     .into_iter()
//!     .map(Decimal::from)
//!     .collect();
//! let segmentation =
//!     breakpoints::segment(&values, &Strategy::Jenks { classes: 2 }, LowerBound::Unbounded).unwrap();
//!
//! assert_eq!(segmentation.scheme.len(), 2);
//! assert_eq!(segmentation.assignments[9], Some(2));
//! assert!(segmentation.assignments[..9].iter().all(|&g| g == Some(1)));
//! ```

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    StatsError,
    percentiles::{self, RankOrder},
};

pub use self::scheme::{Band, BandScheme, BandSummary, DuplicateThresholds, GroupId, LowerBound};

mod head_tail;
pub mod jenks;
mod percentile;
mod scheme;

/// How band thresholds are derived from a value series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Strategy {
    /// Rank percentiles with linear interpolation between order statistics.
    CountPercentile { percentiles: Vec<Decimal> },
    /// Percentiles of the cumulative value mass rather than the entity count.
    CumulativeSumPercentile { percentiles: Vec<Decimal> },
    /// Variance-minimizing split into `classes` bands.
    ///
    /// Runs in `O(n² · classes)` time, so the series is limited to
    /// [`jenks::MAX_VALUES`] entries.
    Jenks { classes: usize },
    /// Repeated split at the mean of the values above the previous mean.
    HeadTail { num_breaks: usize },
    /// `num_breaks` count-percentile bands between two percentiles, each half
    /// as wide as the previous one.
    ShrinkingPercentile {
        num_breaks: usize,
        min_percentile: Decimal,
        max_percentile: Decimal,
    },
}

impl Strategy {
    /// Computes the raw thresholds for `values`, before deduplication.
    ///
    /// # Errors
    ///
    /// [`StatsError::EmptySeries`] for an empty series,
    /// [`StatsError::Overflow`] when a running sum leaves the `Decimal` range,
    /// plus the parameter errors of each strategy.
    pub fn thresholds(&self, values: &[Decimal]) -> Result<Vec<Decimal>, StatsError> {
        if values.is_empty() {
            return Err(StatsError::EmptySeries);
        }
        let sorted = percentiles::ranked(values, RankOrder::Ascending);
        match self {
            Strategy::CountPercentile { percentiles } => {
                percentile::count_percentile_thresholds(&sorted, percentiles)
            }
            Strategy::CumulativeSumPercentile { percentiles } => {
                percentile::cumulative_sum_thresholds(&sorted, percentiles)
            }
            Strategy::Jenks { classes } => jenks::jenks_breaks(&sorted, *classes),
            Strategy::HeadTail { num_breaks } => head_tail::head_tail_breaks(&sorted, *num_breaks),
            Strategy::ShrinkingPercentile {
                num_breaks,
                min_percentile,
                max_percentile,
            } => {
                let points = percentile::shrinking_percentile_points(
                    *num_breaks,
                    *min_percentile,
                    *max_percentile,
                )?;
                percentile::count_percentile_thresholds(&sorted, &points)
            }
        }
    }
}

/// A band scheme together with the band of every input value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segmentation {
    pub scheme: BandScheme,
    /// Group of each input value, in input order. `None` only for values at
    /// or below an explicit lower bound.
    pub assignments: Vec<Option<GroupId>>,
    /// Set when duplicate thresholds were collapsed into fewer bands.
    pub advisory: Option<DuplicateThresholds>,
}

/// Builds the band scheme of `strategy` over `values` and classifies each value.
pub fn segment(
    values: &[Decimal],
    strategy: &Strategy,
    lower: LowerBound,
) -> Result<Segmentation, StatsError> {
    let thresholds = strategy.thresholds(values)?;
    let max = values.iter().copied().max().ok_or(StatsError::EmptySeries)?;
    let (scheme, advisory) = BandScheme::from_thresholds(thresholds, max, lower);
    let assignments = scheme.assign(values);
    Ok(Segmentation {
        scheme,
        assignments,
        advisory,
    })
}
