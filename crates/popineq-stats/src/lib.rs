//! Population inequality and segmentation statistics.
//!
//! This crate turns an unordered series of per-entity measurements (edits per
//! user, tag actions per region, ...) into summary scores and groupings:
//!
//! - **Percentile selection**: rank-percentile windows, their sums and shares
//! - **Inequality metrics**: Gini, Theil, Palma, 20/20 ratio, ratio to median
//! - **Breakpoints**: band schemes from count or mass percentiles, Jenks
//!   natural breaks, head/tail breaks and shrinking percentile bands
//! - **Sampling**: stratified bucket sampling of ranked lists
//! - **Descriptive statistics**: count, total, mean, median and friends
//!
//! Every function is a pure transformation of its inputs. Values are
//! [`rust_decimal::Decimal`] so that sums and shares over large populations
//! stay exact.
//!
//! # Modules
//!
//! - [`percentiles`]: Rank-percentile windows over a value series
//! - [`inequality`]: Inequality coefficients and Lorenz curves
//! - [`breakpoints`]: Band schemes and value classification
//! - [`sampling`]: Stratified sampling for evaluation cohorts
//! - [`descriptive`]: Descriptive statistics
//!
//! # Examples
//!
//! ## Inequality of a population
//!
//! ```
//! use popineq_stats::inequality;
//! use rust_decimal::Decimal;
//!
//! let edits: Vec<Decimal> = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10]
//!     .into_iter()
//!     .map(Decimal::from)
//!     .collect();
//! assert_eq!(inequality::palma(&edits), Some(Decimal::ONE));
//! assert!(inequality::gini(&edits).unwrap() < Decimal::new(5, 1));
//! ```
//!
//! ## Segmenting a population
//!
//! ```
//! use popineq_stats::breakpoints::{self, LowerBound, Strategy};
//! use rust_decimal::Decimal;
//!
//! let edits: Vec<Decimal> = (1..=20).map(Decimal::from).collect();
//! let quartiles = Strategy::CountPercentile {
//!     percentiles: vec![Decimal::from(25), Decimal::from(50), Decimal::from(75)],
//! };
//! let segmentation = breakpoints::segment(&edits, &quartiles, LowerBound::Unbounded).unwrap();
//! assert_eq!(segmentation.scheme.len(), 4);
//! ```

pub mod breakpoints;
pub mod descriptive;
mod error;
pub mod inequality;
pub mod percentiles;
pub mod sampling;

pub use self::error::StatsError;
