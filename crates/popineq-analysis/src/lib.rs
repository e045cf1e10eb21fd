//! Group-level analyses built on [`popineq_stats`].
//!
//! Measurements usually come split by some grouping key (region, country,
//! platform). This crate runs the statistics of `popineq-stats` over every
//! group of a [`population::Populations`] and collects the results in
//! serializable reports:
//!
//! - [`profile`]: Inequality profile of each group
//! - [`segment`]: Band segmentation of each group with population summaries
//! - [`band_variance`]: Stability of equal-band shares across groups

pub mod band_variance;
mod error;
pub mod population;
pub mod profile;
pub mod segment;

pub use self::error::AnalysisError;
