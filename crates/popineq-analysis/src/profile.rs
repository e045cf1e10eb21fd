//! Per-group inequality profiles.
//!
//! A profile collects every inequality score of one population. Scores that
//! are undefined for the population (a zero total, an empty bottom tail) are
//! `None`; malformed input such as negative values is an error.

use std::collections::BTreeMap;

use popineq_stats::{
    StatsError,
    descriptive::DescriptiveStats,
    inequality::{self, Theil},
    percentiles::{self, RankOrder, Tail},
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{AnalysisError, population::Populations};

/// Which extra scores a profile computes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileConfig {
    /// Top percentiles whose share of the total is reported.
    pub top_percentiles: Vec<Decimal>,
    /// Mass percentile used to count the top contributors.
    pub contributor_percentile: Decimal,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            top_percentiles: vec![Decimal::TEN, Decimal::ONE, Decimal::new(1, 1)],
            contributor_percentile: Decimal::from(80),
        }
    }
}

/// Share of the total held by the top `percentile` percent of entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopShare {
    pub percentile: Decimal,
    pub share: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InequalityProfile {
    pub stats: Option<DescriptiveStats>,
    pub gini: Option<Decimal>,
    pub theil: Option<Theil>,
    pub palma: Option<Decimal>,
    pub ratio_20_20: Option<Decimal>,
    pub top_shares: Vec<TopShare>,
    /// How many of the largest contributors account for
    /// `contributor_percentile` percent of the total.
    pub top_contributors: Option<usize>,
}

impl InequalityProfile {
    pub fn new(values: &[Decimal], config: &ProfileConfig) -> Result<Self, StatsError> {
        let stats = DescriptiveStats::new(values);
        let gini = undefined_on_zero(inequality::gini(values))?;
        let theil = undefined_on_zero(inequality::normalize_shares(values))?
            .map(|shares| inequality::theil(&shares))
            .transpose()?;
        let top_shares = config
            .top_percentiles
            .iter()
            .map(|&percentile| {
                let share = undefined_on_zero(percentiles::ranked_percentile_share(
                    values,
                    percentile,
                    Tail::Top,
                ))?;
                Ok(TopShare { percentile, share })
            })
            .collect::<Result<Vec<_>, StatsError>>()?;
        let top_contributors = undefined_on_zero(percentiles::count_cumsum_percentile(
            values,
            config.contributor_percentile,
            RankOrder::Descending,
        ))?;

        Ok(Self {
            stats,
            gini,
            theil,
            palma: inequality::palma(values),
            ratio_20_20: inequality::ratio_20_20(values),
            top_shares,
            top_contributors,
        })
    }
}

/// Profiles every group of `populations`.
pub fn profile_all(
    populations: &Populations,
    config: &ProfileConfig,
) -> Result<BTreeMap<String, InequalityProfile>, AnalysisError> {
    populations
        .map
        .iter()
        .map(|(group, values)| {
            let profile =
                InequalityProfile::new(values, config).map_err(AnalysisError::in_group(group))?;
            Ok((group.clone(), profile))
        })
        .collect()
}

fn undefined_on_zero<T>(result: Result<T, StatsError>) -> Result<Option<T>, StatsError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(StatsError::DivisionByZero) => Ok(None),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decimals(values: &[i64]) -> Vec<Decimal> {
        values.iter().copied().map(Decimal::from).collect()
    }

    #[test]
    fn test_profile_of_linear_population() {
        let values = decimals(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        let config = ProfileConfig {
            top_percentiles: decimals(&[10, 50]),
            contributor_percentile: Decimal::from(50),
        };
        let profile = InequalityProfile::new(&values, &config).unwrap();
        assert_eq!(profile.stats.as_ref().unwrap().total, Decimal::from(55));
        assert_eq!(profile.palma, Some(Decimal::ONE));
        assert_eq!(
            profile.top_shares,
            vec![
                TopShare {
                    percentile: Decimal::from(10),
                    share: Some(Decimal::from(10) / Decimal::from(55)),
                },
                TopShare {
                    percentile: Decimal::from(50),
                    share: Some(Decimal::from(40) / Decimal::from(55)),
                },
            ]
        );
        // 10 + 9 + 8 = 27 < 27.5, adding 7 reaches it
        assert_eq!(profile.top_contributors, Some(4));
        assert!(profile.theil.unwrap().inequality > 0.0);
    }

    #[test]
    fn test_zero_population_is_undefined() {
        let profile = InequalityProfile::new(&decimals(&[0, 0, 0]), &ProfileConfig::default())
            .unwrap();
        assert_eq!(profile.gini, None);
        assert_eq!(profile.theil, None);
        assert_eq!(profile.palma, None);
        assert!(profile.top_shares.iter().all(|s| s.share.is_none()));
        assert_eq!(profile.top_contributors, None);
    }

    #[test]
    fn test_negative_values_fail() {
        let err = InequalityProfile::new(&decimals(&[3, -1]), &ProfileConfig::default())
            .unwrap_err();
        assert!(matches!(err, StatsError::NegativeValue { .. }));
    }

    #[test]
    fn test_profile_all_names_failing_group() {
        let mut populations = Populations::new();
        populations.insert("ok", Decimal::ONE);
        populations.insert("bad", Decimal::NEGATIVE_ONE);
        populations.insert("bad", Decimal::TWO);
        let err = profile_all(&populations, &ProfileConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("group 'bad'"));
    }
}
