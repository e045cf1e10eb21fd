//! How consistently equal population bands hold the same share across groups.
//!
//! Each group's positive values are cut into `num_bands` equal rank bands
//! (band 0 is the lowest-ranked fifth for five bands, and so on). For every
//! band the share of the group total is computed per group, and the
//! coefficient of variation of that share across groups tells whether the
//! band carries a similar weight everywhere.

use std::collections::BTreeMap;

use popineq_stats::{
    StatsError, descriptive,
    percentiles::{self, RankOrder},
};
use rust_decimal::{Decimal, prelude::ToPrimitive as _};
use serde::Serialize;

use crate::{AnalysisError, population::Populations};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandShare {
    pub band: usize,
    pub population: usize,
    pub share: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandVariance {
    pub num_bands: usize,
    pub groups: BTreeMap<String, Vec<BandShare>>,
    /// Coefficient of variation of each band's share across groups.
    pub band_cv: Vec<Option<f64>>,
}

impl BandVariance {
    pub fn new(populations: &Populations, num_bands: usize) -> Result<Self, AnalysisError> {
        if num_bands == 0 {
            return Err(AnalysisError::InvalidBandCount);
        }
        let positive = populations.positive_only();

        let mut groups = BTreeMap::new();
        for (group, values) in &positive.map {
            let shares = (0..num_bands)
                .map(|band| {
                    let from_pc = Decimal::from(band * 100) / Decimal::from(num_bands);
                    let to_pc = Decimal::from((band + 1) * 100) / Decimal::from(num_bands);
                    let band_values = percentiles::percentile_range(
                        values,
                        Some(from_pc),
                        Some(to_pc),
                        RankOrder::Ascending,
                    )?;
                    let share = percentiles::percentile_range_share(
                        values,
                        Some(from_pc),
                        Some(to_pc),
                        RankOrder::Ascending,
                    )?;
                    Ok::<_, StatsError>(BandShare {
                        band,
                        population: band_values.len(),
                        share,
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map_err(AnalysisError::in_group(group))?;
            groups.insert(group.clone(), shares);
        }

        let band_cv = (0..num_bands)
            .map(|band| {
                let shares = groups
                    .values()
                    .map(|shares| shares[band].share.to_f64().unwrap_or(f64::NAN))
                    .collect::<Vec<_>>();
                descriptive::coefficient_of_variation(&shares)
            })
            .collect();

        Ok(Self {
            num_bands,
            groups,
            band_cv,
        })
    }
}
