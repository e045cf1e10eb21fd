use std::collections::BTreeMap;

use popineq_stats::breakpoints::{self, BandSummary, LowerBound, Segmentation, Strategy};
use serde::Serialize;

use crate::{AnalysisError, population::Populations};

/// Segmentation of one group with the per-band population report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSegmentation {
    #[serde(flatten)]
    pub segmentation: Segmentation,
    pub summary: Vec<BandSummary>,
}

/// Applies `strategy` to each group independently.
///
/// Groups without values are skipped with a warning; every other failure
/// aborts with the name of the offending group.
pub fn segment_all(
    populations: &Populations,
    strategy: &Strategy,
    lower: LowerBound,
) -> Result<BTreeMap<String, GroupSegmentation>, AnalysisError> {
    let mut result = BTreeMap::new();
    for (group, values) in &populations.map {
        if values.is_empty() {
            log::warn!("group '{group}' has no values, skipping");
            continue;
        }
        let segmentation =
            breakpoints::segment(values, strategy, lower).map_err(AnalysisError::in_group(group))?;
        if let Some(advisory) = &segmentation.advisory {
            log::warn!(
                "group '{group}': {} of {} thresholds were duplicates",
                advisory.requested - advisory.unique,
                advisory.requested
            );
        }
        let summary = segmentation
            .scheme
            .summarize(values)
            .map_err(AnalysisError::in_group(group))?;
        result.insert(
            group.clone(),
            GroupSegmentation {
                segmentation,
                summary,
            },
        );
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_segments_each_group() {
        let mut populations = Populations::new();
        for value in 1..=8 {
            populations.insert("a", Decimal::from(value));
        }
        populations.insert("b", Decimal::from(5));
        populations.map.insert("empty".to_owned(), vec![]);

        let strategy = Strategy::CountPercentile {
            percentiles: vec![Decimal::from(50)],
        };
        let result = segment_all(&populations, &strategy, LowerBound::Unbounded).unwrap();

        assert_eq!(result.len(), 2);
        let a = &result["a"];
        assert_eq!(a.segmentation.scheme.len(), 2);
        assert_eq!(a.summary[0].population, 4);
        assert_eq!(a.summary[1].population, 4);
        assert_eq!(a.summary[1].total, Decimal::from(26));

        let b = &result["b"];
        assert_eq!(b.segmentation.scheme.len(), 1);
        assert_eq!(b.segmentation.assignments, vec![Some(1)]);
    }

    #[test]
    fn test_strategy_error_names_group() {
        let mut populations = Populations::new();
        populations.insert("tiny", Decimal::ONE);
        let err = segment_all(
            &populations,
            &Strategy::Jenks { classes: 3 },
            LowerBound::Unbounded,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::Group { ref group, .. } if group == "tiny"));
    }
}
