use rust_decimal::Decimal;
use serde::Serialize;

use crate::StatsError;

/// Identifier of a band inside a [`BandScheme`], starting at 1.
pub type GroupId = usize;

/// Lower edge of the first band.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LowerBound {
    /// The first band has no minimum and takes every value up to its upper edge.
    #[default]
    Unbounded,
    /// The first band starts strictly above this value; values at or below it
    /// are left unassigned.
    Explicit(Decimal),
}

impl LowerBound {
    #[must_use]
    pub fn value(self) -> Option<Decimal> {
        match self {
            LowerBound::Unbounded => None,
            LowerBound::Explicit(value) => Some(value),
        }
    }
}

/// A numeric interval `(low, high]` and the group assigned to values in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Band {
    pub group_id: GroupId,
    /// Exclusive lower edge; `None` means no minimum.
    pub low: Option<Decimal>,
    /// Inclusive upper edge.
    pub high: Decimal,
}

impl Band {
    #[must_use]
    pub fn contains(&self, value: Decimal) -> bool {
        self.low.is_none_or(|low| low < value) && value <= self.high
    }
}

/// Emitted when a strategy yields fewer distinct thresholds than it produced.
///
/// Small populations routinely repeat quantile values; the scheme then has
/// fewer, wider bands instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DuplicateThresholds {
    pub requested: usize,
    pub unique: usize,
}

/// Ordered, gap-free list of bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandScheme {
    bands: Vec<Band>,
}

/// Population and value total of one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandSummary {
    pub group_id: GroupId,
    pub low: Option<Decimal>,
    pub high: Decimal,
    pub population: usize,
    pub total: Decimal,
}

impl BandScheme {
    /// Builds bands from raw thresholds.
    ///
    /// Thresholds are sorted and deduplicated, thresholds at or below an
    /// explicit lower bound are dropped, and `max` is appended as the last
    /// upper edge if no threshold reaches it. Returns an advisory when
    /// thresholds were collapsed.
    ///
    /// A lower bound at or above `max` leaves nothing to band, and the
    /// scheme is empty.
    #[must_use]
    pub fn from_thresholds(
        mut thresholds: Vec<Decimal>,
        max: Decimal,
        lower: LowerBound,
    ) -> (Self, Option<DuplicateThresholds>) {
        let requested = thresholds.len();
        thresholds.sort_unstable();
        thresholds.dedup();
        if let Some(low) = lower.value() {
            thresholds.retain(|&t| t > low);
        }
        let unique = thresholds.len();

        let advisory = (unique < requested).then(|| {
            log::warn!(
                "duplicate band thresholds, reducing number of bands ({requested} requested, {unique} unique)"
            );
            DuplicateThresholds { requested, unique }
        });

        let max_above_lower = lower.value().is_none_or(|low| low < max);
        if max_above_lower && thresholds.last().is_none_or(|&last| last < max) {
            thresholds.push(max);
        }

        let mut low = lower.value();
        let bands = thresholds
            .into_iter()
            .enumerate()
            .map(|(idx, high)| {
                let band = Band {
                    group_id: idx + 1,
                    low,
                    high,
                };
                low = Some(high);
                band
            })
            .collect();
        (Self { bands }, advisory)
    }

    #[must_use]
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Upper edges of all bands, in ascending order.
    pub fn thresholds(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.bands.iter().map(|band| band.high)
    }

    /// Returns the group of the band containing `value`, if any.
    #[must_use]
    pub fn classify(&self, value: Decimal) -> Option<GroupId> {
        let idx = self.bands.partition_point(|band| band.high < value);
        self.bands
            .get(idx)
            .filter(|band| band.contains(value))
            .map(|band| band.group_id)
    }

    /// Classifies every value, preserving input order.
    #[must_use]
    pub fn assign(&self, values: &[Decimal]) -> Vec<Option<GroupId>> {
        values.iter().map(|&value| self.classify(value)).collect()
    }

    /// Counts and sums the values falling into each band.
    pub fn summarize(&self, values: &[Decimal]) -> Result<Vec<BandSummary>, StatsError> {
        let mut summaries = self
            .bands
            .iter()
            .map(|band| BandSummary {
                group_id: band.group_id,
                low: band.low,
                high: band.high,
                population: 0,
                total: Decimal::ZERO,
            })
            .collect::<Vec<_>>();
        for &value in values {
            if let Some(group_id) = self.classify(value) {
                let summary = &mut summaries[group_id - 1];
                summary.population += 1;
                summary.total = summary
                    .total
                    .checked_add(value)
                    .ok_or(StatsError::Overflow)?;
            }
        }
        Ok(summaries)
    }
}
