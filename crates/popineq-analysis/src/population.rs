use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-entity measurements split into named groups (regions, countries, ...).
///
/// Serializes as a plain JSON object mapping each group name to its list of
/// values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Populations {
    pub map: BTreeMap<String, Vec<Decimal>>,
}

impl Populations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups measurement records by a key computed from each record.
    ///
    /// # Examples
    ///
    /// ```
    /// use popineq_analysis::population::Populations;
    /// use rust_decimal::Decimal;
    ///
    /// let rows = [("DE", 3), ("FR", 1), ("DE", 5)];
    /// let populations = Populations::collect_by_group(
    ///     rows,
    ///     |(region, _)| region.to_string(),
    ///     |(_, edits)| Decimal::from(*edits),
    /// );
    /// assert_eq!(populations.get("DE").unwrap().len(), 2);
    /// ```
    pub fn collect_by_group<I, G, V>(records: I, mut group: G, mut value: V) -> Self
    where
        I: IntoIterator,
        G: FnMut(&I::Item) -> String,
        V: FnMut(&I::Item) -> Decimal,
    {
        let mut map: BTreeMap<String, Vec<Decimal>> = BTreeMap::new();
        for record in records {
            map.entry(group(&record)).or_default().push(value(&record));
        }
        Self { map }
    }

    pub fn insert(&mut self, group: impl Into<String>, value: Decimal) {
        self.map.entry(group.into()).or_default().push(value);
    }

    #[must_use]
    pub fn get(&self, group: &str) -> Option<&[Decimal]> {
        self.map.get(group).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Group names ranked by population size, largest first. Ties keep name
    /// order. `limit` keeps only the first `limit` groups.
    #[must_use]
    pub fn largest(&self, limit: Option<usize>) -> Vec<&str> {
        let mut groups = self
            .map
            .iter()
            .map(|(name, values)| (name.as_str(), values.len()))
            .collect::<Vec<_>>();
        groups.sort_by(|a, b| b.1.cmp(&a.1));
        groups
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|(name, _)| name)
            .collect()
    }

    /// Keeps only the listed groups.
    #[must_use]
    pub fn select(&self, groups: &[&str]) -> Self {
        let map = groups
            .iter()
            .filter_map(|&name| {
                self.map
                    .get(name)
                    .map(|values| (name.to_owned(), values.clone()))
            })
            .collect();
        Self { map }
    }

    /// Drops every value at or below zero, and groups left empty.
    #[must_use]
    pub fn positive_only(&self) -> Self {
        let map = self
            .map
            .iter()
            .filter_map(|(name, values)| {
                let positive = values
                    .iter()
                    .copied()
                    .filter(|value| *value > Decimal::ZERO)
                    .collect::<Vec<_>>();
                (!positive.is_empty()).then(|| (name.clone(), positive))
            })
            .collect();
        Self { map }
    }
}

impl FromIterator<(String, Decimal)> for Populations {
    fn from_iter<T: IntoIterator<Item = (String, Decimal)>>(iter: T) -> Self {
        let mut populations = Self::new();
        for (group, value) in iter {
            populations.insert(group, value);
        }
        populations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Populations {
        [("b", 1), ("a", 0), ("a", 2), ("c", 4), ("c", -1), ("c", 3)]
            .into_iter()
            .map(|(group, value)| (group.to_owned(), Decimal::from(value)))
            .collect()
    }

    #[test]
    fn test_largest_ranks_by_population() {
        let populations = sample();
        assert_eq!(populations.largest(None), vec!["c", "a", "b"]);
        assert_eq!(populations.largest(Some(2)), vec!["c", "a"]);
    }

    #[test]
    fn test_positive_only() {
        let populations = sample().positive_only();
        assert_eq!(populations.get("a"), Some(&[Decimal::from(2)][..]));
        assert_eq!(
            populations.get("c"),
            Some(&[Decimal::from(4), Decimal::from(3)][..])
        );
        assert_eq!(populations.len(), 3);

        let zeros: Populations = [("z".to_owned(), Decimal::ZERO)].into_iter().collect();
        assert!(zeros.positive_only().is_empty());
    }

    #[test]
    fn test_select() {
        let populations = sample().select(&["b", "missing"]);
        assert_eq!(populations.len(), 1);
        assert!(populations.get("b").is_some());
    }

    #[test]
    fn test_json_shape() {
        let populations: Populations =
            serde_json::from_str(r#"{"DE": [1, 2.5], "FR": [3]}"#).unwrap();
        assert_eq!(
            populations.get("DE"),
            Some(&[Decimal::ONE, Decimal::new(25, 1)][..])
        );
        assert_eq!(populations.get("FR"), Some(&[Decimal::from(3)][..]));
    }
}
