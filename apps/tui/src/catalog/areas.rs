use std::collections::HashSet;

use crate::domain::RESERVED_AREA;

/// Selectable area labels, distinct, in the order the remote source reported them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaCatalog {
    labels: Vec<String>,
}

impl AreaCatalog {
    /// Drops blanks and repeats (first occurrence wins). The reserved label keeps
    /// its reported position, or is prepended when the remote list lacks it.
    pub fn build<I>(remote_areas: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut seen = HashSet::new();
        let mut labels: Vec<String> = remote_areas
            .into_iter()
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty() && seen.insert(label.clone()))
            .collect();

        if !seen.contains(RESERVED_AREA) {
            labels.insert(0, RESERVED_AREA.to_string());
        }

        Self { labels }
    }

    /// Catalog used when the remote area list could not be fetched.
    pub fn reserved_only() -> Self {
        Self::build(Vec::new())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|candidate| candidate == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(labels: &[&str]) -> AreaCatalog {
        AreaCatalog::build(labels.iter().map(|label| (*label).to_string()))
    }

    fn reserved_count(catalog: &AreaCatalog) -> usize {
        catalog
            .labels()
            .iter()
            .filter(|label| *label == RESERVED_AREA)
            .count()
    }

    #[test]
    fn reserved_label_reported_by_remote_stays_in_place() {
        let catalog = build(&["Indian", "Italian"]);
        assert_eq!(catalog.labels(), ["Indian", "Italian"]);

        let catalog = build(&["American", "Indian", "Italian"]);
        assert_eq!(catalog.labels(), ["American", "Indian", "Italian"]);
    }

    #[test]
    fn missing_reserved_label_is_prepended() {
        let catalog = build(&["Italian"]);
        assert_eq!(catalog.labels(), ["Indian", "Italian"]);
    }

    #[test]
    fn duplicates_and_blanks_are_dropped_without_sorting() {
        let catalog = build(&["Thai", "", "Indian", "British", "Thai", " Indian "]);
        assert_eq!(catalog.labels(), ["Thai", "Indian", "British"]);
        assert_eq!(reserved_count(&catalog), 1);
    }

    #[test]
    fn reserved_only_catalog_has_a_single_entry() {
        let catalog = AreaCatalog::reserved_only();
        assert_eq!(catalog.labels(), [RESERVED_AREA]);
        assert_eq!(catalog.position(RESERVED_AREA), Some(0));
    }
}
