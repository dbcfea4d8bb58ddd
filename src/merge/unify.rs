//! Merged class-table construction.
//!
//! The unifier folds each dataset's class table into one accumulated
//! table of normalized names, assigning merged indices in first-seen
//! order across datasets. The accumulator carries the index counter as
//! its own state, so two runs over the same inputs in the same order
//! produce identical tables and maps.

use std::collections::BTreeMap;

use super::class_table::ClassTable;
use super::normalize::normalize_class_name;

/// Per-dataset mapping from raw class index to merged index.
///
/// Raw indices whose name normalizes to nothing have no entry at all.
pub type ClassIndexMap = BTreeMap<String, usize>;

/// Accumulator for the unified class table.
///
/// Merged indices start at 0 and increase strictly with no gaps or
/// reuse; each normalized name owns exactly one index and vice versa.
#[derive(Clone, Debug, Default)]
pub struct MergedClassTable {
    // Merged index -> normalized name, in assignment order.
    names: Vec<String>,
    lookup: BTreeMap<String, usize>,
}

impl MergedClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one dataset's class table into the merged table, returning
    /// that dataset's index map.
    ///
    /// Entries are visited in document order. A normalized name already
    /// claimed by an earlier dataset (or an earlier entry of this one)
    /// reuses its existing merged index.
    pub fn absorb(&mut self, table: &ClassTable) -> ClassIndexMap {
        let mut index_map = ClassIndexMap::new();

        for (raw_index, raw_name) in &table.entries {
            let Some(normalized) = normalize_class_name(raw_name) else {
                continue;
            };

            let merged = match self.lookup.get(&normalized) {
                Some(&existing) => existing,
                None => {
                    let next = self.names.len();
                    self.names.push(normalized.clone());
                    self.lookup.insert(normalized, next);
                    next
                }
            };

            index_map.insert(raw_index.clone(), merged);
        }

        index_map
    }

    /// Normalized names in merged-index order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the merged index for a normalized name, if assigned.
    pub fn index_of(&self, normalized: &str) -> Option<usize> {
        self.lookup.get(normalized).copied()
    }

    /// Number of merged classes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> ClassTable {
        ClassTable {
            entries: entries
                .iter()
                .map(|(i, n)| (i.to_string(), n.to_string()))
                .collect(),
        }
    }

    #[test]
    fn assigns_indices_in_first_seen_order() {
        let mut merged = MergedClassTable::new();
        let map = merged.absorb(&table(&[("0", "Cat"), ("1", "Dog"), ("2", "Ferret")]));

        assert_eq!(merged.names(), ["cat", "dog", "ferret"]);
        assert_eq!(map.get("0"), Some(&0));
        assert_eq!(map.get("1"), Some(&1));
        assert_eq!(map.get("2"), Some(&2));
    }

    #[test]
    fn follows_document_order_not_numeric_order() {
        let mut merged = MergedClassTable::new();
        let map = merged.absorb(&table(&[("0", "ant"), ("10", "bee"), ("2", "wasp")]));

        // "bee" appears before "wasp" in the document, so it claims the
        // lower merged index despite the higher raw index.
        assert_eq!(merged.names(), ["ant", "bee", "wasp"]);
        assert_eq!(map.get("10"), Some(&1));
        assert_eq!(map.get("2"), Some(&2));
    }

    #[test]
    fn converges_variant_names_across_datasets() {
        let mut merged = MergedClassTable::new();
        let pets = merged.absorb(&table(&[("0", "n1-Cat"), ("1", "Dog")]));
        let strays = merged.absorb(&table(&[("0", "CAT"), ("1", "Fox")]));

        assert_eq!(merged.names(), ["cat", "dog", "fox"]);
        assert_eq!(pets.get("0"), Some(&0));
        assert_eq!(strays.get("0"), Some(&0));
        assert_eq!(strays.get("1"), Some(&2));
    }

    #[test]
    fn discarded_names_get_no_entry() {
        let mut merged = MergedClassTable::new();
        let map = merged.absorb(&table(&[("0", "cat"), ("1", ".DS_Store"), ("2", "dog")]));

        assert_eq!(merged.names(), ["cat", "dog"]);
        assert_eq!(map.len(), 2);
        assert!(!map.contains_key("1"));
        // No gap: "dog" takes index 1, not 2.
        assert_eq!(map.get("2"), Some(&1));
    }

    #[test]
    fn duplicate_names_within_one_dataset_share_an_index() {
        let mut merged = MergedClassTable::new();
        let map = merged.absorb(&table(&[("0", "cat"), ("1", "n99-CAT")]));

        assert_eq!(merged.names(), ["cat"]);
        assert_eq!(map.get("0"), Some(&0));
        assert_eq!(map.get("1"), Some(&0));
    }

    #[test]
    fn absorbing_identical_inputs_twice_is_deterministic() {
        let a = table(&[("0", "n2-Husky"), ("1", "Poodle")]);
        let b = table(&[("0", "HUSKY"), ("1", "Beagle")]);

        let mut first = MergedClassTable::new();
        let first_maps = (first.absorb(&a), first.absorb(&b));

        let mut second = MergedClassTable::new();
        let second_maps = (second.absorb(&a), second.absorb(&b));

        assert_eq!(first.names(), second.names());
        assert_eq!(first_maps, second_maps);
    }

    #[test]
    fn index_lookup_round_trips() {
        let mut merged = MergedClassTable::new();
        merged.absorb(&table(&[("0", "cat"), ("1", "dog")]));

        assert_eq!(merged.index_of("dog"), Some(1));
        assert_eq!(merged.index_of("ferret"), None);
        assert_eq!(merged.len(), 2);
        assert!(!merged.is_empty());
    }
}
