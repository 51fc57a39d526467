//! Dataset access: opaque records, attribute extractors, populations
//!
//! The engine never inspects records directly. Every numeric attribute is
//! reached through an extractor closure registered under the attribute name,
//! and a missing extractor or a `None` value degrades to zero membership
//! rather than an error (soft missing-data policy).
//!
//! Populations are finite ordered record collections; for multisubject
//! summaries a [`Partition`] groups record indices under discrete subject
//! keys (for example a region derived from a postal code), yielding disjoint
//! sub-populations.

use indexmap::IndexMap;

/// Extractor closure reaching one numeric attribute of an opaque record
pub type Extractor<R> = Box<dyn Fn(&R) -> Option<f64> + Send + Sync>;

/// Named table of attribute extractors
///
/// Iteration order follows insertion order, so batch outputs referring to
/// attributes stay deterministic.
pub struct AttributeTable<R> {
    extractors: IndexMap<String, Extractor<R>>,
}

impl<R> AttributeTable<R> {
    /// Create an empty table
    pub fn new() -> Self {
        AttributeTable {
            extractors: IndexMap::new(),
        }
    }

    /// Register an extractor under `name` (builder style)
    pub fn with(
        mut self,
        name: impl Into<String>,
        extractor: impl Fn(&R) -> Option<f64> + Send + Sync + 'static,
    ) -> Self {
        self.extractors.insert(name.into(), Box::new(extractor));
        self
    }

    /// Register an extractor under `name`
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        extractor: impl Fn(&R) -> Option<f64> + Send + Sync + 'static,
    ) {
        self.extractors.insert(name.into(), Box::new(extractor));
    }

    /// Look up the extractor for an attribute
    pub fn get(&self, name: &str) -> Option<&Extractor<R>> {
        self.extractors.get(name)
    }

    /// Extract the attribute value of one record
    ///
    /// `None` both when the attribute is unknown and when the record has no
    /// value for it; callers treat both as zero membership.
    pub fn value(&self, name: &str, record: &R) -> Option<f64> {
        self.extractors.get(name).and_then(|f| f(record))
    }

    /// Whether an extractor is registered for `name`
    pub fn contains(&self, name: &str) -> bool {
        self.extractors.contains_key(name)
    }

    /// Registered attribute names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.extractors.keys().map(String::as_str)
    }

    /// Number of registered attributes
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

impl<R> Default for AttributeTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Disjoint sub-populations keyed by a discrete subject label
///
/// Holds record indices, not records, so partitioning never copies data.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    groups: IndexMap<String, Vec<usize>>,
}

impl Partition {
    /// Create an empty partition
    pub fn new() -> Self {
        Partition {
            groups: IndexMap::new(),
        }
    }

    /// Partition records by a key function
    pub fn by_key<R>(records: &[R], key: impl Fn(&R) -> String) -> Self {
        let mut partition = Partition::new();
        for (index, record) in records.iter().enumerate() {
            partition.push(key(record), index);
        }
        partition
    }

    /// Add a record index under a subject key
    pub fn push(&mut self, key: impl Into<String>, index: usize) {
        self.groups.entry(key.into()).or_default().push(index);
    }

    /// Record indices for a subject key
    pub fn get(&self, key: &str) -> Option<&[usize]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Subject keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// All unordered pairs of distinct non-empty subject keys
    pub fn key_pairs(&self) -> Vec<(&str, &str)> {
        let keys: Vec<&str> = self
            .groups
            .iter()
            .filter(|(_, indices)| !indices.is_empty())
            .map(|(key, _)| key.as_str())
            .collect();
        let mut pairs = Vec::new();
        for i in 0..keys.len() {
            for j in (i + 1)..keys.len() {
                pairs.push((keys[i], keys[j]));
            }
        }
        pairs
    }

    /// Materialize the sub-population for a key as record references
    pub fn records<'a, R>(&self, key: &str, records: &'a [R]) -> Vec<&'a R> {
        self.get(key)
            .map(|indices| indices.iter().map(|&i| &records[i]).collect())
            .unwrap_or_default()
    }

    /// Number of subject groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no group exists
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct House {
        year_built: Option<i32>,
        price: Option<f64>,
        region: &'static str,
    }

    fn table() -> AttributeTable<House> {
        AttributeTable::new()
            .with("yearBuilt", |h: &House| h.year_built.map(|y| y as f64))
            .with("price", |h: &House| h.price)
    }

    #[test]
    fn test_value_extraction() {
        let table = table();
        let house = House {
            year_built: Some(1990),
            price: None,
            region: "north",
        };
        assert_eq!(table.value("yearBuilt", &house), Some(1990.0));
        // null attribute and unknown attribute both read as missing
        assert_eq!(table.value("price", &house), None);
        assert_eq!(table.value("lot", &house), None);
    }

    #[test]
    fn test_names_insertion_order() {
        let table = table();
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["yearBuilt", "price"]);
    }

    #[test]
    fn test_partition_by_key() {
        let houses = vec![
            House { year_built: None, price: None, region: "north" },
            House { year_built: None, price: None, region: "south" },
            House { year_built: None, price: None, region: "north" },
        ];
        let partition = Partition::by_key(&houses, |h| h.region.to_string());
        assert_eq!(partition.len(), 2);
        assert_eq!(partition.get("north"), Some(&[0usize, 2][..]));
        assert_eq!(partition.get("south"), Some(&[1usize][..]));
        assert_eq!(partition.key_pairs(), vec![("north", "south")]);

        let north = partition.records("north", &houses);
        assert_eq!(north.len(), 2);
    }

    #[test]
    fn test_key_pairs_skip_empty_groups() {
        let mut partition = Partition::new();
        partition.push("a", 0);
        partition.groups.insert("empty".to_string(), Vec::new());
        partition.push("b", 1);
        assert_eq!(partition.key_pairs(), vec![("a", "b")]);
    }
}
