//! Index construction
//!
//! The `IndexBuilder` accepts a stream of implementor records and partitions
//! them into one `TraitIndex` per trait, grouping by defining library in
//! first-seen order. It is mutable during construction and frozen via
//! `build()`, after which the indices are handed to the emitter read-only.

use crate::error::{Result, TraitdexError};
use crate::model::{ImplementorRecord, TraitIndex};
use indexmap::IndexMap;

pub struct IndexBuilder {
    strict: bool,
    traits: IndexMap<String, TraitIndex>,
}

impl IndexBuilder {
    /// Tolerant builder: duplicate records are legal multiplicity and kept.
    pub fn new() -> Self {
        Self::with_strict(false)
    }

    /// `strict` turns an exact duplicate record into `DuplicateRecord`.
    /// "Exact" means full record equality, generics and predicates included,
    /// so blanket impls under distinct bound sets always coexist.
    pub fn with_strict(strict: bool) -> Self {
        Self {
            strict,
            traits: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, record: ImplementorRecord) -> Result<()> {
        let key = record.trait_ref.full_path();
        let index = self
            .traits
            .entry(key)
            .or_insert_with(|| TraitIndex::new(record.trait_ref.clone()));

        if self.strict && index.contains(&record) {
            return Err(TraitdexError::DuplicateRecord {
                trait_path: record.trait_ref.full_path(),
                type_path: record.implementor.full_path(),
                library: record.defining_library,
            });
        }

        index.insert(record);
        Ok(())
    }

    pub fn insert_all(
        &mut self,
        records: impl IntoIterator<Item = ImplementorRecord>,
    ) -> Result<()> {
        for record in records {
            self.insert(record)?;
        }
        Ok(())
    }

    pub fn trait_count(&self) -> usize {
        self.traits.len()
    }

    pub fn record_count(&self) -> usize {
        self.traits.values().map(TraitIndex::record_count).sum()
    }

    /// Freeze construction, yielding one index per trait in first-seen
    /// trait order.
    pub fn build(self) -> Vec<TraitIndex> {
        self.traits.into_values().collect()
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TraitRef, TypeKind, TypeRef};

    fn record(trait_name: &str, library: &str, type_name: &str) -> ImplementorRecord {
        ImplementorRecord {
            trait_ref: TraitRef {
                name: trait_name.to_string(),
                module_path: format!("core::{}", trait_name.to_lowercase()),
                href: format!("core/{}/trait.{}.html", trait_name.to_lowercase(), trait_name),
            },
            implementor: TypeRef {
                name: type_name.to_string(),
                kind: TypeKind::Struct,
                module_path: library.to_string(),
                href: format!("{library}/struct.{type_name}.html"),
            },
            generics: Vec::new(),
            predicates: Vec::new(),
            defining_library: library.to_string(),
        }
    }

    #[test]
    fn test_groups_by_library_in_first_seen_order() {
        let mut builder = IndexBuilder::new();
        builder.insert(record("Clone", "alpha", "A")).unwrap();
        builder.insert(record("Clone", "alpha", "B")).unwrap();
        builder.insert(record("Clone", "beta", "C")).unwrap();

        let indices = builder.build();
        assert_eq!(indices.len(), 1);

        let index = &indices[0];
        let libraries: Vec<&String> = index.libraries.keys().collect();
        assert_eq!(libraries, ["alpha", "beta"]);

        let alpha: Vec<&str> = index.libraries["alpha"]
            .iter()
            .map(|r| r.implementor.name.as_str())
            .collect();
        assert_eq!(alpha, ["A", "B"]);
        assert_eq!(index.libraries["beta"].len(), 1);
    }

    #[test]
    fn test_partitions_per_trait() {
        let mut builder = IndexBuilder::new();
        builder.insert(record("Clone", "alpha", "A")).unwrap();
        builder.insert(record("Ord", "alpha", "A")).unwrap();

        let indices = builder.build();
        assert_eq!(indices.len(), 2);
        assert_eq!(indices[0].trait_ref.name, "Clone");
        assert_eq!(indices[1].trait_ref.name, "Ord");
        for index in &indices {
            index.validate().unwrap();
        }
    }

    #[test]
    fn test_tolerant_mode_keeps_duplicates() {
        let mut builder = IndexBuilder::new();
        builder.insert(record("Clone", "alpha", "A")).unwrap();
        builder.insert(record("Clone", "alpha", "A")).unwrap();

        let indices = builder.build();
        assert_eq!(indices[0].record_count(), 2);
    }

    #[test]
    fn test_strict_mode_rejects_exact_duplicate() {
        let mut builder = IndexBuilder::with_strict(true);
        builder.insert(record("Clone", "alpha", "A")).unwrap();

        let err = builder.insert(record("Clone", "alpha", "A")).unwrap_err();
        assert!(matches!(err, TraitdexError::DuplicateRecord { .. }));
    }

    #[test]
    fn test_strict_mode_keeps_distinct_bound_sets() {
        let mut builder = IndexBuilder::with_strict(true);
        let plain = record("Clone", "alpha", "A");
        let mut bounded = plain.clone();
        bounded.predicates.push(crate::model::BoundPredicate {
            target: "T".to_string(),
            bounds: vec!["Clone".to_string()],
        });

        builder.insert(plain).unwrap();
        builder.insert(bounded).unwrap();
        assert_eq!(builder.record_count(), 2);
    }
}
