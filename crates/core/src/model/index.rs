//! Per-trait implementor indices
//!
//! A `TraitIndex` is created at generation time, frozen by emission, and
//! consumed read-only by a viewer. Ordering is insertion order throughout:
//! libraries appear in first-seen order, records in extraction order.

use crate::error::{Result, TraitdexError};
use crate::model::record::{ImplementorRecord, TraitRef};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ordered mapping of library name to that library's implementor records.
pub type LibraryIndex = IndexMap<String, Vec<ImplementorRecord>>;

/// One trait's implementor index across all extracted libraries.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct TraitIndex {
    #[serde(rename = "trait")]
    pub trait_ref: TraitRef,
    pub libraries: LibraryIndex,
}

impl TraitIndex {
    pub fn new(trait_ref: TraitRef) -> Self {
        Self {
            trait_ref,
            libraries: LibraryIndex::new(),
        }
    }

    /// Append a record under its defining library, creating the library
    /// entry on first sight. Libraries with zero records never get an entry.
    pub fn insert(&mut self, record: ImplementorRecord) {
        self.libraries
            .entry(record.defining_library.clone())
            .or_default()
            .push(record);
    }

    /// Whether an identical record (full equality, including generics and
    /// predicates) is already present.
    pub fn contains(&self, record: &ImplementorRecord) -> bool {
        self.libraries
            .get(&record.defining_library)
            .is_some_and(|records| records.iter().any(|r| r == record))
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    pub fn library_count(&self) -> usize {
        self.libraries.len()
    }

    pub fn record_count(&self) -> usize {
        self.libraries.values().map(Vec::len).sum()
    }

    /// Check the file invariants: every record sits under the key equal to
    /// its `defining_library`, and references this file's trait only.
    pub fn validate(&self) -> Result<()> {
        let own_path = self.trait_ref.full_path();
        for (library, records) in &self.libraries {
            for record in records {
                if record.defining_library != *library {
                    return Err(TraitdexError::InvalidIndex(format!(
                        "record for `{}` filed under library `{}` but defined by `{}`",
                        record.implementor.full_path(),
                        library,
                        record.defining_library,
                    )));
                }
                if record.trait_ref.full_path() != own_path {
                    return Err(TraitdexError::InvalidIndex(format!(
                        "record for `{}` references trait `{}` in an index for `{}`",
                        record.implementor.full_path(),
                        record.trait_ref.full_path(),
                        own_path,
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::{TypeKind, TypeRef};

    fn clone_trait() -> TraitRef {
        TraitRef {
            name: "Clone".to_string(),
            module_path: "core::clone".to_string(),
            href: "https://doc.rust-lang.org/core/clone/trait.Clone.html".to_string(),
        }
    }

    fn record(library: &str, type_name: &str) -> ImplementorRecord {
        ImplementorRecord {
            trait_ref: clone_trait(),
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
    fn test_insertion_order_preserved() {
        let mut index = TraitIndex::new(clone_trait());
        index.insert(record("alpha", "A"));
        index.insert(record("beta", "C"));
        index.insert(record("alpha", "B"));

        let libraries: Vec<&String> = index.libraries.keys().collect();
        assert_eq!(libraries, ["alpha", "beta"]);

        let alpha: Vec<&str> = index.libraries["alpha"]
            .iter()
            .map(|r| r.implementor.name.as_str())
            .collect();
        assert_eq!(alpha, ["A", "B"]);
        assert_eq!(index.record_count(), 3);
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        let mut index = TraitIndex::new(clone_trait());
        index.insert(record("alpha", "A"));
        assert!(index.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_misfiled_record() {
        let mut index = TraitIndex::new(clone_trait());
        let mut misfiled = record("alpha", "A");
        misfiled.defining_library = "beta".to_string();
        index.libraries.entry("alpha".to_string()).or_default().push(misfiled);
        assert!(index.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_foreign_trait() {
        let mut index = TraitIndex::new(clone_trait());
        let mut foreign = record("alpha", "A");
        foreign.trait_ref.name = "Ord".to_string();
        foreign.trait_ref.module_path = "core::cmp".to_string();
        index.insert(foreign);
        assert!(index.validate().is_err());
    }
}
