//! Payload emission
//!
//! One self-describing payload file per trait, written under
//! `implementors/<module/path>/trait.<Name>.json` below the output root.
//! Emission is idempotent: an unchanged index serializes to byte-identical
//! output, and a file whose on-disk content already matches is not
//! rewritten.

pub mod markup;

use crate::error::{Result, TraitdexError};
use crate::model::{LibraryIndex, TraitIndex, TraitRef};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use xxhash_rust::xxh3::xxh3_64;

pub const PAYLOAD_FORMAT: &str = "traitdex/implementors";
pub const PAYLOAD_VERSION: u32 = 1;

/// The emitted, self-describing form of a `TraitIndex`.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct IndexPayload {
    pub format: String,
    pub version: u32,
    #[serde(rename = "trait")]
    pub trait_ref: TraitRef,
    pub libraries: LibraryIndex,
}

impl IndexPayload {
    pub fn from_index(index: &TraitIndex) -> Self {
        Self {
            format: PAYLOAD_FORMAT.to_string(),
            version: PAYLOAD_VERSION,
            trait_ref: index.trait_ref.clone(),
            libraries: index.libraries.clone(),
        }
    }

    /// Convert back into an index, checking the self-description and the
    /// file invariants.
    pub fn into_index(self) -> Result<TraitIndex> {
        if self.format != PAYLOAD_FORMAT {
            return Err(TraitdexError::Parsing(format!(
                "unexpected payload format `{}`",
                self.format
            )));
        }
        if self.version != PAYLOAD_VERSION {
            return Err(TraitdexError::Parsing(format!(
                "unsupported payload version {}",
                self.version
            )));
        }

        let index = TraitIndex {
            trait_ref: self.trait_ref,
            libraries: self.libraries,
        };
        index.validate()?;
        Ok(index)
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Deterministic byte form: struct field order plus index insertion
    /// order, so re-emitting an unchanged index is byte-identical.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

/// Collect all emitted payloads under an output root, in stable name
/// order. Unreadable or foreign files are skipped with a warning; a viewer
/// degrades by omission the same way the generator does.
pub fn load_payloads(out_root: &Path) -> Vec<(PathBuf, IndexPayload)> {
    let root = out_root.join("implementors");
    let mut payloads = Vec::new();
    for entry in walkdir::WalkDir::new(&root).sort_by_file_name() {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        let name = entry.file_name().to_string_lossy();
        if !entry.file_type().is_file()
            || !name.starts_with("trait.")
            || !name.ends_with(".json")
        {
            continue;
        }
        match IndexPayload::read(path) {
            Ok(payload) => payloads.push((path.to_path_buf(), payload)),
            Err(err) => warn!(file = %path.display(), %err, "skipping unreadable payload"),
        }
    }
    payloads
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitOutcome {
    Written,
    Unchanged,
}

pub struct Emitter {
    out_root: PathBuf,
}

impl Emitter {
    pub fn new(out_root: impl Into<PathBuf>) -> Self {
        Self {
            out_root: out_root.into(),
        }
    }

    /// Directory all index files are emitted under.
    pub fn implementors_dir(&self) -> PathBuf {
        self.out_root.join("implementors")
    }

    pub fn payload_path(&self, trait_ref: &TraitRef) -> PathBuf {
        let mut path = self.implementors_dir();
        for segment in trait_ref.module_path.split("::").filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("trait.{}.json", trait_ref.name));
        path
    }

    pub fn emit(&self, index: &TraitIndex) -> Result<EmitOutcome> {
        index.validate()?;
        let payload = IndexPayload::from_index(index);
        let bytes = payload.to_bytes()?;
        self.write_if_changed(&self.payload_path(&index.trait_ref), &bytes)
    }

    /// Additionally emit the loader-compatible `.js` presentation next to
    /// the payload.
    pub fn emit_js(&self, index: &TraitIndex) -> Result<EmitOutcome> {
        let js = markup::JsLoader.render(index)?;
        let path = self
            .payload_path(&index.trait_ref)
            .with_extension("js");
        self.write_if_changed(&path, js.as_bytes())
    }

    fn write_if_changed(&self, path: &Path, bytes: &[u8]) -> Result<EmitOutcome> {
        if let Ok(existing) = fs::read(path)
            && xxh3_64(&existing) == xxh3_64(bytes)
        {
            debug!(file = %path.display(), "unchanged, skipping write");
            return Ok(EmitOutcome::Unchanged);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;
        Ok(EmitOutcome::Written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImplementorRecord, TypeKind, TypeRef};

    fn sample_index() -> TraitIndex {
        let trait_ref = TraitRef {
            name: "Clone".to_string(),
            module_path: "core::clone".to_string(),
            href: "core/clone/trait.Clone.html".to_string(),
        };
        let mut index = TraitIndex::new(trait_ref.clone());
        for (library, name) in [("alpha", "A"), ("alpha", "B"), ("beta", "C")] {
            index.insert(ImplementorRecord {
                trait_ref: trait_ref.clone(),
                implementor: TypeRef {
                    name: name.to_string(),
                    kind: TypeKind::Struct,
                    module_path: library.to_string(),
                    href: format!("{library}/struct.{name}.html"),
                },
                generics: Vec::new(),
                predicates: Vec::new(),
                defining_library: library.to_string(),
            });
        }
        index
    }

    #[test]
    fn test_payload_path_mirrors_module_path() {
        let emitter = Emitter::new("/tmp/out");
        let path = emitter.payload_path(&sample_index().trait_ref);
        assert_eq!(
            path,
            PathBuf::from("/tmp/out/implementors/core/clone/trait.Clone.json")
        );
    }

    #[test]
    fn test_reemit_is_byte_identical_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(dir.path());
        let index = sample_index();

        assert_eq!(emitter.emit(&index).unwrap(), EmitOutcome::Written);
        let path = emitter.payload_path(&index.trait_ref);
        let first = fs::read(&path).unwrap();

        assert_eq!(emitter.emit(&index).unwrap(), EmitOutcome::Unchanged);
        let second = fs::read(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_payload_roundtrip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(dir.path());
        let index = sample_index();
        emitter.emit(&index).unwrap();

        let payload = IndexPayload::read(&emitter.payload_path(&index.trait_ref)).unwrap();
        let reloaded = payload.into_index().unwrap();
        assert_eq!(reloaded, index);

        let libraries: Vec<&String> = reloaded.libraries.keys().collect();
        assert_eq!(libraries, ["alpha", "beta"]);
    }

    #[test]
    fn test_foreign_format_is_rejected() {
        let mut payload = IndexPayload::from_index(&sample_index());
        payload.format = "somethingelse/v0".to_string();
        assert!(payload.into_index().is_err());
    }

    #[test]
    fn test_emit_js_writes_loader_file() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(dir.path());
        let index = sample_index();

        assert_eq!(emitter.emit_js(&index).unwrap(), EmitOutcome::Written);
        let js = fs::read_to_string(
            emitter
                .payload_path(&index.trait_ref)
                .with_extension("js"),
        )
        .unwrap();
        assert!(js.contains("window.register_implementors"));
        assert_eq!(emitter.emit_js(&index).unwrap(), EmitOutcome::Unchanged);
    }
}
