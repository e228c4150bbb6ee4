//! Fact extraction from library interface descriptions
//!
//! A description is the structured interface dump of one library: its name
//! plus the impls it declares. Extraction is tolerant by contract: a
//! malformed entry is skipped with a diagnostic, and a file that cannot be
//! read or parsed skips that file only. The batch never aborts.

pub mod scanner;

use crate::error::Result;
use crate::model::{BoundPredicate, GenericParam, ImplementorRecord, TraitRef, TypeRef};
use crate::pipeline::{PipelineStage, StageContext};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Wire form of one library interface description file.
#[derive(Deserialize)]
struct RawDescription {
    library: String,
    /// Entries stay raw JSON here so one malformed impl cannot sink the file.
    #[serde(default)]
    impls: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct RawImpl {
    #[serde(rename = "trait")]
    trait_ref: TraitRef,
    #[serde(rename = "for")]
    implementor: TypeRef,
    #[serde(default)]
    generics: Vec<GenericParam>,
    #[serde(default, rename = "where")]
    predicates: Vec<BoundPredicate>,
}

/// A skipped entry or file, recorded instead of aborting the batch.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Library name, or the file path for file-level failures
    pub source: String,
    /// Index of the skipped entry within the description, if entry-level
    pub entry: Option<usize>,
    pub reason: String,
}

/// Products of one extraction pass.
#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<ImplementorRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct FactExtractor;

impl FactExtractor {
    /// Extract records from one description file.
    pub fn extract_file(path: &Path) -> Result<Extraction> {
        let text = fs::read_to_string(path)?;
        Self::extract_str(&text)
    }

    /// Extract records from description text. A library declaring zero
    /// impls yields an empty, non-error extraction.
    pub fn extract_str(text: &str) -> Result<Extraction> {
        let raw: RawDescription = serde_json::from_str(text)?;
        let mut extraction = Extraction::default();

        for (entry, value) in raw.impls.into_iter().enumerate() {
            match decode_impl(value) {
                Ok(imp) => extraction.records.push(ImplementorRecord {
                    trait_ref: imp.trait_ref,
                    implementor: imp.implementor,
                    generics: imp.generics,
                    predicates: imp.predicates,
                    defining_library: raw.library.clone(),
                }),
                Err(reason) => {
                    warn!(library = %raw.library, entry, %reason, "skipping malformed impl entry");
                    extraction.diagnostics.push(Diagnostic {
                        source: raw.library.clone(),
                        entry: Some(entry),
                        reason,
                    });
                }
            }
        }

        Ok(extraction)
    }
}

fn decode_impl(value: serde_json::Value) -> std::result::Result<RawImpl, String> {
    let imp: RawImpl = serde_json::from_value(value).map_err(|e| e.to_string())?;
    if imp.trait_ref.name.is_empty() {
        return Err("empty trait name".to_string());
    }
    if imp.implementor.name.is_empty() {
        return Err("empty implementor name".to_string());
    }
    Ok(imp)
}

/// Extraction context shared across batches of a run
pub struct ExtractContext {
    pub root: PathBuf,
}

impl StageContext for ExtractContext {}

/// Pipeline stage turning description files into extractions
pub struct DescriptionStage;

impl PipelineStage<ExtractContext> for DescriptionStage {
    type Output = Extraction;

    fn process(&self, context: &ExtractContext, paths: Vec<PathBuf>) -> Result<Vec<Extraction>> {
        let mut outputs = Vec::with_capacity(paths.len());
        for path in paths {
            match FactExtractor::extract_file(&path) {
                Ok(extraction) => outputs.push(extraction),
                Err(err) => {
                    let rel = path.strip_prefix(&context.root).unwrap_or(&path);
                    warn!(file = %rel.display(), %err, "skipping unreadable description");
                    outputs.push(Extraction {
                        records: Vec::new(),
                        diagnostics: vec![Diagnostic {
                            source: rel.display().to_string(),
                            entry: None,
                            reason: err.to_string(),
                        }],
                    });
                }
            }
        }
        Ok(outputs)
    }
}
