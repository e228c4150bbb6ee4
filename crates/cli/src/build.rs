use std::path::PathBuf;
use tracing::{info, warn};

use traitdex_core::emit::{EmitOutcome, Emitter};
use traitdex_core::extract::scanner::Scanner;
use traitdex_core::extract::{DescriptionStage, ExtractContext};
use traitdex_core::index::IndexBuilder;
use traitdex_core::pipeline::BatchPipeline;

use crate::EmitFormat;

pub fn run(
    path: PathBuf,
    out: PathBuf,
    strict: bool,
    emit: EmitFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Extracting library descriptions at: {}...", path.display());

    let paths = Scanner::collect_descriptions(&path);
    if paths.is_empty() {
        warn!("No library descriptions found under {}", path.display());
        return Ok(());
    }
    info!("Found {} description file(s)", paths.len());

    let context = ExtractContext { root: path.clone() };
    let mut builder = IndexBuilder::with_strict(strict);
    let mut skipped = 0usize;

    BatchPipeline::new(0).execute(&context, paths, &DescriptionStage, |outputs| {
        for extraction in outputs {
            skipped += extraction.diagnostics.len();
            builder.insert_all(extraction.records)?;
        }
        Ok(())
    })?;

    let indices = builder.build();
    let emitter = Emitter::new(&out);

    let mut written = 0usize;
    let mut records = 0usize;
    for index in &indices {
        records += index.record_count();
        let outcome = emitter.emit(index)?;
        if emit == EmitFormat::Js {
            emitter.emit_js(index)?;
        }
        if outcome == EmitOutcome::Written {
            written += 1;
        }
        info!(
            " - {}: {} implementor(s) across {} library(ies){}",
            index.trait_ref.full_path(),
            index.record_count(),
            index.library_count(),
            if outcome == EmitOutcome::Unchanged {
                " (unchanged)"
            } else {
                ""
            },
        );
    }

    info!("Index complete!");
    info!("Traits: {}", indices.len());
    info!("Records: {}", records);
    info!("Files written: {} (unchanged: {})", written, indices.len() - written);
    if skipped > 0 {
        warn!("Skipped entries: {} (see log for details)", skipped);
    }
    info!("Output: {}", emitter.implementors_dir().display());

    Ok(())
}
