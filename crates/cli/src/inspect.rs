use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tabled::{Table, Tabled};
use tracing::{info, warn};

use traitdex_core::emit::load_payloads;
use traitdex_core::model::TraitIndex;
use traitdex_core::registry::ImplementorRegistry;

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Trait")]
    trait_path: String,
    #[tabled(rename = "Library")]
    library: String,
    #[tabled(rename = "Implementors")]
    implementors: usize,
}

pub fn run(path: PathBuf, trait_path: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let payloads = load_payloads(&path);
    if payloads.is_empty() {
        warn!("No index payloads found under {}", path.display());
        return Ok(());
    }

    // Consume through the registration runtime, consumer attached first
    let rows = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&rows);
    let mut registry = ImplementorRegistry::new();
    registry.attach(move |index: TraitIndex| {
        let trait_path = index.trait_ref.full_path();
        for (library, records) in &index.libraries {
            sink.borrow_mut().push(Row {
                trait_path: trait_path.clone(),
                library: library.clone(),
                implementors: records.len(),
            });
        }
    });

    for (file, payload) in payloads {
        let index = match payload.into_index() {
            Ok(index) => index,
            Err(err) => {
                warn!(file = %file.display(), %err, "skipping invalid index");
                continue;
            }
        };
        if let Some(filter) = &trait_path {
            if index.trait_ref.full_path() != *filter {
                continue;
            }
        }
        registry.register(index);
    }

    let rows = rows.borrow();
    if rows.is_empty() {
        info!("No indices matched");
        return Ok(());
    }

    println!("{}", Table::new(rows.iter()));
    Ok(())
}
