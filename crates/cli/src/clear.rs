use std::path::PathBuf;
use tracing::info;

pub fn run(path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let implementors = path.join("implementors");
    if implementors.exists() {
        info!("Clearing emitted indices at: {}...", implementors.display());
        std::fs::remove_dir_all(&implementors)?;
        info!("Indices cleared.");
    } else {
        info!("Nothing to clear at: {}", implementors.display());
    }
    Ok(())
}
