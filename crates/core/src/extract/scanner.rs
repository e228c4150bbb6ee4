use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub struct Scanner;

impl Scanner {
    /// Collect description files under `root`, in stable name order so
    /// extraction order (and with it index order) is reproducible run to run.
    pub fn collect_descriptions(root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry))
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let path = entry.path();
                if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                    return Some(path.to_path_buf());
                }
                None
            })
            .collect()
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}
