use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::Result;

/// Collects every file under `root` whose name ends with one of the
/// accepted suffixes. The match is case-sensitive. A missing root is
/// fatal and surfaces as the walker's first error.
pub fn list_music_files(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut res = Vec::<PathBuf>::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if entry.path().is_dir() {
            continue;
        }
        let name = entry.path().file_name().and_then(|n| n.to_str());
        if name.is_none() {
            continue;
        }
        let name = name.unwrap();
        if extensions.iter().any(|ext| name.ends_with(ext.as_str())) {
            res.push(entry.path().to_path_buf());
        }
    }
    Ok(res)
}
