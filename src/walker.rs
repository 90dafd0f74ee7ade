//! Recursive dataset file discovery.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Find every file under `root` whose name ends with `suffix`, in a
/// deterministic order (lexicographic by file name at every directory level).
///
/// Symlinks are not followed, so a cyclic link in the dataset tree cannot
/// hang the walk. A missing or unreadable directory is an error; a readable
/// directory with no matches yields an empty list.
pub fn find_files_with_suffix(root: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Error walking {}", root.display()))?;
        if entry.file_type().is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(suffix))
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Find every `.json` file under `root`.
pub fn find_json_files(root: &Path) -> Result<Vec<PathBuf>> {
    find_files_with_suffix(root, ".json")
}
