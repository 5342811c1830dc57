//! Key file path resolution.

use std::path::{Path, PathBuf};

/// Resolves a key file path.
///
/// Absolute paths are returned if the file exists. Relative paths are tried
/// against `base_dir` (or the working directory when `None`), then against
/// each search path in order. The first existing file wins.
pub fn resolve_key_file(
    path: &Path,
    base_dir: Option<&Path>,
    search_paths: &[PathBuf],
) -> Option<PathBuf> {
    if path.as_os_str().is_empty() {
        return None;
    }
    if path.is_absolute() {
        return path.is_file().then(|| path.to_path_buf());
    }

    let first = match base_dir {
        Some(dir) => dir.join(path),
        None => path.to_path_buf(),
    };
    std::iter::once(first)
        .chain(search_paths.iter().map(|dir| dir.join(path)))
        .find(|candidate| candidate.is_file())
}
