//! Git ignore check for the materialized artifact

use std::path::Path;

use ignore::gitignore::GitignoreBuilder;

/// Whether `path` is excluded by the `.gitignore` at `root`.
///
/// Only the root `.gitignore` is consulted; a missing file means nothing is
/// ignored.
pub fn is_git_ignored(root: &Path, path: &Path) -> bool {
    let gitignore_path = root.join(".gitignore");
    if !gitignore_path.exists() {
        return false;
    }

    let mut builder = GitignoreBuilder::new(root);
    if let Some(err) = builder.add(&gitignore_path) {
        tracing::warn!(error = %err, "could not fully parse .gitignore");
    }
    let matcher = match builder.build() {
        Ok(m) => m,
        Err(err) => {
            tracing::warn!(error = %err, "invalid .gitignore");
            return false;
        }
    };

    let full = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    let Ok(relative) = full.strip_prefix(root) else {
        return false;
    };
    matcher
        .matched_path_or_any_parents(relative, false)
        .is_ignore()
}
