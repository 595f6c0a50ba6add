//! Template payload copying: call-time glob expansion, parallel copies.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Files copied from the tool's own distribution root.
pub const ROOT_FILES: &[&str] = &["tsconfig.json"];

/// Files copied from the bundled template directory.
pub const TEMPLATE_FILES: &[&str] = &[".gitignore", "tslint.json", "README.md", "src/*"];

/// Expand glob patterns against a source directory, returning paths
/// relative to it. Expansion happens at call time, so wildcard
/// patterns pick up whatever files currently exist. Only regular
/// files are kept.
pub fn expand(patterns: &[&str], base: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let full = base.join(pattern);
        let entries = glob::glob(&full.to_string_lossy())
            .with_context(|| format!("Invalid file pattern: {}", pattern))?;
        for entry in entries {
            let path = entry.with_context(|| format!("Failed to expand pattern: {}", pattern))?;
            if path.is_file() {
                let rel = path
                    .strip_prefix(base)
                    .with_context(|| format!("Path escapes source directory: {}", path.display()))?;
                files.push(rel.to_path_buf());
            }
        }
    }

    Ok(files)
}

/// Copy one expanded file set from `from` into `to`. Missing parent
/// directories are created and existing files are overwritten. The
/// copies touch disjoint destination paths and run in parallel; any
/// single failure aborts the set with no rollback.
pub fn copy_set(patterns: &[&str], from: &Path, to: &Path) -> Result<()> {
    let files = expand(patterns, from)?;

    files.par_iter().try_for_each(|rel| {
        let src = from.join(rel);
        let dst = to.join(rel);

        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::copy(&src, &dst)
            .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;
        Ok(())
    })
}

/// Populate the target directory: the distribution-root set and the
/// template set copy concurrently, and both must fully succeed.
pub fn populate(tool_root: &Path, target: &Path) -> Result<()> {
    let template_dir = tool_root.join("template");

    let (root_set, template_set) = rayon::join(
        || copy_set(ROOT_FILES, tool_root, target),
        || copy_set(TEMPLATE_FILES, &template_dir, target),
    );
    root_set?;
    template_set?;

    Ok(())
}
