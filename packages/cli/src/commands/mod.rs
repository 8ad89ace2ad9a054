pub mod apply;
pub mod check;
pub mod render;

pub use apply::{apply, ApplyArgs};
pub use check::{check, CheckArgs};
pub use render::{render, RenderArgs};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Resolve `path` against `cwd` unless it is already absolute
pub fn resolve(cwd: &str, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        PathBuf::from(cwd).join(path)
    }
}

/// Read a serialized document from disk
pub fn read_document(cwd: &str, path: &Path) -> Result<String> {
    let path = resolve(cwd, path);
    std::fs::read_to_string(&path).with_context(|| format!("Cannot read {}", path.display()))
}
