//! Per-message output directories.

use std::path::{Path, PathBuf};

use crate::error::{ArchiveError, Result};

use super::name::safe_name;

/// Directory name used when a subject sanitizes to nothing.
const NO_SUBJECT: &str = "No_Subject";

/// Create a unique directory for one message under the archive root.
///
/// The name is the sanitized subject; on collision `_1`, `_2`, … is appended
/// until an unused name is found. Uniqueness holds at creation time — the
/// whole run is single-threaded, so the probe cannot race with itself.
pub fn create_message_dir(root: &Path, subject: &str) -> Result<PathBuf> {
    let mut name = safe_name(subject);
    if name.is_empty() {
        name = NO_SUBJECT.to_string();
    }

    let mut dir = root.join(&name);
    let mut counter = 1u32;
    while dir.exists() {
        dir = root.join(format!("{name}_{counter}"));
        counter += 1;
    }

    std::fs::create_dir_all(&dir).map_err(|e| ArchiveError::io(&dir, e))?;
    Ok(dir)
}
