//! Whole-file writes that either land completely or not at all.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

/// Writes `contents` to a temporary file beside `path`, then renames it over
/// `path`. Readers never observe a partially written file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(contents)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|err| err.error)?;
    Ok(())
}
