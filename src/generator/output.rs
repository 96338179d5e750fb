//! Atomic replacement of generated files.
//!
//! The document is written to a temporary file next to the destination and
//! renamed over it, so readers never see a truncated file and a failed run
//! leaves any previous output untouched. The replacement keeps the mode of
//! an existing destination; new files get the usual `0666 & !umask`.

use crate::error::{GenError, GenResult};
use camino::Utf8Path;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

fn temp_file_in(dir: &Utf8Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".mapgen");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // The mode passed to open(2) is masked by the process umask.
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// Write `contents` to `dest`, creating or replacing it atomically.
///
/// The destination's parent directory must already exist.
pub fn write_atomic(dest: &Utf8Path, contents: &str) -> GenResult<()> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let mut tmp = temp_file_in(dir).map_err(|e| GenError::io(dir, e))?;
    if let Ok(existing) = std::fs::metadata(dest) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| GenError::io(dest, e))?;
    }
    tmp.write_all(contents.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| GenError::io(dest, e))?;
    // On failure the returned temp file is dropped, which deletes it.
    tmp.persist(dest).map_err(|e| GenError::io(dest, e.error))?;
    Ok(())
}
