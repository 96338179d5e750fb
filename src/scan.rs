//! Directory scanning for input files.
//!
//! Both scans return entries sorted by path so the generated documents do
//! not depend on the platform's directory listing order. Symlinks are
//! followed; dangling links are skipped with a warning. The extension is
//! matched before a path must be UTF-8, so unrelated files with foreign
//! names do not abort a scan.

use crate::error::{GenError, GenResult};
use crate::model::InputFile;
use camino::{Utf8Path, Utf8PathBuf};
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn ensure_dir(dir: &Utf8Path) -> GenResult<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(GenError::DirectoryNotFound {
            path: dir.to_path_buf(),
        })
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension() == Some(OsStr::new(extension))
}

fn to_input_file(path: Utf8PathBuf) -> GenResult<InputFile> {
    InputFile::from_path(path.clone()).ok_or_else(|| GenError::MalformedInputName {
        path,
        reason: "path has no parent directory name".to_string(),
    })
}

fn utf8_path(path: PathBuf, dir: &Utf8Path) -> GenResult<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).map_err(|p| GenError::MalformedInputName {
        path: dir.to_path_buf(),
        reason: format!("non-UTF8 path {}", p.display()),
    })
}

/// List the files directly inside `dir` whose extension equals `extension`.
pub fn list_files(dir: &Utf8Path, extension: &str) -> GenResult<Vec<InputFile>> {
    ensure_dir(dir)?;
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir.as_std_path()).map_err(|e| GenError::io(dir, e))? {
        let path = entry.map_err(|e| GenError::io(dir, e))?.path();
        if !has_extension(&path, extension) {
            continue;
        }
        let path = utf8_path(path, dir)?;
        // `fs::metadata` follows symlinks, unlike `DirEntry::file_type`.
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %path, "skipping dangling symlink");
            }
            Err(e) => return Err(GenError::io(path, e)),
        }
    }
    paths.sort();
    paths.into_iter().map(to_input_file).collect()
}

/// Recursively list the files below `dir` whose extension equals `extension`.
pub fn walk_files(dir: &Utf8Path, extension: &str) -> GenResult<Vec<InputFile>> {
    ensure_dir(dir)?;
    let mut paths = Vec::new();
    let walker = WalkDir::new(dir.as_std_path())
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().map(Path::to_path_buf);
                let dangling = e.io_error().map(|io| io.kind()) == Some(ErrorKind::NotFound);
                if let (true, Some(path)) = (dangling, path.as_ref()) {
                    tracing::warn!(path = %path.display(), "skipping dangling symlink");
                    continue;
                }
                let path = path
                    .as_deref()
                    .and_then(Utf8Path::from_path)
                    .unwrap_or(dir)
                    .to_path_buf();
                return Err(GenError::io(path, e.into()));
            }
        };
        if !entry.file_type().is_file() || !has_extension(entry.path(), extension) {
            continue;
        }
        paths.push(utf8_path(entry.into_path(), dir)?);
    }
    paths.sort();
    paths.into_iter().map(to_input_file).collect()
}
