use camino::{Utf8Path, Utf8PathBuf};

// ────────────────────────────────────────────────────────────────────────────
// InputFile
// ────────────────────────────────────────────────────────────────────────────

/// A data or icon file discovered by a directory scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    /// Path as discovered, i.e. the scan root joined with the path below it.
    pub path: Utf8PathBuf,
    /// Name of the immediate parent directory.
    pub parent_name: String,
    /// File name including all extensions.
    pub file_name: String,
}

impl InputFile {
    /// Build an [`InputFile`] from a path, taking parent and file name from it.
    ///
    /// A parent like `.` is resolved against the filesystem to get its real
    /// name. Returns `None` when the path has no file name or no named parent.
    pub fn from_path(path: impl Into<Utf8PathBuf>) -> Option<Self> {
        let path = path.into();
        let file_name = path.file_name()?.to_string();
        let parent = path.parent()?;
        let parent_name = match parent.file_name() {
            Some(name) => name.to_string(),
            None => {
                let dir = if parent.as_str().is_empty() {
                    Utf8Path::new(".")
                } else {
                    parent
                };
                dir.canonicalize_utf8().ok()?.file_name()?.to_string()
            }
        };
        Some(Self {
            path,
            parent_name,
            file_name,
        })
    }

    /// The file name up to the first `.`.
    pub fn stem(&self) -> &str {
        crate::naming::file_stem(&self.file_name)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Virtual dataset (DEM-VRT)
// ────────────────────────────────────────────────────────────────────────────

/// One `<OGRVRTLayer>` backed by a single point-cloud tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSpec {
    pub name: String,
    /// Name of the directory holding the tile, relative to the VRT file.
    pub source_dir: String,
    pub source_file: String,
}

impl LayerSpec {
    /// `<source_dir>/<source_file>`, the reference embedded in `SrcDataSource`.
    pub fn source_ref(&self) -> String {
        format!("{}/{}", self.source_dir, self.source_file)
    }
}

/// An `<OGRVRTDataSource>` holding one union layer over all tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualDataset {
    pub union_name: String,
    pub srs: String,
    pub layers: Vec<LayerSpec>,
}

// ────────────────────────────────────────────────────────────────────────────
// Style sheet
// ────────────────────────────────────────────────────────────────────────────

/// A `[feature = '…']` selector with its marker declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub feature: String,
    pub icon_path: Utf8PathBuf,
    pub marker_width: u32,
}

/// All selector rules of one layer block (`#layer { … }`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    pub layer: String,
    pub rules: Vec<StyleRule>,
}
