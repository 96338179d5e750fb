//! Generator configuration.
//!
//! Each generator takes an explicit config struct. [`Config`] bundles both
//! and can be loaded from a TOML file; missing keys fall back to the
//! defaults of the project's data layout.

use crate::error::{GenError, GenResult};
use crate::naming::IconSetKind;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

/// Settings for the DEM-VRT generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemVrtConfig {
    /// Directory holding the point-cloud tiles (not searched recursively).
    pub source_dir: Utf8PathBuf,
    /// Destination `.vrt` file.
    pub output: Utf8PathBuf,
    /// Spatial reference written into every `<LayerSRS>`.
    pub srs: String,
    /// Name of the `<OGRVRTUnionLayer>`.
    pub union_layer: String,
    /// Tile file extension without the dot.
    pub extension: String,
}

impl Default for DemVrtConfig {
    fn default() -> Self {
        Self {
            source_dir: Utf8PathBuf::from("data/dgm1_05974044_Warstein_EPSG25832_XYZ"),
            output: Utf8PathBuf::from("data/dem.vrt"),
            srs: "EPSG:25832".to_string(),
            union_layer: "dgm1_warstein".to_string(),
            extension: "xyz".to_string(),
        }
    }
}

/// One icon directory scanned by the style generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IconSetConfig {
    pub source_dir: Utf8PathBuf,
}

impl IconSetConfig {
    pub fn new(source_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }
}

/// Settings for the style generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    /// Destination `.mss` file.
    pub output: Utf8PathBuf,
    /// Layer selector wrapping all rules (`#<layer> { … }`).
    pub layer: String,
    pub marker_width: u32,
    /// Icon file extension without the dot.
    pub extension: String,
    /// Fail instead of emitting two rules with the same feature identifier.
    pub reject_duplicates: bool,
    pub primary: IconSetConfig,
    pub secondary: Option<IconSetConfig>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            output: Utf8PathBuf::from("style/tfis-points.mss"),
            layer: "tfis-points".to_string(),
            marker_width: 12,
            extension: "svg".to_string(),
            reject_duplicates: false,
            primary: IconSetConfig::new(
                "../data/maps/tfis_EPSG25832_Shape/Signaturen_SVG/Signaturen_Wanderwege",
            ),
            secondary: None,
        }
    }
}

impl StyleConfig {
    /// Icon directories in output order, each with its identifier rule.
    pub fn icon_sets(&self) -> Vec<(IconSetKind, &Utf8Path)> {
        let mut sets = vec![(IconSetKind::Primary, self.primary.source_dir.as_path())];
        if let Some(ref secondary) = self.secondary {
            sets.push((IconSetKind::Secondary, secondary.source_dir.as_path()));
        }
        sets
    }
}

/// Configuration file contents. A missing section disables that generator
/// for `mapgen all`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub dem_vrt: Option<DemVrtConfig>,
    pub style: Option<StyleConfig>,
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_file(path: &Utf8Path) -> GenResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        Self::from_toml_str(&text).map_err(|e| GenError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
