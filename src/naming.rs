//! Pure naming rules for layer names and feature identifiers.
//!
//! All tokens are `_`-delimited. The functions here never touch the
//! filesystem so they can be checked against hand-written examples.

/// Which identifier rule an icon directory follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSetKind {
    /// `<first token of parent>-<stem>`
    Primary,
    /// `<all parent tokens but the last, joined>-<first token of stem>`
    Secondary,
}

/// The file name up to the first `.` (`tile_001.xyz` -> `tile_001`).
///
/// Names starting with a dot yield an empty stem.
pub fn file_stem(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or("")
}

fn first_token(s: &str) -> &str {
    s.split('_').next().unwrap_or("")
}

/// Layer name of a DEM tile: its stem, unchanged.
pub fn derive_layer_name(stem: &str) -> &str {
    stem
}

/// Derive the feature identifier of an icon from its parent directory name and stem.
///
/// Returns the reason as `Err` when a component would be empty.
pub fn derive_feature_identifier(
    kind: IconSetKind,
    parent: &str,
    stem: &str,
) -> Result<String, &'static str> {
    if stem.is_empty() {
        return Err("empty file stem");
    }
    match kind {
        IconSetKind::Primary => {
            let category = first_token(parent);
            if category.is_empty() {
                return Err("parent directory name starts with '_'");
            }
            Ok(format!("{}-{}", category, stem))
        }
        IconSetKind::Secondary => {
            let tokens: Vec<&str> = parent.split('_').collect();
            if tokens.len() < 2 {
                return Err("parent directory name needs at least two '_' tokens");
            }
            let leading: String = tokens[..tokens.len() - 1].concat();
            let trailing = first_token(stem);
            if leading.is_empty() {
                return Err("parent directory name has empty leading tokens");
            }
            if trailing.is_empty() {
                return Err("file stem starts with '_'");
            }
            Ok(format!("{}-{}", leading, trailing))
        }
    }
}
