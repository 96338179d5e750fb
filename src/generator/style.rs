//! Generate CartoCSS marker rules for directories of SVG icons.
//!
//! Output shape:
//!
//! ```text
//! #tfis-points {
//!
//!   [feature = 'R-R1'] {
//!     marker-file: url('icons/R_Rundwege/R1.svg');
//!     marker-width: 12;
//!   }
//! }
//! ```

use crate::config::StyleConfig;
use crate::error::{GenError, GenResult};
use crate::generator::Generated;
use crate::model::*;
use crate::naming::{IconSetKind, derive_feature_identifier};
use crate::scan;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashMap;

fn rules_for_icon_set(
    kind: IconSetKind,
    dir: &Utf8Path,
    config: &StyleConfig,
) -> GenResult<Vec<StyleRule>> {
    let files = scan::walk_files(dir, &config.extension)?;
    let mut rules = Vec::with_capacity(files.len());
    for file in files {
        let feature = derive_feature_identifier(kind, &file.parent_name, file.stem()).map_err(
            |reason| GenError::MalformedInputName {
                path: file.path.clone(),
                reason: reason.to_string(),
            },
        )?;
        tracing::debug!(path = %file.path, feature = %feature, "icon");
        rules.push(StyleRule {
            feature,
            icon_path: file.path,
            marker_width: config.marker_width,
        });
    }
    Ok(rules)
}

/// Whether `name` can follow `#` as a plain CSS identifier
/// (`-?[A-Za-z_][A-Za-z0-9_-]*`, no escapes).
pub fn is_css_identifier(name: &str) -> bool {
    let rest = name.strip_prefix('-').unwrap_or(name);
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Collect one [`StyleRule`] per icon, primary set first.
///
/// The layer name and every configured directory are checked before any
/// rule is derived, so a missing secondary directory fails the run even
/// when the primary is fine.
pub fn build_style_sheet(config: &StyleConfig) -> GenResult<StyleSheet> {
    if !is_css_identifier(&config.layer) {
        return Err(GenError::InvalidLayerName {
            layer: config.layer.clone(),
        });
    }
    let sets = config.icon_sets();
    if let Some((_, missing)) = sets.iter().find(|(_, dir)| !dir.is_dir()) {
        return Err(GenError::DirectoryNotFound {
            path: missing.to_path_buf(),
        });
    }

    let mut rules = Vec::new();
    for (kind, dir) in sets {
        let set_rules = rules_for_icon_set(kind, dir, config)?;
        tracing::debug!(dir = %dir, ?kind, rules = set_rules.len(), "icon set");
        rules.extend(set_rules);
    }
    check_duplicates(&rules, config.reject_duplicates)?;

    Ok(StyleSheet {
        layer: config.layer.clone(),
        rules,
    })
}

/// Report rules sharing a feature identifier. Later rules win in the
/// cascade, so duplicates are only an error when `reject` is set.
fn check_duplicates(rules: &[StyleRule], reject: bool) -> GenResult<()> {
    let mut first_seen: HashMap<&str, &Utf8PathBuf> = HashMap::new();
    for rule in rules {
        if let Some(first) = first_seen.insert(&rule.feature, &rule.icon_path) {
            if reject {
                return Err(GenError::DuplicateIdentifier {
                    identifier: rule.feature.clone(),
                    first: first.clone(),
                    second: rule.icon_path.clone(),
                });
            }
            tracing::warn!(
                feature = %rule.feature,
                shadowed = %first,
                winner = %rule.icon_path,
                "duplicate feature identifier"
            );
        }
    }
    Ok(())
}

/// Escape a value for a single-quoted CSS string.
fn css_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\a "),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the style sheet as CartoCSS text.
pub fn render_style(sheet: &StyleSheet) -> String {
    let mut out = String::with_capacity(64 + sheet.rules.len() * 128);
    out.push_str(&format!("#{} {{\n", sheet.layer));
    for rule in &sheet.rules {
        out.push_str(&format!(
            "\n  [feature = '{}'] {{\n    marker-file: url('{}');\n    marker-width: {};\n  }}",
            css_quote(&rule.feature),
            css_quote(rule.icon_path.as_str()),
            rule.marker_width
        ));
    }
    out.push_str("\n}\n");
    out
}

/// Scan the icon directories and render the style document.
pub fn generate_style(config: &StyleConfig) -> GenResult<Generated> {
    let sheet = build_style_sheet(config)?;
    let contents = render_style(&sheet);
    tracing::info!(rules = sheet.rules.len(), "built style for layer '{}'", sheet.layer);
    Ok(Generated {
        output: config.output.clone(),
        contents,
        entries: sheet.rules.len(),
    })
}
