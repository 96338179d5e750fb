//! Generate an OGR virtual dataset (`.vrt`) for a directory of DEM tiles.
//!
//! Every tile becomes an `<OGRVRTLayer>` reading the tile as CSV, and all
//! layers are merged by one `<OGRVRTUnionLayer>`. Tile columns are addressed
//! through OGR's auto-named CSV fields: `field_1`, `field_2` and `field_4`
//! hold the two coordinates and the elevation.

use crate::config::DemVrtConfig;
use crate::error::{GenError, GenResult};
use crate::generator::Generated;
use crate::model::*;
use crate::naming::derive_layer_name;
use crate::scan;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::collections::HashSet;

/// Collect one [`LayerSpec`] per tile in the configured directory.
pub fn build_dataset(config: &DemVrtConfig) -> GenResult<VirtualDataset> {
    let files = scan::list_files(&config.source_dir, &config.extension)?;
    let mut seen = HashSet::new();
    let mut layers = Vec::with_capacity(files.len());
    for file in files {
        let name = derive_layer_name(file.stem());
        if name.is_empty() {
            return Err(GenError::MalformedInputName {
                path: file.path.clone(),
                reason: "empty file stem".to_string(),
            });
        }
        tracing::debug!(path = %file.path, layer = name, "tile");
        if !seen.insert(name.to_string()) {
            tracing::warn!(layer = name, path = %file.path, "duplicate layer name");
        }
        layers.push(LayerSpec {
            name: name.to_string(),
            source_dir: file.parent_name.clone(),
            source_file: file.file_name.clone(),
        });
    }
    Ok(VirtualDataset {
        union_name: config.union_layer.clone(),
        srs: config.srs.clone(),
        layers,
    })
}

fn indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str("    ");
    }
}

/// Render the dataset as VRT XML text.
pub fn render_vrt(dataset: &VirtualDataset) -> String {
    let mut out = String::with_capacity(256 + dataset.layers.len() * 512);
    out.push_str("<OGRVRTDataSource>\n");
    indent(&mut out, 1);
    out.push_str(&format!(
        "<OGRVRTUnionLayer name=\"{}\">\n",
        encode_double_quoted_attribute(&dataset.union_name)
    ));
    for layer in &dataset.layers {
        write_layer(&mut out, layer, &dataset.srs, 2);
    }
    indent(&mut out, 1);
    out.push_str("</OGRVRTUnionLayer>\n");
    out.push_str("</OGRVRTDataSource>\n");
    out
}

fn write_layer(out: &mut String, layer: &LayerSpec, srs: &str, level: usize) {
    indent(out, level);
    out.push_str(&format!(
        "<OGRVRTLayer name=\"{}\">\n",
        encode_double_quoted_attribute(&layer.name)
    ));

    indent(out, level + 1);
    out.push_str(&format!(
        "<SrcDataSource relativeToVRT=\"1\">CSV:{}</SrcDataSource>\n",
        encode_text(&layer.source_ref())
    ));
    indent(out, level + 1);
    out.push_str("<GeometryType>wkbPoint</GeometryType>\n");
    indent(out, level + 1);
    out.push_str(&format!("<LayerSRS>{}</LayerSRS>\n", encode_text(srs)));
    indent(out, level + 1);
    out.push_str(
        "<GeometryField encoding=\"PointFromColumns\" x=\"field_2\" y=\"field_1\" z=\"field_4\"/>\n",
    );
    for (name, src) in [("lon", "field_1"), ("lat", "field_2"), ("elevation", "field_4")] {
        indent(out, level + 1);
        out.push_str(&format!(
            "<Field name=\"{}\" src=\"{}\" type=\"real\" />\n",
            name, src
        ));
    }

    indent(out, level);
    out.push_str("</OGRVRTLayer>\n");
}

/// Parse the rendered text back to make sure it is well-formed XML.
pub fn check_well_formed(xml: &str) -> GenResult<()> {
    roxmltree::Document::parse(xml)
        .map(|_| ())
        .map_err(|e| GenError::MalformedOutput {
            reason: e.to_string(),
        })
}

/// Scan the tile directory and render the VRT document.
pub fn generate_dem_vrt(config: &DemVrtConfig) -> GenResult<Generated> {
    let dataset = build_dataset(config)?;
    let contents = render_vrt(&dataset);
    check_well_formed(&contents)?;
    tracing::info!(
        source = %config.source_dir,
        layers = dataset.layers.len(),
        "built virtual dataset '{}'",
        dataset.union_name
    );
    Ok(Generated {
        output: config.output.clone(),
        contents,
        entries: dataset.layers.len(),
    })
}
