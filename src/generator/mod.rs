//! Document generators.
//!
//! This module provides:
//! - [`vrt`] – OGR virtual dataset describing DEM point-cloud tiles.
//! - [`style`] – CartoCSS marker rules for icon directories.
//! - [`output`] – Atomic replacement of the destination file.
//!
//! Generators only build the document in memory; [`Generated::write`] puts
//! it on disk.

pub mod output;
pub mod style;
pub mod vrt;

pub use style::generate_style;
pub use vrt::generate_dem_vrt;

use crate::error::GenResult;
use camino::Utf8PathBuf;

/// A rendered document and where it belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub output: Utf8PathBuf,
    pub contents: String,
    /// Number of layers or rules in the document.
    pub entries: usize,
}

impl Generated {
    /// Atomically write the document to its destination.
    pub fn write(&self) -> GenResult<()> {
        output::write_atomic(&self.output, &self.contents)?;
        tracing::info!(
            output = %self.output,
            entries = self.entries,
            "wrote {} bytes",
            self.contents.len()
        );
        Ok(())
    }
}
