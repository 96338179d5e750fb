//! Map style artifact generators.
//!
//! This crate scans data directories and writes two kinds of static files
//! used by the map renderer:
//!
//! - an OGR virtual dataset (`.vrt`) unioning all DEM point-cloud tiles
//!   ([`generator::generate_dem_vrt`]),
//! - a CartoCSS style sheet with one marker rule per SVG icon
//!   ([`generator::generate_style`]).
//!
//! The binary `mapgen` exposes both as subcommands.

pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod naming;
pub mod scan;

pub use config::{Config, DemVrtConfig, IconSetConfig, StyleConfig};
pub use error::{GenError, GenResult};
pub use generator::{Generated, generate_dem_vrt, generate_style};
