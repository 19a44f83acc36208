//! Partgen - part catalog generator for passive electronic components
//!
//! This library expands declarative product-series descriptions (value
//! range, standard series, tolerance tables, manufacturer numbering rules,
//! per-value overrides) into every orderable part of the series, each with
//! its encoded manufacturer part number, datasheet, footprint and search
//! link.
//!
//! # Quick Start
//!
//! ```no_run
//! use partgen::{GenerationOptions, OutputFormat, PartgenCore, SeriesRegistry};
//! use std::path::Path;
//!
//! let registry = SeriesRegistry::with_builtin();
//! let outcome = PartgenCore::generate_catalog(
//!     &registry,
//!     &["ERJ-2RKF", "GCM155R71H"],
//!     GenerationOptions::default(),
//! ).unwrap();
//!
//! for failure in &outcome.failures {
//!     eprintln!("{}", failure);
//! }
//! PartgenCore::write(&outcome.catalog, OutputFormat::Csv, Path::new("out"), None).unwrap();
//! ```
//!
//! # Modules
//!
//! - **values**: E12/E24/E96 enumeration, value formatting and parsing
//! - **encoding**: manufacturer part-number grammars
//! - **series**: series specifications, built-in data and the registry
//! - **resolve** / **assemble**: per-value attributes and part records
//! - **catalog**: per-series build with isolated failures
//! - **sinks**: CSV, JSON, KiCad symbol library and footprint manifest output

pub mod assemble;
pub mod catalog;
pub mod core;
pub mod encoding;
pub mod family;
pub mod resolve;
pub mod series;
pub mod sinks;
pub mod values;

// Re-export main types
pub use crate::core::{
    ensure_directory_exists, GenerationOptions, PartgenCore, PartgenError, SpecReport,
};
pub use assemble::PartRecord;
pub use catalog::{Catalog, CatalogBuilder, CatalogOutcome, SeriesCatalog, SeriesFailure, Stage};
pub use encoding::{EncodingError, EncodingScheme};
pub use family::ComponentFamily;
pub use series::{SeriesRegistry, SeriesSpec, SpecError};
pub use sinks::{CatalogSink, OutputFormat, SinkError};
pub use values::{format_value, parse_value, ESeries};

/// Parse a series document (one object or an array) from JSON text.
pub fn parse_series(json: &str) -> Result<Vec<SeriesSpec>, PartgenError> {
    series::parse_series_document(json).map_err(|e| PartgenError::Parse(e.to_string()))
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Catalog, CatalogOutcome, ComponentFamily, GenerationOptions, OutputFormat, PartRecord,
        PartgenCore, PartgenError, SeriesRegistry, SeriesSpec,
    };
}
