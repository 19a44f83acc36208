//! Series Specifications
//!
//! This module holds the declarative product-series data the catalog is
//! generated from, and the authoring checks that guard it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │   Embedded   │───▶│    Series    │◀───│  User JSON   │
//! │  JSON files  │    │   Registry   │    │  directory   │
//! └──────────────┘    └──────┬───────┘    └──────────────┘
//!                            │
//!                            ▼
//!                     ┌──────────────┐
//!                     │  Authoring   │
//!                     │   checks     │
//!                     └──────┬───────┘
//!                            │
//!                            ▼
//!                     ┌──────────────┐
//!                     │   Catalog    │
//!                     │   Builder    │
//!                     └──────────────┘
//! ```
//!
//! # Built-in series
//!
//! 1. **Panasonic** ERJ thick film, ERA thin film, ERJ-2GE0 jumper
//! 2. **Yageo** RC and RT chip resistors
//! 3. **SEI Stackpole**, **Vishay**, **ROHM**, **Bourns** chip resistors
//! 4. **Murata** NCP15 NTC thermistor
//! 5. **Murata**, **Samsung**, **TDK** MLCCs and an **Eaton** supercapacitor
//! 6. **Coilcraft**, **Würth**, **Murata**, **Taiyo Yuden** inductors and beads
//! 7. **Coilcraft** and **Bourns** coupled inductors
//! 8. **Abracon** crystals
//!
//! # Usage
//!
//! ```rust
//! use partgen::series::SeriesRegistry;
//!
//! let registry = SeriesRegistry::with_builtin();
//! let spec = registry.get("ERJ-2RKF").unwrap();
//! assert_eq!(spec.manufacturer, "Panasonic");
//! ```

pub mod builtin;
pub mod registry;
pub mod schema;
pub mod validate;

pub use builtin::{
    builtin_series, load_series_from_directory, load_series_from_file, parse_series_document,
};
pub use registry::{DirectoryLoad, RegistryError, SeriesRegistry};
pub use schema::{
    CharacteristicCode, DatasheetLink, Packaging, SeriesDefaults, SeriesSpec, SubType,
    ToleranceOption, ValueDomain, ValueMap, ValueOverrides, ValueSuffix, DEFAULT_SEARCH_URL,
};
pub use validate::{check_spec, validate_spec, SpecError};
