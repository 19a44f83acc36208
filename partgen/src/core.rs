//! Core generation API shared by the CLI and library callers.
//! No filesystem access except through the sink helpers.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::catalog::{
    build_series, Catalog, CatalogBuilder, CatalogOutcome, SeriesCatalog, SeriesFailure,
};
use crate::encoding::EncodingError;
use crate::series::{check_spec, RegistryError, SeriesRegistry, SeriesSpec};
use crate::sinks::{sink_for, write_catalog, OutputFormat, SinkError};

#[derive(Debug, thiserror::Error)]
pub enum PartgenError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Output error: {0}")]
    Sink(#[from] SinkError),
    #[error("{0}")]
    Other(String),
}

impl From<RegistryError> for PartgenError {
    fn from(e: RegistryError) -> Self {
        PartgenError::Config(e.to_string())
    }
}

impl From<SeriesFailure> for PartgenError {
    fn from(e: SeriesFailure) -> Self {
        PartgenError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for PartgenError {
    fn from(e: serde_json::Error) -> Self {
        PartgenError::Parse(e.to_string())
    }
}

/// Options for generation runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenerationOptions {
    /// Build series on the rayon pool; output order is unchanged
    pub parallel: bool,
    /// Stop at the first failing series
    pub fail_fast: bool,
}

impl GenerationOptions {
    fn builder(self) -> CatalogBuilder {
        CatalogBuilder::new()
            .parallel(self.parallel)
            .fail_fast(self.fail_fast)
    }
}

/// Authoring errors found in one series
#[derive(Debug, Clone, Serialize)]
pub struct SpecReport {
    pub series: String,
    pub errors: Vec<String>,
}

impl SpecReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Create `dir` (and parents) when missing.
pub fn ensure_directory_exists(dir: &Path) -> Result<(), PartgenError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
        tracing::debug!("Created directory {:?}", dir);
    } else if !dir.is_dir() {
        return Err(PartgenError::Config(format!(
            "{} exists and is not a directory",
            dir.display()
        )));
    }
    Ok(())
}

/// Core generation API used by the CLI.
pub struct PartgenCore;

impl PartgenCore {
    /// Build a single series. A data error in the series is returned as
    /// [`PartgenError::Config`] carrying the series, stage and value.
    pub fn generate_series(spec: &SeriesSpec) -> Result<SeriesCatalog, PartgenError> {
        Ok(build_series(spec)?)
    }

    /// Build `ids` in the given order, or every registered series in id
    /// order when `ids` is empty. Unknown ids fail the whole run; data
    /// errors fail only their series and are listed in the outcome.
    pub fn generate_catalog<S: AsRef<str>>(
        registry: &SeriesRegistry,
        ids: &[S],
        options: GenerationOptions,
    ) -> Result<CatalogOutcome, PartgenError> {
        let specs: Vec<&SeriesSpec> = if ids.is_empty() {
            registry.iter().collect()
        } else {
            registry.resolve(ids)?
        };
        tracing::info!("Generating {} series", specs.len());
        Ok(options.builder().build(&specs))
    }

    /// Run the authoring checks over every registered series.
    pub fn check_specs(registry: &SeriesRegistry) -> Vec<SpecReport> {
        registry
            .iter()
            .map(|spec| SpecReport {
                series: spec.id.clone(),
                errors: check_spec(spec).iter().map(|e| e.to_string()).collect(),
            })
            .collect()
    }

    /// Write `catalog` into `out_dir` in `format`, creating the directory.
    pub fn write(
        catalog: &Catalog,
        format: OutputFormat,
        out_dir: &Path,
        unified: Option<&str>,
    ) -> Result<Vec<PathBuf>, PartgenError> {
        ensure_directory_exists(out_dir)?;
        let sink = sink_for(format);
        Ok(write_catalog(catalog, sink.as_ref(), out_dir, unified)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_keeps_caller_order() {
        let registry = SeriesRegistry::with_builtin();
        let outcome = PartgenCore::generate_catalog(
            &registry,
            &["XAL4020", "ERJ-2RKF", "GCM155R71H"],
            GenerationOptions::default(),
        )
        .unwrap();
        let order: Vec<_> = outcome.catalog.sections().iter().map(|s| s.series.as_str()).collect();
        assert_eq!(order, vec!["XAL4020", "ERJ-2RKF", "GCM155R71H"]);
    }

    #[test]
    fn test_repeated_series_built_once() {
        let registry = SeriesRegistry::with_builtin();
        let ids = ["ABM8", "abm8"];
        let outcome =
            PartgenCore::generate_catalog(&registry, &ids, GenerationOptions::default()).unwrap();
        assert_eq!(outcome.catalog.sections().len(), 1);
        assert_eq!(outcome.catalog.unified("crystals").len(), 12);
    }

    #[test]
    fn test_unknown_series_is_config_error() {
        let registry = SeriesRegistry::with_builtin();
        let err = PartgenCore::generate_catalog(&registry, &["NOPE"], GenerationOptions::default())
            .unwrap_err();
        assert!(matches!(err, PartgenError::Config(msg) if msg.contains("NOPE")));
    }

    #[test]
    fn test_builtin_specs_check_clean() {
        let registry = SeriesRegistry::with_builtin();
        let reports = PartgenCore::check_specs(&registry);
        assert_eq!(reports.len(), registry.len());
        assert!(reports.iter().all(SpecReport::is_ok));
    }

    #[test]
    fn test_write_creates_directory() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested/out");
        let registry = SeriesRegistry::with_builtin();
        let ids = ["ABM8", "ABS07"];
        let outcome =
            PartgenCore::generate_catalog(&registry, &ids, GenerationOptions::default()).unwrap();

        let paths = PartgenCore::write(&outcome.catalog, OutputFormat::Csv, &out, Some("united"))
            .unwrap();
        assert_eq!(paths.len(), 3);
        assert!(out.join("ABM8.csv").is_file());
        assert!(out.join("united_crystals.csv").is_file());
    }

    #[test]
    fn test_ensure_directory_rejects_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain");
        std::fs::write(&file, "x").unwrap();
        assert!(ensure_directory_exists(&file).is_err());
        assert!(ensure_directory_exists(dir.path()).is_ok());
    }
}
