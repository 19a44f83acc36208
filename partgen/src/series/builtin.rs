//! Built-in and External Series Specifications
//!
//! Series are loaded from:
//! 1. Embedded JSON files compiled into the library (`partgen/series/`)
//! 2. External JSON files in a user-supplied directory
//!
//! A document holds either one series object or an array of them. Users can
//! add or replace series by dropping JSON files into a directory without
//! recompiling.

use std::path::Path;

use super::schema::SeriesSpec;
use super::validate::SpecError;

const EMBEDDED_RESISTORS: &str = include_str!("../../series/resistors.json");
const EMBEDDED_CAPACITORS: &str = include_str!("../../series/capacitors.json");
const EMBEDDED_INDUCTORS: &str = include_str!("../../series/inductors.json");
const EMBEDDED_COUPLED_INDUCTORS: &str = include_str!("../../series/coupled_inductors.json");
const EMBEDDED_CRYSTALS: &str = include_str!("../../series/crystals.json");

/// Parse a series document: a single object or an array of objects.
pub fn parse_series_document(text: &str) -> Result<Vec<SeriesSpec>, serde_json::Error> {
    if text.trim_start().starts_with('[') {
        serde_json::from_str(text)
    } else {
        serde_json::from_str::<SeriesSpec>(text).map(|spec| vec![spec])
    }
}

/// Get all series from the embedded JSON files, in file order
pub fn builtin_series() -> Vec<SeriesSpec> {
    let embedded = [
        ("resistors.json", EMBEDDED_RESISTORS),
        ("capacitors.json", EMBEDDED_CAPACITORS),
        ("inductors.json", EMBEDDED_INDUCTORS),
        ("coupled_inductors.json", EMBEDDED_COUPLED_INDUCTORS),
        ("crystals.json", EMBEDDED_CRYSTALS),
    ];

    let mut series = Vec::new();
    for (name, json) in embedded {
        match parse_series_document(json) {
            Ok(specs) => series.extend(specs),
            Err(e) => {
                tracing::warn!("Failed to parse embedded series file {}: {}", name, e);
            }
        }
    }
    series
}

/// Load series from a directory of JSON files.
/// Returns both successfully loaded series and any errors encountered
pub fn load_series_from_directory(dir: &Path) -> (Vec<SeriesSpec>, Vec<String>) {
    let mut series = Vec::new();
    let mut errors = Vec::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            errors.push(format!("Failed to read directory {:?}: {}", dir, e));
            return (series, errors);
        }
    };

    // Sorted so that later files win deterministically on duplicate ids.
    let mut paths: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|e| e == "json").unwrap_or(false))
        .collect();
    paths.sort();

    for path in paths {
        match load_series_from_file(&path) {
            Ok(specs) => {
                tracing::info!("Loaded {} series from {:?}", specs.len(), path.file_name());
                series.extend(specs);
            }
            Err(e) => {
                let error_msg = format!("Failed to load {:?}: {}", path.file_name(), e);
                tracing::warn!("{}", error_msg);
                errors.push(error_msg);
            }
        }
    }

    (series, errors)
}

/// Load the series of a single JSON file
pub fn load_series_from_file(path: &Path) -> Result<Vec<SeriesSpec>, SpecError> {
    let content = std::fs::read_to_string(path)?;
    parse_series_document(&content).map_err(|source| SpecError::Json {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::validate::check_spec;

    #[test]
    fn test_builtin_series_parse() {
        let series = builtin_series();
        assert!(series.len() >= 30, "expected the full built-in set, got {}", series.len());
        assert!(series.iter().any(|s| s.id == "ERJ-2RKF"));
        assert!(series.iter().any(|s| s.id == "GCM155R71H"));
        assert!(series.iter().any(|s| s.id == "XAL4020"));
    }

    #[test]
    fn test_builtin_series_are_valid() {
        for spec in builtin_series() {
            let errors = check_spec(&spec);
            assert!(errors.is_empty(), "{} has authoring errors: {:?}", spec.id, errors);
        }
    }

    #[test]
    fn test_builtin_ids_unique() {
        let series = builtin_series();
        let mut ids: Vec<_> = series.iter().map(|s| s.id.to_uppercase()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), series.len());
    }

    #[test]
    fn test_parse_single_object_document() {
        let specs = parse_series_document(
            r#"{
                "id": "ABM8",
                "family": "crystal",
                "manufacturer": "Abracon",
                "prefix": "ABM8",
                "domain": {"kind": "explicit", "values": ["12 MHz"]},
                "datasheet": {"kind": "static", "url": ""}
            }"#,
        )
        .unwrap();
        assert_eq!(specs.len(), 1);
    }

    #[test]
    fn test_missing_directory_reports_error() {
        let (series, errors) = load_series_from_directory(Path::new("/nonexistent/partgen-series"));
        assert!(series.is_empty());
        assert_eq!(errors.len(), 1);
    }
}
