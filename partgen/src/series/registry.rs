//! Series Registry
//!
//! Holds the series specifications known to a run, keyed by identifier.
//! Identifiers are matched case-insensitively; a user series with the same
//! identifier as a built-in one replaces it.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use thiserror::Error;

use super::builtin::{builtin_series, load_series_from_directory};
use super::schema::SeriesSpec;
use crate::family::ComponentFamily;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Unknown series: {0}")]
    UnknownSeries(String),
    #[error("Invalid series directory: {0}")]
    InvalidDirectory(String),
    #[error("Unknown component family or group: {0}")]
    UnknownFamily(String),
}

/// Outcome of loading a directory of series documents
#[derive(Debug, Default)]
pub struct DirectoryLoad {
    /// Series added or replaced
    pub loaded: usize,
    /// One message per file that could not be read or parsed
    pub errors: Vec<String>,
}

/// Series specifications by identifier
#[derive(Debug, Clone, Default)]
pub struct SeriesRegistry {
    series: BTreeMap<String, SeriesSpec>,
}

fn key(id: &str) -> String {
    id.trim().to_uppercase()
}

impl SeriesRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the embedded series
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for spec in builtin_series() {
            registry.insert(spec);
        }
        tracing::info!("Loaded {} built-in series", registry.len());
        registry
    }

    /// Add a series, returning the one it replaced
    pub fn insert(&mut self, spec: SeriesSpec) -> Option<SeriesSpec> {
        let replaced = self.series.insert(key(&spec.id), spec);
        if let Some(old) = &replaced {
            tracing::debug!("Series {} replaced", old.id);
        }
        replaced
    }

    /// Load every JSON document in `dir`. Files that fail to parse are
    /// reported and skipped.
    pub fn load_directory(&mut self, dir: &Path) -> Result<DirectoryLoad, RegistryError> {
        if !dir.is_dir() {
            return Err(RegistryError::InvalidDirectory(
                dir.to_string_lossy().to_string(),
            ));
        }

        let (specs, errors) = load_series_from_directory(dir);
        let loaded = specs.len();
        for spec in specs {
            if self.insert(spec).is_some() {
                tracing::info!("User series overrides a registered series");
            }
        }

        tracing::info!("Loaded {} series from {:?}", loaded, dir);
        Ok(DirectoryLoad { loaded, errors })
    }

    pub fn get(&self, id: &str) -> Option<&SeriesSpec> {
        self.series.get(&key(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.series.contains_key(&key(id))
    }

    /// Series identifiers in sorted order
    pub fn ids(&self) -> Vec<&str> {
        self.series.values().map(|s| s.id.as_str()).collect()
    }

    /// All series in identifier order
    pub fn iter(&self) -> impl Iterator<Item = &SeriesSpec> {
        self.series.values()
    }

    pub fn by_family(&self, family: ComponentFamily) -> Vec<&SeriesSpec> {
        self.series.values().filter(|s| s.family == family).collect()
    }

    /// Series of every family in `group` ("resistors", "capacitors", ...)
    pub fn by_group(&self, group: &str) -> Vec<&SeriesSpec> {
        self.series
            .values()
            .filter(|s| s.family.group() == group)
            .collect()
    }

    /// Series of a family ("thermistor") or of a whole group ("resistors").
    pub fn select(&self, family_or_group: &str) -> Result<Vec<&SeriesSpec>, RegistryError> {
        let wanted = family_or_group.trim().to_lowercase().replace(['-', ' '], "_");
        if ComponentFamily::ALL.iter().any(|f| f.group() == wanted) {
            return Ok(self.by_group(&wanted));
        }
        let family: ComponentFamily = wanted
            .parse()
            .map_err(|_| RegistryError::UnknownFamily(family_or_group.to_string()))?;
        Ok(self.by_family(family))
    }

    /// Look up `ids` in caller order. Fails on the first unknown identifier.
    /// A series requested more than once appears only at its first position.
    pub fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<&SeriesSpec>, RegistryError> {
        let mut seen = HashSet::new();
        let mut specs = Vec::with_capacity(ids.len());
        for id in ids {
            let id = id.as_ref();
            let spec = self
                .get(id)
                .ok_or_else(|| RegistryError::UnknownSeries(id.to_string()))?;
            if seen.insert(key(&spec.id)) {
                specs.push(spec);
            }
        }
        Ok(specs)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const USER_SERIES: &str = r#"{
        "id": "erj-2rkf",
        "family": "resistor",
        "manufacturer": "Panasonic",
        "prefix": "ERJ-2RKF",
        "domain": {"kind": "standard", "series": "E96", "min": 10, "max": 100},
        "packaging": {"suffix": "X"},
        "datasheet": {"kind": "static", "url": ""}
    }"#;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = SeriesRegistry::with_builtin();
        assert!(registry.get("erj-2rkf").is_some());
        assert!(registry.get("ERJ-2RKF").is_some());
        assert!(registry.get("NOPE").is_none());
    }

    #[test]
    fn test_user_series_replaces_builtin() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("mine.json"), USER_SERIES).unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut registry = SeriesRegistry::with_builtin();
        let before = registry.len();
        let load = registry.load_directory(dir.path()).unwrap();

        assert_eq!(load.loaded, 1);
        assert_eq!(load.errors.len(), 1);
        assert_eq!(registry.len(), before);
        assert_eq!(registry.get("ERJ-2RKF").unwrap().id, "erj-2rkf");
    }

    #[test]
    fn test_resolve_keeps_caller_order() {
        let registry = SeriesRegistry::with_builtin();
        let specs = registry.resolve(&["XAL4020", "ERJ-2RKF"]).unwrap();
        assert_eq!(specs[0].id, "XAL4020");
        assert_eq!(specs[1].id, "ERJ-2RKF");

        let err = registry.resolve(&["XAL4020", "MISSING"]).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownSeries(id) if id == "MISSING"));
    }

    #[test]
    fn test_resolve_drops_repeats() {
        let registry = SeriesRegistry::with_builtin();
        let specs = registry
            .resolve(&["ABM8", "XAL4020", "abm8", " ABM8 "])
            .unwrap();
        let ids: Vec<_> = specs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["ABM8", "XAL4020"]);
    }

    #[test]
    fn test_select_family_or_group() {
        let registry = SeriesRegistry::with_builtin();

        let group = registry.select("resistors").unwrap();
        assert!(group.iter().any(|s| s.family == ComponentFamily::Thermistor));
        assert!(group.iter().any(|s| s.family == ComponentFamily::Resistor));

        let family = registry.select("Thermistor").unwrap();
        assert!(!family.is_empty());
        assert!(family.iter().all(|s| s.family == ComponentFamily::Thermistor));

        assert_eq!(registry.select("coupled-inductors").unwrap().len(), 4);
        assert!(matches!(
            registry.select("diodes"),
            Err(RegistryError::UnknownFamily(name)) if name == "diodes"
        ));
    }

    #[test]
    fn test_family_and_group_views() {
        let registry = SeriesRegistry::with_builtin();
        assert!(registry
            .by_family(ComponentFamily::Thermistor)
            .iter()
            .all(|s| s.family == ComponentFamily::Thermistor));
        let resistors = registry.by_group("resistors");
        assert!(resistors.iter().any(|s| s.family == ComponentFamily::Thermistor));
        assert!(resistors.iter().any(|s| s.family == ComponentFamily::Resistor));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let mut registry = SeriesRegistry::new();
        assert!(matches!(
            registry.load_directory(Path::new("/nonexistent/partgen")),
            Err(RegistryError::InvalidDirectory(_))
        ));
    }
}
