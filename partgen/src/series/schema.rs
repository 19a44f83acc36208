//! Series Specification Schema
//!
//! Declarative description of one manufacturer product series: which values
//! exist, how their part numbers are spelled, and which physical attributes
//! they carry. Specifications are authored as JSON and never mutated by the
//! engine.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::encoding::{default_scheme, EncodingError, EncodingScheme};
use crate::family::ComponentFamily;
use crate::values::{
    approx_eq, contains_value, parse_value, serde_value, ESeries, ValueFilters, ValueRange,
};

/// Search service used when a series does not name one.
pub const DEFAULT_SEARCH_URL: &str = "https://www.trustedparts.com/en/search";

/// A complete product series specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSpec {
    /// Caller-facing series identifier (usually the series code)
    pub id: String,

    pub family: ComponentFamily,

    pub manufacturer: String,

    /// Part number text preceding the value code
    pub prefix: String,

    /// Inserted between prefix and value code (Coilcraft uses "-")
    #[serde(default)]
    pub separator: String,

    /// Reference designator prefix; the family default when absent
    #[serde(default)]
    pub reference: Option<String>,

    pub domain: ValueDomain,

    #[serde(default)]
    pub filters: ValueFilters,

    /// Dielectric / grade sub-types, each with its own tolerance codes and
    /// optionally its own range or standard series
    #[serde(default)]
    pub subtypes: Vec<SubType>,

    /// Value thresholds selecting a characteristic code (Murata thickness codes)
    #[serde(default)]
    pub characteristic_codes: Vec<CharacteristicCode>,

    #[serde(default)]
    pub packaging: Packaging,

    #[serde(default)]
    pub defaults: SeriesDefaults,

    /// Sparse value-keyed attribute overrides
    #[serde(default)]
    pub overrides: ValueOverrides,

    pub datasheet: DatasheetLink,

    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Explicit encoding; the manufacturer default when absent
    #[serde(default)]
    pub encoding: Option<EncodingScheme>,

    /// Replaces the family's leading description words
    #[serde(default)]
    pub description_class: Option<String>,
}

fn default_search_url() -> String {
    DEFAULT_SEARCH_URL.to_string()
}

impl SeriesSpec {
    pub fn reference(&self) -> &str {
        self.reference
            .as_deref()
            .unwrap_or_else(|| self.family.reference())
    }

    pub fn description_class(&self) -> &str {
        self.description_class
            .as_deref()
            .unwrap_or_else(|| self.family.description_class())
    }

    /// The encoding scheme in effect for this series.
    pub fn scheme(&self) -> Result<EncodingScheme, EncodingError> {
        match &self.encoding {
            Some(scheme) => Ok(scheme.clone()),
            None => default_scheme(&self.manufacturer, self.family, &self.prefix),
        }
    }

    /// Declared sub-types, or a single implicit one carrying the default
    /// tolerance text when none are declared.
    pub fn effective_subtypes(&self) -> Vec<SubType> {
        if !self.subtypes.is_empty() {
            return self.subtypes.clone();
        }
        vec![SubType {
            name: String::new(),
            series: None,
            range: None,
            tolerances: vec![ToleranceOption {
                code: String::new(),
                text: self.defaults.tolerance.clone().unwrap_or_default(),
            }],
        }]
    }

    /// Explicit value list, empty for standard-series domains.
    pub fn declared_values(&self) -> &[f64] {
        match &self.domain {
            ValueDomain::Explicit { values } => values,
            ValueDomain::Standard { .. } => &[],
        }
    }

    /// Whether `value` belongs to the series' value domain: the specified
    /// allow-list when present, otherwise the declared list or numeric range
    /// of the series or any sub-type, plus additional values.
    pub fn domain_contains(&self, value: f64) -> bool {
        if let Some(specified) = &self.filters.specified {
            return contains_value(specified, value);
        }
        if contains_value(&self.filters.additional, value) {
            return true;
        }
        match &self.domain {
            ValueDomain::Explicit { values } => contains_value(values, value),
            ValueDomain::Standard { min, max, .. } => {
                ValueRange::new(*min, *max).contains(value)
                    || self
                        .subtypes
                        .iter()
                        .filter_map(|s| s.range)
                        .any(|r| r.contains(value))
            }
        }
    }

    /// Characteristic code for `value`: the highest threshold strictly below it.
    pub fn characteristic_for(&self, value: f64) -> &str {
        self.characteristic_codes
            .iter()
            .filter(|c| value > c.above && !approx_eq(value, c.above))
            .max_by(|a, b| a.above.total_cmp(&b.above))
            .map(|c| c.code.as_str())
            .unwrap_or("")
    }
}

/// Where a series' values come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueDomain {
    /// Standard series over an inclusive range
    Standard {
        series: ESeries,
        #[serde(deserialize_with = "serde_value::value")]
        min: f64,
        #[serde(deserialize_with = "serde_value::value")]
        max: f64,
    },
    /// Hand-picked values in catalog order
    Explicit {
        #[serde(deserialize_with = "serde_value::values")]
        values: Vec<f64>,
    },
}

/// Dielectric, grade or E-series family within a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubType {
    /// Dielectric ("X7R") or series tag ("E96"); empty when implicit
    #[serde(default)]
    pub name: String,

    /// Overrides the domain's standard series
    #[serde(default)]
    pub series: Option<ESeries>,

    /// Overrides the domain's range
    #[serde(default)]
    pub range: Option<ValueRange>,

    pub tolerances: Vec<ToleranceOption>,
}

/// Tolerance code printed in the part number and its human text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToleranceOption {
    #[serde(default)]
    pub code: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicCode {
    #[serde(deserialize_with = "serde_value::value")]
    pub above: f64,
    pub code: String,
}

/// Packaging suffix selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Packaging {
    /// Single fixed suffix
    #[serde(default)]
    pub suffix: Option<String>,

    /// Interchangeable suffixes; one part is generated per entry
    #[serde(default)]
    pub options: Vec<String>,

    /// Suffixes reserved for specific values
    #[serde(default)]
    pub by_value: Vec<ValueSuffix>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSuffix {
    #[serde(deserialize_with = "serde_value::values")]
    pub values: Vec<f64>,
    pub suffix: String,
}

/// Series-level attribute defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesDefaults {
    #[serde(default)]
    pub footprint: String,

    /// Imperial case code ("0402")
    #[serde(default)]
    pub case_code_in: String,

    /// Metric case code ("1005")
    #[serde(default)]
    pub case_code_mm: String,

    #[serde(default)]
    pub voltage_rating: String,

    /// 3-D model reference
    #[serde(default)]
    pub model: Option<String>,

    /// Tolerance text for series without sub-types ("±20%")
    #[serde(default)]
    pub tolerance: Option<String>,

    #[serde(default)]
    pub temperature_coefficient: Option<String>,

    #[serde(default)]
    pub power_rating: Option<String>,

    /// Maximum DC current in amperes
    #[serde(default)]
    pub current_rating: Option<f64>,

    /// Maximum DC resistance in ohms
    #[serde(default)]
    pub dc_resistance: Option<f64>,
}

/// Value-keyed attribute overrides; every map is optional and sparse
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueOverrides {
    #[serde(default, alias = "value_footprints", skip_serializing_if = "ValueMap::is_empty")]
    pub footprint: ValueMap<String>,

    #[serde(default, alias = "value_case_codes_in", skip_serializing_if = "ValueMap::is_empty")]
    pub case_code_in: ValueMap<String>,

    #[serde(default, alias = "value_case_codes_mm", skip_serializing_if = "ValueMap::is_empty")]
    pub case_code_mm: ValueMap<String>,

    #[serde(default, alias = "value_voltages", skip_serializing_if = "ValueMap::is_empty")]
    pub voltage_rating: ValueMap<String>,

    #[serde(default, alias = "value_models", skip_serializing_if = "ValueMap::is_empty")]
    pub model: ValueMap<String>,

    #[serde(default, skip_serializing_if = "ValueMap::is_empty")]
    pub current_rating: ValueMap<f64>,

    #[serde(default, skip_serializing_if = "ValueMap::is_empty")]
    pub dc_resistance: ValueMap<f64>,
}

impl ValueOverrides {
    /// Every override key, tagged with the attribute it belongs to.
    pub fn keys(&self) -> Vec<(&'static str, f64)> {
        let mut keys = Vec::new();
        keys.extend(self.footprint.keys().map(|k| ("footprint", k)));
        keys.extend(self.case_code_in.keys().map(|k| ("case_code_in", k)));
        keys.extend(self.case_code_mm.keys().map(|k| ("case_code_mm", k)));
        keys.extend(self.voltage_rating.keys().map(|k| ("voltage_rating", k)));
        keys.extend(self.model.keys().map(|k| ("model", k)));
        keys.extend(self.current_rating.keys().map(|k| ("current_rating", k)));
        keys.extend(self.dc_resistance.keys().map(|k| ("dc_resistance", k)));
        keys
    }
}

/// Sparse mapping from a component value to an attribute.
///
/// Serialised as a JSON object whose keys are value strings, either plain
/// numbers or unit strings such as `"4.7 µF"`. Lookups compare values with a
/// relative tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueMap<T> {
    entries: Vec<(f64, T)>,
}

impl<T> Default for ValueMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> ValueMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `value`.
    pub fn insert(&mut self, value: f64, item: T) {
        match self.entries.iter_mut().find(|(k, _)| approx_eq(*k, value)) {
            Some(entry) => entry.1 = item,
            None => {
                self.entries.push((value, item));
                self.entries.sort_by(|a, b| a.0.total_cmp(&b.0));
            }
        }
    }

    pub fn get(&self, value: f64) -> Option<&T> {
        self.entries
            .iter()
            .find(|(k, _)| approx_eq(*k, value))
            .map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<T> FromIterator<(f64, T)> for ValueMap<T> {
    fn from_iter<I: IntoIterator<Item = (f64, T)>>(iter: I) -> Self {
        let mut map = ValueMap::new();
        for (value, item) in iter {
            map.insert(value, item);
        }
        map
    }
}

impl<T: Serialize> Serialize for ValueMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k.to_string(), v)))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ValueMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, T>::deserialize(deserializer)?;
        let mut map = ValueMap::new();
        for (key, item) in raw {
            let value = parse_value(&key).map_err(D::Error::custom)?;
            map.insert(value, item);
        }
        Ok(map)
    }
}

/// How a part's datasheet URL is derived from its identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasheetLink {
    /// One document for the whole series
    Static { url: String },
    /// `base + identifier + suffix`
    Identifier {
        base: String,
        #[serde(default)]
        suffix: String,
    },
    /// `base + identifier without its last `trim` characters + suffix`
    TruncatedIdentifier {
        base: String,
        trim: usize,
        #[serde(default)]
        suffix: String,
    },
}

impl DatasheetLink {
    pub fn resolve(&self, identifier: &str) -> String {
        match self {
            DatasheetLink::Static { url } => url.clone(),
            DatasheetLink::Identifier { base, suffix } => {
                format!("{}{}{}", base, identifier, suffix)
            }
            DatasheetLink::TruncatedIdentifier { base, trim, suffix } => {
                let keep = identifier.chars().count().saturating_sub(*trim);
                let stem: String = identifier.chars().take(keep).collect();
                format!("{}{}{}", base, stem, suffix)
            }
        }
    }
}
