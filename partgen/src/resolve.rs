//! Per-value attribute resolution.
//!
//! Each attribute is looked up in its own value-keyed override map and falls
//! back to the series default when the value is not a key there. Attributes
//! never influence each other.

use serde::Serialize;

use crate::series::{SeriesSpec, ValueMap};

/// Physical and electrical attributes of one value in a series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedAttributes {
    pub footprint: String,
    pub case_code_in: String,
    pub case_code_mm: String,
    pub voltage_rating: String,
    pub model: Option<String>,
    /// Amperes
    pub current_rating: Option<f64>,
    /// Ohms
    pub dc_resistance: Option<f64>,
}

fn pick<T: Clone>(map: &ValueMap<T>, value: f64, default: &T) -> T {
    map.get(value).unwrap_or(default).clone()
}

fn pick_optional<T: Clone>(map: &ValueMap<T>, value: f64, default: &Option<T>) -> Option<T> {
    map.get(value).cloned().or_else(|| default.clone())
}

/// Resolve every overridable attribute of `value` independently.
pub fn resolve(value: f64, spec: &SeriesSpec) -> ResolvedAttributes {
    let defaults = &spec.defaults;
    let overrides = &spec.overrides;
    ResolvedAttributes {
        footprint: pick(&overrides.footprint, value, &defaults.footprint),
        case_code_in: pick(&overrides.case_code_in, value, &defaults.case_code_in),
        case_code_mm: pick(&overrides.case_code_mm, value, &defaults.case_code_mm),
        voltage_rating: pick(&overrides.voltage_rating, value, &defaults.voltage_rating),
        model: pick_optional(&overrides.model, value, &defaults.model),
        current_rating: pick_optional(&overrides.current_rating, value, &defaults.current_rating),
        dc_resistance: pick_optional(&overrides.dc_resistance, value, &defaults.dc_resistance),
    }
}

/// Packaging suffixes for `value`: a suffix reserved for the value, else the
/// fixed suffix, else one entry per interchangeable option. A series with no
/// packaging information yields a single empty suffix.
pub fn packaging_for(value: f64, spec: &SeriesSpec) -> Vec<String> {
    let packaging = &spec.packaging;
    if let Some(reserved) = packaging
        .by_value
        .iter()
        .find(|r| crate::values::contains_value(&r.values, value))
    {
        return vec![reserved.suffix.clone()];
    }
    if let Some(suffix) = &packaging.suffix {
        return vec![suffix.clone()];
    }
    if !packaging.options.is_empty() {
        return packaging.options.clone();
    }
    vec![String::new()]
}
