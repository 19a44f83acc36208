//! Authoring-time checks for series specifications.
//!
//! The catalog builder runs [`validate_spec`] before enumerating a series, so
//! a data mistake fails that series with a precise message instead of
//! surfacing later as a wrong or missing part.

use thiserror::Error;

use super::schema::{SeriesSpec, ValueDomain};
use crate::encoding::{EncodingError, EncodingScheme};

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("Series '{series}': {attribute} override for value {value} is outside the series' value domain")]
    OverrideOutsideDomain {
        series: String,
        attribute: &'static str,
        value: f64,
    },
    #[error("Series '{series}': packaging suffix '{suffix}' is keyed to value {value} outside the series' value domain")]
    SuffixOutsideDomain {
        series: String,
        suffix: String,
        value: f64,
    },
    #[error("Series '{series}': index-offset encoding requires an explicit value list")]
    IndexOffsetWithoutValues { series: String },
    #[error("Series '{series}': invalid value range [{min}, {max}]")]
    InvalidRange { series: String, min: f64, max: f64 },
    #[error("Series '{series}': sub-type '{subtype}' declares no tolerance")]
    MissingTolerance { series: String, subtype: String },
    #[error("Series '{series}': {field} must not be empty")]
    EmptyField { series: String, field: &'static str },
    #[error("Series '{series}': {source}")]
    Encoding {
        series: String,
        #[source]
        source: EncodingError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid series document {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SpecError {
    /// The value an authoring error is about, when there is one.
    pub fn offending_value(&self) -> Option<f64> {
        match self {
            SpecError::OverrideOutsideDomain { value, .. }
            | SpecError::SuffixOutsideDomain { value, .. } => Some(*value),
            SpecError::Encoding { source, .. } => match source {
                EncodingError::OutOfRange { value, .. }
                | EncodingError::ValueNotDeclared { value } => Some(*value),
                EncodingError::UnknownManufacturer { .. } => None,
            },
            _ => None,
        }
    }
}

/// First authoring error in `spec`, if any.
pub fn validate_spec(spec: &SeriesSpec) -> Result<(), SpecError> {
    match check_spec(spec).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Every authoring error in `spec`, in a stable order.
pub fn check_spec(spec: &SeriesSpec) -> Vec<SpecError> {
    let series = || spec.id.clone();
    let mut errors = Vec::new();

    if spec.id.trim().is_empty() {
        errors.push(SpecError::EmptyField {
            series: series(),
            field: "id",
        });
    }
    if spec.prefix.trim().is_empty() {
        errors.push(SpecError::EmptyField {
            series: series(),
            field: "prefix",
        });
    }

    if let ValueDomain::Standard { min, max, .. } = &spec.domain {
        if !min.is_finite() || !max.is_finite() || *min < 0.0 || min > max {
            errors.push(SpecError::InvalidRange {
                series: series(),
                min: *min,
                max: *max,
            });
        }
    }
    for subtype in &spec.subtypes {
        if let Some(range) = subtype.range {
            if range.check().is_err() {
                errors.push(SpecError::InvalidRange {
                    series: series(),
                    min: range.min,
                    max: range.max,
                });
            }
        }
        if subtype.tolerances.is_empty() {
            errors.push(SpecError::MissingTolerance {
                series: series(),
                subtype: subtype.name.clone(),
            });
        }
    }

    match spec.scheme() {
        Ok(EncodingScheme::IndexOffset { .. }) => {
            if !matches!(spec.domain, ValueDomain::Explicit { .. }) {
                errors.push(SpecError::IndexOffsetWithoutValues { series: series() });
            }
        }
        Ok(_) => {}
        Err(source) => errors.push(SpecError::Encoding {
            series: series(),
            source,
        }),
    }

    for (attribute, value) in spec.overrides.keys() {
        if !spec.domain_contains(value) {
            errors.push(SpecError::OverrideOutsideDomain {
                series: series(),
                attribute,
                value,
            });
        }
    }
    for reserved in &spec.packaging.by_value {
        for &value in &reserved.values {
            if !spec.domain_contains(value) {
                errors.push(SpecError::SuffixOutsideDomain {
                    series: series(),
                    suffix: reserved.suffix.clone(),
                    value,
                });
            }
        }
    }

    errors
}
