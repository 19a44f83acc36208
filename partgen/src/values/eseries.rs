//! Standard value series (IEC 60063) and candidate value enumeration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{approx_eq, contains_value, scale_pow10};

/// Lowest decade walked by the enumerator (1 pF / 1 pH / 1 pΩ).
pub const LOWEST_DECADE: i32 = -12;

const E12: [f64; 12] = [1.0, 1.2, 1.5, 1.8, 2.2, 2.7, 3.3, 3.9, 4.7, 5.6, 6.8, 8.2];

const E24: [f64; 24] = [
    1.0, 1.1, 1.2, 1.3, 1.5, 1.6, 1.8, 2.0, 2.2, 2.4, 2.7, 3.0, 3.3, 3.6, 3.9, 4.3, 4.7, 5.1,
    5.6, 6.2, 6.8, 7.5, 8.2, 9.1,
];

const E96: [f64; 96] = [
    1.00, 1.02, 1.05, 1.07, 1.10, 1.13, 1.15, 1.18, 1.21, 1.24, 1.27, 1.30, //
    1.33, 1.37, 1.40, 1.43, 1.47, 1.50, 1.54, 1.58, 1.62, 1.65, 1.69, 1.74, //
    1.78, 1.82, 1.87, 1.91, 1.96, 2.00, 2.05, 2.10, 2.15, 2.21, 2.26, 2.32, //
    2.37, 2.43, 2.49, 2.55, 2.61, 2.67, 2.74, 2.80, 2.87, 2.94, 3.01, 3.09, //
    3.16, 3.24, 3.32, 3.40, 3.48, 3.57, 3.65, 3.74, 3.83, 3.92, 4.02, 4.12, //
    4.22, 4.32, 4.42, 4.53, 4.64, 4.75, 4.87, 4.99, 5.11, 5.23, 5.36, 5.49, //
    5.62, 5.76, 5.90, 6.04, 6.19, 6.34, 6.49, 6.65, 6.81, 6.98, 7.15, 7.32, //
    7.50, 7.68, 7.87, 8.06, 8.25, 8.45, 8.66, 8.87, 9.09, 9.31, 9.53, 9.76,
];

#[derive(Debug, Error, PartialEq)]
pub enum EnumerationError {
    #[error("Invalid value range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },
}

/// Preferred-number series tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ESeries {
    E12,
    E24,
    E96,
}

impl ESeries {
    /// Multipliers of one decade, starting at 1.0.
    pub fn multipliers(self) -> &'static [f64] {
        match self {
            ESeries::E12 => &E12,
            ESeries::E24 => &E24,
            ESeries::E96 => &E96,
        }
    }

    /// Significant digits carried by the series' multipliers.
    pub fn significant_digits(self) -> u32 {
        match self {
            ESeries::E12 | ESeries::E24 => 2,
            ESeries::E96 => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ESeries::E12 => "E12",
            ESeries::E24 => "E24",
            ESeries::E96 => "E96",
        }
    }
}

impl std::fmt::Display for ESeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive numeric range in SI base units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    #[serde(deserialize_with = "super::serde_value::value")]
    pub min: f64,
    #[serde(deserialize_with = "super::serde_value::value")]
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn check(&self) -> Result<(), EnumerationError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min < 0.0 || self.min > self.max
        {
            return Err(EnumerationError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Inclusive containment, tolerant of representation error at both ends.
    pub fn contains(&self, value: f64) -> bool {
        (value > self.min || approx_eq(value, self.min))
            && (value < self.max || approx_eq(value, self.max))
    }
}

/// Exclusion, inclusion and extra-value lists applied to a value domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueFilters {
    #[serde(default, deserialize_with = "super::serde_value::values")]
    pub excluded: Vec<f64>,
    /// `None` means unrestricted; `Some(vec![])` restricts to nothing.
    #[serde(default, deserialize_with = "super::serde_value::optional_values")]
    pub specified: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "super::serde_value::values")]
    pub additional: Vec<f64>,
}

impl ValueFilters {
    /// Whether `value` passes the excluded set and the specified allow-list.
    pub fn admits(&self, value: f64) -> bool {
        if contains_value(&self.excluded, value) {
            return false;
        }
        match &self.specified {
            Some(allowed) => contains_value(allowed, value),
            None => true,
        }
    }
}

/// Round `value` to `digits` significant digits.
///
/// Works in the decimal domain so that `normalize(1.02 * 1e-6, 3)` yields the
/// same double as the literal `1.02e-6`.
pub fn normalize(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let shift = digits as i32 - 1 - magnitude;
    let scaled = scale_pow10(value, shift).round();
    scale_pow10(scaled, -shift)
}

/// Value of `10^exp`, exact for every exponent the enumerator walks.
pub fn decade(exp: i32) -> f64 {
    scale_pow10(1.0, exp)
}

/// Expand a standard series over `range`, then apply `filters`.
///
/// Decades are walked from [`LOWEST_DECADE`] while the decade start does not
/// exceed `range.max`. Each candidate is normalised to the series' significant
/// digits before any comparison. Additional values go through the same filters
/// and are skipped when already present. The result is ascending.
pub fn enumerate(
    range: ValueRange,
    series: ESeries,
    filters: &ValueFilters,
) -> Result<Vec<f64>, EnumerationError> {
    range.check()?;
    let digits = series.significant_digits();
    let mut values = Vec::new();

    let mut exp = LOWEST_DECADE;
    while decade(exp) <= range.max || approx_eq(decade(exp), range.max) {
        for &multiplier in series.multipliers() {
            let candidate = normalize(multiplier * decade(exp), digits);
            if range.contains(candidate) && filters.admits(candidate) {
                values.push(candidate);
            }
        }
        exp += 1;
    }

    append_additional(&mut values, filters, |v| range.contains(v));
    Ok(values)
}

/// Filter an explicit value list. `range`, when given, bounds it as well.
pub fn enumerate_explicit(
    declared: &[f64],
    range: Option<ValueRange>,
    filters: &ValueFilters,
) -> Result<Vec<f64>, EnumerationError> {
    if let Some(range) = range {
        range.check()?;
    }
    let in_range = |v: f64| range.map_or(true, |r| r.contains(v));
    let mut values: Vec<f64> = Vec::with_capacity(declared.len());
    for &value in declared {
        if in_range(value) && filters.admits(value) && !contains_value(&values, value) {
            values.push(value);
        }
    }
    append_additional(&mut values, filters, in_range);
    Ok(values)
}

fn append_additional(
    values: &mut Vec<f64>,
    filters: &ValueFilters,
    in_range: impl Fn(f64) -> bool,
) {
    for &extra in &filters.additional {
        if in_range(extra) && filters.admits(extra) && !contains_value(values, extra) {
            values.push(extra);
        }
    }
    values.sort_by(f64::total_cmp);
}
