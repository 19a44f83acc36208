//! Numeric value handling: standard series, display formatting and parsing.
//!
//! All values are plain `f64` in SI base units (ohm, farad, henry, hertz).
//! Comparisons between values authored in different ways (a JSON literal, an
//! enumerated grid point, a parsed "4.7 µF") go through [`approx_eq`].

pub mod eseries;
pub mod format;

pub use eseries::{
    enumerate, enumerate_explicit, normalize, ESeries, EnumerationError, ValueFilters, ValueRange,
};
pub use format::{format_number, format_value, parse_value, ParseValueError, Unit};

/// Relative tolerance used for every value comparison.
pub const RELATIVE_EPSILON: f64 = 1e-9;

pub fn approx_eq(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    (a - b).abs() <= RELATIVE_EPSILON * a.abs().max(b.abs())
}

pub fn contains_value(values: &[f64], value: f64) -> bool {
    values.iter().any(|&v| approx_eq(v, value))
}

pub fn position_of(values: &[f64], value: f64) -> Option<usize> {
    values.iter().position(|&v| approx_eq(v, value))
}

/// `value * 10^exp`, dividing for negative exponents so that results stay
/// correctly rounded.
pub fn scale_pow10(value: f64, exp: i32) -> f64 {
    if exp >= 0 {
        value * 10f64.powi(exp)
    } else {
        value / 10f64.powi(-exp)
    }
}

/// Serde helpers accepting either JSON numbers or value strings ("4.7 µF").
pub(crate) mod serde_value {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawValue {
        Number(f64),
        Text(String),
    }

    impl RawValue {
        fn resolve<E: serde::de::Error>(self) -> Result<f64, E> {
            match self {
                RawValue::Number(n) => Ok(n),
                RawValue::Text(s) => super::parse_value(&s).map_err(E::custom),
            }
        }
    }

    pub fn value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        RawValue::deserialize(deserializer)?.resolve()
    }

    pub fn values<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        Vec::<RawValue>::deserialize(deserializer)?
            .into_iter()
            .map(RawValue::resolve)
            .collect()
    }

    pub fn optional_values<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<f64>>, D::Error> {
        match Option::<Vec<RawValue>>::deserialize(deserializer)? {
            Some(raw) => raw
                .into_iter()
                .map(RawValue::resolve)
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(4.7e-9, 4.7 * 1e-9));
        assert!(approx_eq(0.0, 0.0));
        assert!(!approx_eq(4.7e-9, 4.75e-9));
    }

    #[test]
    fn test_scale_pow10() {
        assert_eq!(scale_pow10(47.0, -10), 4.7e-9);
        assert_eq!(scale_pow10(47.0, 3), 47_000.0);
    }
}
