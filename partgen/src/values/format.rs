//! Human-readable value strings and the inverse scale inference.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{approx_eq, scale_pow10};

#[derive(Debug, Error, PartialEq)]
pub enum ParseValueError {
    #[error("Empty value string")]
    Empty,
    #[error("Invalid number in '{0}'")]
    InvalidNumber(String),
    #[error("Unknown unit '{unit}' in '{input}'")]
    UnknownUnit { input: String, unit: String },
}

/// Physical unit of a component value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Ohm,
    Farad,
    Henry,
    Hertz,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Ohm => "Ω",
            Unit::Farad => "F",
            Unit::Henry => "H",
            Unit::Hertz => "Hz",
        }
    }

    /// Display prefixes in descending order, as (decimal exponent, prefix).
    fn prefixes(self) -> &'static [(i32, &'static str)] {
        match self {
            Unit::Ohm => &[(6, "M"), (3, "k"), (0, ""), (-3, "m")],
            Unit::Farad => &[(0, ""), (-3, "m"), (-6, "µ"), (-9, "n"), (-12, "p")],
            Unit::Henry => &[(-3, "m"), (-6, "µ"), (-9, "n")],
            Unit::Hertz => &[(9, "G"), (6, "M"), (3, "k"), (0, "")],
        }
    }

    /// Significant digits shown by [`format_value`].
    fn display_digits(self) -> u32 {
        match self {
            Unit::Hertz => 6,
            _ => 3,
        }
    }
}

/// Format a number with at most `digits` significant digits, trimming
/// trailing zeros ("4.70" becomes "4.7", "100.0" becomes "100").
pub fn format_number(value: f64, digits: u32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (digits as i32 - 1 - magnitude).max(0) as usize;
    let text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Render `value` with the largest prefix that keeps the number at or above 1,
/// e.g. `4.7e-9` farad as "4.7 nF" and `47_000` ohm as "47 kΩ".
pub fn format_value(value: f64, unit: Unit) -> String {
    let prefixes = unit.prefixes();
    let (exp, prefix) = prefixes
        .iter()
        .copied()
        .find(|&(exp, _)| {
            let threshold = scale_pow10(1.0, exp);
            value >= threshold || approx_eq(value, threshold)
        })
        .unwrap_or_else(|| {
            if value == 0.0 {
                // zero reads best in the base unit when the table has one
                prefixes
                    .iter()
                    .copied()
                    .find(|&(exp, _)| exp == 0)
                    .unwrap_or(prefixes[prefixes.len() - 1])
            } else {
                prefixes[prefixes.len() - 1]
            }
        });
    let scaled = scale_pow10(value, -exp);
    format!("{} {}{}", format_number(scaled, unit.display_digits()), prefix, unit.symbol())
}

/// Parse a value string back to SI base units.
///
/// Accepts plain numbers ("4.7e-9"), prefixed units ("4.7 nF", "47kΩ",
/// "2.2 uH", "12 MHz") and bare prefixes ("47k", "4.7u"). Prefix letters are
/// case-sensitive except `K`, which is read as kilo.
pub fn parse_value(input: &str) -> Result<f64, ParseValueError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(ParseValueError::Empty);
    }

    let split = numeric_prefix_len(text);
    let digits = &text[..split];
    let invalid = || ParseValueError::InvalidNumber(input.to_string());
    let number: f64 = digits.parse().map_err(|_| invalid())?;
    let suffix = text[split..].trim();

    let exponent = suffix_exponent(suffix).ok_or_else(|| ParseValueError::UnknownUnit {
        input: input.to_string(),
        unit: suffix.to_string(),
    })?;
    if exponent == 0 {
        return Ok(number);
    }
    if digits.contains(['e', 'E']) {
        return Ok(scale_pow10(number, exponent));
    }
    // Re-parse with the exponent attached so "4.7 nF" equals the literal 4.7e-9.
    format!("{}e{}", digits, exponent).parse().map_err(|_| invalid())
}

fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut end = 0;
    while end < bytes.len() {
        let c = bytes[end];
        let exponent_marker = (c == b'e' || c == b'E')
            && end > 0
            && bytes
                .get(end + 1)
                .map_or(false, |n| n.is_ascii_digit() || *n == b'-' || *n == b'+');
        let sign = (c == b'-' || c == b'+')
            && (end == 0 || bytes[end - 1] == b'e' || bytes[end - 1] == b'E');
        if c.is_ascii_digit() || c == b'.' || exponent_marker || sign {
            end += 1;
        } else {
            break;
        }
    }
    end
}

fn suffix_exponent(suffix: &str) -> Option<i32> {
    const UNITS: [&str; 7] = ["Ω", "ohm", "R", "F", "H", "Hz", "HZ"];
    if suffix.is_empty() || UNITS.contains(&suffix) {
        return Some(0);
    }
    let mut chars = suffix.chars();
    let first = chars.next()?;
    let rest = chars.as_str();
    let exponent = match first {
        'p' => -12,
        'n' => -9,
        'u' | 'µ' | 'μ' => -6,
        'm' => -3,
        'k' | 'K' => 3,
        'M' => 6,
        'G' => 9,
        _ => return None,
    };
    if rest.is_empty() || UNITS.contains(&rest) {
        Some(exponent)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_resistance() {
        assert_eq!(format_value(47_000.0, Unit::Ohm), "47 kΩ");
        assert_eq!(format_value(4.75, Unit::Ohm), "4.75 Ω");
        assert_eq!(format_value(2.2e6, Unit::Ohm), "2.2 MΩ");
        assert_eq!(format_value(0.001, Unit::Ohm), "1 mΩ");
        assert_eq!(format_value(0.0, Unit::Ohm), "0 Ω");
    }

    #[test]
    fn test_format_capacitance() {
        assert_eq!(format_value(4.7e-9, Unit::Farad), "4.7 nF");
        assert_eq!(format_value(100e-9, Unit::Farad), "100 nF");
        assert_eq!(format_value(1e-6, Unit::Farad), "1 µF");
        assert_eq!(format_value(220e-12, Unit::Farad), "220 pF");
        assert_eq!(format_value(5.0, Unit::Farad), "5 F");
    }

    #[test]
    fn test_format_inductance_and_frequency() {
        assert_eq!(format_value(2.2e-6, Unit::Henry), "2.2 µH");
        assert_eq!(format_value(47e-9, Unit::Henry), "47 nH");
        assert_eq!(format_value(32_768.0, Unit::Hertz), "32.768 kHz");
        assert_eq!(format_value(12e6, Unit::Hertz), "12 MHz");
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("4.7 nF").unwrap(), 4.7e-9);
        assert_eq!(parse_value("47k").unwrap(), 47_000.0);
        assert_eq!(parse_value("2.2uH").unwrap(), 2.2e-6);
        assert_eq!(parse_value("10 mΩ").unwrap(), 0.01);
        assert_eq!(parse_value("1e-5").unwrap(), 1e-5);
        assert_eq!(parse_value("12 MHz").unwrap(), 12e6);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_value("  "), Err(ParseValueError::Empty));
        assert!(matches!(parse_value("abc"), Err(ParseValueError::InvalidNumber(_))));
        assert!(matches!(parse_value("4.7 xF"), Err(ParseValueError::UnknownUnit { .. })));
    }

    #[test]
    fn test_round_trip_within_display_precision() {
        for &(value, unit) in &[
            (4.7e-9, Unit::Farad),
            (1.02e3, Unit::Ohm),
            (976_000.0, Unit::Ohm),
            (0.33e-6, Unit::Henry),
        ] {
            let parsed = parse_value(&format_value(value, unit)).unwrap();
            assert!(
                (parsed - value).abs() <= value * 5e-3,
                "{} did not round-trip: got {}",
                value,
                parsed
            );
        }
    }
}
