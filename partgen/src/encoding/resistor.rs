//! Resistance code grammars.

use serde::{Deserialize, Serialize};

use super::{in_unit, r_notation, significand, split_decimal, EncodingError};
use crate::values::scale_pow10;

/// Trailing-zero policy for [`letter_decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimPolicy {
    /// Always three significant digits (`4R70`, `47K5`, `1M00`). Vishay.
    Never,
    /// Trailing zeros dropped (`4K7`, `10R`, `1M`). Yageo.
    Always,
    /// Ohm range trimmed, kilo/mega ranges fixed at three digits. SEI.
    OhmsOnly,
}

fn out_of_range(scheme: &'static str, value: f64) -> EncodingError {
    EncodingError::OutOfRange { scheme, value }
}

/// Panasonic ERJ codes.
///
/// With 3 digits: `{ww}R{d}` below 100 Ω, otherwise a 3-digit significand and
/// a multiplier digit (`1002` = 10 kΩ). With 2 digits: `R00` jumper, `R{dd}`
/// below 1 Ω, `{w}R{d}` below 10 Ω, otherwise a 2-digit significand and a
/// multiplier digit (`473` = 47 kΩ).
pub fn decade_significant(value: f64, digits: u32) -> Result<String, EncodingError> {
    const SCHEME: &str = "decade-significant";
    match digits {
        3 => {
            if value < 100.0 {
                if value < 1.0 {
                    return Err(out_of_range(SCHEME, value));
                }
                let (whole, tenth) = split_decimal(value, 1);
                return Ok(format!("{:02}R{}", whole, tenth));
            }
            multiplier_code(value, 3).ok_or_else(|| out_of_range(SCHEME, value))
        }
        2 => {
            if value == 0.0 {
                return Ok("R00".to_string());
            }
            if value < 1.0 {
                let (_, hundredths) = split_decimal(value, 2);
                return Ok(format!("R{:02}", hundredths));
            }
            if value < 10.0 {
                return Ok(r_notation(value));
            }
            multiplier_code(value, 2).ok_or_else(|| out_of_range(SCHEME, value))
        }
        _ => Err(out_of_range(SCHEME, value)),
    }
}

fn multiplier_code(value: f64, digits: u32) -> Option<String> {
    let (sig, exp) = significand(value, digits);
    if !(0..=9).contains(&exp) {
        return None;
    }
    Some(format!("{}{}", sig, exp))
}

/// Panasonic ERA thin film: `47R5`, `470` (47 Ω), `101` (100 Ω), `4751`.
pub fn compact_integer(value: f64) -> Result<String, EncodingError> {
    const SCHEME: &str = "compact-integer";
    if value < 1.0 {
        return Err(out_of_range(SCHEME, value));
    }
    if value < 100.0 {
        let (whole, tenth) = split_decimal(value, 1);
        return Ok(if tenth == 0 {
            format!("{:02}0", whole)
        } else {
            format!("{:02}R{}", whole, tenth)
        });
    }
    let (sig, exp) = significand(value, 3);
    let (sig, exp) = if sig % 10 == 0 { (sig / 10, exp + 1) } else { (sig, exp) };
    if exp > 9 {
        return Err(out_of_range(SCHEME, value));
    }
    Ok(format!("{}{}", sig, exp))
}

/// Letter in place of the decimal point: `R` below 1 kΩ, `K` below 1 MΩ,
/// `M` above.
pub fn letter_decimal(value: f64, trim: TrimPolicy) -> Result<String, EncodingError> {
    if value <= 0.0 {
        return Err(out_of_range("letter-decimal", value));
    }
    let (letter, exp) = if value < 1_000.0 {
        ('R', 0)
    } else if value < 1_000_000.0 {
        ('K', 3)
    } else {
        ('M', 6)
    };
    let scaled = scale_pow10(value, -exp);
    let trimmed = match trim {
        TrimPolicy::Always => true,
        TrimPolicy::Never => false,
        TrimPolicy::OhmsOnly => letter == 'R',
    };
    Ok(if trimmed {
        let (whole, hundredths) = split_decimal(scaled, 2);
        let fraction = format!("{:02}", hundredths);
        format!("{}{}{}", whole, letter, fraction.trim_end_matches('0'))
    } else {
        fixed_three_digits(scaled, letter)
    })
}

fn fixed_three_digits(scaled: f64, letter: char) -> String {
    let places = if scaled < 10.0 {
        2
    } else if scaled < 100.0 {
        1
    } else {
        0
    };
    let (whole, fraction) = split_decimal(scaled, places);
    if places == 0 {
        format!("{}{}", whole, letter)
    } else {
        format!("{}{}{:0width$}", whole, letter, fraction, width = places as usize)
    }
}

/// ROHM current-sense codes: milliohms with `L` as the decimal point.
pub fn milliohm(value: f64) -> Result<String, EncodingError> {
    if value <= 0.0 || value >= 1.0 {
        return Err(out_of_range("milliohm", value));
    }
    Ok(fixed_three_digits(in_unit(value, -3), 'L'))
}

/// Two significant digits, truncated, followed by the power of ten
/// (`103` = 10 kΩ). Values below 10 Ω have no representation.
pub fn significant_power(value: f64) -> Result<String, EncodingError> {
    if value < 10.0 {
        return Err(out_of_range("significant-power", value));
    }
    let power = value.log10().floor() as i32 - 1;
    let sig = (scale_pow10(value, -power) + 1e-9).floor() as u64;
    let (sig, power) = if sig >= 100 { (sig / 10, power + 1) } else { (sig, power) };
    if power > 9 {
        return Err(out_of_range("significant-power", value));
    }
    Ok(format!("{}{}", sig, power))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decade_significant_two_digit() {
        assert_eq!(decade_significant(4.7, 2).unwrap(), "4R7");
        assert_eq!(decade_significant(0.0, 2).unwrap(), "R00");
        assert_eq!(decade_significant(0.22, 2).unwrap(), "R22");
        assert_eq!(decade_significant(0.1, 2).unwrap(), "R10");
        assert_eq!(decade_significant(0.05, 2).unwrap(), "R05");
        assert_eq!(decade_significant(47.0, 2).unwrap(), "470");
        assert_eq!(decade_significant(100.0, 2).unwrap(), "101");
        assert_eq!(decade_significant(47_000.0, 2).unwrap(), "473");
        assert_eq!(decade_significant(1_000_000.0, 2).unwrap(), "105");
    }

    #[test]
    fn test_decade_significant_three_digit() {
        assert_eq!(decade_significant(10.2, 3).unwrap(), "10R2");
        assert_eq!(decade_significant(100.0, 3).unwrap(), "1000");
        assert_eq!(decade_significant(4_750.0, 3).unwrap(), "4751");
        assert_eq!(decade_significant(47_000.0, 3).unwrap(), "4702");
        assert_eq!(decade_significant(1_000_000.0, 3).unwrap(), "1004");
        assert!(decade_significant(0.5, 3).is_err());
        assert!(decade_significant(10.0, 4).is_err());
    }

    #[test]
    fn test_compact_integer() {
        assert_eq!(compact_integer(47.0).unwrap(), "470");
        assert_eq!(compact_integer(47.5).unwrap(), "47R5");
        assert_eq!(compact_integer(100.0).unwrap(), "101");
        assert_eq!(compact_integer(4_750.0).unwrap(), "4751");
        assert_eq!(compact_integer(47_000.0).unwrap(), "473");
        assert_eq!(compact_integer(100_000.0).unwrap(), "104");
    }

    #[test]
    fn test_letter_decimal_yageo() {
        let t = TrimPolicy::Always;
        assert_eq!(letter_decimal(10.0, t).unwrap(), "10R");
        assert_eq!(letter_decimal(4.7, t).unwrap(), "4R7");
        assert_eq!(letter_decimal(4_700.0, t).unwrap(), "4K7");
        assert_eq!(letter_decimal(4_750.0, t).unwrap(), "4K75");
        assert_eq!(letter_decimal(475_000.0, t).unwrap(), "475K");
        assert_eq!(letter_decimal(2_200_000.0, t).unwrap(), "2M2");
    }

    #[test]
    fn test_letter_decimal_vishay() {
        let t = TrimPolicy::Never;
        assert_eq!(letter_decimal(4.7, t).unwrap(), "4R70");
        assert_eq!(letter_decimal(47.5, t).unwrap(), "47R5");
        assert_eq!(letter_decimal(470.0, t).unwrap(), "470R");
        assert_eq!(letter_decimal(4_700.0, t).unwrap(), "4K70");
        assert_eq!(letter_decimal(47_500.0, t).unwrap(), "47K5");
        assert_eq!(letter_decimal(10_000_000.0, t).unwrap(), "10M0");
    }

    #[test]
    fn test_letter_decimal_stackpole() {
        let t = TrimPolicy::OhmsOnly;
        assert_eq!(letter_decimal(10.0, t).unwrap(), "10R");
        assert_eq!(letter_decimal(4_700.0, t).unwrap(), "4K70");
        assert_eq!(letter_decimal(47_000.0, t).unwrap(), "47K0");
        assert_eq!(letter_decimal(1_000_000.0, t).unwrap(), "1M00");
    }

    #[test]
    fn test_milliohm() {
        assert_eq!(milliohm(0.001).unwrap(), "1L00");
        assert_eq!(milliohm(0.01).unwrap(), "10L0");
        assert!(milliohm(1.5).is_err());
    }

    #[test]
    fn test_significant_power() {
        assert_eq!(significant_power(10_000.0).unwrap(), "103");
        assert_eq!(significant_power(4_700_000.0).unwrap(), "475");
        assert_eq!(significant_power(51_000_000.0).unwrap(), "516");
        assert!(significant_power(4.7).is_err());
    }
}
