//! Manufacturer part-number encoding.
//!
//! Every manufacturer grammar is a variant of the closed [`EncodingScheme`]
//! enum. A scheme turns a numeric value into the value-code fragment of a
//! part number; [`EncodingScheme::encode`] then splices that fragment between
//! the series prefix and the tolerance, characteristic and packaging codes:
//!
//! ```text
//!   ERJ-2RKF   1002           X            GCM155R71H 221   K   A37  D
//!   └prefix┘   └code┘ └packaging┘          └─prefix─┘ └code┘ └tol┘ └char┘ └pkg┘
//! ```
//!
//! Schemes are pure: the same value and context always produce the same
//! identifier. The only scheme that consults more than the value is
//! [`EncodingScheme::IndexOffset`], which needs the declared value list.

pub mod capacitor;
pub mod catalog_index;
pub mod inductor;
pub mod resistor;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::family::ComponentFamily;
use crate::values::{normalize, scale_pow10};

pub use capacitor::EiaUnit;
pub use resistor::TrimPolicy;

#[derive(Debug, Error, PartialEq)]
pub enum EncodingError {
    #[error("Value {value} is outside the range of the {scheme} code")]
    OutOfRange { scheme: &'static str, value: f64 },
    #[error("Value {value} is not in the declared value list")]
    ValueNotDeclared { value: f64 },
    #[error("No encoding scheme known for manufacturer '{manufacturer}' ({family})")]
    UnknownManufacturer {
        manufacturer: String,
        family: ComponentFamily,
    },
}

/// Closed set of value-code grammars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum EncodingScheme {
    /// Significand plus decade multiplier digit with `R` notation below the
    /// first multiplier band (Panasonic ERJ; `digits` is 2 or 3).
    DecadeSignificant { digits: u32 },
    /// Panasonic ERA thin film: 3 digits, collapsing to 2 when the third is 0.
    CompactInteger,
    /// Unit letter as decimal point (`4K7`, `470R`, `1M00`).
    LetterDecimal { trim: TrimPolicy },
    /// Milliohm value with `L` as decimal point (ROHM current sense).
    Milliohm,
    /// Two truncated significant digits plus power of ten (NTC thermistors,
    /// high voltage chips).
    SignificantPower,
    /// EIA three-character code counted in `unit` (`104` = 100 nF).
    Eia { unit: EiaUnit },
    /// EIA microfarad code, prefixed by the rated voltage in `R` notation.
    Supercapacitor {
        #[serde(default)]
        rated_voltage: Option<f64>,
    },
    /// Würth Elektronik microhenry code.
    Wurth,
    /// Formatted value embedded verbatim (`12.000MHZ`).
    Direct {
        scale_exponent: i32,
        decimals: usize,
        #[serde(default)]
        unit_suffix: String,
    },
    /// Position in the declared value list plus `base`, zero padded.
    IndexOffset { base: u32, width: usize },
    /// The prefix is already the complete part number.
    Fixed,
}

/// Everything around the value code that makes up an identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeContext<'a> {
    pub prefix: &'a str,
    pub separator: &'a str,
    pub tolerance_code: &'a str,
    pub characteristic: &'a str,
    pub packaging: &'a str,
    /// Ordered value list of the series; only index-offset codes read it.
    pub declared_values: &'a [f64],
}

impl EncodingScheme {
    pub fn name(&self) -> &'static str {
        match self {
            EncodingScheme::DecadeSignificant { .. } => "decade-significant",
            EncodingScheme::CompactInteger => "compact-integer",
            EncodingScheme::LetterDecimal { .. } => "letter-decimal",
            EncodingScheme::Milliohm => "milliohm",
            EncodingScheme::SignificantPower => "significant-power",
            EncodingScheme::Eia { .. } => "eia",
            EncodingScheme::Supercapacitor { .. } => "supercapacitor",
            EncodingScheme::Wurth => "wurth",
            EncodingScheme::Direct { .. } => "direct",
            EncodingScheme::IndexOffset { .. } => "index-offset",
            EncodingScheme::Fixed => "fixed",
        }
    }

    /// Value-code fragment for `value`.
    pub fn value_code(&self, value: f64, declared_values: &[f64]) -> Result<String, EncodingError> {
        if !value.is_finite() || value < 0.0 {
            return Err(EncodingError::OutOfRange {
                scheme: self.name(),
                value,
            });
        }
        // Absorb representation error before any band threshold is compared.
        let value = normalize(value, 12);
        match self {
            EncodingScheme::DecadeSignificant { digits } => {
                resistor::decade_significant(value, *digits)
            }
            EncodingScheme::CompactInteger => resistor::compact_integer(value),
            EncodingScheme::LetterDecimal { trim } => resistor::letter_decimal(value, *trim),
            EncodingScheme::Milliohm => resistor::milliohm(value),
            EncodingScheme::SignificantPower => resistor::significant_power(value),
            EncodingScheme::Eia { unit } => capacitor::eia(value, *unit),
            EncodingScheme::Supercapacitor { rated_voltage } => {
                capacitor::supercapacitor(value, *rated_voltage)
            }
            EncodingScheme::Wurth => inductor::wurth(value),
            EncodingScheme::Direct {
                scale_exponent,
                decimals,
                unit_suffix,
            } => Ok(catalog_index::direct(value, *scale_exponent, *decimals, unit_suffix)),
            EncodingScheme::IndexOffset { base, width } => {
                catalog_index::index_offset(value, declared_values, *base, *width)
            }
            EncodingScheme::Fixed => Ok(String::new()),
        }
    }

    /// Full identifier: prefix, separator, value code, tolerance code,
    /// characteristic code, packaging suffix.
    pub fn encode(&self, value: f64, ctx: &EncodeContext<'_>) -> Result<String, EncodingError> {
        let code = self.value_code(value, ctx.declared_values)?;
        let mut identifier = String::with_capacity(
            ctx.prefix.len() + ctx.separator.len() + code.len() + ctx.packaging.len() + 8,
        );
        identifier.push_str(ctx.prefix);
        if !code.is_empty() {
            identifier.push_str(ctx.separator);
            identifier.push_str(&code);
        }
        identifier.push_str(ctx.tolerance_code);
        identifier.push_str(ctx.characteristic);
        identifier.push_str(ctx.packaging);
        Ok(identifier)
    }
}

/// Default scheme for a manufacturer's series when the series does not name
/// one explicitly.
pub fn default_scheme(
    manufacturer: &str,
    family: ComponentFamily,
    prefix: &str,
) -> Result<EncodingScheme, EncodingError> {
    use ComponentFamily::*;

    let maker = manufacturer.trim().to_lowercase();
    let prefix = prefix.trim().to_uppercase();
    let unknown = || EncodingError::UnknownManufacturer {
        manufacturer: manufacturer.to_string(),
        family,
    };

    let scheme = match family {
        Resistor if maker.starts_with("panasonic") => {
            if prefix.starts_with("ERA-") {
                EncodingScheme::CompactInteger
            } else if is_erj_two_digit(&prefix) {
                EncodingScheme::DecadeSignificant { digits: 2 }
            } else {
                EncodingScheme::DecadeSignificant { digits: 3 }
            }
        }
        Resistor if maker.starts_with("yageo") => EncodingScheme::LetterDecimal {
            trim: TrimPolicy::Always,
        },
        Resistor if maker.starts_with("vishay") => EncodingScheme::LetterDecimal {
            trim: TrimPolicy::Never,
        },
        Resistor if maker.contains("stackpole") => EncodingScheme::LetterDecimal {
            trim: if prefix.starts_with("RNCF") {
                TrimPolicy::Never
            } else {
                TrimPolicy::OhmsOnly
            },
        },
        Resistor if maker.starts_with("rohm") => EncodingScheme::Milliohm,
        Resistor if maker.starts_with("bourns") => EncodingScheme::SignificantPower,
        Thermistor if maker.starts_with("murata") => EncodingScheme::SignificantPower,
        Capacitor
            if ["murata", "tdk", "samsung", "kemet", "taiyo"]
                .iter()
                .any(|m| maker.starts_with(m)) =>
        {
            EncodingScheme::Eia {
                unit: EiaUnit::Picofarad,
            }
        }
        Supercapacitor => EncodingScheme::Supercapacitor {
            rated_voltage: None,
        },
        Inductor | CoupledInductor if maker.starts_with("coilcraft") => EncodingScheme::Eia {
            unit: EiaUnit::Nanohenry,
        },
        CoupledInductor if maker.starts_with("bourns") => EncodingScheme::Eia {
            unit: EiaUnit::Microhenry,
        },
        Inductor if is_wurth(&maker) => EncodingScheme::Wurth,
        Inductor if maker.starts_with("murata") || maker.starts_with("taiyo") => {
            EncodingScheme::Fixed
        }
        FerriteBead => EncodingScheme::Fixed,
        Crystal => EncodingScheme::Direct {
            scale_exponent: 6,
            decimals: 3,
            unit_suffix: "MHZ".to_string(),
        },
        _ => return Err(unknown()),
    };
    Ok(scheme)
}

fn is_erj_two_digit(prefix: &str) -> bool {
    ["ERJ-2GE", "ERJ-3GEY", "ERJ-6GEY", "ERJ-6DQ"]
        .iter()
        .any(|p| prefix.starts_with(p))
}

fn is_wurth(maker: &str) -> bool {
    maker.starts_with("würth") || maker.starts_with("wurth") || maker.starts_with("we ")
}

/// `value` as `significand * 10^exponent` with exactly `digits` digits in the
/// significand, rounding half away from zero.
pub(crate) fn significand(value: f64, digits: u32) -> (u64, i32) {
    if value <= 0.0 || !value.is_finite() {
        return (0, 0);
    }
    let upper = 10u64.pow(digits);
    let mut exponent = value.log10().floor() as i32 - (digits as i32 - 1);
    loop {
        let sig = scale_pow10(value, -exponent).round() as u64;
        if sig >= upper {
            exponent += 1;
        } else if sig < upper / 10 {
            exponent -= 1;
        } else {
            return (sig, exponent);
        }
    }
}

/// Whole and fractional parts of `value` at `places` decimal places.
pub(crate) fn split_decimal(value: f64, places: u32) -> (u64, u64) {
    let unit = 10u64.pow(places);
    let total = scale_pow10(value, places as i32).round() as u64;
    (total / unit, total % unit)
}

/// `value` counted in units of `10^exp`, snapped to 12 significant digits.
pub(crate) fn in_unit(value: f64, exp: i32) -> f64 {
    normalize(scale_pow10(value, -exp), 12)
}

/// `R` notation ("4R7") for a value below ten at one decimal place.
pub(crate) fn r_notation(value: f64) -> String {
    let (whole, tenth) = split_decimal(value, 1);
    format!("{}R{}", whole, tenth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_significand() {
        assert_eq!(significand(47_000.0, 3), (470, 2));
        assert_eq!(significand(4.7e-9 * 1e12, 2), (47, 2));
        assert_eq!(significand(9.996, 3), (100, -1));
        assert_eq!(significand(100.0, 2), (10, 1));
    }

    #[test]
    fn test_compose_identifier() {
        let scheme = EncodingScheme::Eia {
            unit: EiaUnit::Picofarad,
        };
        let ctx = EncodeContext {
            prefix: "GCM155R71H",
            tolerance_code: "K",
            characteristic: "A37",
            packaging: "D",
            ..Default::default()
        };
        assert_eq!(scheme.encode(220e-12, &ctx).unwrap(), "GCM155R71H221KA37D");
    }

    #[test]
    fn test_separator_only_around_value_code() {
        let ctx = EncodeContext {
            prefix: "XAL4020",
            separator: "-",
            packaging: "ME",
            ..Default::default()
        };
        let coilcraft = EncodingScheme::Eia {
            unit: EiaUnit::Nanohenry,
        };
        assert_eq!(coilcraft.encode(2.2e-6, &ctx).unwrap(), "XAL4020-222ME");

        let fixed_ctx = EncodeContext {
            prefix: "LQG15HS47NJ02D",
            separator: "-",
            ..Default::default()
        };
        assert_eq!(EncodingScheme::Fixed.encode(47e-9, &fixed_ctx).unwrap(), "LQG15HS47NJ02D");
    }

    #[test]
    fn test_default_scheme_registry() {
        assert_eq!(
            default_scheme("Panasonic", ComponentFamily::Resistor, "ERJ-2GEJ").unwrap(),
            EncodingScheme::DecadeSignificant { digits: 2 }
        );
        assert_eq!(
            default_scheme("Panasonic", ComponentFamily::Resistor, "ERJ-3EKF").unwrap(),
            EncodingScheme::DecadeSignificant { digits: 3 }
        );
        assert_eq!(
            default_scheme("Panasonic", ComponentFamily::Resistor, "ERA-2AEB").unwrap(),
            EncodingScheme::CompactInteger
        );
        assert_eq!(
            default_scheme("SEI Stackpole", ComponentFamily::Resistor, "RNCF0603TKY").unwrap(),
            EncodingScheme::LetterDecimal {
                trim: TrimPolicy::Never
            }
        );
        assert_eq!(
            default_scheme("Würth Elektronik", ComponentFamily::Inductor, "74404042").unwrap(),
            EncodingScheme::Wurth
        );
        assert_eq!(
            default_scheme("Acme", ComponentFamily::Resistor, "X"),
            Err(EncodingError::UnknownManufacturer {
                manufacturer: "Acme".to_string(),
                family: ComponentFamily::Resistor,
            })
        );
    }

    #[test]
    fn test_negative_value_rejected() {
        let err = EncodingScheme::Wurth.value_code(-1.0, &[]).unwrap_err();
        assert!(matches!(err, EncodingError::OutOfRange { .. }));
    }
}
