//! EIA value codes and the supercapacitor variant.

use serde::{Deserialize, Serialize};

use super::{in_unit, r_notation, significand, EncodingError};

/// Base unit an EIA code counts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EiaUnit {
    Picofarad,
    Microfarad,
    Nanohenry,
    Microhenry,
}

impl EiaUnit {
    fn exponent(self) -> i32 {
        match self {
            EiaUnit::Picofarad => -12,
            EiaUnit::Microfarad => -6,
            EiaUnit::Nanohenry => -9,
            EiaUnit::Microhenry => -6,
        }
    }
}

/// Three-character EIA code: `R` notation below 10 units, otherwise two
/// significant digits followed by the number of zeros (`221` = 220 pF,
/// `104` = 100 nF, `222` = 2.2 µH counted in nH).
pub fn eia(value: f64, unit: EiaUnit) -> Result<String, EncodingError> {
    let counted = in_unit(value, unit.exponent());
    eia_count(counted).ok_or(EncodingError::OutOfRange { scheme: "eia", value })
}

fn eia_count(counted: f64) -> Option<String> {
    if counted <= 0.0 {
        return None;
    }
    if counted < 10.0 {
        return Some(r_notation(counted));
    }
    let (sig, zeros) = significand(counted, 2);
    if zeros > 9 {
        return None;
    }
    Some(format!("{}{}", sig, zeros))
}

/// Supercapacitor code: optional rated voltage in `R` notation (`2R7`)
/// followed by the EIA capacitance code in microfarads (`505` = 5 F).
pub fn supercapacitor(value: f64, rated_voltage: Option<f64>) -> Result<String, EncodingError> {
    let out_of_range = || EncodingError::OutOfRange {
        scheme: "supercapacitor",
        value,
    };
    let capacitance = eia_count(in_unit(value, -6)).ok_or_else(out_of_range)?;
    match rated_voltage {
        Some(volts) if volts > 0.0 && volts < 10.0 => {
            Ok(format!("{}{}", r_notation(volts), capacitance))
        }
        Some(_) => Err(out_of_range()),
        None => Ok(capacitance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eia_picofarad() {
        assert_eq!(eia(4.7e-12, EiaUnit::Picofarad).unwrap(), "4R7");
        assert_eq!(eia(10e-12, EiaUnit::Picofarad).unwrap(), "100");
        assert_eq!(eia(220e-12, EiaUnit::Picofarad).unwrap(), "221");
        assert_eq!(eia(100e-9, EiaUnit::Picofarad).unwrap(), "104");
        assert_eq!(eia(4.7e-6, EiaUnit::Picofarad).unwrap(), "475");
        assert_eq!(eia(22e-6, EiaUnit::Picofarad).unwrap(), "226");
    }

    #[test]
    fn test_eia_inductance_units() {
        assert_eq!(eia(0.22e-6, EiaUnit::Nanohenry).unwrap(), "221");
        assert_eq!(eia(2.2e-6, EiaUnit::Nanohenry).unwrap(), "222");
        assert_eq!(eia(10e-6, EiaUnit::Nanohenry).unwrap(), "103");
        assert_eq!(eia(10e-6, EiaUnit::Microhenry).unwrap(), "100");
        assert_eq!(eia(6.5e-3, EiaUnit::Microhenry).unwrap(), "652");
    }

    #[test]
    fn test_eia_zero_rejected() {
        assert!(eia(0.0, EiaUnit::Picofarad).is_err());
    }

    #[test]
    fn test_supercapacitor() {
        assert_eq!(supercapacitor(5.0, Some(2.7)).unwrap(), "2R7505");
        assert_eq!(supercapacitor(1.0, Some(2.7)).unwrap(), "2R7105");
        assert_eq!(supercapacitor(0.22, None).unwrap(), "224");
        assert!(supercapacitor(1.0, Some(16.0)).is_err());
    }
}
