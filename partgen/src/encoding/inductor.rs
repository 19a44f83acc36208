//! Inductance code grammars that do not follow the EIA layout.
//!
//! Coilcraft and Bourns inductors use plain EIA codes (see
//! [`super::capacitor::eia`]); Würth Elektronik has its own.

use super::{in_unit, EncodingError};

/// Würth Elektronik code, counted in microhenries:
///
/// | range          | code             | example          |
/// |----------------|------------------|------------------|
/// | below 1 µH     | `00` + µH × 100  | 0.33 µH → `0033` |
/// | 1 to 10 µH     | `0` + µH × 10    | 2.2 µH → `022`   |
/// | 10 to 100 µH   | µH × 10          | 47 µH → `470`    |
/// | 100 to 1000 µH | µH / 10 + `1`    | 330 µH → `331`   |
pub fn wurth(value: f64) -> Result<String, EncodingError> {
    let micro = in_unit(value, -6);
    let code = if micro <= 0.0 || micro >= 1_000.0 {
        return Err(EncodingError::OutOfRange {
            scheme: "wurth",
            value,
        });
    } else if micro < 1.0 {
        format!("00{:02}", (micro * 100.0).round() as u64)
    } else if micro < 10.0 {
        format!("0{:02}", (micro * 10.0).round() as u64)
    } else if micro < 100.0 {
        format!("{}", (micro * 10.0).round() as u64)
    } else {
        format!("{}1", (micro / 10.0).round() as u64)
    };
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wurth_bands() {
        assert_eq!(wurth(0.33e-6).unwrap(), "0033");
        assert_eq!(wurth(1e-6).unwrap(), "010");
        assert_eq!(wurth(2.2e-6).unwrap(), "022");
        assert_eq!(wurth(10e-6).unwrap(), "100");
        assert_eq!(wurth(47e-6).unwrap(), "470");
        assert_eq!(wurth(100e-6).unwrap(), "101");
        assert_eq!(wurth(330e-6).unwrap(), "331");
    }

    #[test]
    fn test_wurth_rejects_millihenry() {
        assert!(wurth(1e-3).is_err());
    }
}
