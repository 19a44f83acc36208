//! Encodings that are not value-derived grammars: the formatted value copied
//! verbatim, and sequential catalog indices.

use super::{in_unit, EncodingError};
use crate::values::position_of;

/// Value scaled by `10^-scale_exponent`, printed with `decimals` places and
/// followed by `unit_suffix` (`12e6` Hz, 6, 3, "MHZ" gives `12.000MHZ`).
pub fn direct(value: f64, scale_exponent: i32, decimals: usize, unit_suffix: &str) -> String {
    format!("{:.*}{}", decimals, in_unit(value, scale_exponent), unit_suffix)
}

/// Index of `value` in `declared` plus `base`, zero padded to `width`.
///
/// Fails when `value` is not one of the declared values; there is no code
/// to fall back to.
pub fn index_offset(
    value: f64,
    declared: &[f64],
    base: u32,
    width: usize,
) -> Result<String, EncodingError> {
    let index = position_of(declared, value).ok_or(EncodingError::ValueNotDeclared { value })?;
    Ok(format!("{:0width$}", base as usize + index, width = width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_crystal_frequency() {
        assert_eq!(direct(12e6, 6, 3, "MHZ"), "12.000MHZ");
        assert_eq!(direct(32.768e3, 3, 3, "KHZ"), "32.768KHZ");
    }

    #[test]
    fn test_index_offset() {
        let declared = [1.0e-6, 2.2e-6, 3.3e-6, 4.7e-6];
        assert_eq!(index_offset(1.0e-6, &declared, 1, 3).unwrap(), "001");
        assert_eq!(index_offset(4.7e-6, &declared, 1, 3).unwrap(), "004");
        assert_eq!(index_offset(3.3e-6, &declared, 10, 2).unwrap(), "12");
    }

    #[test]
    fn test_index_offset_unknown_value() {
        let declared = [1.0e-6, 2.2e-6];
        assert_eq!(
            index_offset(6.8e-6, &declared, 1, 3),
            Err(EncodingError::ValueNotDeclared { value: 6.8e-6 })
        );
    }
}
