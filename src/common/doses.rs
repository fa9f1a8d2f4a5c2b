//! Molar dose formatting and parsing
//!
//! Doses are stored as plain molar concentrations (f64). These helpers
//! convert between that representation and the SI-prefixed strings used in
//! exports and data entry ("100 nM", "2.5 µM").

use crate::common::errors::{PlateMapError, PlateResult};

/// SI prefixes accepted for molar concentrations, largest first
const DOSE_UNITS: [(f64, &str); 5] = [
    (1.0, "M"),
    (1e-3, "mM"),
    (1e-6, "µM"),
    (1e-9, "nM"),
    (1e-12, "pM"),
];

/// Round to `digits` significant digits
///
/// Dividing a molar value by an SI scale factor leaves float noise behind
/// (1e-7 / 1e-9 is 99.99999999999999). Twelve significant digits is enough
/// to keep every dose a screening instrument can distinguish while still
/// collapsing that noise.
fn round_sig(value: f64, digits: i32) -> f64 {
    if value == 0.0 {
        return 0.0;
    }
    #[allow(clippy::cast_possible_truncation)]
    let magnitude = value.abs().log10().floor() as i32;
    let factor = 10f64.powi(digits - 1 - magnitude);
    (value * factor).round() / factor
}

/// Format a molar concentration with the largest SI prefix that keeps the
/// number at or above one
///
/// Values below a picomolar fall through to pM rather than growing a femto
/// prefix nobody doses at.
pub fn format_dose(molar: f64) -> String {
    if molar == 0.0 {
        return "0 M".to_string();
    }
    for (scale, unit) in DOSE_UNITS {
        if molar.abs() >= scale {
            return format!("{} {unit}", round_sig(molar / scale, 12));
        }
    }
    let (scale, unit) = DOSE_UNITS[DOSE_UNITS.len() - 1];
    format!("{} {unit}", round_sig(molar / scale, 12))
}

/// Parse a dose string into a molar concentration
///
/// Accepts an optional SI-prefixed unit after the number ("10 nM", "2.5µM",
/// "0.1 M"); a bare number is taken as molar. The micro prefix is accepted
/// as `u`, `µ` (micro sign) or `μ` (Greek mu), since all three show up in
/// pasted data.
pub fn parse_dose(input: &str) -> PlateResult<f64> {
    let trimmed = input.trim();
    let split = trimmed
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(split);
    let value: f64 = number.parse().map_err(|_| PlateMapError::InvalidDose {
        input: input.to_string(),
    })?;
    let scale = match unit.trim() {
        "" | "M" => 1.0,
        "mM" => 1e-3,
        "uM" | "µM" | "μM" => 1e-6,
        "nM" => 1e-9,
        "pM" => 1e-12,
        _ => {
            return Err(PlateMapError::InvalidDose {
                input: input.to_string(),
            });
        }
    };
    Ok(value * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "0 M")]
    #[case(1.0, "1 M")]
    #[case(0.5, "500 mM")]
    #[case(2.5e-6, "2.5 µM")]
    #[case(1e-7, "100 nM")]
    #[case(3e-9, "3 nM")]
    #[case(1e-12, "1 pM")]
    #[case(5e-13, "0.5 pM")]
    fn test_format_dose(#[case] molar: f64, #[case] expected: &str) {
        assert_eq!(format_dose(molar), expected);
    }

    #[rstest]
    #[case("100 nM", 1e-7)]
    #[case("2.5µM", 2.5e-6)]
    #[case("2.5 uM", 2.5e-6)]
    #[case("2.5μM", 2.5e-6)]
    #[case("500 mM", 0.5)]
    #[case("10", 10.0)]
    #[case("1e-3 M", 1e-3)]
    #[case("0 M", 0.0)]
    fn test_parse_dose(#[case] input: &str, #[case] expected: f64) {
        let parsed = parse_dose(input).unwrap();
        assert!(
            (parsed - expected).abs() <= expected.abs() * 1e-12,
            "parsed {parsed} from '{input}', expected {expected}"
        );
    }

    #[rstest]
    #[case("")]
    #[case("fast")]
    #[case("10 kM")]
    #[case("nM")]
    fn test_parse_dose_rejects_junk(#[case] input: &str) {
        assert!(matches!(
            parse_dose(input),
            Err(PlateMapError::InvalidDose { .. })
        ));
    }

    #[test]
    fn test_format_survives_a_parse_round_trip() {
        for text in ["100 nM", "2.5 µM", "1 M", "750 pM"] {
            assert_eq!(format_dose(parse_dose(text).unwrap()), text);
        }
    }
}
