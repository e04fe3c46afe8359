// Input sanitization for the amount field
//
// Raw keyboard input is free text; the formulas want a canonical
// non-negative integer. Canonical form: digits only, no leading zeros,
// empty input coerced to "0". The display form adds thousands
// separators; re-sanitizing an echoed string must reproduce the same
// canonical value.

use crate::format::group_digits;
use regex::Regex;
use std::sync::LazyLock;

static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]+").expect("static pattern"));
static LEADING_ZEROS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0+").expect("static pattern"));

/// Reduce raw field text to its canonical digit string.
pub fn canonical(raw: &str) -> String {
    let digits = NON_DIGITS.replace_all(raw, "");
    let trimmed = LEADING_ZEROS.replace(&digits, "");
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.into_owned()
    }
}

/// Thousand-separated echo of a canonical digit string, written back
/// into the input field.
pub fn echo(canonical: &str) -> String {
    group_digits(canonical)
}

/// Canonical value as a number, for the metric formulas.
pub fn amount(canonical: &str) -> f64 {
    canonical.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_non_digits_and_leading_zeros() {
        assert_eq!(canonical("00120abc"), "120");
        assert_eq!(canonical("1,234,567"), "1234567");
        assert_eq!(canonical("  42 € "), "42");
    }

    #[test]
    fn test_empty_input_coerces_to_zero() {
        assert_eq!(canonical(""), "0");
        assert_eq!(canonical("abc"), "0");
        assert_eq!(canonical("000"), "0");
    }

    #[test]
    fn test_echo_round_trip_is_idempotent() {
        for raw in ["00120abc", "1234567", "", "9", "0001000"] {
            let first = canonical(raw);
            let second = canonical(&echo(&first));
            assert_eq!(first, second, "round trip diverged for {raw:?}");
        }
    }

    #[test]
    fn test_echo_formats_with_separators() {
        assert_eq!(echo("1234567"), "1,234,567");
        assert_eq!(echo("0"), "0");
    }

    #[test]
    fn test_amount_parses_canonical_value() {
        assert_eq!(amount("120"), 120.0);
        assert_eq!(amount("0"), 0.0);
    }
}
