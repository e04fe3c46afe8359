// Number formatting with en-US display conventions
//
// One fixed locale: thousands grouped with commas, '.' as the decimal
// separator, and a configurable band of fractional digits. Non-finite
// values render as text (NaN, ∞) rather than being rejected - callers
// are not guarded against producing them.

/// Format a value with grouping separators and a fractional-digit band.
///
/// The value is rounded to `max` fractional digits, trailing zeros are
/// trimmed, but never below `min` digits. With the default bounds (0/0)
/// the result is a grouped integer: `format_number(1234.56, 0, 0)` is
/// `"1,235"`.
pub fn format_number(value: f64, max: usize, min: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    // min > max would be a caller bug; saturate rather than panic
    let min = min.min(max);

    // Round through the standard formatter, then regroup the integer part
    let rounded = format!("{value:.max$}");
    let negative = rounded.starts_with('-');
    let unsigned = rounded.trim_start_matches('-');
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (unsigned, ""),
    };

    let mut frac = frac_part.trim_end_matches('0');
    if frac.len() < min {
        frac = &frac_part[..min];
    }

    let mut out = String::with_capacity(unsigned.len() + unsigned.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Insert a comma every three digits, counting from the right.
///
/// `digits` must be a plain digit run (no sign, no separator); the
/// sanitizer and `format_number` both uphold that.
pub fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_grouping() {
        assert_eq!(format_number(0.0, 0, 0), "0");
        assert_eq!(format_number(999.0, 0, 0), "999");
        assert_eq!(format_number(1000.0, 0, 0), "1,000");
        assert_eq!(format_number(1234567.0, 0, 0), "1,234,567");
    }

    #[test]
    fn test_rounds_to_max_digits() {
        assert_eq!(format_number(1.23456, 3, 3), "1.235");
        assert_eq!(format_number(1234.5678, 2, 2), "1,234.57");
    }

    #[test]
    fn test_trims_down_to_min_digits() {
        // max 2 / min 0: the hydration policy for the reference panel
        assert_eq!(format_number(74.6, 2, 0), "74.6");
        assert_eq!(format_number(54000.0, 2, 0), "54,000");
        assert_eq!(format_number(3.14159, 2, 0), "3.14");
    }

    #[test]
    fn test_min_digits_padded() {
        assert_eq!(format_number(1.0, 3, 3), "1.000");
        assert_eq!(format_number(1.5, 3, 3), "1.500");
    }

    #[test]
    fn test_non_finite_render_as_text() {
        assert_eq!(format_number(f64::NAN, 3, 3), "NaN");
        assert_eq!(format_number(f64::INFINITY, 0, 0), "∞");
        assert_eq!(format_number(f64::NEG_INFINITY, 0, 0), "-∞");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(format_number(-1234.5, 1, 1), "-1,234.5");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(""), "");
        assert_eq!(group_digits("12"), "12");
        assert_eq!(group_digits("123"), "123");
        assert_eq!(group_digits("1234"), "1,234");
        assert_eq!(group_digits("1234567"), "1,234,567");
    }
}
