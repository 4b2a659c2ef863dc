//! Formatting helpers for presenting statistics.

/// Fixed-point rendering with ties rounded away from zero; `-0.00` prints as `0.00`.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    let value = if rounded.is_finite() { rounded } else { value };
    let text = format!("{value:.decimals$}");
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

pub fn format_improvement(value: f64) -> String {
    format_fixed(value, 2)
}

/// Shortest plain rendering (`7`, `7.5`), used for raw stored values.
pub fn format_plain(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Whole seconds, rounded half away from zero.
pub fn format_seconds(value: f64) -> String {
    format_fixed(value.round(), 0)
}

/// Swap ASCII digits for Eastern Arabic-Indic ones when the language is Arabic.
pub fn localize_digits(text: &str, lang: &str) -> String {
    if !lang.starts_with("ar") {
        return text.to_string();
    }
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => char::from_u32(0x0660 + d).unwrap_or(c),
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_formatting_matches_two_decimals() {
        assert_eq!(format_improvement(5.0 / 3.0), "1.67");
        assert_eq!(format_improvement(-1.0), "-1.00");
        assert_eq!(format_improvement(-0.001), "0.00");
        assert_eq!(format_improvement(f64::NAN), "0.00");
    }

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(format_improvement(0.125), "0.13");
        assert_eq!(format_improvement(0.625), "0.63");
        assert_eq!(format_improvement(-0.125), "-0.13");
        assert_eq!(format_fixed(2.5, 0), "3");
        // one +1 session among eight
        assert_eq!(format_improvement(1.0 / 8.0), "0.13");
    }

    #[test]
    fn plain_values_drop_trailing_zeros() {
        assert_eq!(format_plain(7.0), "7");
        assert_eq!(format_plain(7.5), "7.5");
        assert_eq!(format_plain(-0.0), "0");
        assert_eq!(format_plain(-3.0), "-3");
    }

    #[test]
    fn seconds_round_half_away_from_zero() {
        assert_eq!(format_seconds(52.5), "53");
        assert_eq!(format_seconds(52.4), "52");
        assert_eq!(format_seconds(0.0), "0");
    }

    #[test]
    fn digits_are_localized_for_arabic_only() {
        assert_eq!(localize_digits("432 Hz: 1.50", "ar-SA"), "٤٣٢ Hz: ١.٥٠");
        assert_eq!(localize_digits("432 Hz", "tr-TR"), "432 Hz");
    }
}
