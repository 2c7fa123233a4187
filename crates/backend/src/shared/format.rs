use contracts::shared::indicators::ValueFormat;

/// Shown in place of an indicator that has no value.
pub const NO_DATA: &str = "n/a";

/// Formats an integer with comma thousands separators
///
/// # Examples
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// assert_eq!(format_number(0), "0");
/// ```
pub fn format_number(n: usize) -> String {
    group_thousands(&n.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// `$1,234.50`; negative amounts keep the sign in front of the currency.
pub fn format_money(value: f64, currency: &str, decimals: u8) -> String {
    let text = format!("{:.*}", decimals as usize, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text, None),
    };
    let sign = if value < 0.0 { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{sign}{currency}{}.{f}", group_thousands(&int_part)),
        None => format!("{sign}{currency}{}", group_thousands(&int_part)),
    }
}

/// Ratio in [0, 1] as a percentage: `0.1234` -> `12.34%`.
pub fn format_percent(ratio: f64, decimals: u8) -> String {
    format!("{:.*}%", decimals as usize, ratio * 100.0)
}

/// Renders an indicator value according to its catalogue format.
pub fn format_value(value: Option<f64>, format: &ValueFormat) -> String {
    let Some(v) = value else {
        return NO_DATA.to_string();
    };
    match format {
        ValueFormat::Money { currency, decimals } => format_money(v, currency, *decimals),
        ValueFormat::Number { decimals } => format!("{:.*}", *decimals as usize, v),
        ValueFormat::Percent { decimals } => format_percent(v, *decimals),
        ValueFormat::Integer => format_number(v.round().max(0.0) as usize),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_money_and_percent() {
        assert_eq!(format_money(75.0, "$", 2), "$75.00");
        assert_eq!(format_money(1234.5, "$", 2), "$1,234.50");
        assert_eq!(format_money(-12.0, "$", 0), "-$12");
        assert_eq!(format_percent(1.0, 2), "100.00%");
        assert_eq!(format_percent(0.1234, 1), "12.3%");
    }

    #[test]
    fn test_format_value_missing() {
        assert_eq!(format_value(None, &ValueFormat::Integer), NO_DATA);
        assert_eq!(format_value(Some(3.0), &ValueFormat::Integer), "3");
        assert_eq!(
            format_value(Some(0.5), &ValueFormat::Percent { decimals: 2 }),
            "50.00%"
        );
    }
}
