/// Arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Rounds to one decimal place, half away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Renders a value with one decimal, or `--` when there is none.
pub fn format_one_decimal(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}"),
        None => "--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[6.0, 8.0]), Some(7.0));
    }

    #[test]
    fn test_round_one_decimal() {
        assert_eq!(round_one_decimal(7.25), 7.3);
        assert_eq!(round_one_decimal(6.04), 6.0);
        assert_eq!(round_one_decimal(10.0), 10.0);
    }

    #[test]
    fn test_format_one_decimal() {
        assert_eq!(format_one_decimal(Some(7.666)), "7.7");
        assert_eq!(format_one_decimal(Some(8.0)), "8.0");
        assert_eq!(format_one_decimal(None), "--");
    }
}
