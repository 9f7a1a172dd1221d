/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Rounds to `decimals` places. An exact tie goes to the even digit, so
/// `4.25` becomes `4.2`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

/// Formats an average with exactly `decimals` places, e.g. `4.50`.
pub fn format_average(value: f64, decimals: u32) -> String {
    format!("{:.*}", decimals as usize, value)
}

/// Parses a score cell. Surrounding whitespace is ignored; NaN and infinities
/// are rejected.
pub fn parse_score(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
