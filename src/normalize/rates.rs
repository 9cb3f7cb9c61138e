use serde_json::Value;

/// Percentage of successes, None when there's nothing to divide by.
pub fn success_rate(succeeded: u64, missed: u64) -> Option<f64> {
    let total = succeeded as f64 + missed as f64;
    if total == 0.0 {
        None
    } else {
        Some(succeeded as f64 / total * 100.0)
    }
}

pub fn format_rate(rate: f64) -> String {
    format!("{rate:.1}%")
}

pub fn rate_text(succeeded: u64, missed: u64) -> Option<String> {
    success_rate(succeeded, missed).map(format_rate)
}

/// A rate the dashboard computed itself, as a number or as text with or without `%`.
pub fn reported_rate(value: &Value) -> Option<String> {
    match value {
        Value::Number(number) => number
            .as_f64()
            .filter(|rate| rate.is_finite())
            .map(format_rate),
        Value::String(text) => text
            .trim()
            .trim_end_matches('%')
            .trim_end()
            .parse::<f64>()
            .ok()
            .filter(|rate| rate.is_finite())
            .map(format_rate),
        _ => None,
    }
}
