//! Display formatting for numbers and labels coming off the wire

use serde_json::Value;

/// Group the integer part in threes ("50,000", "1,234.5"), up to three decimals.
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.3}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let frac = frac_part.trim_end_matches('0');
    let is_zero = grouped == "0" && frac.is_empty();
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

/// 0.45 -> "45%"
pub fn percent(fraction: f64) -> String {
    if !fraction.is_finite() {
        return "0%".to_string();
    }
    format!("{}%", (fraction * 100.0).round() as i64)
}

/// "light_rain" -> "light rain"
pub fn humanize(label: &str) -> String {
    label.replace('_', " ")
}

/// Strings as-is, numbers unquoted, null as the fallback
pub fn scalar(value: &Value, fallback: &str) -> String {
    match value {
        Value::Null => fallback.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
