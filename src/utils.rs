use chrono::{DateTime, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;

const DATE_DISPLAY_FORMAT: &str = "%b %-d, %Y, %H:%M";

// Amount cell value as a decimal, whether the API sent a number or a string
pub fn parse_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

// "$1,234.50"; values that are not amounts are shown as-is
pub fn format_currency(value: &Value) -> String {
    let Some(amount) = parse_amount(value) else {
        return match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
    };

    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, grouped, fraction)
}

// Timestamps arrive either with an offset or as local date-times
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.format(DATE_DISPLAY_FORMAT).to_string();
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|timestamp| timestamp.format(DATE_DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }

    let start: String = chars[..5].iter().collect();
    let end: String = chars[chars.len() - 5..].iter().collect();

    format!("{}...{}", start, end)
}

pub fn truncate_hash(hash: &str, max_len: usize) -> String {
    if hash.chars().count() <= max_len {
        return hash.to_string();
    }

    let head: String = hash.chars().take(max_len).collect();
    format!("{}...", head)
}

// PENDING -> Pending, IN_REVIEW -> In review
pub fn status_label(status: &str) -> String {
    let lower = status.trim().replace('_', " ").to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn currency_from_numbers_and_strings() {
        assert_eq!(format_currency(&json!(50)), "$50.00");
        assert_eq!(format_currency(&json!("1234.5")), "$1,234.50");
        assert_eq!(format_currency(&json!(1000000)), "$1,000,000.00");
        assert_eq!(format_currency(&json!(-12.345)), "-$12.35");
        assert_eq!(format_currency(&json!("n/a")), "n/a");
        assert_eq!(format_currency(&Value::Null), "");
    }

    #[test]
    fn dates_render_or_pass_through() {
        assert_eq!(format_date("2024-01-05T10:30:00"), "Jan 5, 2024, 10:30");
        assert_eq!(format_date("2024-01-05T10:30:00.123456"), "Jan 5, 2024, 10:30");
        assert_eq!(format_date("2024-01-05T10:30:00+00:00"), "Jan 5, 2024, 10:30");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn shortens_long_values() {
        assert_eq!(shorten_address("0x1234567890abcdef"), "0x123...bcdef");
        assert_eq!(shorten_address("short"), "short");
        assert_eq!(truncate_hash("abcdef", 20), "abcdef");
        assert_eq!(truncate_hash("0123456789012345678901", 20), "01234567890123456789...");
    }

    #[test]
    fn status_labels() {
        assert_eq!(status_label("PENDING"), "Pending");
        assert_eq!(status_label("IN_REVIEW"), "In review");
        assert_eq!(status_label(""), "");
    }
}
