//! Display formatting in the Indian locale (`en-IN`).

use rust_decimal::{Decimal, RoundingStrategy};

use super::time_utils::parse_timestamp;
use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Formats an amount as whole rupees with Indian digit grouping,
/// e.g. `₹12,34,567`.
pub fn format_inr(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}₹{}", sign, group_indian(&digits))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Formats a percentage with two decimals, e.g. `12.50%`.
pub fn format_percent(value: Decimal) -> String {
    format!(
        "{:.2}%",
        value.round_dp_with_strategy(DISPLAY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Formats a backend date as `5 Mar 2024`; unparseable input yields
/// `Invalid Date`.
pub fn format_display_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(ts) => ts.format("%-d %b %Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}

/// Masks a PAN for list display: `ABC***4F`. Short values pass through.
pub fn mask_pan(pan: &str) -> String {
    let chars: Vec<char> = pan.chars().collect();
    if chars.len() < 6 {
        return pan.to_string();
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
