//! Lenient decoding helpers for loosely-typed backend payloads.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use serde_json::Number;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalInput {
    Number(Number),
    String(String),
    Other(IgnoredAny),
}

/// Parses a decimal the way the dashboard does: anything that is not a
/// number becomes zero.
pub fn parse_decimal_or_zero(value: &str) -> Decimal {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
}

/// Deserializes a number, a numeric string, `null` or a missing field into
/// a `Decimal`, falling back to zero.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<DecimalInput>::deserialize(deserializer)?;
    Ok(raw.map(DecimalInput::into_decimal).unwrap_or(Decimal::ZERO))
}

impl DecimalInput {
    fn into_decimal(self) -> Decimal {
        match self {
            DecimalInput::Number(n) => parse_decimal_or_zero(&n.to_string()),
            DecimalInput::String(s) => parse_decimal_or_zero(&s),
            DecimalInput::Other(_) => Decimal::ZERO,
        }
    }
}

/// Truncates toward zero; values outside `T`'s range become `T::default()`.
fn decimal_to_count<T>(value: Decimal) -> T
where
    T: TryFrom<i64> + Default,
{
    value
        .trunc()
        .to_i64()
        .and_then(|n| T::try_from(n).ok())
        .unwrap_or_default()
}

/// Deserializes an integer count from a number (`12` or `12.0`), a numeric
/// string, `null` or a missing field. Anything unusable becomes zero.
pub fn lenient_count<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + Default,
{
    Ok(decimal_to_count(lenient_decimal(deserializer)?))
}

/// Like [`lenient_count`], but `null` or a missing field stays `None`.
pub fn lenient_optional_count<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + Default,
{
    let raw = Option::<DecimalInput>::deserialize(deserializer)?;
    Ok(raw.map(|input| decimal_to_count(input.into_decimal())))
}

/// Deserializes a string field that may be `null`, a number or missing.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

/// Deserializes an array that may be `null` or missing into an empty Vec.
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
