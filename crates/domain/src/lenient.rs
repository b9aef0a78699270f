//! Deserializers for fields the backend encodes loosely: numbers sent as
//! strings (`"150.00"`, `"12"`), flags sent as `0`/`1`, and `null` where a
//! value is expected.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

fn number_from_value<E: de::Error>(value: Value) -> Result<Option<f64>, E> {
    match value {
        Value::Null => Ok(None),
        Value::Number(number) => number
            .as_f64()
            .map(Some)
            .ok_or_else(|| E::custom("number is not representable as f64")),
        Value::String(text) if text.trim().is_empty() => Ok(None),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|error| E::custom(format!("invalid decimal '{text}': {error}"))),
        other => Err(E::custom(format!("expected a number, got {other}"))),
    }
}

fn integer_from_value<E: de::Error>(value: Value) -> Result<Option<u64>, E> {
    match value {
        Value::Null => Ok(None),
        Value::Number(number) => number
            .as_u64()
            .map(Some)
            .ok_or_else(|| E::custom(format!("expected a whole number, got {number}"))),
        Value::String(text) if text.trim().is_empty() => Ok(None),
        Value::String(text) => text
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|error| E::custom(format!("invalid number '{text}': {error}"))),
        other => Err(E::custom(format!("expected a number, got {other}"))),
    }
}

fn narrow<T: TryFrom<u64>, E: de::Error>(value: u64) -> Result<T, E> {
    T::try_from(value).map_err(|_| E::custom(format!("{value} is out of range")))
}

/// Deserializes a record identifier sent as a number or a numeric string.
pub(crate) fn identifier<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    integer_from_value::<D::Error>(value)?
        .ok_or_else(|| de::Error::custom("record identifier is missing"))
}

/// Deserializes a count, treating `null` and `""` as zero.
pub(crate) fn count<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64> + Default,
{
    let value = Value::deserialize(deserializer)?;
    match integer_from_value::<D::Error>(value)? {
        Some(number) => narrow(number),
        None => Ok(T::default()),
    }
}

/// Deserializes an optional whole number.
pub(crate) fn optional_count<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let value = Value::deserialize(deserializer)?;
    integer_from_value::<D::Error>(value)?
        .map(narrow::<T, D::Error>)
        .transpose()
}

/// Deserializes a value, treating `null` as its default.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes an optional value, treating unrecognised values as absent.
pub(crate) fn known<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Deserializes a required decimal, treating `null` and `""` as zero.
pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value::<D::Error>(value)?.unwrap_or_default())
}

/// Deserializes an optional decimal.
pub(crate) fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    number_from_value::<D::Error>(value)
}

/// Deserializes a flag the backend may send as `true`, `1` or `"1"`.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(value) => Ok(value),
        Value::Number(number) => Ok(number.as_i64().is_some_and(|value| value != 0)),
        Value::String(text) => Ok(matches!(text.trim(), "1" | "true")),
        other => Err(de::Error::custom(format!("expected a flag, got {other}"))),
    }
}
