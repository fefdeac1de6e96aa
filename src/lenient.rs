// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Forgiving `deserialize_with` helpers for user-authored configuration.
//!
//! Each helper first captures the field as a [`serde_yaml::Value`] and only
//! then tries to interpret it, so a value of the wrong type degrades to
//! `None` instead of failing the whole document. A mapping keyed by anything
//! other than scalars cannot be represented as JSON and degrades the same way.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

/// Decodes any nested section, discarding it when its shape is unexpected.
pub(crate) fn section<'de, D, T,>(deserializer: D,) -> Result<Option<T,>, D::Error,>
where
    D: Deserializer<'de,>,
    T: DeserializeOwned,
{
    let value = capture(deserializer,)?;
    Ok(to_json(value,).and_then(|value| serde_json::from_value(value,).ok(),),)
}

/// Decodes a text field, accepting numbers and booleans as their literal
/// spelling.
pub(crate) fn text<'de, D,>(deserializer: D,) -> Result<Option<String,>, D::Error,>
where
    D: Deserializer<'de,>,
{
    let value = capture(deserializer,)?;
    Ok(to_json(value,).and_then(value_to_text,),)
}

/// Decodes a boolean flag, accepting `"true"`/`"false"` strings.
pub(crate) fn flag<'de, D,>(deserializer: D,) -> Result<Option<bool,>, D::Error,>
where
    D: Deserializer<'de,>,
{
    let flag = match to_json(capture(deserializer,)?,) {
        Some(Value::Bool(flag,),) => Some(flag,),
        Some(Value::String(raw,),) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true,),
            "false" | "no" | "0" => Some(false,),
            _ => None,
        },
        _ => None,
    };
    Ok(flag,)
}

/// Decodes a non-negative count, accepting numeric strings.
pub(crate) fn count<'de, D,>(deserializer: D,) -> Result<Option<u32,>, D::Error,>
where
    D: Deserializer<'de,>,
{
    let count = match to_json(capture(deserializer,)?,) {
        Some(Value::Number(number,),) => {
            number.as_u64().and_then(|raw| u32::try_from(raw,).ok(),)
        }
        Some(Value::String(raw,),) => raw.trim().parse::<u32,>().ok(),
        _ => None,
    };
    Ok(count,)
}

/// Decodes a list of text values, dropping entries that are not text-like or
/// are blank after trimming.
pub(crate) fn strings<'de, D,>(deserializer: D,) -> Result<Option<Vec<String,>,>, D::Error,>
where
    D: Deserializer<'de,>,
{
    let serde_yaml::Value::Sequence(items,) = capture(deserializer,)? else {
        return Ok(None,);
    };

    let strings = items
        .into_iter()
        .filter_map(to_json,)
        .filter_map(value_to_text,)
        .map(|item| item.trim().to_owned(),)
        .filter(|item| !item.is_empty(),)
        .collect();
    Ok(Some(strings,),)
}

/// Decodes a list element by element, dropping malformed entries.
pub(crate) fn list<'de, D, T,>(deserializer: D,) -> Result<Option<Vec<T,>,>, D::Error,>
where
    D: Deserializer<'de,>,
    T: DeserializeOwned,
{
    let serde_yaml::Value::Sequence(items,) = capture(deserializer,)? else {
        return Ok(None,);
    };

    Ok(Some(
        items
            .into_iter()
            .filter_map(to_json,)
            .filter_map(|item| serde_json::from_value(item,).ok(),)
            .collect(),
    ),)
}

fn capture<'de, D,>(deserializer: D,) -> Result<serde_yaml::Value, D::Error,>
where
    D: Deserializer<'de,>,
{
    serde_yaml::Value::deserialize(deserializer,)
}

/// Converts a captured value to JSON; `None` when a mapping key is not a
/// scalar.
fn to_json(value: serde_yaml::Value,) -> Option<Value,>
{
    serde_json::to_value(value,).ok()
}

fn value_to_text(value: Value,) -> Option<String,>
{
    match value {
        Value::String(text,) => Some(text,),
        Value::Number(number,) => Some(number.to_string(),),
        Value::Bool(flag,) => Some(flag.to_string(),),
        Value::Null | Value::Array(_,) | Value::Object(_,) => None,
    }
}
