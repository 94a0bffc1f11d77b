//! Tolerant field decoders for the SARIF model.
//!
//! Only `runs` and the run objects themselves must be well-formed. Below
//! that, a field with an unexpected JSON type reads as absent (or, for
//! indices, as a position no array has), so one odd result cannot reject
//! the whole log.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Index read for values that are present but not a usable position.
pub(crate) const INVALID_INDEX: i64 = -1;

pub(crate) fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Array index. `null`/missing stays absent; integers above `i64::MAX`
/// saturate; floats, strings and other types become [`INVALID_INDEX`].
pub(crate) fn index<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.map(|value| match value {
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i,
            (None, Some(_)) => i64::MAX,
            (None, None) => INVALID_INDEX,
        },
        _ => INVALID_INDEX,
    }))
}

pub(crate) fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(|value| serde_json::from_value(value).ok()))
}

/// Positional list. Elements that do not decode become `T::default()` so
/// the positions of their neighbours are preserved.
pub(crate) fn seq<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
        ),
        _ => None,
    })
}
