use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A node that is either a `$ref` pointer or an inline value.
///
/// The choice is made per node by the presence of a `$ref` key, so an inline
/// body that fails to deserialize reports its own error instead of falling
/// back to a less specific variant.
#[derive(Debug, Clone, PartialEq)]
pub enum RefOr<T> {
    Reference(String),
    Inline(T),
}

impl<T> RefOr<T> {
    pub fn as_inline(&self) -> Option<&T> {
        match self {
            RefOr::Inline(value) => Some(value),
            RefOr::Reference(_) => None,
        }
    }

    pub fn reference(&self) -> Option<&str> {
        match self {
            RefOr::Reference(path) => Some(path),
            RefOr::Inline(_) => None,
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for RefOr<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if let Some(reference) = value.get("$ref") {
            return match reference.as_str() {
                Some(path) => Ok(RefOr::Reference(path.to_string())),
                None => Err(D::Error::custom("`$ref` must be a string")),
            };
        }
        T::deserialize(value).map(RefOr::Inline).map_err(D::Error::custom)
    }
}

/// Final segment of a reference path, with JSON Pointer escapes undone.
///
/// `#/components/schemas/Pet` and `#/definitions/Pet` both yield `Pet`; a bare
/// model id such as `Pet` is returned unchanged.
pub fn ref_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Like [`ref_name`], but also decodes `~1` and `~0`.
pub fn ref_name_decoded(path: &str) -> String {
    ref_name(path).replace("~1", "/").replace("~0", "~")
}

/// Deserialize a scalar that may be written as a string, number or bool.
///
/// Unquoted YAML such as `version: 1.0` arrives as a number.
pub fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(D::Error::custom(format!(
            "expected a string, found {}",
            kind_of(&other)
        ))),
    }
}

/// Deserialize an optional field, treating an explicit `null` like a missing
/// key.
///
/// YAML writes an empty value (`parameters:`) as null.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Human-readable JSON kind, used in error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
