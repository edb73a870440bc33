use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::casefold::canonical_field;
use super::load_value;
use crate::error::DetectError;

/// The dialects this crate can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SpecVersion {
    #[serde(rename = "1.2")]
    V1_2,
    #[serde(rename = "2.0")]
    V2_0,
    #[serde(rename = "3.0")]
    V3_0,
    #[serde(rename = "3.1")]
    V3_1,
}

impl SpecVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecVersion::V1_2 => "1.2",
            SpecVersion::V2_0 => "2.0",
            SpecVersion::V3_0 => "3.0",
            SpecVersion::V3_1 => "3.1",
        }
    }

    /// Family name used in human-facing output.
    pub fn family(&self) -> &'static str {
        match self {
            SpecVersion::V1_2 | SpecVersion::V2_0 => "Swagger",
            SpecVersion::V3_0 | SpecVersion::V3_1 => "OpenAPI",
        }
    }

    /// Map a marker value to a dialect. The value is trimmed and lower-cased.
    pub fn from_marker(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "1" | "1.2" | "1.2.0" => Some(SpecVersion::V1_2),
            "2" | "2.0" | "2.0.0" => Some(SpecVersion::V2_0),
            "3" | "3.0" | "3.0.0" | "3.0.1" | "3.0.2" | "3.0.3" => Some(SpecVersion::V3_0),
            "3.1" | "3.1.0" => Some(SpecVersion::V3_1),
            _ => None,
        }
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family(), self.as_str())
    }
}

/// The minimal root shape sniffed before a full parse.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMarker {
    pub openapi: Option<Value>,
    pub swagger: Option<Value>,
    #[serde(rename = "swaggerVersion")]
    pub swagger_version: Option<Value>,
}

impl RawMarker {
    /// Read the marker fields from a document root, matching keys without
    /// regard to case. Non-object roots carry no marker.
    pub fn from_root(root: &Value) -> Self {
        let mut marker = RawMarker::default();
        let Some(map) = root.as_object() else {
            return marker;
        };
        for (key, value) in map {
            let slot = match canonical_field(key) {
                Some("openapi") => &mut marker.openapi,
                Some("swagger") => &mut marker.swagger,
                Some("swaggerVersion") => &mut marker.swagger_version,
                _ => continue,
            };
            *slot = Some(value.clone());
        }
        marker
    }

    /// The first present marker, in `openapi`, `swagger`, `swaggerVersion`
    /// precedence, rendered as text.
    pub fn declared(&self) -> Option<String> {
        [&self.openapi, &self.swagger, &self.swagger_version]
            .into_iter()
            .flatten()
            .find(|v| !v.is_null())
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
    }
}

/// Determine which dialect a document is written in.
///
/// Only the marker fields are inspected; the rest of the document is not
/// validated here.
pub fn detect_version(text: &str) -> Result<SpecVersion, DetectError> {
    let root = load_value(text)?;
    let declared = RawMarker::from_root(&root)
        .declared()
        .ok_or(DetectError::MissingMarker)?;
    SpecVersion::from_marker(&declared).ok_or(DetectError::UnsupportedVersion(declared))
}
