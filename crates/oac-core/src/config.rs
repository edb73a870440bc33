use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use heck::ToUpperCamelCase;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, OptionsError};

/// Accessibility of the generated members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    #[default]
    Public,
    Internal,
    Protected,
    Private,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Public => "public",
            AccessLevel::Internal => "internal",
            AccessLevel::Protected => "protected",
            AccessLevel::Private => "private",
        }
    }

    /// Modifier for top-level types. C# only allows `public` or `internal`
    /// outside a containing type.
    pub fn type_modifier(&self) -> &'static str {
        match self {
            AccessLevel::Public => "public",
            _ => "internal",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(AccessLevel::Public),
            "internal" => Ok(AccessLevel::Internal),
            "protected" => Ok(AccessLevel::Protected),
            "private" => Ok(AccessLevel::Private),
            other => Err(format!(
                "unknown access level '{other}' (expected public, internal, protected or private)"
            )),
        }
    }
}

/// JSON library the generated client serializes with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SerializationTool {
    #[default]
    SystemTextJson,
    NewtonsoftJson,
}

impl SerializationTool {
    pub fn as_str(&self) -> &'static str {
        match self {
            SerializationTool::SystemTextJson => "system_text_json",
            SerializationTool::NewtonsoftJson => "newtonsoft_json",
        }
    }
}

impl fmt::Display for SerializationTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SerializationTool {
    type Err = String;

    /// Accepts `system_text_json`, `System.Text.Json`, `newtonsoft`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "systemtextjson" | "stj" => Ok(SerializationTool::SystemTextJson),
            "newtonsoftjson" | "newtonsoft" => Ok(SerializationTool::NewtonsoftJson),
            _ => Err(format!(
                "unknown serializer '{s}' (expected system_text_json or newtonsoft_json)"
            )),
        }
    }
}

/// Caller-supplied knobs for one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    pub namespace: String,
    pub class_name: String,
    pub access: AccessLevel,
    pub serializer: SerializationTool,
}

impl GenerationOptions {
    pub fn new(namespace: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            class_name: class_name.into(),
            access: AccessLevel::default(),
            serializer: SerializationTool::default(),
        }
    }

    pub fn with_access(mut self, access: AccessLevel) -> Self {
        self.access = access;
        self
    }

    pub fn with_serializer(mut self, serializer: SerializationTool) -> Self {
        self.serializer = serializer;
        self
    }

    /// Reject namespaces and class names that are not C# identifiers.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !is_valid_namespace(&self.namespace) {
            return Err(OptionsError::InvalidNamespace(self.namespace.clone()));
        }
        if !is_valid_type_name(&self.class_name) {
            return Err(OptionsError::InvalidClassName(self.class_name.clone()));
        }
        Ok(())
    }
}

/// `[_A-Za-z][_A-Za-z0-9]*`
pub fn is_valid_type_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

/// Dot-separated type names.
pub fn is_valid_namespace(namespace: &str) -> bool {
    namespace.split('.').all(is_valid_type_name)
}

/// Default class name for an output file: its stem in UpperCamelCase.
pub fn class_name_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let name = stem.to_upper_camel_case();
    (!name.is_empty()).then_some(name)
}

/// Top-level project configuration loaded from `.oac.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OacConfig {
    pub input: String,
    pub output: String,
    pub namespace: String,
    /// Defaults to the output file stem.
    pub class_name: Option<String>,
    pub access: AccessLevel,
    pub serializer: SerializationTool,
}

impl Default for OacConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: "ApiClient.cs".to_string(),
            namespace: "OpenApiClient".to_string(),
            class_name: None,
            access: AccessLevel::Public,
            serializer: SerializationTool::SystemTextJson,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".oac.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OacConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: OacConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# oac configuration
input: openapi.yaml
output: ApiClient.cs

namespace: OpenApiClient
# class_name: ApiClient        # defaults to the output file name
access: public                 # public | internal | protected | private
serializer: system_text_json   # system_text_json | newtonsoft_json
"#
}
