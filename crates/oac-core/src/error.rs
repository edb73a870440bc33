use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document structure is invalid: {0}")]
    Structure(#[source] serde_json::Error),

    #[error("document root must be an object, found {0}")]
    NotAnObject(&'static str),
}

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("document is not readable structured text: {0}")]
    Unreadable(#[from] ParseError),

    #[error("no version marker (`openapi`, `swagger` or `swaggerVersion`) found")]
    MissingMarker,

    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("template render failed: {0}")]
    Render(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("the namespace '{0}' is not a valid C# namespace")]
    InvalidNamespace(String),

    #[error("the name '{0}' is not a valid C# type name")]
    InvalidClassName(String),
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("reading {0} was cancelled")]
    Cancelled(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },
}
