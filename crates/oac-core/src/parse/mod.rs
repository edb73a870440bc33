pub mod casefold;
pub mod info;
pub mod marker;
pub mod node;
pub mod openapi3;
pub mod v1_2;
pub mod v2_0;
pub mod v3_0;
pub mod v3_1;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ParseError;
use crate::ir::{HttpMethod, TypeLink};
pub use marker::{RawMarker, SpecVersion, detect_version};
use node::{RefOr, kind_of, ref_name_decoded};

/// Parse structured text into a JSON value tree.
///
/// Text whose first non-whitespace character is `{` or `[` is read as JSON,
/// anything else as YAML. A leading byte-order mark is ignored.
pub fn load_value(text: &str) -> Result<Value, ParseError> {
    let text = text.trim_start_matches('\u{feff}');
    match text.trim_start().chars().next() {
        Some('{') | Some('[') => Ok(serde_json::from_str(text)?),
        _ => Ok(serde_yaml_ng::from_str(text)?),
    }
}

/// Fully deserialize `text` as the given dialect.
pub fn parse_document(text: &str, version: SpecVersion) -> Result<DialectDocument, ParseError> {
    let mut root = load_value(text)?;
    if !root.is_object() {
        return Err(ParseError::NotAnObject(kind_of(&root)));
    }
    casefold::fold_field_case(&mut root);
    let document = match version {
        SpecVersion::V1_2 => DialectDocument::V1_2(from_root(root)?),
        SpecVersion::V2_0 => DialectDocument::V2_0(from_root(root)?),
        SpecVersion::V3_0 => DialectDocument::V3_0(from_root(root)?),
        SpecVersion::V3_1 => DialectDocument::V3_1(from_root(root)?),
    };
    log::debug!("parsed document as {version}");
    Ok(document)
}

/// Map the folded tree onto a dialect model. Errors here describe the
/// document's shape, whatever syntax it was written in.
fn from_root<T: DeserializeOwned>(root: Value) -> Result<T, ParseError> {
    serde_json::from_value(root).map_err(ParseError::Structure)
}

/// A parsed document in one of the supported dialects.
#[derive(Debug, Clone)]
pub enum DialectDocument {
    V1_2(v1_2::SwaggerV12),
    V2_0(v2_0::SwaggerV20),
    V3_0(v3_0::OpenApiV30),
    V3_1(v3_1::OpenApiV31),
}

impl DialectDocument {
    pub fn version(&self) -> SpecVersion {
        match self {
            DialectDocument::V1_2(_) => SpecVersion::V1_2,
            DialectDocument::V2_0(_) => SpecVersion::V2_0,
            DialectDocument::V3_0(_) => SpecVersion::V3_0,
            DialectDocument::V3_1(_) => SpecVersion::V3_1,
        }
    }

    pub fn title(&self) -> String {
        match self {
            DialectDocument::V1_2(doc) => doc.info.title.clone(),
            DialectDocument::V2_0(doc) => doc.info.title.clone(),
            DialectDocument::V3_0(doc) => doc.info.title.clone(),
            DialectDocument::V3_1(doc) => doc.info.title.clone(),
        }
        .unwrap_or_default()
    }

    pub fn description(&self) -> String {
        match self {
            DialectDocument::V1_2(doc) => doc.info.description.clone(),
            DialectDocument::V2_0(doc) => doc.info.description.clone(),
            DialectDocument::V3_0(doc) => doc.info.description.clone(),
            DialectDocument::V3_1(doc) => doc.info.description.clone(),
        }
        .unwrap_or_default()
    }

    /// The API version declared by the document (not the dialect version).
    pub fn api_version(&self) -> String {
        match self {
            DialectDocument::V1_2(doc) => doc.api_version.clone(),
            DialectDocument::V2_0(doc) => doc.info.version.clone(),
            DialectDocument::V3_0(doc) => doc.info.version.clone(),
            DialectDocument::V3_1(doc) => doc.info.version.clone(),
        }
        .unwrap_or_default()
    }

    pub fn license(&self) -> String {
        match self {
            DialectDocument::V1_2(doc) => doc.info.license.clone(),
            DialectDocument::V2_0(doc) => doc.info.license_name(),
            DialectDocument::V3_0(doc) => doc.info.license_name(),
            DialectDocument::V3_1(doc) => doc.info.license_name(),
        }
        .unwrap_or_default()
    }

    /// Operations carrying a non-empty operation id, in document order.
    pub fn operations(&self) -> Vec<RawOperation> {
        match self {
            DialectDocument::V1_2(doc) => doc.operations(),
            DialectDocument::V2_0(doc) => doc.operations(),
            DialectDocument::V3_0(doc) => doc.operations(),
            DialectDocument::V3_1(doc) => doc.operations(),
        }
    }

    /// Named object schemas, in document order.
    pub fn types(&self) -> Vec<RawType> {
        match self {
            DialectDocument::V1_2(doc) => doc.types(),
            DialectDocument::V2_0(doc) => doc.types(),
            DialectDocument::V3_0(doc) => doc.types(),
            DialectDocument::V3_1(doc) => doc.types(),
        }
    }
}

/// One verb/path combination extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOperation {
    pub method: HttpMethod,
    pub path: String,
    pub operation_id: String,
    pub summary: String,
    pub description: String,
    /// Link to the request body schema; `Named` carries the raw schema name.
    pub request_body: Option<TypeLink>,
    /// Link to the first 2xx response schema.
    pub response: Option<TypeLink>,
    pub query: Vec<RawProperty>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawType {
    pub name: String,
    pub summary: String,
    pub properties: Vec<RawProperty>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProperty {
    pub name: String,
    /// The schema `type` keyword, if one was declared inline.
    pub kind: Option<String>,
}

/// Read access to the parts of a schema object the extractor cares about.
pub trait SchemaShape: DeserializeOwned + Sized {
    /// The single declared `type`, if any.
    fn declared_type(&self) -> Option<&str>;
    fn title(&self) -> Option<&str>;
    fn description(&self) -> Option<&str>;
    fn properties(&self) -> &IndexMap<String, RefOr<Self>>;

    /// Whether this schema describes an object with named members.
    fn is_object(&self) -> bool {
        match self.declared_type() {
            Some(kind) => kind.eq_ignore_ascii_case("object"),
            None => !self.properties().is_empty(),
        }
    }
}

/// Link to a payload schema: named when the schema is a reference.
pub fn schema_link<S>(schema: &RefOr<S>) -> TypeLink {
    match schema {
        RefOr::Reference(path) => TypeLink::Named(ref_name_decoded(path)),
        RefOr::Inline(_) => TypeLink::Untyped,
    }
}

/// Declared kind of a property schema; references have none.
pub fn property_kind<S: SchemaShape>(schema: &RefOr<S>) -> Option<String> {
    schema
        .as_inline()
        .and_then(|s| s.declared_type())
        .map(str::to_string)
}

/// Collect named object schemas from a definitions-style map.
pub fn collect_types<S: SchemaShape>(schemas: &IndexMap<String, RefOr<S>>) -> Vec<RawType> {
    schemas
        .iter()
        .filter_map(|(name, schema)| {
            let Some(schema) = schema.as_inline() else {
                log::debug!("skipping reference-only schema {name}");
                return None;
            };
            if !schema.is_object() {
                log::debug!("skipping non-object schema {name}");
                return None;
            }
            Some(RawType {
                name: name.clone(),
                summary: schema
                    .description()
                    .or(schema.title())
                    .unwrap_or_default()
                    .to_string(),
                properties: schema
                    .properties()
                    .iter()
                    .map(|(prop, prop_schema)| RawProperty {
                        name: prop.clone(),
                        kind: property_kind(prop_schema),
                    })
                    .collect(),
            })
        })
        .collect()
}

/// Pick the media type entry used for payload linkage: `application/json`,
/// then any JSON-flavoured type, then the first declared.
pub fn select_media<T>(content: &IndexMap<String, T>) -> Option<&T> {
    content
        .iter()
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("application/json"))
        .or_else(|| {
            content
                .iter()
                .find(|(k, _)| k.to_ascii_lowercase().contains("json"))
        })
        .or_else(|| content.first())
        .map(|(_, v)| v)
}

/// Whether a response key denotes a success status (`200`, `201`, `2XX`).
pub fn is_success_status(status: &str) -> bool {
    status.trim().starts_with('2')
}

/// An operation id counts only when it has visible content.
pub fn present_id(id: Option<&String>) -> Option<&str> {
    id.map(|s| s.as_str()).filter(|s| !s.trim().is_empty())
}
