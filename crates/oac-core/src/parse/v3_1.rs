use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::SchemaShape;
use super::node::{RefOr, null_as_default};
use super::openapi3::Document;

/// An OpenAPI 3.1.0 document.
pub type OpenApiV31 = Document<Schema>;

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(String),
    Multiple(Vec<String>),
}

impl TypeSet {
    /// The first type that is not `null`.
    pub fn primary(&self) -> Option<&str> {
        match self {
            TypeSet::Single(kind) => Some(kind.as_str()),
            TypeSet::Multiple(kinds) => kinds
                .iter()
                .map(String::as_str)
                .find(|k| !k.eq_ignore_ascii_case("null")),
        }
    }
}

/// JSON Schema 2020-12 object, as far as it matters for extraction.
///
/// Boolean schemas (`true` accepts anything, `false` nothing) carry no
/// structure and read as an empty schema.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub schema_type: Option<TypeSet>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub properties: IndexMap<String, RefOr<Schema>>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct SchemaObject {
    #[serde(rename = "type")]
    schema_type: Option<TypeSet>,
    title: Option<String>,
    description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    properties: IndexMap<String, RefOr<Schema>>,
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let object = match Value::deserialize(deserializer)? {
            Value::Bool(_) => return Ok(Schema::default()),
            value => SchemaObject::deserialize(value).map_err(D::Error::custom)?,
        };
        Ok(Schema {
            schema_type: object.schema_type,
            title: object.title,
            description: object.description,
            properties: object.properties,
        })
    }
}

impl SchemaShape for Schema {
    fn declared_type(&self) -> Option<&str> {
        self.schema_type.as_ref().and_then(TypeSet::primary)
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn properties(&self) -> &IndexMap<String, RefOr<Self>> {
        &self.properties
    }
}
