use indexmap::IndexMap;
use serde::Serialize;

use crate::config::AccessLevel;
use crate::parse::SpecVersion;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// Every verb a path item can carry, in document extraction order.
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// PascalCase verb used as a method-name disambiguator (`Get`, `Post`, ...).
    pub fn pascal_name(&self) -> &'static str {
        match self {
            HttpMethod::Get => "Get",
            HttpMethod::Put => "Put",
            HttpMethod::Post => "Post",
            HttpMethod::Delete => "Delete",
            HttpMethod::Options => "Options",
            HttpMethod::Head => "Head",
            HttpMethod::Patch => "Patch",
            HttpMethod::Trace => "Trace",
        }
    }

    /// Case-insensitive lookup of a verb name.
    pub fn parse(verb: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(verb.trim()))
    }
}

/// How a method refers to a request or response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum TypeLink {
    /// A DTO declared in the contract.
    Named(String),
    /// A payload with no usable named schema.
    Untyped,
}

impl TypeLink {
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeLink::Named(name) => Some(name),
            TypeLink::Untyped => None,
        }
    }
}

/// The declared kind of a DTO property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Int,
    Double,
    Bool,
    List,
    Object,
}

impl PropertyKind {
    /// Map a schema `type` keyword; anything unrecognized or absent is `Object`.
    pub fn from_declared(kind: Option<&str>) -> Self {
        match kind.map(str::trim) {
            Some(k) if k.eq_ignore_ascii_case("integer") => PropertyKind::Int,
            Some(k) if k.eq_ignore_ascii_case("number") => PropertyKind::Double,
            Some(k) if k.eq_ignore_ascii_case("boolean") => PropertyKind::Bool,
            Some(k) if k.eq_ignore_ascii_case("array") => PropertyKind::List,
            _ => PropertyKind::Object,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub kind: PropertyKind,
    /// Name as written in the document, used for serializer attributes.
    pub wire_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDef {
    pub name: String,
    pub summary: Option<String>,
    pub properties: IndexMap<String, Property>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    pub name: String,
    pub http_verb: HttpMethod,
    pub path: String,
    pub summary: Option<String>,
    pub request_body: Option<TypeLink>,
    /// Name of the synthesized query DTO, if the operation has query parameters.
    pub request_query: Option<String>,
    pub response: Option<TypeLink>,
}

/// The version-independent description of an API that drives code emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contract {
    pub namespace: String,
    pub class_name: String,
    pub access: AccessLevel,
    pub title: String,
    pub description: String,
    pub license: String,
    pub spec_version: String,
    pub dialect: SpecVersion,
    pub methods: Vec<Method>,
    pub types: Vec<TypeDef>,
}

impl Contract {
    pub fn find_type(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn find_method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }
}
