//! Document tree shared by OpenAPI 3.0.x and 3.1.0.
//!
//! The two dialects differ only in their schema objects, so the tree is
//! generic over a [`SchemaShape`].

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::info::Info;
use super::node::{RefOr, lenient_string, null_as_default, ref_name_decoded};
use super::{
    RawOperation, RawProperty, RawType, SchemaShape, collect_types, is_success_status,
    present_id, property_kind, schema_link, select_media,
};
use crate::ir::{HttpMethod, TypeLink};

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "S: DeserializeOwned"))]
pub struct Document<S> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub info: Info,
    #[serde(default, deserialize_with = "null_as_default")]
    pub paths: IndexMap<String, PathItem<S>>,
    #[serde(default)]
    pub components: Option<Components<S>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "S: DeserializeOwned"))]
pub struct Components<S> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub schemas: IndexMap<String, RefOr<S>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: IndexMap<String, RefOr<Parameter<S>>>,
    #[serde(default, rename = "requestBodies", deserialize_with = "null_as_default")]
    pub request_bodies: IndexMap<String, RefOr<RequestBody<S>>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub responses: IndexMap<String, RefOr<Response<S>>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "S: DeserializeOwned"))]
pub struct PathItem<S> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: Vec<RefOr<Parameter<S>>>,
    pub get: Option<Operation<S>>,
    pub put: Option<Operation<S>>,
    pub post: Option<Operation<S>>,
    pub delete: Option<Operation<S>>,
    pub options: Option<Operation<S>>,
    pub head: Option<Operation<S>>,
    pub patch: Option<Operation<S>>,
    pub trace: Option<Operation<S>>,
}

impl<S> PathItem<S> {
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation<S>> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "S: DeserializeOwned"))]
pub struct Operation<S> {
    #[serde(default, rename = "operationId", deserialize_with = "lenient_string")]
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: Vec<RefOr<Parameter<S>>>,
    #[serde(rename = "requestBody")]
    pub request_body: Option<RefOr<RequestBody<S>>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub responses: IndexMap<String, RefOr<Response<S>>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "S: DeserializeOwned"))]
pub struct Parameter<S> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, rename = "in", deserialize_with = "null_as_default")]
    pub location: String,
    pub schema: Option<RefOr<S>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "S: DeserializeOwned"))]
pub struct RequestBody<S> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: IndexMap<String, MediaType<S>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "S: DeserializeOwned"))]
pub struct Response<S> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: IndexMap<String, MediaType<S>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "S: DeserializeOwned"))]
pub struct MediaType<S> {
    pub schema: Option<RefOr<S>>,
}

/// Look up a `#/components/<section>/<name>` reference in one level.
fn lookup<'a, T>(
    section: Option<&'a IndexMap<String, RefOr<T>>>,
    node: &'a RefOr<T>,
) -> Option<&'a T> {
    match node {
        RefOr::Inline(value) => Some(value),
        RefOr::Reference(path) => section?
            .get(&ref_name_decoded(path))
            .and_then(RefOr::as_inline),
    }
}

impl<S: SchemaShape> Document<S> {
    pub fn operations(&self) -> Vec<RawOperation> {
        let mut operations = Vec::new();
        for (path, item) in &self.paths {
            for method in HttpMethod::ALL {
                let Some(op) = item.operation(method) else {
                    continue;
                };
                let Some(operation_id) = present_id(op.operation_id.as_ref()) else {
                    log::debug!("skipping {} {path}: no operationId", method.as_str());
                    continue;
                };
                operations.push(RawOperation {
                    method,
                    path: path.clone(),
                    operation_id: operation_id.to_string(),
                    summary: op.summary.clone().unwrap_or_default(),
                    description: op.description.clone().unwrap_or_default(),
                    request_body: self.request_body_link(op),
                    response: self.response_link(op),
                    query: self.query_parameters(item, op),
                });
            }
        }
        operations
    }

    pub fn types(&self) -> Vec<RawType> {
        self.components
            .as_ref()
            .map(|c| collect_types(&c.schemas))
            .unwrap_or_default()
    }

    fn request_body_link(&self, op: &Operation<S>) -> Option<TypeLink> {
        let node = op.request_body.as_ref()?;
        let body = lookup(self.components.as_ref().map(|c| &c.request_bodies), node);
        Some(
            body.and_then(|b| select_media(&b.content))
                .and_then(|m| m.schema.as_ref())
                .map(schema_link)
                .unwrap_or(TypeLink::Untyped),
        )
    }

    fn response_link(&self, op: &Operation<S>) -> Option<TypeLink> {
        let (_, node) = op
            .responses
            .iter()
            .find(|(status, _)| is_success_status(status))?;
        let response = lookup(self.components.as_ref().map(|c| &c.responses), node)?;
        let media = select_media(&response.content)?;
        Some(media.schema.as_ref().map(schema_link).unwrap_or(TypeLink::Untyped))
    }

    /// Query parameters, path-level first; an operation-level parameter with
    /// the same name replaces the inherited one.
    fn query_parameters(&self, item: &PathItem<S>, op: &Operation<S>) -> Vec<RawProperty> {
        let section = self.components.as_ref().map(|c| &c.parameters);
        let mut merged: IndexMap<String, RawProperty> = IndexMap::new();
        for node in item.parameters.iter().chain(&op.parameters) {
            let Some(param) = lookup(section, node) else {
                continue;
            };
            if !param.location.eq_ignore_ascii_case("query") || param.name.is_empty() {
                continue;
            }
            merged.insert(
                param.name.clone(),
                RawProperty {
                    name: param.name.clone(),
                    kind: param.schema.as_ref().and_then(property_kind),
                },
            );
        }
        merged.into_values().collect()
    }
}
