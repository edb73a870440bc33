use indexmap::IndexMap;
use serde::Deserialize;

use super::info::Info;
use super::node::{RefOr, lenient_string, null_as_default, ref_name_decoded};
use super::v3_0::Schema;
use super::{
    RawOperation, RawProperty, RawType, collect_types, is_success_status, present_id,
    schema_link,
};
use crate::ir::{HttpMethod, TypeLink};

/// A Swagger 2.0 document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SwaggerV20 {
    #[serde(deserialize_with = "null_as_default")]
    pub info: Info,
    #[serde(deserialize_with = "null_as_default")]
    pub paths: IndexMap<String, PathItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub definitions: IndexMap<String, RefOr<Schema>>,
    #[serde(deserialize_with = "null_as_default")]
    pub parameters: IndexMap<String, RefOr<Parameter>>,
    #[serde(deserialize_with = "null_as_default")]
    pub responses: IndexMap<String, RefOr<Response>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PathItem {
    #[serde(deserialize_with = "null_as_default")]
    pub parameters: Vec<RefOr<Parameter>>,
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
}

impl PathItem {
    /// Swagger 2.0 has no `trace` operation.
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Trace => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Operation {
    #[serde(rename = "operationId", deserialize_with = "lenient_string")]
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub parameters: Vec<RefOr<Parameter>>,
    #[serde(deserialize_with = "null_as_default")]
    pub responses: IndexMap<String, RefOr<Response>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Parameter {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "in", deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(rename = "type")]
    pub param_type: Option<String>,
    /// Only present on `in: body` parameters.
    pub schema: Option<RefOr<Schema>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Response {
    pub schema: Option<RefOr<Schema>>,
}

fn lookup<'a, T>(section: &'a IndexMap<String, RefOr<T>>, node: &'a RefOr<T>) -> Option<&'a T> {
    match node {
        RefOr::Inline(value) => Some(value),
        RefOr::Reference(path) => section
            .get(&ref_name_decoded(path))
            .and_then(RefOr::as_inline),
    }
}

impl SwaggerV20 {
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
                let params = self.parameters_of(item, op);
                operations.push(RawOperation {
                    method,
                    path: path.clone(),
                    operation_id: operation_id.to_string(),
                    summary: op.summary.clone().unwrap_or_default(),
                    description: op.description.clone().unwrap_or_default(),
                    request_body: body_link(&params),
                    response: self.response_link(op),
                    query: params
                        .iter()
                        .filter(|p| p.location.eq_ignore_ascii_case("query") && !p.name.is_empty())
                        .map(|p| RawProperty {
                            name: p.name.clone(),
                            kind: p.param_type.clone(),
                        })
                        .collect(),
                });
            }
        }
        operations
    }

    pub fn types(&self) -> Vec<RawType> {
        collect_types(&self.definitions)
    }

    /// Resolved parameters, path-level first; operation-level entries with the
    /// same name and location replace inherited ones.
    fn parameters_of<'a>(&'a self, item: &'a PathItem, op: &'a Operation) -> Vec<&'a Parameter> {
        let mut merged: IndexMap<(String, String), &Parameter> = IndexMap::new();
        for node in item.parameters.iter().chain(&op.parameters) {
            if let Some(param) = lookup(&self.parameters, node) {
                merged.insert((param.name.clone(), param.location.to_lowercase()), param);
            }
        }
        merged.into_values().collect()
    }

    fn response_link(&self, op: &Operation) -> Option<TypeLink> {
        let (_, node) = op
            .responses
            .iter()
            .find(|(status, _)| is_success_status(status))?;
        let response = lookup(&self.responses, node)?;
        response.schema.as_ref().map(schema_link)
    }
}

/// A `body` parameter links its schema; form parameters make an untyped body.
fn body_link(params: &[&Parameter]) -> Option<TypeLink> {
    if let Some(body) = params.iter().find(|p| p.location.eq_ignore_ascii_case("body")) {
        return Some(body.schema.as_ref().map(schema_link).unwrap_or(TypeLink::Untyped));
    }
    params
        .iter()
        .any(|p| p.location.eq_ignore_ascii_case("formData"))
        .then_some(TypeLink::Untyped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{SpecVersion, parse_document};

    const DOC: &str = r##"{
      "swagger": "2.0",
      "info": { "title": "Math", "version": "1.0", "license": { "name": "MIT" } },
      "parameters": {
        "Precision": { "name": "precision", "in": "query", "type": "integer" }
      },
      "paths": {
        "/square": {
          "get": {
            "operationId": "getSquare",
            "parameters": [
              { "name": "value", "in": "query", "type": "number" },
              { "$ref": "#/parameters/Precision" }
            ],
            "responses": {
              "200": { "description": "ok", "schema": { "$ref": "#/definitions/Result" } }
            }
          }
        },
        "/cube": {
          "get": { "responses": { "200": { "description": "ok" } } },
          "post": {
            "operationId": "postCube",
            "parameters": [
              { "name": "payload", "in": "body", "schema": { "$ref": "#/definitions/Input" } }
            ],
            "responses": { "default": { "description": "error" } }
          }
        }
      },
      "definitions": {
        "Result": { "type": "object", "properties": { "value": { "type": "number" } } },
        "Input": { "type": "object", "properties": { "value": { "type": "number" } } }
      }
    }"##;

    #[test]
    fn test_operations_and_links() {
        let doc = parse_document(DOC, SpecVersion::V2_0).unwrap();
        assert_eq!(doc.license(), "MIT");

        let ops = doc.operations();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].operation_id, "getSquare");
        assert_eq!(ops[0].response, Some(TypeLink::Named("Result".to_string())));
        assert_eq!(ops[0].request_body, None);
        let query: Vec<_> = ops[0].query.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(query, ["value", "precision"]);

        assert_eq!(ops[1].method, HttpMethod::Post);
        assert_eq!(ops[1].request_body, Some(TypeLink::Named("Input".to_string())));
        assert_eq!(ops[1].response, None);
    }

    #[test]
    fn test_form_data_is_untyped_body() {
        let form = Parameter {
            name: "file".to_string(),
            location: "formData".to_string(),
            ..Parameter::default()
        };
        assert_eq!(body_link(&[&form]), Some(TypeLink::Untyped));
        assert_eq!(body_link(&[]), None);
    }
}
