//! Swagger 1.2 resource listings and API declarations.
//!
//! A 1.2 document lists `apis`, each with a `path` and an array of
//! `operations` identified by `nickname`. Models are keyed by id and
//! payloads refer to them by bare name through `type`.

use indexmap::IndexMap;
use serde::Deserialize;

use super::node::{lenient_string, null_as_default};
use super::{RawOperation, RawProperty, RawType, present_id};
use crate::ir::{HttpMethod, TypeLink};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SwaggerV12 {
    #[serde(rename = "apiVersion", deserialize_with = "lenient_string")]
    pub api_version: Option<String>,
    #[serde(rename = "basePath")]
    pub base_path: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub info: Info,
    #[serde(deserialize_with = "null_as_default")]
    pub apis: Vec<Api>,
    #[serde(deserialize_with = "null_as_default")]
    pub models: IndexMap<String, Model>,
}

/// 1.2 info block; `license` is a plain string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Info {
    pub title: Option<String>,
    pub description: Option<String>,
    pub license: Option<String>,
    #[serde(rename = "licenseUrl")]
    pub license_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Api {
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Operation {
    pub method: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub nickname: Option<String>,
    pub summary: Option<String>,
    pub notes: Option<String>,
    /// Response model id or primitive name.
    #[serde(rename = "type")]
    pub response_type: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Parameter {
    #[serde(rename = "paramType", deserialize_with = "null_as_default")]
    pub param_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Model {
    pub id: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub properties: IndexMap<String, ModelProperty>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModelProperty {
    #[serde(rename = "type")]
    pub data_type: Option<String>,
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
}

impl SwaggerV12 {
    pub fn operations(&self) -> Vec<RawOperation> {
        let mut operations = Vec::new();
        for api in &self.apis {
            for op in &api.operations {
                let Some(nickname) = present_id(op.nickname.as_ref()) else {
                    log::debug!("skipping operation on {}: no nickname", api.path);
                    continue;
                };
                let Some(method) = op.method.as_deref().and_then(HttpMethod::parse) else {
                    log::warn!("skipping {nickname}: unrecognized method {:?}", op.method);
                    continue;
                };
                let body = op
                    .parameters
                    .iter()
                    .find(|p| p.param_type.eq_ignore_ascii_case("body"));
                operations.push(RawOperation {
                    method,
                    path: api.path.clone(),
                    operation_id: nickname.to_string(),
                    summary: op.summary.clone().unwrap_or_default(),
                    description: op.notes.clone().unwrap_or_default(),
                    request_body: body.map(|p| self.model_link(p.data_type.as_deref())),
                    response: op
                        .response_type
                        .as_deref()
                        .filter(|t| !t.eq_ignore_ascii_case("void"))
                        .map(|t| self.model_link(Some(t))),
                    query: op
                        .parameters
                        .iter()
                        .filter(|p| {
                            p.param_type.eq_ignore_ascii_case("query") && !p.name.is_empty()
                        })
                        .map(|p| RawProperty {
                            name: p.name.clone(),
                            kind: p.data_type.clone(),
                        })
                        .collect(),
                });
            }
        }
        operations
    }

    pub fn types(&self) -> Vec<RawType> {
        self.models
            .iter()
            .map(|(key, model)| RawType {
                name: model.id.clone().unwrap_or_else(|| key.clone()),
                summary: model.description.clone().unwrap_or_default(),
                properties: model
                    .properties
                    .iter()
                    .map(|(name, prop)| RawProperty {
                        name: name.clone(),
                        kind: match prop.reference {
                            Some(_) => None,
                            None => prop.data_type.clone(),
                        },
                    })
                    .collect(),
            })
            .collect()
    }

    /// Payload `type` values name a model when one with that id exists.
    fn model_link(&self, data_type: Option<&str>) -> TypeLink {
        match data_type {
            Some(name) if self.has_model(name) => TypeLink::Named(name.to_string()),
            _ => TypeLink::Untyped,
        }
    }

    fn has_model(&self, name: &str) -> bool {
        self.models
            .iter()
            .any(|(key, model)| key == name || model.id.as_deref() == Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{SpecVersion, parse_document};

    const DOC: &str = r#"
swaggerVersion: "1.2"
apiVersion: 1.0
basePath: http://example.com/api
info:
  title: Legacy Pets
  description: A 1.2 API
  license: Apache 2.0
apis:
  - path: /pet/{petId}
    operations:
      - method: GET
        nickname: getPetById
        summary: Find pet by ID
        type: Pet
        parameters:
          - paramType: path
            name: petId
            type: integer
      - method: DELETE
        summary: Unnamed
  - path: /pet
    operations:
      - method: POST
        nickname: addPet
        notes: Adds a pet
        type: void
        parameters:
          - paramType: body
            name: body
            type: Pet
          - paramType: query
            name: dryRun
            type: boolean
models:
  Pet:
    id: Pet
    properties:
      id:
        type: integer
      category:
        $ref: Category
"#;

    #[test]
    fn test_info_and_version() {
        let doc = parse_document(DOC, SpecVersion::V1_2).unwrap();
        assert_eq!(doc.title(), "Legacy Pets");
        assert_eq!(doc.description(), "A 1.2 API");
        assert_eq!(doc.license(), "Apache 2.0");
        assert_eq!(doc.api_version(), "1.0");
    }

    #[test]
    fn test_operations_use_nickname() {
        let doc = parse_document(DOC, SpecVersion::V1_2).unwrap();
        let ops = doc.operations();
        assert_eq!(ops.len(), 2);

        assert_eq!(ops[0].operation_id, "getPetById");
        assert_eq!(ops[0].method, HttpMethod::Get);
        assert_eq!(ops[0].response, Some(TypeLink::Named("Pet".to_string())));

        assert_eq!(ops[1].operation_id, "addPet");
        assert_eq!(ops[1].description, "Adds a pet");
        assert_eq!(ops[1].request_body, Some(TypeLink::Named("Pet".to_string())));
        assert_eq!(ops[1].response, None);
        assert_eq!(ops[1].query.len(), 1);
        assert_eq!(ops[1].query[0].kind.as_deref(), Some("boolean"));
    }

    #[test]
    fn test_models() {
        let doc = parse_document(DOC, SpecVersion::V1_2).unwrap();
        let types = doc.types();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "Pet");
        assert_eq!(types[0].properties[0].kind.as_deref(), Some("integer"));
        assert_eq!(types[0].properties[1].kind, None);
    }
}
