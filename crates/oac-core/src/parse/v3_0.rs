use indexmap::IndexMap;
use serde::Deserialize;

use super::SchemaShape;
use super::node::{RefOr, null_as_default};
use super::openapi3::Document;

/// An OpenAPI 3.0.x document.
pub type OpenApiV30 = Document<Schema>;

/// Schema object with a single `type` keyword.
///
/// Swagger 2.0 definitions use the same subset.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub properties: IndexMap<String, RefOr<Schema>>,
}

impl SchemaShape for Schema {
    fn declared_type(&self) -> Option<&str> {
        self.schema_type.as_deref()
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

#[cfg(test)]
mod tests {
    use crate::ir::{HttpMethod, TypeLink};
    use crate::parse::{DialectDocument, SpecVersion, parse_document};

    const DOC: &str = r##"
openapi: 3.0.3
info:
  title: Store
  version: "2.1"
  license:
    name: MIT
paths:
  /orders/{id}:
    parameters:
      - name: expand
        in: query
        schema: { type: boolean }
    get:
      operationId: getOrder
      parameters:
        - $ref: '#/components/parameters/Limit'
        - name: id
          in: path
          schema: { type: integer }
      responses:
        '200':
          $ref: '#/components/responses/OrderResponse'
    delete:
      operationId: ""
      responses: {}
  /orders:
    post:
      operationId: createOrder
      requestBody:
        content:
          text/plain:
            schema: { type: string }
          application/json:
            schema:
              $ref: '#/components/schemas/Order'
      responses:
        '201':
          description: created
components:
  parameters:
    Limit:
      name: limit
      in: query
      schema: { type: integer }
  responses:
    OrderResponse:
      description: ok
      content:
        application/json:
          schema:
            $ref: '#/components/schemas/Order'
  schemas:
    Order:
      type: object
      description: An order.
      properties:
        id: { type: integer }
        total: { type: number }
        owner: { $ref: '#/components/schemas/Owner' }
    Owner:
      properties:
        name: { type: string }
    Status:
      type: string
    Alias:
      $ref: '#/components/schemas/Order'
"##;

    fn document() -> DialectDocument {
        parse_document(DOC, SpecVersion::V3_0).unwrap()
    }

    #[test]
    fn test_info_projection() {
        let doc = document();
        assert_eq!(doc.title(), "Store");
        assert_eq!(doc.api_version(), "2.1");
        assert_eq!(doc.license(), "MIT");
        assert_eq!(doc.description(), "");
    }

    #[test]
    fn test_operations_skip_empty_ids() {
        let ops = document().operations();
        let ids: Vec<_> = ops.iter().map(|o| o.operation_id.as_str()).collect();
        assert_eq!(ids, ["getOrder", "createOrder"]);
        assert_eq!(ops[0].method, HttpMethod::Get);
        assert_eq!(ops[0].path, "/orders/{id}");
    }

    #[test]
    fn test_query_parameters_are_merged_and_resolved() {
        let ops = document().operations();
        let query: Vec<_> = ops[0]
            .query
            .iter()
            .map(|q| (q.name.as_str(), q.kind.as_deref()))
            .collect();
        assert_eq!(query, [("expand", Some("boolean")), ("limit", Some("integer"))]);
    }

    #[test]
    fn test_payload_links() {
        let ops = document().operations();
        assert_eq!(ops[0].request_body, None);
        assert_eq!(ops[0].response, Some(TypeLink::Named("Order".to_string())));
        assert_eq!(
            ops[1].request_body,
            Some(TypeLink::Named("Order".to_string()))
        );
        // 201 without content
        assert_eq!(ops[1].response, None);
    }

    #[test]
    fn test_types_keep_object_schemas_only() {
        let types = document().types();
        let names: Vec<_> = types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Order", "Owner"]);
        assert_eq!(types[0].summary, "An order.");
        let kinds: Vec<_> = types[0].properties.iter().map(|p| p.kind.as_deref()).collect();
        assert_eq!(kinds, [Some("integer"), Some("number"), None]);
    }

    #[test]
    fn test_type_mismatch_fails() {
        let err = parse_document(
            r#"{"openapi": "3.0.0", "paths": "nope"}"#,
            SpecVersion::V3_0,
        );
        assert!(err.is_err());
    }
}
