//! Case-insensitive field matching.
//!
//! Documents in the wild spell fixed field names loosely (`OperationId`,
//! `PATHS`). Before structural deserialization the parsed tree is walked once
//! and every key that matches a known OpenAPI/Swagger field name, ignoring
//! ASCII case, is rewritten to its canonical spelling. Keys chosen by the
//! document author (paths, schema names, property names, media types, status
//! codes) are left untouched.

use serde_json::{Map, Value};

/// Canonical spellings of the fixed field names of every supported dialect.
const FIELD_NAMES: &[&str] = &[
    // root and info
    "openapi",
    "swagger",
    "swaggerVersion",
    "apiVersion",
    "basePath",
    "resourcePath",
    "host",
    "schemes",
    "info",
    "title",
    "summary",
    "description",
    "version",
    "termsOfService",
    "contact",
    "license",
    "licenseUrl",
    "identifier",
    "name",
    "url",
    "email",
    "paths",
    "webhooks",
    "components",
    "definitions",
    "models",
    "apis",
    "authorizations",
    "parameters",
    "responses",
    "securityDefinitions",
    "security",
    "tags",
    "externalDocs",
    "servers",
    "variables",
    "consumes",
    "produces",
    "jsonSchemaDialect",
    // path items and operations
    "get",
    "put",
    "post",
    "delete",
    "options",
    "head",
    "patch",
    "trace",
    "path",
    "operations",
    "operationId",
    "nickname",
    "method",
    "notes",
    "requestBody",
    "callbacks",
    "deprecated",
    "responseMessages",
    "responseModel",
    "code",
    "message",
    // parameters
    "in",
    "paramType",
    "required",
    "schema",
    "allowEmptyValue",
    "allowMultiple",
    "collectionFormat",
    "style",
    "explode",
    "allowReserved",
    "content",
    "encoding",
    "contentType",
    "headers",
    "links",
    // schemas
    "$ref",
    "$id",
    "$schema",
    "$defs",
    "id",
    "type",
    "format",
    "items",
    "properties",
    "additionalProperties",
    "patternProperties",
    "allOf",
    "oneOf",
    "anyOf",
    "not",
    "nullable",
    "readOnly",
    "writeOnly",
    "discriminator",
    "propertyName",
    "mapping",
    "subTypes",
    "xml",
    "minimum",
    "maximum",
    "exclusiveMinimum",
    "exclusiveMaximum",
    "multipleOf",
    "minLength",
    "maxLength",
    "pattern",
    "minItems",
    "maxItems",
    "uniqueItems",
    // components
    "schemas",
    "requestBodies",
    "securitySchemes",
    "pathItems",
    "scopes",
    // opaque values
    "example",
    "examples",
    "default",
    "enum",
    "const",
];

/// Fields whose value is a map keyed by author-chosen names.
const MAP_FIELDS: &[&str] = &[
    "paths",
    "webhooks",
    "definitions",
    "models",
    "parameters",
    "responses",
    "properties",
    "patternProperties",
    "$defs",
    "schemas",
    "requestBodies",
    "securitySchemes",
    "securityDefinitions",
    "pathItems",
    "content",
    "headers",
    "links",
    "callbacks",
    "encoding",
    "variables",
    "mapping",
    "scopes",
];

/// Fields whose value is user data and is never rewritten.
const OPAQUE_FIELDS: &[&str] = &["example", "examples", "default", "enum", "const", "security"];

/// Rewrite the fixed field names of a parsed document to canonical case.
///
/// When two keys of the same object fold to the same name, the later one wins.
pub fn fold_field_case(value: &mut Value) {
    fold_fields(value);
}

/// Canonical spelling of `key`, if it is a known field name.
pub fn canonical_field(key: &str) -> Option<&'static str> {
    FIELD_NAMES
        .iter()
        .copied()
        .find(|name| name.eq_ignore_ascii_case(key))
}

fn is_extension(key: &str) -> bool {
    key.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("x-"))
}

/// An object whose keys are fixed field names.
fn fold_fields(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let entries = std::mem::take(map);
            let mut folded = Map::with_capacity(entries.len());
            for (key, mut child) in entries {
                if is_extension(&key) {
                    folded.insert(key, child);
                    continue;
                }
                let Some(canonical) = canonical_field(&key) else {
                    fold_fields(&mut child);
                    folded.insert(key, child);
                    continue;
                };
                if MAP_FIELDS.contains(&canonical) {
                    fold_map(&mut child);
                } else if !OPAQUE_FIELDS.contains(&canonical) {
                    fold_fields(&mut child);
                }
                folded.insert(canonical.to_string(), child);
            }
            *map = folded;
        }
        Value::Array(items) => items.iter_mut().for_each(fold_fields),
        _ => {}
    }
}

/// An object keyed by author-chosen names whose values are field objects.
/// Arrays (e.g. operation `parameters`) hold field objects directly.
fn fold_map(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if !is_extension(key) {
                    fold_fields(child);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(fold_fields),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fixed_fields_are_canonicalized() {
        let mut doc = json!({
            "OpenAPI": "3.1.0",
            "INFO": { "Title": "Pets" },
            "Paths": {
                "/Pets": { "GET": { "OperationId": "listPets" } }
            }
        });
        fold_field_case(&mut doc);
        assert_eq!(doc["openapi"], "3.1.0");
        assert_eq!(doc["info"]["title"], "Pets");
        assert_eq!(doc["paths"]["/Pets"]["get"]["operationId"], "listPets");
    }

    #[test]
    fn test_user_keys_are_preserved() {
        let mut doc = json!({
            "components": {
                "schemas": {
                    "Type": {
                        "properties": { "Name": { "TYPE": "string" }, "ID": {} }
                    }
                }
            }
        });
        fold_field_case(&mut doc);
        let schema = &doc["components"]["schemas"]["Type"];
        assert_eq!(schema["properties"]["Name"]["type"], "string");
        assert!(schema["properties"].get("ID").is_some());
    }

    #[test]
    fn test_opaque_values_untouched() {
        let mut doc = json!({
            "Example": { "Title": "kept" },
            "x-Custom": { "Paths": 1 },
            "security": [{ "Api_Key": [] }]
        });
        fold_field_case(&mut doc);
        assert_eq!(doc["example"]["Title"], "kept");
        assert_eq!(doc["x-Custom"]["Paths"], 1);
        assert!(doc["security"][0].get("Api_Key").is_some());
    }

    #[test]
    fn test_parameter_arrays_are_folded() {
        let mut doc = json!({ "Parameters": [ { "Name": "limit", "IN": "query" } ] });
        fold_field_case(&mut doc);
        assert_eq!(doc["parameters"][0]["in"], "query");
    }
}
