use oac_core::ir::{HttpMethod, TypeLink};
use oac_core::parse::{self, DialectDocument, SpecVersion};

const PETSTORE_31: &str = include_str!("fixtures/petstore-3.1.json");
const PETSTORE_30: &str = include_str!("fixtures/petstore-3.0.yaml");
const SWAGGER_20: &str = include_str!("fixtures/swagger-2.0.json");
const SWAGGER_12: &str = include_str!("fixtures/swagger-1.2.json");
const MIXED_CASE: &str = include_str!("fixtures/mixed-case.yaml");

fn load(text: &str) -> DialectDocument {
    let version = parse::detect_version(text).expect("should detect version");
    parse::parse_document(text, version).expect("should parse document")
}

#[test]
fn test_detect_fixture_versions() {
    assert_eq!(parse::detect_version(PETSTORE_31).unwrap(), SpecVersion::V3_1);
    assert_eq!(parse::detect_version(PETSTORE_30).unwrap(), SpecVersion::V3_0);
    assert_eq!(parse::detect_version(SWAGGER_20).unwrap(), SpecVersion::V2_0);
    assert_eq!(parse::detect_version(SWAGGER_12).unwrap(), SpecVersion::V1_2);
    assert_eq!(parse::detect_version(MIXED_CASE).unwrap(), SpecVersion::V3_0);
}

#[test]
fn test_parse_petstore_31() {
    let doc = load(PETSTORE_31);
    assert_eq!(doc.version(), SpecVersion::V3_1);
    assert_eq!(doc.title(), "Pets");
    assert_eq!(doc.api_version(), "1.0.0");
    assert_eq!(doc.license(), "MIT");

    let ops = doc.operations();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].operation_id, "listPets");
    assert_eq!(ops[0].method, HttpMethod::Get);
    assert_eq!(ops[0].query[0].kind.as_deref(), Some("integer"));
    // `Pets` is an array schema, so it is linked but never declared.
    assert_eq!(ops[0].response, Some(TypeLink::Named("Pets".to_string())));

    let types = doc.types();
    assert_eq!(types.len(), 1);
    assert_eq!(types[0].name, "Pet");
    let kinds: Vec<_> = types[0].properties.iter().map(|p| p.kind.as_deref()).collect();
    assert_eq!(kinds, [Some("integer"), Some("string"), Some("string")]);
}

#[test]
fn test_parse_petstore_30() {
    let doc = load(PETSTORE_30);
    assert_eq!(doc.title(), "Swagger Petstore");
    assert_eq!(doc.description(), "Multi-line\ndescription.\n");
    assert_eq!(doc.license(), "Apache 2.0");

    let ops = doc.operations();
    let ids: Vec<_> = ops.iter().map(|o| o.operation_id.as_str()).collect();
    assert_eq!(ids, ["listPets", "createPet", "show_pet_by_id"]);

    assert_eq!(ops[0].response, Some(TypeLink::Untyped));
    assert_eq!(ops[0].query.len(), 2);
    assert_eq!(
        ops[1].request_body,
        Some(TypeLink::Named("NewPet".to_string()))
    );
    assert_eq!(ops[1].response, Some(TypeLink::Named("Pet".to_string())));
    assert_eq!(ops[2].path, "/pets/{petId}");
    assert!(ops[2].query.is_empty());

    let names: Vec<_> = doc.types().into_iter().map(|t| t.name).collect();
    assert_eq!(names, ["Pet", "NewPet", "Owner", "Error"]);
}

#[test]
fn test_parse_swagger_20() {
    let doc = load(SWAGGER_20);
    assert_eq!(doc.title(), "Calculator");
    assert_eq!(doc.api_version(), "2024-01-01");
    assert_eq!(doc.license(), "");

    let ops = doc.operations();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].operation_id, "getSquare");
    assert_eq!(
        ops[0].response,
        Some(TypeLink::Named("CalculationResult".to_string()))
    );
    assert_eq!(doc.types()[0].properties.len(), 2);
}

#[test]
fn test_parse_swagger_12() {
    let doc = load(SWAGGER_12);
    assert_eq!(doc.title(), "Swagger Sample App");
    assert_eq!(doc.api_version(), "1.0.0");
    assert_eq!(doc.license(), "Apache 2.0");

    let ops = doc.operations();
    let verbs: Vec<_> = ops.iter().map(|o| o.method).collect();
    assert_eq!(verbs, [HttpMethod::Get, HttpMethod::Delete, HttpMethod::Post]);
    assert_eq!(ops[2].request_body, Some(TypeLink::Named("Order".to_string())));
    assert_eq!(ops[1].response, None);

    let types = doc.types();
    assert_eq!(types[0].name, "Order");
    assert_eq!(types[0].properties.len(), 5);
}

#[test]
fn test_parse_mixed_case_fields() {
    let doc = load(MIXED_CASE);
    assert_eq!(doc.title(), "Shouting API");

    let ops = doc.operations();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].operation_id, "list-items");
    assert_eq!(ops[0].path, "/Items");
    assert_eq!(ops[0].summary, "Lists items");
    assert_eq!(ops[0].response, Some(TypeLink::Named("Item".to_string())));

    let types = doc.types();
    let props: Vec<_> = types[0]
        .properties
        .iter()
        .map(|p| (p.name.as_str(), p.kind.as_deref()))
        .collect();
    assert_eq!(props, [("Name", Some("string")), ("Count", Some("integer"))]);
}

#[test]
fn test_parse_yaml_and_json_agree() {
    let json = r#"{"swagger": "2.0", "info": {"title": "T"}, "paths": {"/a": {"get": {"operationId": "a"}}}}"#;
    let yaml = "swagger: '2.0'\ninfo:\n  title: T\npaths:\n  /a:\n    get:\n      operationId: a\n";
    assert_eq!(load(json).operations(), load(yaml).operations());
}

#[test]
fn test_parse_wrong_shape_reports_parser_message() {
    let err = parse::parse_document(r#"{"swagger": "2.0", "paths": []}"#, SpecVersion::V2_0)
        .unwrap_err();
    assert!(err.to_string().contains("invalid type"), "{err}");
}
