use oac_core::config::{AccessLevel, GenerationOptions};
use oac_core::diagnostics::{DiagnosticCode, Diagnostics};
use oac_core::ir::{Contract, HttpMethod, PropertyKind, TypeLink};
use oac_core::parse::{self, SpecVersion};
use oac_core::transform::build_contract;

const PETSTORE_31: &str = include_str!("fixtures/petstore-3.1.json");
const PETSTORE_30: &str = include_str!("fixtures/petstore-3.0.yaml");
const SWAGGER_12: &str = include_str!("fixtures/swagger-1.2.json");
const MIXED_CASE: &str = include_str!("fixtures/mixed-case.yaml");
const COLLISIONS: &str = include_str!("fixtures/collisions.yaml");

fn build(text: &str, class_name: &str) -> (Contract, Diagnostics) {
    let version = parse::detect_version(text).unwrap();
    let document = parse::parse_document(text, version).unwrap();
    let options =
        GenerationOptions::new("Contoso.Api", class_name).with_access(AccessLevel::Internal);
    let mut diagnostics = Diagnostics::new("test");
    let contract = build_contract(&options, &document, &mut diagnostics);
    (contract, diagnostics)
}

fn method_names(contract: &Contract) -> Vec<&str> {
    contract.methods.iter().map(|m| m.name.as_str()).collect()
}

#[test]
fn test_petstore_31_contract() {
    let (contract, diagnostics) = build(PETSTORE_31, "Pets");
    assert!(diagnostics.is_empty());

    assert_eq!(contract.namespace, "Contoso.Api");
    assert_eq!(contract.class_name, "Pets");
    assert_eq!(contract.access, AccessLevel::Internal);
    assert_eq!(contract.title, "Pets");
    assert_eq!(contract.spec_version, "1.0.0");
    assert_eq!(contract.dialect, SpecVersion::V3_1);

    assert_eq!(method_names(&contract), ["ListPetsAsync"]);
    let method = &contract.methods[0];
    assert_eq!(method.http_verb, HttpMethod::Get);
    assert_eq!(method.path, "/pets");
    assert_eq!(method.summary.as_deref(), Some("List all pets"));
    // `Pets` is an array schema and never becomes a DTO.
    assert_eq!(method.response, Some(TypeLink::Untyped));
    assert_eq!(method.request_query.as_deref(), Some("ListPetsQuery"));

    let query = contract.find_type("ListPetsQuery").expect("query DTO");
    assert_eq!(query.properties["Limit"].wire_name, "limit");
    assert_eq!(query.properties["Limit"].kind, PropertyKind::Int);
}

#[test]
fn test_petstore_30_contract() {
    let (contract, _) = build(PETSTORE_30, "PetStoreClient");
    assert_eq!(
        method_names(&contract),
        ["ListPetsAsync", "CreatePetAsync", "ShowPetByIdAsync"]
    );

    let create = contract.find_method("CreatePetAsync").unwrap();
    assert_eq!(create.request_body, Some(TypeLink::Named("NewPet".to_string())));
    assert_eq!(create.response, Some(TypeLink::Named("Pet".to_string())));
    // No summary, so the description is folded onto one line.
    assert_eq!(create.summary.as_deref(), Some("Creates a pet in the store."));
    assert_eq!(create.request_query, None);

    let pet = contract.find_type("Pet").unwrap();
    assert_eq!(pet.summary.as_deref(), Some("A pet in the store."));
    let kinds: Vec<_> = pet.properties.values().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        [
            PropertyKind::Int,
            PropertyKind::Object,
            PropertyKind::Double,
            PropertyKind::Bool,
            PropertyKind::Object,
        ]
    );

    let list_query = contract.find_type("ListPetsQuery").unwrap();
    assert_eq!(list_query.properties["Tags"].kind, PropertyKind::List);
}

#[test]
fn test_swagger_12_contract() {
    let (contract, _) = build(SWAGGER_12, "Store");
    assert_eq!(contract.license, "Apache 2.0");
    assert_eq!(
        method_names(&contract),
        ["GetOrderByIdAsync", "DeleteOrderAsync", "PlaceOrderAsync"]
    );
    let order = contract.find_type("Order").unwrap();
    assert!(order.properties.contains_key("ShipDate"));
    assert_eq!(order.properties["PetId"].wire_name, "petId");
}

#[test]
fn test_mixed_case_contract() {
    let (contract, _) = build(MIXED_CASE, "Shouting");
    assert_eq!(method_names(&contract), ["ListItemsAsync"]);
    assert_eq!(
        contract.methods[0].response,
        Some(TypeLink::Named("Item".to_string()))
    );
}

#[test]
fn test_collisions_are_resolved_deterministically() {
    let (contract, diagnostics) = build(COLLISIONS, "CollisionsClient");

    assert_eq!(
        method_names(&contract),
        [
            "ThingsAsync",
            "ThingsPostAsync",
            "ThingsGetAsync",
            "UpdateThingAsync",
            "ThingsGet2Async",
            "ExecuteRequestGetAsync",
        ]
    );
    assert_eq!(contract.methods[0].summary.as_deref(), Some("lists things"));

    let renamed = diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::MethodRenamed)
        .count();
    assert_eq!(renamed, 4);
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_duplicate_and_reserved_type_names() {
    let (contract, diagnostics) = build(COLLISIONS, "CollisionsClient");

    let names: Vec<_> = contract.types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Thing", "CollisionsClientModel", "Other"]);

    let thing = contract.find_type("Thing").unwrap();
    assert_eq!(thing.summary.as_deref(), Some("Second spelling wins."));
    assert!(thing.properties.contains_key("B"));
    assert!(!thing.properties.contains_key("A"));

    let other = contract.find_type("Other").unwrap();
    assert!(other.properties.contains_key("OtherValue"));

    assert_eq!(
        diagnostics.codes().iter().filter(|c| **c == DiagnosticCode::DuplicateTypeName).count(),
        1
    );
}

#[test]
fn test_method_names_are_unique_and_valid_identifiers() {
    for (text, class) in [
        (PETSTORE_31, "Pets"),
        (PETSTORE_30, "PetStore"),
        (SWAGGER_12, "Store"),
        (COLLISIONS, "CollisionsClient"),
    ] {
        let (contract, _) = build(text, class);
        let mut names = method_names(&contract);
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);

        let identifiers = contract
            .methods
            .iter()
            .map(|m| m.name.as_str())
            .chain(contract.types.iter().map(|t| t.name.as_str()))
            .chain(
                contract
                    .types
                    .iter()
                    .flat_map(|t| t.properties.keys().map(String::as_str)),
            );
        for ident in identifiers {
            assert!(
                oac_core::config::is_valid_type_name(ident),
                "{ident} is not a valid identifier"
            );
        }
    }
}
