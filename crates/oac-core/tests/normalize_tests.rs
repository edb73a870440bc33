use oac_core::transform::name_normalizer::{
    IdentifierStyle, camel_case, pascal_case, route_to_name, sanitize_identifier,
    strip_reserved_tokens,
};

#[test]
fn test_camel_case_input() {
    assert_eq!(pascal_case("createChatCompletion"), "CreateChatCompletion");
    assert_eq!(camel_case("createChatCompletion"), "createChatCompletion");
}

#[test]
fn test_pascal_case_input() {
    assert_eq!(pascal_case("ChatMessage"), "ChatMessage");
    assert_eq!(camel_case("ChatMessage"), "chatMessage");
}

#[test]
fn test_snake_case_input() {
    assert_eq!(pascal_case("chat_message"), "ChatMessage");
    assert_eq!(camel_case("chat_message"), "chatMessage");
}

#[test]
fn test_kebab_case_input() {
    assert_eq!(pascal_case("pet-store-api"), "PetStoreApi");
}

#[test]
fn test_screaming_words_keep_their_tail() {
    assert_eq!(pascal_case("GET_USERS"), "GETUSERS");
    assert_eq!(pascal_case("get users by ID"), "GetUsersByID");
}

#[test]
fn test_media_type_like_input() {
    assert_eq!(pascal_case("application/json"), "Applicationjson");
    assert_eq!(pascal_case("application json"), "ApplicationJson");
}

#[test]
fn test_only_ascii_survives() {
    assert_eq!(pascal_case("naïve_ñame"), "NaveAme");
    assert_eq!(pascal_case("日本"), "");
}

#[test]
fn test_leading_digits() {
    assert_eq!(pascal_case("2fa_token"), "_2faToken");
    assert_eq!(camel_case("404"), "_404");
}

#[test]
fn test_idempotent_over_samples() {
    let samples = [
        "listPets",
        "list_pets",
        "List-Pets-Async",
        "  spaced   out  ",
        "%CLASS%thing",
        "v1.2.3",
        "1st place",
        "__init__",
        "Ünïcödé",
        "",
    ];
    for sample in samples {
        for style in [IdentifierStyle::Pascal, IdentifierStyle::Camel] {
            let once = sanitize_identifier(sample, style);
            let twice = sanitize_identifier(&once, style);
            assert_eq!(once, twice, "{sample:?} with {style:?}");
        }
    }
}

#[test]
fn test_reserved_tokens_removed_before_sanitizing() {
    assert_eq!(pascal_case(&strip_reserved_tokens("get%VERSION%_pets")), "GetPets");
}

#[test]
fn test_route_fallback_names() {
    assert_eq!(pascal_case(&route_to_name("GET", "/users/{id}")), "GetUser");
    assert_eq!(pascal_case(&route_to_name("POST", "/users")), "CreateUsers");
    assert_eq!(pascal_case(&route_to_name("GET", "/categories")), "ListCategories");
}
