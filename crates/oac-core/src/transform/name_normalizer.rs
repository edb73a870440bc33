use heck::ToPascalCase;

/// Placeholder tokens the emitter substitutes itself; they must never leak
/// from document text into generated identifiers or comments.
pub const RESERVED_TOKENS: [&str; 4] = ["%CLASS%", "%TITLE%", "%ACCESS%", "%VERSION%"];

/// Casing applied when re-joining the words of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierStyle {
    Pascal,
    Camel,
}

/// Turn arbitrary text into a C# identifier.
///
/// `_` and `-` separate words, non-ASCII characters are dropped, and anything
/// outside `[A-Za-z0-9]` or whitespace is removed. Each word keeps its tail and
/// only has its first letter re-cased. A result that would start with a digit
/// gets a leading `_`. Applying the function to its own output is a no-op.
pub fn sanitize_identifier(text: &str, style: IdentifierStyle) -> String {
    let cleaned: String = text
        .chars()
        .filter_map(|ch| match ch {
            '_' | '-' => Some(' '),
            c if !c.is_ascii() => None,
            c if c.is_ascii_alphanumeric() => Some(c),
            c if c.is_ascii_whitespace() => Some(' '),
            _ => None,
        })
        .collect();

    let mut result = String::with_capacity(cleaned.len());
    for (i, word) in cleaned.split_whitespace().enumerate() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if i == 0 && style == IdentifierStyle::Camel {
                result.push(first.to_ascii_lowercase());
            } else {
                result.push(first.to_ascii_uppercase());
            }
            result.push_str(chars.as_str());
        }
    }

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}

pub fn pascal_case(text: &str) -> String {
    sanitize_identifier(text, IdentifierStyle::Pascal)
}

pub fn camel_case(text: &str) -> String {
    sanitize_identifier(text, IdentifierStyle::Camel)
}

/// Remove every reserved placeholder token from `text`.
pub fn strip_reserved_tokens(text: &str) -> String {
    RESERVED_TOKENS
        .iter()
        .fold(text.to_string(), |acc, token| acc.replace(token, ""))
}

/// Derive a camelCase operation name from HTTP method + path.
///
/// Examples:
/// - `GET /users` → `listUsers`
/// - `POST /users` → `createUsers`
/// - `GET /users/{userId}` → `getUser`
/// - `DELETE /users/{userId}` → `deleteUser`
/// - `GET /users/{userId}/messages` → `listUsersMessages`
pub fn route_to_name(method: &str, path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mut resource_parts: Vec<&str> = Vec::new();
    let mut ends_with_param = false;

    for seg in &segments {
        if seg.starts_with('{') && seg.ends_with('}') {
            ends_with_param = true;
        } else {
            resource_parts.push(seg);
            ends_with_param = false;
        }
    }

    let method_upper = method.to_uppercase();
    let prefix = match method_upper.as_str() {
        "GET" if ends_with_param => "get",
        "GET" => "list",
        "POST" => "create",
        "PUT" => "update",
        "DELETE" => "delete",
        "PATCH" => "patch",
        "OPTIONS" => "options",
        "HEAD" => "head",
        "TRACE" => "trace",
        _ => "call",
    };

    // Singularize the last segment only for single-resource routes.
    let mut pascal_parts = String::new();
    for (i, part) in resource_parts.iter().enumerate() {
        let is_last = i == resource_parts.len() - 1;
        let word = if is_last && ends_with_param {
            singularize(part)
        } else {
            part.to_string()
        };
        pascal_parts.push_str(&word.to_pascal_case());
    }

    format!("{prefix}{pascal_parts}")
}

/// Naive singularization: strips trailing 's' if present.
fn singularize(word: &str) -> String {
    if word.ends_with("ies") && word.len() > 3 {
        format!("{}y", &word[..word.len() - 3])
    } else if word.ends_with("ses") || word.ends_with("xes") || word.ends_with("zes") {
        word[..word.len() - 2].to_string()
    } else if word.ends_with('s') && !word.ends_with("ss") && word.len() > 1 {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}
