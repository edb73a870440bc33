use oac_core::ir::{Method, PropertyKind, TypeLink};

/// Map a DTO property kind to its C# type.
pub fn property_kind_to_cs(kind: PropertyKind) -> &'static str {
    match kind {
        PropertyKind::Int => "int",
        PropertyKind::Double => "double",
        PropertyKind::Bool => "bool",
        PropertyKind::List => "object?[]?",
        PropertyKind::Object => "object?",
    }
}

/// C# type of a request body parameter.
pub fn body_type(link: &TypeLink) -> &str {
    link.name().unwrap_or("object")
}

/// Name of the DTO a typed result carries, if any. Untyped responses produce
/// the non-generic result.
pub fn response_type(method: &Method) -> Option<&str> {
    method.response.as_ref().and_then(TypeLink::name)
}

/// `<Class>Result` or `<Class>Result<T>`.
pub fn result_type(class_name: &str, method: &Method) -> String {
    match response_type(method) {
        Some(name) => format!("{class_name}Result<{name}>"),
        None => format!("{class_name}Result"),
    }
}

/// Parameter list shared by the interface and the class.
pub fn method_parameters(method: &Method) -> String {
    let mut parts = Vec::new();
    if let Some(body) = &method.request_body {
        parts.push(format!("{} request", body_type(body)));
    }
    if let Some(query) = &method.request_query {
        parts.push(format!("{query} query"));
    }
    parts.push(
        "global::System.Threading.CancellationToken cancellationToken = default".to_string(),
    );
    parts.join(", ")
}
