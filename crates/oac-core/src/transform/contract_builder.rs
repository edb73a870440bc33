use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use super::name_normalizer::{pascal_case, route_to_name, strip_reserved_tokens};
use crate::config::GenerationOptions;
use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::ir::{Contract, Method, Property, PropertyKind, TypeDef, TypeLink};
use crate::parse::{DialectDocument, RawOperation, RawProperty};

/// Method name declared by the generated client class itself.
pub const RESERVED_METHOD_NAMES: [&str; 1] = ["ExecuteRequestAsync"];

/// Names of the support types the emitter declares next to the DTOs.
pub fn generated_type_names(class_name: &str) -> Vec<String> {
    vec![
        class_name.to_string(),
        format!("I{class_name}"),
        format!("{class_name}Exception"),
        format!("{class_name}ResultError"),
        format!("I{class_name}Result"),
        format!("{class_name}Result"),
        "OpenApiPropertyAttribute".to_string(),
        "IOpenApiJsonSerializer".to_string(),
        "OpenApiJsonSerializer".to_string(),
    ]
}

/// Normalize a parsed document into a [`Contract`].
///
/// Non-fatal findings (collapsed duplicate types, renamed methods) are
/// reported as warnings. An empty method list is left for the caller to
/// judge.
pub fn build_contract(
    options: &GenerationOptions,
    document: &DialectDocument,
    diagnostics: &mut Diagnostics,
) -> Contract {
    let reserved_types = generated_type_names(&options.class_name);
    let mut builder = ContractBuilder {
        reserved_types: &reserved_types,
        types: IndexMap::new(),
        type_aliases: HashMap::new(),
        method_names: RESERVED_METHOD_NAMES
            .iter()
            .map(|name| name.to_string())
            .chain([options.class_name.clone()])
            .collect(),
        diagnostics,
    };

    for raw in document.types() {
        builder.add_type(&raw.name, &raw.summary, &raw.properties);
    }

    let methods: Vec<Method> = document
        .operations()
        .iter()
        .map(|raw| builder.add_method(raw))
        .collect();

    log::debug!(
        "built contract with {} methods and {} types",
        methods.len(),
        builder.types.len()
    );

    Contract {
        namespace: options.namespace.clone(),
        class_name: options.class_name.clone(),
        access: options.access,
        title: document.title(),
        description: document.description(),
        license: document.license(),
        spec_version: document.api_version(),
        dialect: document.version(),
        methods,
        types: builder.types.into_values().collect(),
    }
}

struct ContractBuilder<'a> {
    reserved_types: &'a [String],
    types: IndexMap<String, TypeDef>,
    /// Raw schema name → sanitized type name.
    type_aliases: HashMap<String, String>,
    method_names: HashSet<String>,
    diagnostics: &'a mut Diagnostics,
}

impl ContractBuilder<'_> {
    fn add_type(&mut self, raw_name: &str, summary: &str, properties: &[RawProperty]) {
        let mut name = pascal_case(&strip_reserved_tokens(raw_name));
        if name.is_empty() {
            log::warn!("skipping schema {raw_name:?}: name has no identifier characters");
            return;
        }
        if self.reserved_types.contains(&name) {
            name.push_str("Model");
        }

        let type_def = TypeDef {
            properties: build_properties(&name, properties),
            summary: clean_text(summary),
            name: name.clone(),
        };
        if self.types.contains_key(&name) {
            self.diagnostics.report(
                DiagnosticCode::DuplicateTypeName,
                format!("schema '{raw_name}' maps to type '{name}' which is already declared; the later definition wins"),
            );
        }
        self.type_aliases.insert(raw_name.to_string(), name.clone());
        // Replacing keeps the position of the first occurrence.
        self.types.insert(name, type_def);
    }

    fn add_method(&mut self, raw: &RawOperation) -> Method {
        let mut stem = pascal_case(&strip_reserved_tokens(&raw.operation_id));
        if stem.is_empty() {
            stem = pascal_case(&route_to_name(raw.method.as_str(), &raw.path));
        }

        let name = self.unique_method_name(&stem, raw);
        self.method_names.insert(name.clone());

        let request_query = (!raw.query.is_empty()).then(|| self.add_query_type(&name, raw));

        Method {
            http_verb: raw.method,
            path: raw.path.clone(),
            summary: clean_text(&raw.summary).or_else(|| clean_text(&raw.description)),
            request_body: raw.request_body.as_ref().map(|link| self.resolve(link)),
            request_query,
            response: raw.response.as_ref().map(|link| self.resolve(link)),
            name,
        }
    }

    /// `<Stem>Async`, then `<Stem><Verb>Async`, then `<Stem><Verb><N>Async`
    /// counting from 2.
    fn unique_method_name(&mut self, stem: &str, raw: &RawOperation) -> String {
        let base = format!("{stem}Async");
        if !self.method_names.contains(&base) {
            return base;
        }

        let verb = raw.method.pascal_name();
        let mut candidate = format!("{stem}{verb}Async");
        let mut counter = 2;
        while self.method_names.contains(&candidate) {
            candidate = format!("{stem}{verb}{counter}Async");
            counter += 1;
        }

        self.diagnostics.report(
            DiagnosticCode::MethodRenamed,
            format!(
                "operation '{}' ({} {}) would produce the duplicate method name '{base}'; renamed to '{candidate}'",
                raw.operation_id,
                raw.method.as_str(),
                raw.path
            ),
        );
        candidate
    }

    /// Synthesize the `<Stem>Query` DTO that carries an operation's query
    /// parameters.
    fn add_query_type(&mut self, method_name: &str, raw: &RawOperation) -> String {
        let stem = method_name.strip_suffix("Async").unwrap_or(method_name);
        let base = format!("{stem}Query");
        let mut name = base.clone();
        let mut counter = 2;
        while self.types.contains_key(&name) || self.reserved_types.contains(&name) {
            name = format!("{base}{counter}");
            counter += 1;
        }

        self.types.insert(
            name.clone(),
            TypeDef {
                name: name.clone(),
                summary: Some(format!(
                    "Query parameters of {} {}.",
                    raw.method.as_str(),
                    raw.path
                )),
                properties: build_properties(&name, &raw.query),
            },
        );
        name
    }

    fn resolve(&self, link: &TypeLink) -> TypeLink {
        match link {
            TypeLink::Named(raw) => match self.type_aliases.get(raw) {
                Some(name) if self.types.contains_key(name) => TypeLink::Named(name.clone()),
                _ => {
                    log::debug!("schema {raw:?} is not a declared type; using an untyped payload");
                    TypeLink::Untyped
                }
            },
            TypeLink::Untyped => TypeLink::Untyped,
        }
    }
}

/// Sanitize property names. A property may not share its type's name, and
/// names that collide after sanitizing get a numeric suffix.
fn build_properties(type_name: &str, raw: &[RawProperty]) -> IndexMap<String, Property> {
    let mut properties = IndexMap::new();
    for prop in raw {
        let mut name = pascal_case(&prop.name);
        if name.is_empty() {
            log::warn!("skipping property {:?} of {type_name}", prop.name);
            continue;
        }
        if name == type_name {
            name.push_str("Value");
        }
        if properties.contains_key(&name) {
            let base = name.clone();
            let mut counter = 2;
            while properties.contains_key(&name) {
                name = format!("{base}{counter}");
                counter += 1;
            }
        }
        properties.insert(
            name,
            Property {
                kind: PropertyKind::from_declared(prop.kind.as_deref()),
                wire_name: prop.name.clone(),
            },
        );
    }
    properties
}

/// Strip placeholder tokens and fold the text onto one trimmed line.
fn clean_text(text: &str) -> Option<String> {
    let stripped = strip_reserved_tokens(text);
    let line = stripped
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!line.is_empty()).then_some(line)
}
