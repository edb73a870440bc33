use std::collections::HashSet;

use minijinja::{Value, context};
use oac_core::ir::{Contract, TypeDef};

use crate::type_mapper::property_kind_to_cs;

/// Build one context per DTO. Query DTOs are flagged so their properties
/// carry the wire-name attribute read when building query strings.
pub fn type_contexts(contract: &Contract) -> Vec<Value> {
    let query_types: HashSet<&str> = contract
        .methods
        .iter()
        .filter_map(|m| m.request_query.as_deref())
        .collect();

    contract
        .types
        .iter()
        .map(|t| type_context(t, query_types.contains(t.name.as_str())))
        .collect()
}

fn type_context(type_def: &TypeDef, is_query: bool) -> Value {
    let properties: Vec<Value> = type_def
        .properties
        .iter()
        .map(|(name, prop)| {
            context! {
                name => name.clone(),
                wire_name => prop.wire_name.clone(),
                cs_type => property_kind_to_cs(prop.kind),
            }
        })
        .collect();

    context! {
        name => type_def.name.clone(),
        summary => type_def.summary.clone(),
        is_query => is_query,
        properties => properties,
    }
}
