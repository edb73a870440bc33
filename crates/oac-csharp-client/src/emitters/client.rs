use minijinja::{Value, context};
use oac_core::ir::{Contract, Method};

use crate::type_mapper::{body_type, method_parameters, response_type, result_type};

/// Build one context per contract method for the interface and class sections.
pub fn method_contexts(contract: &Contract) -> Vec<Value> {
    contract
        .methods
        .iter()
        .map(|m| method_context(&contract.class_name, m))
        .collect()
}

fn method_context(class_name: &str, method: &Method) -> Value {
    context! {
        name => method.name.clone(),
        http_verb => method.http_verb.as_str(),
        path => method.path.clone(),
        summary => method.summary.clone(),
        parameters => method_parameters(method),
        body_type => method.request_body.as_ref().map(body_type),
        query_type => method.request_query.clone(),
        result_type => result_type(class_name, method),
        response_type => response_type(method),
    }
}
