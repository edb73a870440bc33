pub mod client;
pub mod types;

use minijinja::{Environment, Value, context};
use oac_core::config::SerializationTool;
use oac_core::error::GeneratorError;
use oac_core::ir::Contract;

/// Template sections in emission order.
pub const SECTIONS: [(&str, &str); 9] = [
    ("header.cs.j2", include_str!("../../templates/header.cs.j2")),
    ("exception.cs.j2", include_str!("../../templates/exception.cs.j2")),
    ("result.cs.j2", include_str!("../../templates/result.cs.j2")),
    ("interface.cs.j2", include_str!("../../templates/interface.cs.j2")),
    ("class.cs.j2", include_str!("../../templates/class.cs.j2")),
    ("attribute.cs.j2", include_str!("../../templates/attribute.cs.j2")),
    ("serializer.cs.j2", include_str!("../../templates/serializer.cs.j2")),
    ("types.cs.j2", include_str!("../../templates/types.cs.j2")),
    ("footer.cs.j2", include_str!("../../templates/footer.cs.j2")),
];

/// Escape text for a single-line `///` XML doc comment.
pub fn xml_doc(value: String) -> String {
    single_line(value)
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text for the inside of a regular C# string literal.
pub fn cs_string(value: String) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Fold text onto one line so it cannot end a `//` comment early.
pub fn single_line(value: String) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn environment() -> Result<Environment<'static>, GeneratorError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_filter("xml_doc", xml_doc);
    env.add_filter("cs_string", cs_string);
    env.add_filter("single_line", single_line);
    for (name, source) in SECTIONS {
        env.add_template(name, source)
            .map_err(|e| GeneratorError::Render(format!("{name}: {e}")))?;
    }
    Ok(env)
}

/// Build the context shared by every section.
fn build_context(contract: &Contract, serializer: SerializationTool, version: &str) -> Value {
    let display_name = if contract.title.trim().is_empty() {
        contract.class_name.clone()
    } else {
        contract.title.clone()
    };

    context! {
        namespace => contract.namespace.clone(),
        class_name => contract.class_name.clone(),
        access => contract.access.as_str(),
        type_access => contract.access.type_modifier(),
        generator_version => version,
        title => contract.title.clone(),
        display_name => display_name,
        description => contract.description.clone(),
        license => contract.license.clone(),
        spec_version => contract.spec_version.clone(),
        dialect => contract.dialect.to_string(),
        serializer => serializer.as_str(),
        methods => client::method_contexts(contract),
        types => types::type_contexts(contract),
    }
}

/// Render the whole client source file for `contract`.
pub fn emit_client_source(
    contract: &Contract,
    serializer: SerializationTool,
    version: &str,
) -> Result<String, GeneratorError> {
    let env = environment()?;
    let ctx = build_context(contract, serializer, version);

    let mut source = String::new();
    for (name, _) in SECTIONS {
        let rendered = env
            .get_template(name)
            .and_then(|tmpl| tmpl.render(&ctx))
            .map_err(|e| GeneratorError::Render(format!("{name}: {e}")))?;
        source.push_str(&rendered);
    }
    Ok(source)
}
