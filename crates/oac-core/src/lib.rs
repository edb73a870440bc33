pub mod config;
pub mod diagnostics;
pub mod error;
pub mod input;
pub mod ir;
pub mod parse;
pub mod pipeline;
pub mod transform;

/// Trait for code generators that render a contract to source text.
pub trait CodeGenerator {
    fn generate(&self, contract: &ir::Contract) -> Result<String, error::GeneratorError>;
}

