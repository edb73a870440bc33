use oac_core::CodeGenerator;
use oac_core::config::SerializationTool;
use oac_core::error::GeneratorError;
use oac_core::ir::Contract;

use crate::emitters;

/// Version stamped into the generated provenance comment and attributes.
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// C# client code generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpClientGenerator {
    pub serializer: SerializationTool,
}

impl CSharpClientGenerator {
    pub fn new(serializer: SerializationTool) -> Self {
        Self { serializer }
    }
}

impl CodeGenerator for CSharpClientGenerator {
    fn generate(&self, contract: &Contract) -> Result<String, GeneratorError> {
        log::debug!(
            "emitting {} with {} methods and {} types ({})",
            contract.class_name,
            contract.methods.len(),
            contract.types.len(),
            self.serializer
        );
        emitters::emit_client_source(contract, self.serializer, GENERATOR_VERSION)
    }
}
