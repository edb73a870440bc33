pub mod contract_builder;
pub mod name_normalizer;

pub use contract_builder::build_contract;
