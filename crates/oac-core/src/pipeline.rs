use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;

use crate::CodeGenerator;
use crate::config::GenerationOptions;
use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::input::SourceDocument;
use crate::parse::{detect_version, parse_document};
use crate::transform::build_contract;

/// Outcome of one generation request.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// `None` whenever `diagnostics` holds an error.
    pub generated_source: Option<String>,
    pub diagnostics: Diagnostics,
}

impl GenerationResult {
    fn failed(diagnostics: Diagnostics) -> Self {
        Self {
            generated_source: None,
            diagnostics,
        }
    }

    pub fn is_success(&self) -> bool {
        self.generated_source.is_some()
    }
}

/// Run every stage for one document. Each failing stage ends the run with a
/// single error diagnostic; warnings collected on the way are kept.
///
/// `options` are expected to be validated by the caller.
pub fn run<G: CodeGenerator + ?Sized>(
    document: &SourceDocument,
    options: &GenerationOptions,
    generator: &G,
) -> GenerationResult {
    let mut diagnostics = Diagnostics::new(&document.name);

    let Some(text) = document.contents.as_deref() else {
        diagnostics.report(
            DiagnosticCode::DocumentMissing,
            format!("the document '{}' could not be found", document.name),
        );
        return GenerationResult::failed(diagnostics);
    };
    if text.trim().is_empty() {
        diagnostics.report(
            DiagnosticCode::DocumentEmpty,
            format!("the document '{}' is empty", document.name),
        );
        return GenerationResult::failed(diagnostics);
    }

    let version = match detect_version(text) {
        Ok(version) => version,
        Err(e) => {
            diagnostics.report(
                DiagnosticCode::VersionUnknown,
                format!("could not determine the OpenAPI version: {e}"),
            );
            return GenerationResult::failed(diagnostics);
        }
    };
    log::debug!("{}: detected {version}", document.name);

    let parsed = match parse_document(text, version) {
        Ok(parsed) => parsed,
        Err(e) => {
            diagnostics.report(
                DiagnosticCode::DocumentDeserializationFailed,
                format!("failed to read the document as {version}: {e}"),
            );
            return GenerationResult::failed(diagnostics);
        }
    };

    let contract = build_contract(options, &parsed, &mut diagnostics);
    if contract.methods.is_empty() {
        diagnostics.report(
            DiagnosticCode::MissingPaths,
            "the document declares no operations with an operationId",
        );
        return GenerationResult::failed(diagnostics);
    }

    let source = match generator.generate(&contract) {
        Ok(source) => source,
        Err(e) => {
            diagnostics.report(DiagnosticCode::ClientGenerationFailed, e.to_string());
            return GenerationResult::failed(diagnostics);
        }
    };
    if source.trim().is_empty() {
        diagnostics.report(
            DiagnosticCode::GeneratedSourceEmpty,
            "the generator produced no source",
        );
        return GenerationResult::failed(diagnostics);
    }

    log::debug!(
        "{}: generated {} bytes for {} methods",
        document.name,
        source.len(),
        contract.methods.len()
    );
    GenerationResult {
        generated_source: Some(source),
        diagnostics,
    }
}

/// Run independent documents on the rayon pool. Results are returned in
/// input order; a panicking generator fails only its own document.
pub fn run_batch<G: CodeGenerator + Sync + ?Sized>(
    documents: &[SourceDocument],
    options: &GenerationOptions,
    generator: &G,
) -> Vec<GenerationResult> {
    documents
        .par_iter()
        .map(|document| {
            panic::catch_unwind(AssertUnwindSafe(|| run(document, options, generator)))
                .unwrap_or_else(|_| {
                    let mut diagnostics = Diagnostics::new(&document.name);
                    diagnostics.report(
                        DiagnosticCode::ClientGenerationFailed,
                        "the generator panicked",
                    );
                    GenerationResult::failed(diagnostics)
                })
        })
        .collect()
}
