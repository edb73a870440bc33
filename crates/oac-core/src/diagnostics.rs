use std::fmt;

/// How severe a diagnostic is. Any `Error` means no source is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// Stable diagnostic codes reported by the pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    DocumentMissing,
    DocumentEmpty,
    VersionUnknown,
    DocumentDeserializationFailed,
    MissingPaths,
    ClientGenerationFailed,
    GeneratedSourceEmpty,
    DuplicateTypeName,
    MethodRenamed,
}

impl DiagnosticCode {
    pub fn id(&self) -> &'static str {
        match self {
            DiagnosticCode::DocumentMissing => "OAC001",
            DiagnosticCode::DocumentEmpty => "OAC002",
            DiagnosticCode::VersionUnknown => "OAC003",
            DiagnosticCode::DocumentDeserializationFailed => "OAC004",
            DiagnosticCode::MissingPaths => "OAC005",
            DiagnosticCode::ClientGenerationFailed => "OAC006",
            DiagnosticCode::GeneratedSourceEmpty => "OAC007",
            DiagnosticCode::DuplicateTypeName => "OAC101",
            DiagnosticCode::MethodRenamed => "OAC102",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticCode::DocumentMissing => "DocumentMissing",
            DiagnosticCode::DocumentEmpty => "DocumentEmpty",
            DiagnosticCode::VersionUnknown => "VersionUnknown",
            DiagnosticCode::DocumentDeserializationFailed => "DocumentDeserializationFailed",
            DiagnosticCode::MissingPaths => "MissingPaths",
            DiagnosticCode::ClientGenerationFailed => "ClientGenerationFailed",
            DiagnosticCode::GeneratedSourceEmpty => "GeneratedSourceEmpty",
            DiagnosticCode::DuplicateTypeName => "DuplicateTypeName",
            DiagnosticCode::MethodRenamed => "MethodRenamed",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticCode::DuplicateTypeName | DiagnosticCode::MethodRenamed => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    /// Category string, e.g. `OpenApiClient.DocumentEmpty`.
    pub fn category(&self) -> String {
        format!("OpenApiClient.{}", self.name())
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single coded report about one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub document: String,
    pub message: String,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn category(&self) -> String {
        self.code.category()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {}",
            self.severity().as_str(),
            self.code.id(),
            self.message
        )
    }
}

/// Ordered, append-only accumulator of diagnostics for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    document: String,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            entries: Vec::new(),
        }
    }

    /// Name of the document these diagnostics belong to.
    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn report(&mut self, code: DiagnosticCode, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            code,
            document: self.document.clone(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| !d.is_error())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn codes(&self) -> Vec<DiagnosticCode> {
        self.entries.iter().map(|d| d.code).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
