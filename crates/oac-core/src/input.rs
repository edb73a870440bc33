use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ReadError;

const CHUNK_SIZE: usize = 8 * 1024;

/// Cooperative cancellation flag shared between a caller and a reader.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A named document handed to the pipeline. `contents` is `None` when the
/// caller could not supply any text at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub name: String,
    pub contents: Option<String>,
}

impl SourceDocument {
    pub fn inline(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: Some(contents.into()),
        }
    }

    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ReadError> {
        let name = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|source| ReadError::Io {
            name: name.clone(),
            source,
        })?;
        Ok(Self::inline(name, contents))
    }
}

/// Read a whole document from `reader`, checking `cancel` between chunks.
///
/// The reader is owned by this function and dropped on every return path.
pub fn read_document<R: Read>(
    name: &str,
    mut reader: R,
    cancel: &CancelToken,
) -> Result<SourceDocument, ReadError> {
    let io_error = |source: io::Error| ReadError::Io {
        name: name.to_string(),
        source,
    };

    let mut bytes = Vec::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        if cancel.is_cancelled() {
            log::debug!("reading {name} cancelled after {} bytes", bytes.len());
            return Err(ReadError::Cancelled(name.to_string()));
        }
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => bytes.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(io_error(e)),
        }
    }

    let contents = String::from_utf8(bytes)
        .map_err(|e| io_error(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    Ok(SourceDocument::inline(name, contents))
}
