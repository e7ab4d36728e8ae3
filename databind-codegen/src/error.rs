//! Error types for code generation.

use databind_schema::Diagnostic;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema markup could not be read.
    #[error("schema parse error: {0}")]
    Parse(#[from] databind_schema::ParseError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The schema has diagnostics that prevent emission.
    #[error("schema has {} fatal diagnostic(s)", .diagnostics.iter().filter(|d| d.is_fatal()).count())]
    Fatal {
        /// Every diagnostic of the run, fatal or not.
        diagnostics: Vec<Diagnostic>,
    },
}

impl CodegenError {
    /// Returns the diagnostics carried by a fatal error.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Fatal { diagnostics } => diagnostics,
            _ => &[],
        }
    }
}
