//! Diagnostics collected while building and resolving a binding schema.
//!
//! Diagnostics are values, not errors: a run keeps going after recording
//! one, and the caller decides what to do with the list it gets back.

use std::fmt;
use thiserror::Error;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Suspicious input that still generates the intended code.
    Warning,
    /// Input that was dropped from the generated code.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// The problem a diagnostic describes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    /// A required attribute is absent or empty.
    #[error("missing required attribute '{attribute}' on {element}")]
    MissingRequiredAttribute {
        /// Element tag.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// An attribute value is not one of the accepted values.
    #[error("invalid value '{value}' for attribute '{attribute}' on {element}")]
    InvalidAttributeValue {
        /// Element tag.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Rejected value.
        value: String,
    },

    /// An enum or class name is already taken.
    #[error("type '{name}' has already been declared")]
    DuplicateTypeName {
        /// The duplicated name.
        name: String,
    },

    /// A reference or instance member names an undeclared class.
    #[error("unresolved type reference '{type_name}' for member '{member}'")]
    UnresolvedTypeReference {
        /// Member name.
        member: String,
        /// Referenced type name.
        type_name: String,
    },

    /// A member type is neither an enum nor a primitive keyword.
    #[error("unknown type '{type_name}' for member '{member}'")]
    UnknownPrimitiveType {
        /// Member name.
        member: String,
        /// Unknown type name.
        type_name: String,
    },

    /// A base class chain loops back on itself.
    #[error("cyclic base class chain: {path}")]
    CyclicBaseClass {
        /// The chain, e.g. `a -> b -> a`.
        path: String,
    },

    /// A named base class is not a declared class.
    #[error("base class '{base}' is not a declared class, using the default root")]
    UnresolvedBaseClass {
        /// Base class name.
        base: String,
    },

    /// An enum declares no values.
    #[error("enum '{name}' declares no values")]
    EmptyEnum {
        /// Enum name.
        name: String,
    },

    /// A default literal is not a value of the member's enum.
    #[error("default '{value}' is not a value of enum '{enum_name}'")]
    UnknownEnumValue {
        /// Enum name.
        enum_name: String,
        /// Default literal.
        value: String,
    },
}

/// Where in the document a diagnostic was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// The document root.
    Document,
    /// An enum declaration, by position (and name when known).
    Enum {
        /// Position among the root's enum children.
        index: usize,
        /// Enum name, empty if missing.
        name: String,
    },
    /// A class declaration, by position (and name when known).
    Class {
        /// Position among the root's class children.
        index: usize,
        /// Class name, empty if missing.
        name: String,
    },
    /// A method declaration inside a class.
    Method {
        /// Owning class name.
        class: String,
        /// Position among the class's method children.
        index: usize,
    },
    /// A member declaration inside a class.
    Member {
        /// Owning class name.
        class: String,
        /// Position among the class's member children.
        index: usize,
        /// Member name, empty if missing.
        name: String,
    },
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => f.write_str("document root"),
            Self::Enum { index, name } if name.is_empty() => write!(f, "enum #{index}"),
            Self::Enum { name, .. } => write!(f, "enum '{name}'"),
            Self::Class { index, name } if name.is_empty() => write!(f, "class #{index}"),
            Self::Class { name, .. } => write!(f, "class '{name}'"),
            Self::Method { class, index } => write!(f, "class '{class}', method #{index}"),
            Self::Member { class, index, name } if name.is_empty() => {
                write!(f, "class '{class}', member #{index}")
            }
            Self::Member { class, name, .. } => write!(f, "class '{class}', member '{name}'"),
        }
    }
}

/// A located problem report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{severity}: {kind} ({location})")]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// Where it went wrong.
    pub location: Location,
}

impl Diagnostic {
    /// Creates an error diagnostic.
    #[must_use]
    pub fn error(kind: DiagnosticKind, location: Location) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            location,
        }
    }

    /// Creates a warning diagnostic.
    #[must_use]
    pub fn warning(kind: DiagnosticKind, location: Location) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            location,
        }
    }

    /// Returns true if this diagnostic must stop code emission.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, DiagnosticKind::CyclicBaseClass { .. })
    }

    /// Returns true for error severity.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Collects diagnostics and logs each one as it is recorded.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn error(&mut self, kind: DiagnosticKind, location: Location) {
        self.push(Diagnostic::error(kind, location));
    }

    pub(crate) fn warning(&mut self, kind: DiagnosticKind, location: Location) {
        self.push(Diagnostic::warning(kind, location));
    }

    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => tracing::error!("{}", diagnostic),
            Severity::Warning => tracing::warn!("{}", diagnostic),
        }
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Counts the error-severity diagnostics in a list.
#[must_use]
pub fn error_count(diagnostics: &[Diagnostic]) -> usize {
    diagnostics.iter().filter(|d| d.is_error()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic::error(
            DiagnosticKind::DuplicateTypeName {
                name: "Color".to_string(),
            },
            Location::Enum {
                index: 1,
                name: "Color".to_string(),
            },
        );

        assert_eq!(
            diagnostic.to_string(),
            "error: type 'Color' has already been declared (enum 'Color')"
        );
    }

    #[test]
    fn test_location_without_name_uses_index() {
        let location = Location::Member {
            class: "item".to_string(),
            index: 3,
            name: String::new(),
        };
        assert_eq!(location.to_string(), "class 'item', member #3");
    }

    #[test]
    fn test_only_cycles_are_fatal() {
        let cycle = Diagnostic::error(
            DiagnosticKind::CyclicBaseClass {
                path: "a -> b -> a".to_string(),
            },
            Location::Class {
                index: 0,
                name: "a".to_string(),
            },
        );
        let unknown = Diagnostic::error(
            DiagnosticKind::UnknownPrimitiveType {
                member: "m".to_string(),
                type_name: "double".to_string(),
            },
            Location::Document,
        );

        assert!(cycle.is_fatal());
        assert!(!unknown.is_fatal());
    }

    #[test]
    fn test_error_count_skips_warnings() {
        let diagnostics = vec![
            Diagnostic::warning(
                DiagnosticKind::EmptyEnum {
                    name: "E".to_string(),
                },
                Location::Document,
            ),
            Diagnostic::error(
                DiagnosticKind::DuplicateTypeName {
                    name: "E".to_string(),
                },
                Location::Document,
            ),
        ];

        assert_eq!(error_count(&diagnostics), 1);
        assert!(Severity::Error > Severity::Warning);
    }
}
