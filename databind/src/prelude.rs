//! Prelude module for convenient imports.
//!
//! ```
//! use databind::prelude::*;
//! ```

// Schema types
pub use databind_schema::{
    Category, ClassKind, Diagnostic, DiagnosticKind, Location, ParseError, SchemaClass,
    SchemaDocument, SchemaEnum, SchemaNode, Severity, build_document, load_document, parse_xml,
    parse_xml_file, resolve,
};

// Generation
pub use databind_codegen::{
    CodegenError, GeneratedBinding, Generator, GeneratorConfig, generate, generate_from_file,
    generate_from_xml,
};
