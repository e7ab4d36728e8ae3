//! # databind Codegen
//!
//! C++ data binding generation from binding schemas.
//!
//! This crate provides:
//! - Declaration (`.h`) and implementation (`.cpp`) emitters
//! - The closed read/write routine dispatch table
//! - Generator configuration and output writing
//! - Pipeline entry points from a node tree, an XML string or a file

pub mod config;
pub mod cpp;
pub mod error;
pub mod generator;

pub use config::GeneratorConfig;
pub use error::CodegenError;
pub use generator::{GeneratedBinding, Generator};

use databind_schema::SchemaNode;

/// Runs Build, Resolve and Emit on a schema node tree.
///
/// # Arguments
/// * `root` - Root node of the schema document
/// * `config` - Generator settings
///
/// # Returns
/// Both generated units and the non-fatal diagnostics of the run.
///
/// # Errors
/// Returns `CodegenError::Fatal` with every diagnostic of the run if any of
/// them prevents emission.
pub fn generate(
    root: &SchemaNode,
    config: &GeneratorConfig,
) -> Result<GeneratedBinding, CodegenError> {
    let (doc, diagnostics) = databind_schema::load_document(root);

    if diagnostics.iter().any(|d| d.is_fatal()) {
        tracing::error!(
            diagnostics = diagnostics.len(),
            "schema has fatal diagnostics, nothing emitted"
        );
        return Err(CodegenError::Fatal { diagnostics });
    }

    Ok(Generator::new(&doc, config).generate(diagnostics))
}

/// Generates a binding from a schema XML string.
///
/// # Errors
/// Returns `CodegenError` if parsing fails or the schema is fatally broken.
pub fn generate_from_xml(
    xml: &str,
    config: &GeneratorConfig,
) -> Result<GeneratedBinding, CodegenError> {
    let root = databind_schema::parse_xml(xml)?;
    generate(&root, config)
}

/// Generates a binding from a schema XML file.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    config: &GeneratorConfig,
) -> Result<GeneratedBinding, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml, config)
}
