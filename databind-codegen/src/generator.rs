//! Main code generator.

use crate::config::GeneratorConfig;
use crate::cpp::{emit_declaration, emit_implementation};
use crate::error::CodegenError;
use databind_schema::{Diagnostic, SchemaDocument};
use std::path::{Path, PathBuf};

/// Code generator for a resolved schema document.
pub struct Generator<'a> {
    doc: &'a SchemaDocument,
    config: &'a GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a new generator for the given document.
    #[must_use]
    pub fn new(doc: &'a SchemaDocument, config: &'a GeneratorConfig) -> Self {
        Self { doc, config }
    }

    /// Generates the declaration unit.
    #[must_use]
    pub fn generate_header(&self) -> String {
        emit_declaration(self.doc, self.config)
    }

    /// Generates the implementation unit.
    #[must_use]
    pub fn generate_source(&self) -> String {
        emit_implementation(self.doc, self.config)
    }

    /// Generates both units.
    ///
    /// # Arguments
    /// * `diagnostics` - Non-fatal diagnostics of the run, kept alongside
    ///   the output
    #[must_use]
    pub fn generate(&self, diagnostics: Vec<Diagnostic>) -> GeneratedBinding {
        let binding = GeneratedBinding {
            header_file_name: self.config.header_file_name(),
            header: self.generate_header(),
            source_file_name: self.config.source_file_name(),
            source: self.generate_source(),
            diagnostics,
        };

        tracing::info!(
            header = %binding.header_file_name,
            source = %binding.source_file_name,
            enums = self.doc.enums.len(),
            classes = self.doc.classes.len(),
            "generated binding"
        );

        binding
    }
}

/// Output of a generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedBinding {
    /// Declaration unit file name.
    pub header_file_name: String,
    /// Declaration unit text.
    pub header: String,
    /// Implementation unit file name.
    pub source_file_name: String,
    /// Implementation unit text.
    pub source: String,
    /// Non-fatal diagnostics of the run.
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratedBinding {
    /// Returns true if the run produced any diagnostic.
    #[must_use]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Writes both units into a directory, creating it if needed.
    ///
    /// # Returns
    /// The paths of the declaration and implementation units.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if the directory or a file cannot be
    /// written.
    pub fn write_to_dir(&self, dir: &Path) -> Result<(PathBuf, PathBuf), CodegenError> {
        std::fs::create_dir_all(dir)?;

        let header_path = dir.join(&self.header_file_name);
        std::fs::write(&header_path, &self.header)?;
        tracing::debug!(path = %header_path.display(), "wrote declaration unit");

        let source_path = dir.join(&self.source_file_name);
        std::fs::write(&source_path, &self.source)?;
        tracing::debug!(path = %source_path.display(), "wrote implementation unit");

        Ok((header_path, source_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use databind_schema::{load_document, parse_xml};

    fn binding(xml: &str) -> GeneratedBinding {
        let root = parse_xml(xml).expect("Failed to parse");
        let (doc, diagnostics) = load_document(&root);
        let config = GeneratorConfig::default();
        Generator::new(&doc, &config).generate(diagnostics)
    }

    #[test]
    fn test_generate_file_names() {
        let output = binding(r#"<Binding><Class name="a"/></Binding>"#);

        assert_eq!(output.header_file_name, "DataBinding.h");
        assert_eq!(output.source_file_name, "DataBinding.cpp");
        assert!(output.header.starts_with("#pragma once"));
        assert!(output.source.contains("#include \"DataBinding.h\""));
        assert!(!output.has_diagnostics());
    }

    #[test]
    fn test_generate_is_deterministic() {
        let xml = r#"<Binding namespace="demo">
    <Enum name="Color" code="EColor"><Value name="Red"/></Enum>
    <Class name="item"><Data name="color" type="Color"/></Class>
</Binding>"#;

        assert_eq!(binding(xml), binding(xml));
    }

    #[test]
    fn test_write_to_dir_creates_directory() {
        let temp = tempfile::tempdir().expect("Failed to create temp dir");
        let dir = temp.path().join("generated").join("binding");
        let output = binding(r#"<Binding><Class name="a"/></Binding>"#);

        let (header_path, source_path) = output.write_to_dir(&dir).expect("Failed to write");

        assert_eq!(header_path, dir.join("DataBinding.h"));
        assert_eq!(source_path, dir.join("DataBinding.cpp"));
        assert_eq!(
            std::fs::read_to_string(&header_path).expect("Failed to read header"),
            output.header
        );
        assert_eq!(
            std::fs::read_to_string(&source_path).expect("Failed to read source"),
            output.source
        );
    }

    #[test]
    fn test_write_to_dir_overwrites() {
        let temp = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(temp.path().join("DataBinding.h"), "stale").expect("Failed to seed");

        let output = binding(r#"<Binding><Class name="a"/></Binding>"#);
        let (header_path, _) = output.write_to_dir(temp.path()).expect("Failed to write");

        let written = std::fs::read_to_string(header_path).expect("Failed to read header");
        assert_ne!(written, "stale");
    }
}
