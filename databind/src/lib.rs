//! # databind
//!
//! Schema-driven C++ data binding generator.
//!
//! A binding schema declares enums and classes with typed members. databind
//! builds a model from it, resolves every member type and emits a
//! declaration unit and an implementation unit giving a host object system
//! typed classes that parse themselves from a data context and, for the
//! `datasave` kind, serialize themselves back.
//!
//! ## Quick Start
//!
//! ```
//! use databind::prelude::*;
//!
//! let xml = r#"<Binding namespace="demo">
//!     <Enum name="Color" code="EColor"><Value name="Red"/></Enum>
//!     <Class name="item" code="DS_Item"><Data name="color" type="Color"/></Class>
//! </Binding>"#;
//!
//! let binding = generate_from_xml(xml, &GeneratorConfig::default())?;
//! assert_eq!(binding.header_file_name, "DataBinding.h");
//! assert!(binding.source.contains("color = EColor::Red;"));
//! # Ok::<(), CodegenError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Node tree, XML reader, schema model, builder and resolver
//! - [`codegen`] - C++ emitters, generator configuration and output writing

pub mod prelude;

/// Schema model, builder and type resolver.
pub mod schema {
    pub use databind_schema::*;
}

/// C++ binding generation.
pub mod codegen {
    pub use databind_codegen::*;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_pipeline() {
        let root = SchemaNode::new("Binding")
            .with_child(SchemaNode::new("Class").with_attr("name", "save").with_attr("type", "datasave"));

        let binding = generate(&root, &GeneratorConfig::default()).expect("Failed to generate");

        assert!(binding.header.contains("class save : public gugu::DatasaveObject"));
        assert!(binding.source.contains("if (classType == \"save\")"));
    }

    #[test]
    fn test_prelude_load_document() {
        let root = parse_xml(r#"<Binding><Enum name="Empty"/></Binding>"#).expect("Failed to parse");
        let (doc, diagnostics) = load_document(&root);

        assert_eq!(doc.enums.len(), 1);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
    }
}
