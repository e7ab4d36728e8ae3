//! # databind Schema
//!
//! Binding schema model, builder and type resolver.
//!
//! This crate provides:
//! - A generic node tree and an XML reader producing it
//! - The schema model (enums, classes, members)
//! - The builder turning a node tree into a schema document
//! - The resolver classifying member types and computing defaults
//! - Diagnostics collected along the way

pub mod builder;
pub mod diagnostics;
pub mod error;
pub mod node;
pub mod parser;
pub mod resolver;
pub mod types;
pub mod validation;

pub use builder::build_document;
pub use diagnostics::{Diagnostic, DiagnosticKind, Location, Severity};
pub use error::ParseError;
pub use node::SchemaNode;
pub use parser::{parse_xml, parse_xml_file};
pub use resolver::resolve;
pub use types::{
    Category, ClassKind, DefaultValue, EnumValue, Member, Ownership, PrimitiveKind,
    ResolvedMember, SchemaClass, SchemaDocument, SchemaEnum, TypeSpec,
};

/// Builds and resolves a document in one step.
///
/// # Returns
/// The resolved document and the diagnostics of both passes, builder
/// diagnostics first.
#[must_use]
pub fn load_document(root: &SchemaNode) -> (SchemaDocument, Vec<Diagnostic>) {
    let (mut doc, mut diagnostics) = build_document(root);
    diagnostics.extend(resolve(&mut doc));
    (doc, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_document_from_xml() {
        let xml = r#"<Binding namespace="demo">
    <Class name="A" code="DS_A">
        <Data name="b" type="instance:B"/>
    </Class>
    <Class name="B" code="DS_B"/>
    <Enum name="Color" code="EColor">
        <Value name="Red"/>
    </Enum>
</Binding>"#;

        let root = parse_xml(xml).expect("Failed to parse");
        let (doc, diagnostics) = load_document(&root);

        assert!(diagnostics.is_empty());
        assert_eq!(doc.enums.len(), 1);
        assert_eq!(doc.classes.len(), 2);
        assert!(doc.classes[0].members[0].resolved.is_some());
    }

    #[test]
    fn test_model_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SchemaDocument>();
        assert_send_sync::<Diagnostic>();
        assert_send_sync::<SchemaNode>();
    }
}
