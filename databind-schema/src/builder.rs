//! Schema builder.
//!
//! Walks a [`SchemaNode`] tree and produces a [`SchemaDocument`]. A bad
//! declaration only costs itself: the builder records a diagnostic and
//! keeps going so that everything else in the document still generates.

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, Location};
use crate::node::SchemaNode;
use crate::types::{ClassKind, EnumValue, Member, SchemaClass, SchemaDocument, SchemaEnum, TypeSpec};

/// Tag of an enum declaration.
pub const TAG_ENUM: &str = "Enum";
/// Tag of an enum value.
pub const TAG_VALUE: &str = "Value";
/// Tag of a class declaration.
pub const TAG_CLASS: &str = "Class";
/// Tag of an opaque method declaration.
pub const TAG_METHOD: &str = "Method";
/// Tag of a class member.
pub const TAG_DATA: &str = "Data";

/// Builds a schema document from a node tree.
///
/// Enums are registered before classes, so a class can never shadow an enum
/// of the same name regardless of where it appears in the document.
///
/// # Returns
/// The document and every diagnostic recorded while building it.
#[must_use]
pub fn build_document(root: &SchemaNode) -> (SchemaDocument, Vec<Diagnostic>) {
    let mut sink = DiagnosticSink::new();
    let mut doc = SchemaDocument::new(root.attr("namespace").unwrap_or_default().trim());

    for (index, node) in root.children_tagged(TAG_ENUM).enumerate() {
        if let Some(enum_def) = build_enum(node, index, &mut sink) {
            let location = Location::Enum {
                index,
                name: enum_def.name.clone(),
            };
            if let Err(rejected) = doc.add_enum(enum_def) {
                sink.error(
                    DiagnosticKind::DuplicateTypeName {
                        name: rejected.name,
                    },
                    location,
                );
            }
        }
    }

    for (index, node) in root.children_tagged(TAG_CLASS).enumerate() {
        if let Some(class) = build_class(node, index, &mut sink) {
            let location = Location::Class {
                index,
                name: class.name.clone(),
            };
            if let Err(rejected) = doc.add_class(class) {
                sink.error(
                    DiagnosticKind::DuplicateTypeName {
                        name: rejected.name,
                    },
                    location,
                );
            }
        }
    }

    for child in &root.children {
        if child.tag != TAG_ENUM && child.tag != TAG_CLASS {
            tracing::debug!("Ignoring unknown element '{}' at document root", child.tag);
        }
    }

    tracing::debug!(
        "Built schema document: {} enums, {} classes",
        doc.enums.len(),
        doc.classes.len()
    );

    (doc, sink.into_vec())
}

/// Builds an enum declaration, or `None` if it has no name.
fn build_enum(node: &SchemaNode, index: usize, sink: &mut DiagnosticSink) -> Option<SchemaEnum> {
    let Some(name) = node.non_empty_attr("name") else {
        sink.error(
            missing_attr(TAG_ENUM, "name"),
            Location::Enum {
                index,
                name: String::new(),
            },
        );
        return None;
    };

    let generated_name = node.non_empty_attr("code").unwrap_or(name);
    let mut enum_def = SchemaEnum::new(name, generated_name);

    // Unnamed values are optional labels, dropped without a diagnostic.
    for value in node.children_tagged(TAG_VALUE) {
        if let Some(value_name) = value.non_empty_attr("name") {
            enum_def.add_value(EnumValue::new(value_name));
        }
    }

    if enum_def.is_empty() {
        sink.warning(
            DiagnosticKind::EmptyEnum {
                name: name.to_string(),
            },
            Location::Enum {
                index,
                name: name.to_string(),
            },
        );
    }

    Some(enum_def)
}

/// Builds a class declaration, or `None` if it has no name.
fn build_class(node: &SchemaNode, index: usize, sink: &mut DiagnosticSink) -> Option<SchemaClass> {
    let Some(name) = node.non_empty_attr("name") else {
        sink.error(
            missing_attr(TAG_CLASS, "name"),
            Location::Class {
                index,
                name: String::new(),
            },
        );
        return None;
    };
    let location = || Location::Class {
        index,
        name: name.to_string(),
    };

    let generated_name = node.non_empty_attr("code").unwrap_or(name);
    let mut class = SchemaClass::new(name, generated_name);

    if let Some(kind) = node.non_empty_attr("type") {
        match ClassKind::parse(kind) {
            Some(kind) => class.kind = kind,
            None => sink.error(invalid_attr(TAG_CLASS, "type", kind), location()),
        }
    }

    class.base_class_name = node.attr("base").unwrap_or_default().trim().to_string();

    if let Some(value) = node.attr("abstract") {
        class.is_abstract = match parse_bool(value) {
            Some(flag) => flag,
            None => {
                sink.warning(invalid_attr(TAG_CLASS, "abstract", value), location());
                true
            }
        };
    }

    for (method_index, method) in node.children_tagged(TAG_METHOD).enumerate() {
        match method.attr("declaration").map(str::trim) {
            Some(declaration) if !declaration.is_empty() => {
                class.methods.push(declaration.to_string());
            }
            _ => sink.warning(
                missing_attr(TAG_METHOD, "declaration"),
                Location::Method {
                    class: name.to_string(),
                    index: method_index,
                },
            ),
        }
    }

    for (member_index, data) in node.children_tagged(TAG_DATA).enumerate() {
        class.add_member(build_member(data, name, member_index, sink));
    }

    Some(class)
}

/// Builds a member. Missing fields are reported but the member is always
/// returned, half-populated if need be, so the rest of the class survives.
fn build_member(
    node: &SchemaNode,
    class_name: &str,
    index: usize,
    sink: &mut DiagnosticSink,
) -> Member {
    let name = node.non_empty_attr("name").unwrap_or_default();
    let location = || Location::Member {
        class: class_name.to_string(),
        index,
        name: name.to_string(),
    };

    if name.is_empty() {
        sink.error(missing_attr(TAG_DATA, "name"), location());
    }

    // Flags without a base type ("array:", "   ") count as a missing type.
    let type_spec = node
        .non_empty_attr("type")
        .map(TypeSpec::parse)
        .unwrap_or_default();
    if type_spec.base_type.is_empty() {
        sink.error(missing_attr(TAG_DATA, "type"), location());
    }

    Member {
        name: name.to_string(),
        generated_name: node.non_empty_attr("code").unwrap_or(name).to_string(),
        type_spec,
        default_literal: node.attr("default").unwrap_or_default().to_string(),
        resolved: None,
    }
}

/// Parses an explicit boolean literal.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" | "" => Some(false),
        _ => None,
    }
}

fn missing_attr(element: &str, attribute: &str) -> DiagnosticKind {
    DiagnosticKind::MissingRequiredAttribute {
        element: element.to_string(),
        attribute: attribute.to_string(),
    }
}

fn invalid_attr(element: &str, attribute: &str, value: &str) -> DiagnosticKind {
    DiagnosticKind::InvalidAttributeValue {
        element: element.to_string(),
        attribute: attribute.to_string(),
        value: value.to_string(),
    }
}
