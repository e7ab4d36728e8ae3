//! Type resolver.
//!
//! Classifies every member's base type against the finished document and
//! attaches its C++ type signature and default value. Lookups happen only
//! after the whole document is built, so declaration order between enums and
//! classes never matters.

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, Location};
use crate::types::{
    Category, ClassKind, DefaultValue, Member, Ownership, PrimitiveKind, ResolvedMember,
    SchemaDocument,
};
use crate::validation::check_base_chains;

/// Resolves a document in place.
///
/// Sets each class's concrete parent and each member's resolution. Members
/// that fail to resolve keep `resolved == None` and are left out of the
/// generated code.
///
/// # Returns
/// Every diagnostic recorded. A `CyclicBaseClass` diagnostic is fatal:
/// callers must not emit code for the document (see
/// [`Diagnostic::is_fatal`]).
pub fn resolve(doc: &mut SchemaDocument) -> Vec<Diagnostic> {
    let mut sink = DiagnosticSink::new();

    for cycle in check_base_chains(doc) {
        sink.push(cycle);
    }

    let parents = resolve_parents(doc, &mut sink);
    let members = resolve_members(doc, &mut sink);

    for ((class, parent), resolved) in doc.classes.iter_mut().zip(parents).zip(members) {
        class.parent = parent;
        for (member, resolution) in class.members.iter_mut().zip(resolved) {
            member.resolved = resolution;
        }
    }

    sink.into_vec()
}

/// Computes the concrete parent of every class, in document order.
fn resolve_parents(doc: &SchemaDocument, sink: &mut DiagnosticSink) -> Vec<Option<String>> {
    doc.classes
        .iter()
        .enumerate()
        .map(|(index, class)| {
            let base = class.base_class_name.as_str();
            let location = || Location::Class {
                index,
                name: class.name.clone(),
            };
            if base.is_empty() {
                None
            } else if let Some(parent) = doc.get_class(base) {
                // A parent of the other kind lacks the runtime hooks this
                // class overrides; fall back to the kind's root.
                if parent.kind == class.kind {
                    Some(base.to_string())
                } else {
                    sink.warning(
                        DiagnosticKind::InvalidAttributeValue {
                            element: "Class".to_string(),
                            attribute: "base".to_string(),
                            value: base.to_string(),
                        },
                        location(),
                    );
                    None
                }
            } else {
                sink.warning(
                    DiagnosticKind::UnresolvedBaseClass {
                        base: base.to_string(),
                    },
                    location(),
                );
                None
            }
        })
        .collect()
}

/// Computes the resolution of every member, class by class.
fn resolve_members(
    doc: &SchemaDocument,
    sink: &mut DiagnosticSink,
) -> Vec<Vec<Option<ResolvedMember>>> {
    doc.classes
        .iter()
        .map(|class| {
            class
                .members
                .iter()
                .enumerate()
                .map(|(index, member)| {
                    // Already reported by the builder.
                    if member.name.is_empty() || member.type_spec.base_type.is_empty() {
                        return None;
                    }
                    let location = Location::Member {
                        class: class.name.clone(),
                        index,
                        name: member.name.clone(),
                    };
                    match resolve_member(doc, class.kind, member, &mut *sink, &location) {
                        Ok(resolved) => Some(resolved),
                        Err(kind) => {
                            sink.error(kind, location);
                            None
                        }
                    }
                })
                .collect()
        })
        .collect()
}

/// Resolves one member.
///
/// Reference and instance flags only look at classes; otherwise enums are
/// tried before primitive keywords.
///
/// # Errors
/// Returns the diagnostic kind explaining why the member cannot be emitted.
pub(crate) fn resolve_member(
    doc: &SchemaDocument,
    owner_kind: ClassKind,
    member: &Member,
    sink: &mut DiagnosticSink,
    location: &Location,
) -> Result<ResolvedMember, DiagnosticKind> {
    let spec = &member.type_spec;
    let base = spec.base_type.as_str();

    let (category, scalar_type, default) = if let Some(ownership) = spec.ownership() {
        let class_name = doc.class_generated_name(base).ok_or_else(|| {
            DiagnosticKind::UnresolvedTypeReference {
                member: member.name.clone(),
                type_name: base.to_string(),
            }
        })?;
        let constness = match (ownership, owner_kind) {
            (Ownership::Instance, ClassKind::Datasave) => "",
            _ => "const ",
        };
        (
            Category::Class {
                name: base.to_string(),
                ownership,
            },
            format!("{constness}{class_name}*"),
            DefaultValue::Null,
        )
    } else if let Some(enum_def) = doc.get_enum(base) {
        let literal = member.default_literal.trim();
        let default = if literal.is_empty() {
            match enum_def.first_value() {
                Some(first) => DefaultValue::EnumValue {
                    enum_name: enum_def.generated_name.clone(),
                    value: first.name.clone(),
                },
                None => DefaultValue::NoEnumValues,
            }
        } else {
            if !spec.is_array && !enum_def.has_value(literal) {
                sink.warning(
                    DiagnosticKind::UnknownEnumValue {
                        enum_name: enum_def.name.clone(),
                        value: literal.to_string(),
                    },
                    location.clone(),
                );
            }
            DefaultValue::EnumValue {
                enum_name: enum_def.generated_name.clone(),
                value: literal.to_string(),
            }
        };
        (
            Category::Enum {
                name: base.to_string(),
            },
            format!("{}::Type", enum_def.generated_name),
            default,
        )
    } else if let Some(primitive) = PrimitiveKind::from_keyword(base) {
        (
            Category::Primitive(primitive),
            primitive.cpp_type().to_string(),
            primitive_default(primitive, &member.default_literal),
        )
    } else {
        return Err(DiagnosticKind::UnknownPrimitiveType {
            member: member.name.clone(),
            type_name: base.to_string(),
        });
    };

    // Sequences always start empty; a default literal on an array is ignored.
    let (type_signature, default) = if spec.is_array {
        (format!("std::vector<{scalar_type}>"), DefaultValue::EmptySequence)
    } else {
        (scalar_type, default)
    };

    Ok(ResolvedMember {
        category,
        type_signature,
        default,
        is_array: spec.is_array,
    })
}

/// Default value of a scalar primitive member.
fn primitive_default(kind: PrimitiveKind, literal: &str) -> DefaultValue {
    match kind {
        // Text keeps surrounding whitespace, it may be intentional.
        PrimitiveKind::String => DefaultValue::Text(literal.to_string()),
        PrimitiveKind::Int => DefaultValue::Int(literal_or(literal, "0")),
        PrimitiveKind::Float => DefaultValue::Float(literal_or(literal, "0.f")),
        PrimitiveKind::Bool => DefaultValue::Bool(literal_or(literal, "false")),
    }
}

fn literal_or(literal: &str, fallback: &str) -> String {
    let literal = literal.trim();
    if literal.is_empty() {
        fallback.to_string()
    } else {
        literal.to_string()
    }
}
