//! C++ code generation modules.

pub mod declaration;
pub mod dispatch;
pub mod enums;
pub mod implementation;

pub use declaration::emit_declaration;
pub use dispatch::{AccessKind, BindingOp, Direction};
pub use enums::EnumEmitter;
pub use implementation::emit_implementation;

use crate::config::GeneratorConfig;
use databind_schema::types::{SchemaClass, SchemaDocument};

/// Separator written above every top-level block.
pub const BANNER: &str = "////////////////////////////////////////////////////////////////";

/// Writes a banner followed by a comment title.
pub(crate) fn push_section(output: &mut String, title: &str) {
    output.push_str(BANNER);
    output.push('\n');
    output.push_str(&format!("// {}\n\n", title));
}

/// Opens the document namespace, if any.
pub(crate) fn open_namespace(output: &mut String, namespace: &str) {
    if !namespace.is_empty() {
        output.push_str(&format!("namespace {} {{\n\n", namespace));
    }
}

/// Closes the document namespace, if any.
pub(crate) fn close_namespace(output: &mut String, namespace: &str) {
    if !namespace.is_empty() {
        output.push_str(&format!("}} // namespace {}\n", namespace));
    }
}

/// Returns the C++ parent of a class: its concrete parent's generated name,
/// or the runtime root of its kind.
pub(crate) fn parent_type(
    doc: &SchemaDocument,
    class: &SchemaClass,
    config: &GeneratorConfig,
) -> String {
    doc.parent_of(class)
        .map(|parent| parent.generated_name.clone())
        .unwrap_or_else(|| config.runtime(class.kind.root_class()))
}
