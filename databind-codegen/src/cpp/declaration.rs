//! Declaration unit (`.h`) generation.

use super::{BANNER, EnumEmitter, close_namespace, open_namespace, parent_type, push_section};
use crate::config::GeneratorConfig;
use databind_schema::types::{SchemaClass, SchemaDocument};

/// Generates the declaration unit of a resolved document.
///
/// Blocks are written in a fixed order: includes, forward declarations,
/// enums, classes, then the free registration and factory routines.
#[must_use]
pub fn emit_declaration(doc: &SchemaDocument, config: &GeneratorConfig) -> String {
    let mut output = String::new();

    output.push_str("#pragma once\n\n");

    if !config.get_header_includes().is_empty() {
        push_section(&mut output, "Includes");
        for include in config.get_header_includes() {
            output.push_str(&format!("#include \"{}\"\n", include));
        }
        output.push('\n');
    }

    push_section(&mut output, "File Declarations");
    open_namespace(&mut output, &doc.namespace);

    if !doc.classes.is_empty() {
        for class in &doc.classes {
            output.push_str(&format!("class {};\n", class.generated_name));
        }
        output.push('\n');
    }

    let enums = EnumEmitter::new(config);
    for enum_def in &doc.enums {
        output.push_str(BANNER);
        output.push('\n');
        output.push_str(&enums.declaration(enum_def));
        output.push('\n');
    }

    for class in &doc.classes {
        output.push_str(BANNER);
        output.push('\n');
        output.push_str(&class_declaration(doc, class, config));
        output.push('\n');
    }

    output.push_str(BANNER);
    output.push('\n');
    output.push_str(&format!("void {}();\n", config.register_routine()));
    output.push_str(&format!(
        "{}* {}(std::string_view classType);\n\n",
        config.runtime("DataObject"),
        config.factory_routine()
    ));

    close_namespace(&mut output, &doc.namespace);

    output
}

fn class_declaration(doc: &SchemaDocument, class: &SchemaClass, config: &GeneratorConfig) -> String {
    let mut output = String::new();
    let name = &class.generated_name;

    output.push_str(&format!(
        "class {} : public {}\n{{\n",
        name,
        parent_type(doc, class, config)
    ));

    output.push_str("public:\n\n");
    output.push_str(&format!("    {}();\n", name));
    output.push_str(&format!("    virtual ~{}();\n", name));

    if !class.methods.is_empty() {
        output.push_str("\npublic:\n\n");
        for method in &class.methods {
            output.push_str(&format!("    {}\n", method));
        }
    }

    let mut members = class.emitted_members().peekable();
    if members.peek().is_some() {
        output.push_str("\npublic:\n\n");
        for (member, resolved) in members {
            output.push_str(&format!(
                "    {} {};\n",
                resolved.type_signature, member.generated_name
            ));
        }
    }

    output.push_str("\nprotected:\n\n");
    output.push_str(&format!(
        "    virtual void ParseMembers({}& context) override;\n",
        config.runtime("DataParseContext")
    ));
    if class.kind.is_serializable() {
        output.push_str(&format!(
            "    virtual void SerializeMembers({}& context) const override;\n",
            config.runtime("DataSaveContext")
        ));
        output.push_str("    virtual const std::string& GetDataInstanceType() const override;\n");
    }

    output.push_str("};\n");

    output
}
