//! Implementation unit (`.cpp`) generation.

use super::dispatch::{BindingOp, Direction};
use super::{BANNER, EnumEmitter, close_namespace, open_namespace, push_section};
use crate::config::GeneratorConfig;
use databind_schema::types::{
    Category, ClassKind, Member, Ownership, ResolvedMember, SchemaClass, SchemaDocument,
    escape_cpp_string,
};

/// Generates the implementation unit of a resolved document.
#[must_use]
pub fn emit_implementation(doc: &SchemaDocument, config: &GeneratorConfig) -> String {
    let mut output = String::new();

    push_section(&mut output, "Header");
    output.push_str(&format!("#include \"{}\"\n\n", config.header_file_name()));

    if !config.get_source_includes().is_empty() {
        push_section(&mut output, "Includes");
        for include in config.get_source_includes() {
            output.push_str(&format!("#include \"{}\"\n", include));
        }
        output.push('\n');
    }

    push_section(&mut output, "File Implementation");
    open_namespace(&mut output, &doc.namespace);

    let enums = EnumEmitter::new(config);
    for enum_def in &doc.enums {
        output.push_str(BANNER);
        output.push('\n');
        output.push_str(&enums.implementation(enum_def));
        output.push('\n');
    }

    let classes = ClassEmitter { doc, config };
    for class in &doc.classes {
        output.push_str(BANNER);
        output.push('\n');
        output.push_str(&classes.implementation(class));
    }

    output.push_str(BANNER);
    output.push('\n');
    output.push_str(&register_routine(doc, config));
    output.push('\n');
    output.push_str(&factory_routine(doc, config));
    output.push('\n');

    close_namespace(&mut output, &doc.namespace);

    output
}

struct ClassEmitter<'a> {
    doc: &'a SchemaDocument,
    config: &'a GeneratorConfig,
}

impl ClassEmitter<'_> {
    fn implementation(&self, class: &SchemaClass) -> String {
        let mut output = String::new();

        output.push_str(&self.constructor(class));
        output.push('\n');
        output.push_str(&self.destructor(class));
        output.push('\n');
        output.push_str(&self.parse_members(class));
        output.push('\n');

        if class.kind.is_serializable() {
            output.push_str(&self.serialize_members(class));
            output.push('\n');
            output.push_str(&self.data_instance_type(class));
            output.push('\n');
        }

        output
    }

    fn constructor(&self, class: &SchemaClass) -> String {
        let name = &class.generated_name;
        let mut output = format!("{}::{}()\n{{\n", name, name);

        for (member, resolved) in class.emitted_members() {
            if resolved.is_array {
                continue;
            }
            if let Some(expression) = resolved.default.expression() {
                output.push_str(&format!(
                    "    {} = {};\n",
                    member.generated_name, expression
                ));
            }
        }

        output.push_str("}\n");
        output
    }

    fn destructor(&self, class: &SchemaClass) -> String {
        let name = &class.generated_name;
        let mut output = format!("{}::~{}()\n{{\n", name, name);

        for (member, resolved) in class.emitted_members() {
            let field = &member.generated_name;
            let line = match (resolved.ownership(), resolved.is_array) {
                (Some(Ownership::Reference), false) => format!("{} = nullptr;", field),
                (Some(Ownership::Reference), true) => format!("{}.clear();", field),
                (Some(Ownership::Instance), false) => format!("SafeDelete({});", field),
                (Some(Ownership::Instance), true) => format!("ClearStdVector({});", field),
                (None, _) => continue,
            };
            output.push_str(&format!("    {}\n", line));
        }

        output.push_str("}\n");
        output
    }

    fn parse_members(&self, class: &SchemaClass) -> String {
        let mut output = format!(
            "void {}::ParseMembers({}& context)\n{{\n",
            class.generated_name,
            self.config.runtime("DataParseContext")
        );

        if let Some(parent) = self.doc.parent_of(class) {
            output.push_str(&format!(
                "    {}::ParseMembers(context);\n",
                parent.generated_name
            ));
            if class.emitted_members().next().is_some() {
                output.push('\n');
            }
        }

        for (member, resolved) in class.emitted_members() {
            output.push_str(&self.binding_call(Direction::Read, class.kind, member, resolved));
        }

        output.push_str("}\n");
        output
    }

    fn serialize_members(&self, class: &SchemaClass) -> String {
        let mut output = format!(
            "void {}::SerializeMembers({}& context) const\n{{\n",
            class.generated_name,
            self.config.runtime("DataSaveContext")
        );

        if let Some(parent) = self.doc.parent_of(class) {
            output.push_str(&format!(
                "    {}::SerializeMembers(context);\n",
                parent.generated_name
            ));
            if class.emitted_members().next().is_some() {
                output.push('\n');
            }
        }

        for (member, resolved) in class.emitted_members() {
            output.push_str(&self.binding_call(Direction::Write, class.kind, member, resolved));
        }

        output.push_str("}\n");
        output
    }

    fn data_instance_type(&self, class: &SchemaClass) -> String {
        let mut output = format!(
            "const std::string& {}::GetDataInstanceType() const\n{{\n",
            class.generated_name
        );
        output.push_str(&format!(
            "    static const std::string dataInstanceType = \"{}\";\n",
            escape_cpp_string(&class.name)
        ));
        output.push_str("    return dataInstanceType;\n");
        output.push_str("}\n");
        output
    }

    fn binding_call(
        &self,
        direction: Direction,
        owner_kind: ClassKind,
        member: &Member,
        resolved: &ResolvedMember,
    ) -> String {
        let op = BindingOp::select(direction, resolved, owner_kind);
        let routine = self.config.runtime(&format!("binding::{}", op.routine()));
        let key = escape_cpp_string(&member.name);

        let type_name = match &resolved.category {
            Category::Enum { name } | Category::Class { name, .. } if op.takes_type_name() => {
                Some(name.as_str())
            }
            _ => None,
        };

        match type_name {
            Some(type_name) => format!(
                "    {}(context, \"{}\", \"{}\", {});\n",
                routine,
                key,
                escape_cpp_string(type_name),
                member.generated_name
            ),
            None => format!(
                "    {}(context, \"{}\", {});\n",
                routine, key, member.generated_name
            ),
        }
    }
}

fn register_routine(doc: &SchemaDocument, config: &GeneratorConfig) -> String {
    let mut output = format!("void {}()\n{{\n", config.register_routine());

    for enum_def in &doc.enums {
        output.push_str(&format!("    {}::Register();\n", enum_def.generated_name));
    }
    if !doc.enums.is_empty() {
        output.push('\n');
    }

    output.push_str(&format!(
        "    {}()->RegisterDataObjectFactory({});\n",
        config.runtime("GetResources"),
        config.factory_routine()
    ));
    output.push_str("}\n");
    output
}

fn factory_routine(doc: &SchemaDocument, config: &GeneratorConfig) -> String {
    let mut output = format!(
        "{}* {}(std::string_view classType)\n{{\n",
        config.runtime("DataObject"),
        config.factory_routine()
    );

    for class in doc.classes.iter().filter(|c| !c.is_abstract) {
        output.push_str(&format!(
            "    if (classType == \"{}\")\n    {{\n        return new {};\n    }}\n\n",
            escape_cpp_string(&class.name),
            class.generated_name
        ));
    }

    output.push_str("    return nullptr;\n");
    output.push_str("}\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use databind_schema::{load_document, parse_xml};

    fn implement(xml: &str) -> String {
        let root = parse_xml(xml).expect("Failed to parse");
        let (doc, _) = load_document(&root);
        emit_implementation(&doc, &GeneratorConfig::default())
    }

    #[test]
    fn test_header_include_follows_base_name() {
        let root = parse_xml("<Binding/>").expect("Failed to parse");
        let (doc, _) = load_document(&root);
        let config = GeneratorConfig::new().base_name("GameBinding");
        let output = emit_implementation(&doc, &config);

        assert!(output.starts_with(BANNER));
        assert!(output.contains("#include \"GameBinding.h\"\n"));
        assert!(output.contains("#include \"Gugu/Resources/ManagerResources.h\"\n"));
        assert!(output.contains("void GameBinding_Register()\n"));
        assert!(output.contains("RegisterDataObjectFactory(GameBinding_InstanciateDataObject);"));
    }

    #[test]
    fn test_constructor_defaults() {
        let output = implement(
            r#"<Binding>
    <Class name="item" code="DS_Item">
        <Data name="label" type="string"/>
        <Data name="title" type="string" default="Sword &quot;A&quot;"/>
        <Data name="price" type="int"/>
        <Data name="weight" type="float" default="1.5f"/>
        <Data name="sold" type="bool"/>
        <Data name="tags" type="array:string" default="x"/>
        <Data name="owner" type="reference:item" default="foo"/>
    </Class>
</Binding>"#,
        );

        let ctor_start = output.find("DS_Item::DS_Item()").expect("missing ctor");
        let ctor_end = output[ctor_start..].find("}\n").expect("ctor end") + ctor_start;
        let ctor = &output[ctor_start..ctor_end];

        assert!(ctor.contains("    label = \"\";\n"));
        assert!(ctor.contains("    title = \"Sword \\\"A\\\"\";\n"));
        assert!(ctor.contains("    price = 0;\n"));
        assert!(ctor.contains("    weight = 1.5f;\n"));
        assert!(ctor.contains("    sold = false;\n"));
        assert!(ctor.contains("    owner = nullptr;\n"));
        assert!(!ctor.contains("tags"));
    }

    #[test]
    fn test_destructor_by_ownership() {
        let output = implement(
            r#"<Binding>
    <Class name="weapon"/>
    <Class name="hero" code="DS_Hero">
        <Data name="level" type="int"/>
        <Data name="target" type="reference:weapon"/>
        <Data name="targets" type="array:reference:weapon"/>
        <Data name="weapon" type="instance:weapon"/>
        <Data name="weapons" type="array:instance:weapon"/>
    </Class>
</Binding>"#,
        );

        let dtor_start = output.find("DS_Hero::~DS_Hero()").expect("missing dtor");
        let dtor_end = output[dtor_start..].find("}\n").expect("dtor end") + dtor_start;
        let dtor = &output[dtor_start..dtor_end];

        assert!(dtor.contains("    target = nullptr;\n"));
        assert!(dtor.contains("    targets.clear();\n"));
        assert!(dtor.contains("    SafeDelete(weapon);\n"));
        assert!(dtor.contains("    ClearStdVector(weapons);\n"));
        assert!(!dtor.contains("level"));
    }

    #[test]
    fn test_parse_members_calls() {
        let output = implement(
            r#"<Binding>
    <Enum name="Color" code="EColor"><Value name="Red"/></Enum>
    <Class name="weapon" code="DS_Weapon"/>
    <Class name="hero" code="DS_Hero">
        <Data name="name" code="m_name" type="string"/>
        <Data name="colors" type="array:Color"/>
        <Data name="target" type="reference:weapon"/>
        <Data name="weapons" type="array:instance:weapon"/>
    </Class>
</Binding>"#,
        );

        assert!(output.contains("void DS_Hero::ParseMembers(gugu::DataParseContext& context)\n{\n"));
        assert!(output.contains("    gugu::binding::ReadString(context, \"name\", m_name);\n"));
        assert!(output.contains(
            "    gugu::binding::ReadEnumArray(context, \"colors\", \"Color\", colors);\n"
        ));
        assert!(output.contains(
            "    gugu::binding::ReadDatasheetReference(context, \"target\", target);\n"
        ));
        assert!(output.contains(
            "    gugu::binding::ReadDatasheetInstanceArray(context, \"weapons\", \"weapon\", weapons);\n"
        ));
        assert!(!output.contains("SerializeMembers"));
        assert!(!output.contains("GetDataInstanceType"));
    }

    #[test]
    fn test_parent_chaining() {
        let output = implement(
            r#"<Binding>
    <Class name="entity" code="DS_Entity" type="datasave"/>
    <Class name="hero" code="DS_Hero" type="datasave" base="entity">
        <Data name="level" type="int"/>
    </Class>
</Binding>"#,
        );

        assert!(output.contains(
            "void DS_Hero::ParseMembers(gugu::DataParseContext& context)\n{\n    DS_Entity::ParseMembers(context);\n\n    gugu::binding::ReadInt(context, \"level\", level);\n}\n"
        ));
        assert!(output.contains(
            "void DS_Hero::SerializeMembers(gugu::DataSaveContext& context) const\n{\n    DS_Entity::SerializeMembers(context);\n\n    gugu::binding::WriteInt(context, \"level\", level);\n}\n"
        ));
        assert!(output.contains(
            "void DS_Entity::ParseMembers(gugu::DataParseContext& context)\n{\n}\n"
        ));
    }

    #[test]
    fn test_datasave_with_datasheet_base_derives_from_root() {
        let output = implement(
            r#"<Binding>
    <Class name="sheet" code="DS_Sheet"/>
    <Class name="save" code="DS_Save" type="datasave" base="sheet">
        <Data name="money" type="int"/>
    </Class>
</Binding>"#,
        );

        assert!(!output.contains("DS_Sheet::SerializeMembers"));
        assert!(!output.contains("DS_Sheet::ParseMembers(context);"));
        assert!(output.contains(
            "void DS_Save::SerializeMembers(gugu::DataSaveContext& context) const\n{\n    gugu::binding::WriteInt(context, \"money\", money);\n}\n"
        ));
    }

    #[test]
    fn test_datasave_serialize_and_instance_type() {
        let output = implement(
            r#"<Binding>
    <Class name="slot" code="DS_Slot" type="datasave"/>
    <Class name="save" code="DS_Save" type="datasave">
        <Data name="money" type="int"/>
        <Data name="slots" type="array:instance:slot"/>
    </Class>
</Binding>"#,
        );

        assert!(output.contains("    gugu::binding::WriteInt(context, \"money\", money);\n"));
        assert!(output.contains(
            "    gugu::binding::ReadDatasaveInstanceArray(context, \"slots\", \"slot\", slots);\n"
        ));
        assert!(output.contains(
            "    gugu::binding::WriteDatasaveInstanceArray(context, \"slots\", \"slot\", slots);\n"
        ));
        assert!(output.contains(
            "const std::string& DS_Save::GetDataInstanceType() const\n{\n    static const std::string dataInstanceType = \"save\";\n    return dataInstanceType;\n}\n"
        ));
    }

    #[test]
    fn test_register_and_factory() {
        let output = implement(
            r#"<Binding>
    <Enum name="Color" code="EColor"><Value name="Red"/></Enum>
    <Enum name="Size" code="ESize"><Value name="Small"/></Enum>
    <Class name="base" code="DS_Base" abstract="true"/>
    <Class name="item" code="DS_Item" base="base"/>
</Binding>"#,
        );

        assert!(output.contains(
            "void DataBinding_Register()\n{\n    EColor::Register();\n    ESize::Register();\n\n    gugu::GetResources()->RegisterDataObjectFactory(DataBinding_InstanciateDataObject);\n}\n"
        ));
        assert!(output.contains(
            "gugu::DataObject* DataBinding_InstanciateDataObject(std::string_view classType)\n{\n"
        ));
        assert_eq!(output.matches("if (classType ==").count(), 1);
        assert!(output.contains("    if (classType == \"item\")\n    {\n        return new DS_Item;\n    }\n"));
        assert!(output.contains("    return nullptr;\n}\n"));
    }
}
