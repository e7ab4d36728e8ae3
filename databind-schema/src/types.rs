//! Schema model definitions.
//!
//! This module contains the data structures representing a binding schema:
//! enums, classes, members and the document that owns them, plus the
//! annotations the resolver attaches to members.

use std::collections::HashMap;

/// Fallback default expression for a member typed by an enum with no values.
pub const NO_VALUES_SENTINEL: &str = "NoValuesDefined";

/// Complete binding schema document.
#[derive(Debug, Clone, Default)]
pub struct SchemaDocument {
    /// Enclosing namespace for generated code (empty for none).
    pub namespace: String,
    /// Enum declarations in document order.
    pub enums: Vec<SchemaEnum>,
    /// Class declarations in document order.
    pub classes: Vec<SchemaClass>,
    /// Enum lookup map (name to index).
    enum_map: HashMap<String, usize>,
    /// Class lookup map (name to index).
    class_map: HashMap<String, usize>,
}

impl SchemaDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Returns true if an enum or a class already uses this name.
    #[must_use]
    pub fn has_type_name(&self, name: &str) -> bool {
        self.enum_map.contains_key(name) || self.class_map.contains_key(name)
    }

    /// Adds an enum declaration.
    ///
    /// Returns the enum back if its name is already taken; the registered
    /// declaration is left untouched.
    pub fn add_enum(&mut self, enum_def: SchemaEnum) -> Result<(), SchemaEnum> {
        if self.has_type_name(&enum_def.name) {
            return Err(enum_def);
        }
        self.enum_map.insert(enum_def.name.clone(), self.enums.len());
        self.enums.push(enum_def);
        Ok(())
    }

    /// Adds a class declaration.
    ///
    /// Returns the class back if its name is already taken; the registered
    /// declaration is left untouched.
    pub fn add_class(&mut self, class: SchemaClass) -> Result<(), SchemaClass> {
        if self.has_type_name(&class.name) {
            return Err(class);
        }
        self.class_map.insert(class.name.clone(), self.classes.len());
        self.classes.push(class);
        Ok(())
    }

    /// Looks up an enum by schema name.
    #[must_use]
    pub fn get_enum(&self, name: &str) -> Option<&SchemaEnum> {
        self.enum_map.get(name).map(|&idx| &self.enums[idx])
    }

    /// Looks up a class by schema name.
    #[must_use]
    pub fn get_class(&self, name: &str) -> Option<&SchemaClass> {
        self.class_map.get(name).map(|&idx| &self.classes[idx])
    }

    /// Returns the generated name of a class.
    #[must_use]
    pub fn class_generated_name(&self, name: &str) -> Option<&str> {
        self.get_class(name).map(|c| c.generated_name.as_str())
    }

    /// Returns the resolved concrete parent of a class, if any.
    #[must_use]
    pub fn parent_of(&self, class: &SchemaClass) -> Option<&SchemaClass> {
        class.parent.as_deref().and_then(|name| self.get_class(name))
    }

    /// Returns true if the document declares nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty() && self.classes.is_empty()
    }
}

/// Enum declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEnum {
    /// Schema-level name.
    pub name: String,
    /// Identifier used in generated code.
    pub generated_name: String,
    /// Values in declaration order.
    pub values: Vec<EnumValue>,
}

impl SchemaEnum {
    /// Creates an enum without values.
    #[must_use]
    pub fn new(name: impl Into<String>, generated_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generated_name: generated_name.into(),
            values: Vec::new(),
        }
    }

    /// Appends a value.
    pub fn add_value(&mut self, value: EnumValue) {
        self.values.push(value);
    }

    /// Returns the first declared value.
    #[must_use]
    pub fn first_value(&self) -> Option<&EnumValue> {
        self.values.first()
    }

    /// Returns true if a value with this name is declared.
    #[must_use]
    pub fn has_value(&self, name: &str) -> bool {
        self.values.iter().any(|v| v.name == name)
    }

    /// Number of declared values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no value is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Enum value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// Value name.
    pub name: String,
}

impl EnumValue {
    /// Creates an enum value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Binding variant of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClassKind {
    /// Read-only record parsed from datasheets.
    #[default]
    Datasheet,
    /// Read-write record that can also serialize itself.
    Datasave,
}

impl ClassKind {
    /// Parses a class kind from its schema keyword.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "datasheet" => Some(Self::Datasheet),
            "datasave" => Some(Self::Datasave),
            _ => None,
        }
    }

    /// Returns the schema keyword.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Datasheet => "datasheet",
            Self::Datasave => "datasave",
        }
    }

    /// Returns true if classes of this kind emit a serialize path.
    #[must_use]
    pub const fn is_serializable(&self) -> bool {
        matches!(self, Self::Datasave)
    }

    /// Runtime root class for classes without a concrete parent.
    #[must_use]
    pub const fn root_class(&self) -> &'static str {
        match self {
            Self::Datasheet => "DatasheetObject",
            Self::Datasave => "DatasaveObject",
        }
    }
}

/// Built-in primitive member types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Text.
    String,
    /// Signed integer.
    Int,
    /// Floating point.
    Float,
    /// Boolean.
    Bool,
}

impl PrimitiveKind {
    /// Parses a primitive kind from its schema keyword.
    #[must_use]
    pub fn from_keyword(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "bool" => Some(Self::Bool),
            _ => None,
        }
    }

    /// Returns the schema keyword.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
        }
    }

    /// Returns the C++ type name for this primitive.
    #[must_use]
    pub const fn cpp_type(&self) -> &'static str {
        match self {
            Self::String => "std::string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
        }
    }
}

/// Member type parsed from a colon-delimited flag string such as
/// `array:reference:item`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSpec {
    /// Sequence of values.
    pub is_array: bool,
    /// Non-owning association to another class instance.
    pub is_reference: bool,
    /// Owned nested instance.
    pub is_instance: bool,
    /// Last token: a primitive keyword or an enum/class name.
    pub base_type: String,
}

impl TypeSpec {
    /// Parses a flag string. Flags may appear in any order before the base
    /// type; unknown flags are ignored.
    #[must_use]
    pub fn parse(flags: &str) -> Self {
        let tokens: Vec<&str> = flags.split(':').map(str::trim).collect();
        Self {
            is_array: tokens.contains(&"array"),
            is_reference: tokens.contains(&"reference"),
            is_instance: tokens.contains(&"instance"),
            base_type: tokens.last().copied().unwrap_or_default().to_string(),
        }
    }

    /// Returns the ownership role requested by the flags.
    #[must_use]
    pub fn ownership(&self) -> Option<Ownership> {
        if self.is_reference {
            Some(Ownership::Reference)
        } else if self.is_instance {
            Some(Ownership::Instance)
        } else {
            None
        }
    }
}

/// Class member declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Member {
    /// Field key in the data context.
    pub name: String,
    /// Field name in generated code.
    pub generated_name: String,
    /// Parsed type flags.
    pub type_spec: TypeSpec,
    /// Raw default literal (empty for the type's canonical default).
    pub default_literal: String,
    /// Resolution result, `None` until resolved or when resolution failed.
    pub resolved: Option<ResolvedMember>,
}

impl Member {
    /// Creates an unresolved member.
    #[must_use]
    pub fn new(name: impl Into<String>, type_flags: &str) -> Self {
        let name = name.into();
        Self {
            generated_name: name.clone(),
            name,
            type_spec: TypeSpec::parse(type_flags),
            default_literal: String::new(),
            resolved: None,
        }
    }

    /// Returns the resolution if the member takes part in emission.
    #[must_use]
    pub fn emitted(&self) -> Option<&ResolvedMember> {
        if self.name.is_empty() || self.generated_name.is_empty() {
            return None;
        }
        self.resolved.as_ref()
    }
}

/// Class declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaClass {
    /// Schema-level name.
    pub name: String,
    /// Identifier used in generated code.
    pub generated_name: String,
    /// Binding variant.
    pub kind: ClassKind,
    /// Declared base class name (empty for none).
    pub base_class_name: String,
    /// Abstract classes are never instantiated by the factory.
    pub is_abstract: bool,
    /// Members in declaration order.
    pub members: Vec<Member>,
    /// Opaque method declarations copied verbatim into the class body.
    pub methods: Vec<String>,
    /// Resolved concrete parent (schema name), set by the resolver.
    pub parent: Option<String>,
}

impl SchemaClass {
    /// Creates a class without members.
    #[must_use]
    pub fn new(name: impl Into<String>, generated_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generated_name: generated_name.into(),
            ..Self::default()
        }
    }

    /// Appends a member.
    pub fn add_member(&mut self, member: Member) {
        self.members.push(member);
    }

    /// Iterates over the members that take part in emission.
    pub fn emitted_members(&self) -> impl Iterator<Item = (&Member, &ResolvedMember)> {
        self.members
            .iter()
            .filter_map(|m| m.emitted().map(|resolved| (m, resolved)))
    }
}

/// Ownership role of a class-typed member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// Non-owning, nullable association.
    Reference,
    /// Owned nested instance.
    Instance,
}

/// Resolved classification of a member's base type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    /// Built-in primitive.
    Primitive(PrimitiveKind),
    /// Declared enum (schema name).
    Enum {
        /// Enum schema name.
        name: String,
    },
    /// Declared class (schema name) with the member's ownership role.
    Class {
        /// Class schema name.
        name: String,
        /// Reference or instance.
        ownership: Ownership,
    },
}

/// Default value of a member after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// Text literal (unquoted).
    Text(String),
    /// Integer literal.
    Int(String),
    /// Floating point literal.
    Float(String),
    /// Boolean literal.
    Bool(String),
    /// Enum value.
    EnumValue {
        /// Generated enum name.
        enum_name: String,
        /// Value name.
        value: String,
    },
    /// Enum without any value.
    NoEnumValues,
    /// No association.
    Null,
    /// Empty sequence.
    EmptySequence,
}

impl DefaultValue {
    /// Returns the C++ expression assigned in the constructor, or `None`
    /// when the container's natural empty state is the default.
    #[must_use]
    pub fn expression(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(format!("\"{}\"", escape_cpp_string(text))),
            Self::Int(lit) | Self::Float(lit) | Self::Bool(lit) => Some(lit.clone()),
            Self::EnumValue { enum_name, value } => Some(format!("{enum_name}::{value}")),
            Self::NoEnumValues => Some(NO_VALUES_SENTINEL.to_string()),
            Self::Null => Some("nullptr".to_string()),
            Self::EmptySequence => None,
        }
    }
}

/// Resolution attached to a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMember {
    /// Base type classification.
    pub category: Category,
    /// C++ field type.
    pub type_signature: String,
    /// Constructed default.
    pub default: DefaultValue,
    /// Copied from the type flags.
    pub is_array: bool,
}

impl ResolvedMember {
    /// Ownership role for class-typed members.
    #[must_use]
    pub fn ownership(&self) -> Option<Ownership> {
        match self.category {
            Category::Class { ownership, .. } => Some(ownership),
            _ => None,
        }
    }
}

/// Escapes a string for use inside a C++ string literal.
#[must_use]
pub fn escape_cpp_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            // Octal escapes stop after three digits, hex ones would swallow
            // a following hex character.
            c if c.is_ascii_control() => result.push_str(&format!("\\{:03o}", c as u32)),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_spec_parse_flags() {
        let spec = TypeSpec::parse("array:instance:Weapon");
        assert!(spec.is_array);
        assert!(spec.is_instance);
        assert!(!spec.is_reference);
        assert_eq!(spec.base_type, "Weapon");
        assert_eq!(spec.ownership(), Some(Ownership::Instance));
    }

    #[test]
    fn test_type_spec_parse_plain() {
        let spec = TypeSpec::parse("int");
        assert!(!spec.is_array);
        assert_eq!(spec.base_type, "int");
        assert_eq!(spec.ownership(), None);
    }

    #[test]
    fn test_type_spec_reference_wins() {
        let spec = TypeSpec::parse("reference:instance:item");
        assert_eq!(spec.ownership(), Some(Ownership::Reference));
    }

    #[test]
    fn test_type_spec_empty() {
        let spec = TypeSpec::parse("");
        assert_eq!(spec, TypeSpec::default());
    }

    #[test]
    fn test_document_rejects_shared_names() {
        let mut doc = SchemaDocument::new("");
        doc.add_enum(SchemaEnum::new("Color", "EColor"))
            .expect("Failed to add enum");

        let rejected = doc
            .add_class(SchemaClass::new("Color", "DS_Color"))
            .expect_err("class should collide with enum");
        assert_eq!(rejected.generated_name, "DS_Color");
        assert!(doc.classes.is_empty());
        assert!(doc.get_class("Color").is_none());
    }

    #[test]
    fn test_document_lookup() {
        let mut doc = SchemaDocument::new("demo");
        doc.add_class(SchemaClass::new("item", "DS_Item"))
            .expect("Failed to add class");

        assert_eq!(doc.class_generated_name("item"), Some("DS_Item"));
        assert!(doc.has_type_name("item"));
        assert!(!doc.has_type_name("DS_Item"));
    }

    #[test]
    fn test_primitive_keywords() {
        for kind in [
            PrimitiveKind::String,
            PrimitiveKind::Int,
            PrimitiveKind::Float,
            PrimitiveKind::Bool,
        ] {
            assert_eq!(PrimitiveKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(PrimitiveKind::from_keyword("double"), None);
    }

    #[test]
    fn test_class_kind_capabilities() {
        assert_eq!(ClassKind::default(), ClassKind::Datasheet);
        assert!(!ClassKind::Datasheet.is_serializable());
        assert!(ClassKind::Datasave.is_serializable());
        assert_eq!(ClassKind::parse("datasave"), Some(ClassKind::Datasave));
        assert_eq!(ClassKind::parse("Datasave"), None);
    }

    #[test]
    fn test_default_expressions() {
        assert_eq!(
            DefaultValue::Text(String::new()).expression().as_deref(),
            Some("\"\"")
        );
        assert_eq!(
            DefaultValue::Text("say \"hi\"".to_string())
                .expression()
                .as_deref(),
            Some("\"say \\\"hi\\\"\"")
        );
        assert_eq!(DefaultValue::Null.expression().as_deref(), Some("nullptr"));
        assert_eq!(DefaultValue::EmptySequence.expression(), None);
        assert_eq!(
            DefaultValue::NoEnumValues.expression().as_deref(),
            Some(NO_VALUES_SENTINEL)
        );
    }

    #[test]
    fn test_escape_control_characters() {
        assert_eq!(escape_cpp_string("a\rb"), "a\\rb");
        assert_eq!(escape_cpp_string("a\u{1}b"), "a\\001b");
        assert_eq!(escape_cpp_string("\u{7f}A"), "\\177A");
        assert_eq!(escape_cpp_string("été"), "été");
        assert_eq!(
            DefaultValue::Text("a\rb".to_string()).expression().as_deref(),
            Some("\"a\\rb\"")
        );
    }

    #[test]
    fn test_member_without_name_is_not_emitted() {
        let mut member = Member::new("", "int");
        member.resolved = Some(ResolvedMember {
            category: Category::Primitive(PrimitiveKind::Int),
            type_signature: "int".to_string(),
            default: DefaultValue::Int("0".to_string()),
            is_array: false,
        });
        assert!(member.emitted().is_none());
    }
}
