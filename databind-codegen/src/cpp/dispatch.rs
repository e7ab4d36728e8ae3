//! Read/write routine selection.
//!
//! Every member is read (and, for serializable classes, written) through one
//! runtime routine. The routine is picked from a closed table keyed by the
//! member's category, ownership role, array flag and the owning class kind.

use databind_schema::types::{Category, ClassKind, Ownership, PrimitiveKind, ResolvedMember};

/// Whether a routine parses or serializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Parse from a data context.
    Read,
    /// Serialize into a data context.
    Write,
}

/// Value shape handled by a routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Text.
    String,
    /// Integer.
    Int,
    /// Floating point.
    Float,
    /// Boolean.
    Bool,
    /// Enum value, looked up by value name.
    Enum,
    /// Non-owning association to a datasheet object.
    DatasheetReference,
    /// Owned datasheet instance.
    DatasheetInstance,
    /// Owned datasave instance.
    DatasaveInstance,
}

/// A fully selected binding routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingOp {
    /// Read or write.
    pub direction: Direction,
    /// Value shape.
    pub access: AccessKind,
    /// Sequence variant.
    pub is_array: bool,
}

impl BindingOp {
    /// Selects the routine for a resolved member of a class of the given
    /// kind.
    ///
    /// Instances read by a datasheet class use the datasheet routines; every
    /// other instance access goes through the datasave routines, since only
    /// datasave objects are ever written back.
    #[must_use]
    pub fn select(direction: Direction, member: &ResolvedMember, owner_kind: ClassKind) -> Self {
        let access = match &member.category {
            Category::Primitive(PrimitiveKind::String) => AccessKind::String,
            Category::Primitive(PrimitiveKind::Int) => AccessKind::Int,
            Category::Primitive(PrimitiveKind::Float) => AccessKind::Float,
            Category::Primitive(PrimitiveKind::Bool) => AccessKind::Bool,
            Category::Enum { .. } => AccessKind::Enum,
            Category::Class {
                ownership: Ownership::Reference,
                ..
            } => AccessKind::DatasheetReference,
            Category::Class {
                ownership: Ownership::Instance,
                ..
            } => match (direction, owner_kind) {
                (Direction::Read, ClassKind::Datasheet) => AccessKind::DatasheetInstance,
                _ => AccessKind::DatasaveInstance,
            },
        };

        Self {
            direction,
            access,
            is_array: member.is_array,
        }
    }

    /// Name of the runtime routine.
    #[must_use]
    pub const fn routine(&self) -> &'static str {
        use AccessKind as A;
        use Direction::{Read, Write};

        match (self.direction, self.access, self.is_array) {
            (Read, A::String, false) => "ReadString",
            (Read, A::String, true) => "ReadStringArray",
            (Read, A::Int, false) => "ReadInt",
            (Read, A::Int, true) => "ReadIntArray",
            (Read, A::Float, false) => "ReadFloat",
            (Read, A::Float, true) => "ReadFloatArray",
            (Read, A::Bool, false) => "ReadBool",
            (Read, A::Bool, true) => "ReadBoolArray",
            (Read, A::Enum, false) => "ReadEnum",
            (Read, A::Enum, true) => "ReadEnumArray",
            (Read, A::DatasheetReference, false) => "ReadDatasheetReference",
            (Read, A::DatasheetReference, true) => "ReadDatasheetReferenceArray",
            (Read, A::DatasheetInstance, false) => "ReadDatasheetInstance",
            (Read, A::DatasheetInstance, true) => "ReadDatasheetInstanceArray",
            (Read, A::DatasaveInstance, false) => "ReadDatasaveInstance",
            (Read, A::DatasaveInstance, true) => "ReadDatasaveInstanceArray",
            (Write, A::String, false) => "WriteString",
            (Write, A::String, true) => "WriteStringArray",
            (Write, A::Int, false) => "WriteInt",
            (Write, A::Int, true) => "WriteIntArray",
            (Write, A::Float, false) => "WriteFloat",
            (Write, A::Float, true) => "WriteFloatArray",
            (Write, A::Bool, false) => "WriteBool",
            (Write, A::Bool, true) => "WriteBoolArray",
            (Write, A::Enum, false) => "WriteEnum",
            (Write, A::Enum, true) => "WriteEnumArray",
            (Write, A::DatasheetReference, false) => "WriteDatasheetReference",
            (Write, A::DatasheetReference, true) => "WriteDatasheetReferenceArray",
            (Write, A::DatasheetInstance | A::DatasaveInstance, false) => "WriteDatasaveInstance",
            (Write, A::DatasheetInstance | A::DatasaveInstance, true) => {
                "WriteDatasaveInstanceArray"
            }
        }
    }

    /// Returns true if the routine also takes the schema type name, which
    /// the runtime needs to look up enum metadata or instantiate objects.
    #[must_use]
    pub const fn takes_type_name(&self) -> bool {
        matches!(
            self.access,
            AccessKind::Enum | AccessKind::DatasheetInstance | AccessKind::DatasaveInstance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use databind_schema::types::DefaultValue;

    fn resolved(category: Category, is_array: bool) -> ResolvedMember {
        ResolvedMember {
            category,
            type_signature: String::new(),
            default: DefaultValue::Null,
            is_array,
        }
    }

    fn class(ownership: Ownership) -> Category {
        Category::Class {
            name: "item".to_string(),
            ownership,
        }
    }

    #[test]
    fn test_select_primitives() {
        let string = resolved(Category::Primitive(PrimitiveKind::String), false);
        let floats = resolved(Category::Primitive(PrimitiveKind::Float), true);

        assert_eq!(
            BindingOp::select(Direction::Read, &string, ClassKind::Datasheet).routine(),
            "ReadString"
        );
        assert_eq!(
            BindingOp::select(Direction::Read, &floats, ClassKind::Datasheet).routine(),
            "ReadFloatArray"
        );
        assert_eq!(
            BindingOp::select(Direction::Write, &floats, ClassKind::Datasave).routine(),
            "WriteFloatArray"
        );
    }

    #[test]
    fn test_select_enum_takes_type_name() {
        let color = resolved(
            Category::Enum {
                name: "Color".to_string(),
            },
            false,
        );
        let op = BindingOp::select(Direction::Read, &color, ClassKind::Datasheet);

        assert_eq!(op.routine(), "ReadEnum");
        assert!(op.takes_type_name());
    }

    #[test]
    fn test_select_reference() {
        let link = resolved(class(Ownership::Reference), false);
        let links = resolved(class(Ownership::Reference), true);

        let read = BindingOp::select(Direction::Read, &link, ClassKind::Datasave);
        assert_eq!(read.routine(), "ReadDatasheetReference");
        assert!(!read.takes_type_name());
        assert_eq!(
            BindingOp::select(Direction::Write, &links, ClassKind::Datasave).routine(),
            "WriteDatasheetReferenceArray"
        );
    }

    #[test]
    fn test_select_instance_follows_owner_kind() {
        let instances = resolved(class(Ownership::Instance), true);

        assert_eq!(
            BindingOp::select(Direction::Read, &instances, ClassKind::Datasheet).routine(),
            "ReadDatasheetInstanceArray"
        );
        assert_eq!(
            BindingOp::select(Direction::Read, &instances, ClassKind::Datasave).routine(),
            "ReadDatasaveInstanceArray"
        );
        assert_eq!(
            BindingOp::select(Direction::Write, &instances, ClassKind::Datasave).routine(),
            "WriteDatasaveInstanceArray"
        );
    }

    #[test]
    fn test_primitives_do_not_take_type_name() {
        let int = resolved(Category::Primitive(PrimitiveKind::Int), false);
        assert!(!BindingOp::select(Direction::Read, &int, ClassKind::Datasheet).takes_type_name());
    }
}
