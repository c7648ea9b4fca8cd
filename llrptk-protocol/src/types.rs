//! Type descriptors: the static metadata the codec dispatches through.
//!
//! One [`TypeDescriptor`] exists per message or parameter kind. Descriptors
//! are declared as `static` data tables (see [`crate::schema`]), shared by
//! reference and never mutated, so a registry lookup hands out
//! `&'static TypeDescriptor` with no lifetime bookkeeping.

/// Wire representation of one schema-defined field.
///
/// The `V` suffix marks variable-length values carried behind a big-endian
/// u16 element count.
#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    U8,
    U16,
    U32,
    U64,
    /// One byte; the most significant bit carries the flag.
    Bool8,
    /// One byte validated against an enumeration table.
    EnumU8(&'static EnumDescriptor),
    /// Two bytes validated against an enumeration table.
    EnumU16(&'static EnumDescriptor),
    /// u16 count followed by that many big-endian u16 values.
    U16V,
    /// u16 count followed by that many raw bytes.
    BytesV,
    /// u16 count followed by that many UTF-8 bytes.
    Utf8V,
}

impl FieldType {
    /// Human-readable name, used in error reports.
    pub fn expected_name(&self) -> &'static str {
        match self {
            FieldType::U8 => "u8",
            FieldType::U16 => "u16",
            FieldType::U32 => "u32",
            FieldType::U64 => "u64",
            FieldType::Bool8 => "bool",
            FieldType::EnumU8(_) => "u8 enumeration",
            FieldType::EnumU16(_) => "u16 enumeration",
            FieldType::U16V => "u16 vector",
            FieldType::BytesV => "byte vector",
            FieldType::Utf8V => "utf-8 string",
        }
    }
}

/// Value domain of an enumerated field.
#[derive(Debug)]
pub struct EnumDescriptor {
    pub name: &'static str,
    pub entries: &'static [(u16, &'static str)],
}

impl EnumDescriptor {
    pub fn contains(&self, value: u16) -> bool {
        self.entries.iter().any(|&(v, _)| v == value)
    }

    pub fn label(&self, value: u16) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|&&(v, _)| v == value)
            .map(|&(_, name)| name)
    }

    pub fn value(&self, label: &str) -> Option<u16> {
        self.entries
            .iter()
            .find(|&&(_, name)| name == label)
            .map(|&(v, _)| v)
    }
}

/// One fixed field of a message or parameter.
#[derive(Debug)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub ty: FieldType,
}

/// How many times a child parameter kind may occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    One,
    ZeroOrOne,
    ZeroOrMore,
    OneOrMore,
}

impl Multiplicity {
    pub fn is_required(&self) -> bool {
        matches!(self, Multiplicity::One | Multiplicity::OneOrMore)
    }

    pub fn is_repeatable(&self) -> bool {
        matches!(self, Multiplicity::ZeroOrMore | Multiplicity::OneOrMore)
    }
}

/// One allowed child parameter kind.
///
/// Carries the child's name redundantly so constraint violations can be
/// reported without a registry at hand.
#[derive(Debug)]
pub struct ChildDescriptor {
    pub param_type: u16,
    pub name: &'static str,
    pub multiplicity: Multiplicity,
}

/// Static metadata for one message or parameter kind.
#[derive(Debug)]
pub struct TypeDescriptor {
    /// Numeric kind identifier (10 bits for messages, 16 for parameters).
    pub type_num: u16,
    /// Message kinds appear only at the top level; parameter kinds only
    /// inside a body.
    pub is_message: bool,
    pub name: &'static str,
    /// Fixed fields, in wire order.
    pub fields: &'static [FieldDescriptor],
    /// Allowed child parameter kinds and their multiplicities.
    pub children: &'static [ChildDescriptor],
    /// For request kinds, the message type expected in reply.
    pub response_type: Option<u16>,
}

impl TypeDescriptor {
    /// Index of the named field in `fields`, if present.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// The child constraint for a parameter kind, if it is listed.
    pub fn child(&self, param_type: u16) -> Option<&'static ChildDescriptor> {
        self.children.iter().find(|c| c.param_type == param_type)
    }
}

impl PartialEq for TypeDescriptor {
    /// Descriptors are singletons; identity is (kind class, number).
    fn eq(&self, other: &Self) -> bool {
        self.type_num == other.type_num && self.is_message == other.is_message
    }
}

impl Eq for TypeDescriptor {}

#[cfg(test)]
mod tests {
    use super::*;

    static COLOR: EnumDescriptor = EnumDescriptor {
        name: "Color",
        entries: &[(0, "Red"), (1, "Green"), (4, "Blue")],
    };

    #[test]
    fn test_enum_lookup() {
        assert!(COLOR.contains(4));
        assert!(!COLOR.contains(2));
        assert_eq!(COLOR.label(1), Some("Green"));
        assert_eq!(COLOR.label(9), None);
        assert_eq!(COLOR.value("Blue"), Some(4));
        assert_eq!(COLOR.value("Mauve"), None);
    }

    #[test]
    fn test_multiplicity() {
        assert!(Multiplicity::One.is_required());
        assert!(Multiplicity::OneOrMore.is_required());
        assert!(!Multiplicity::ZeroOrOne.is_required());
        assert!(Multiplicity::ZeroOrMore.is_repeatable());
        assert!(!Multiplicity::One.is_repeatable());
    }

    #[test]
    fn test_field_index() {
        static TD: TypeDescriptor = TypeDescriptor {
            type_num: 1,
            is_message: false,
            name: "Test",
            fields: &[
                FieldDescriptor {
                    name: "A",
                    ty: FieldType::U8,
                },
                FieldDescriptor {
                    name: "B",
                    ty: FieldType::U32,
                },
            ],
            children: &[],
            response_type: None,
        };
        assert_eq!(TD.field_index("B"), Some(1));
        assert_eq!(TD.field_index("C"), None);
    }
}
