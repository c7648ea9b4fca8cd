//! The generic element tree: one node type for every message and
//! parameter kind.
//!
//! Children are owned exclusively by their parent (`Vec<Element>`, moves
//! only), so a node can never sit under two parents and dropping a root
//! releases the whole tree. A failed decode drops whatever was built so
//! far on the way out; there is no separate rollback path.

use crate::error::ProtocolError;
use crate::types::{FieldType, TypeDescriptor};
use bytes::Bytes;

/// Kind tag of an element: a registered descriptor, or an unrecognized
/// parameter carried opaquely for forward compatibility.
#[derive(Debug, Clone, Copy)]
pub enum ElementDesc {
    Known(&'static TypeDescriptor),
    Unknown { type_num: u16 },
}

impl ElementDesc {
    pub fn type_num(&self) -> u16 {
        match self {
            ElementDesc::Known(td) => td.type_num,
            ElementDesc::Unknown { type_num } => *type_num,
        }
    }

    pub fn descriptor(&self) -> Option<&'static TypeDescriptor> {
        match self {
            ElementDesc::Known(td) => Some(td),
            ElementDesc::Unknown { .. } => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ElementDesc::Known(td) => td.name,
            ElementDesc::Unknown { .. } => "UnknownParameter",
        }
    }
}

impl PartialEq for ElementDesc {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ElementDesc::Known(a), ElementDesc::Known(b)) => a == b,
            (
                ElementDesc::Unknown { type_num: a },
                ElementDesc::Unknown { type_num: b },
            ) => a == b,
            _ => false,
        }
    }
}

/// One schema-defined field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Bool(bool),
    U16V(Vec<u16>),
    Bytes(Vec<u8>),
    Utf8(String),
}

impl FieldValue {
    /// The zero value for a field type, used when constructing elements.
    fn default_for(ty: &FieldType) -> FieldValue {
        match ty {
            FieldType::U8 => FieldValue::U8(0),
            FieldType::U16 => FieldValue::U16(0),
            FieldType::U32 => FieldValue::U32(0),
            FieldType::U64 => FieldValue::U64(0),
            FieldType::Bool8 => FieldValue::Bool(false),
            FieldType::EnumU8(ed) => FieldValue::U8(ed.entries[0].0 as u8),
            FieldType::EnumU16(ed) => FieldValue::U16(ed.entries[0].0),
            FieldType::U16V => FieldValue::U16V(Vec::new()),
            FieldType::BytesV => FieldValue::Bytes(Vec::new()),
            FieldType::Utf8V => FieldValue::Utf8(String::new()),
        }
    }
}

/// One decoded or application-constructed message or parameter instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    desc: ElementDesc,
    /// Correlation id; meaningful only on message roots.
    message_id: u32,
    /// Field values, parallel to the descriptor's field table.
    pub(crate) fields: Vec<FieldValue>,
    /// Child parameters in wire order.
    pub(crate) children: Vec<Element>,
    /// For unknown parameter kinds: the raw TLV bytes, header included,
    /// re-emitted verbatim on encode.
    opaque: Option<Bytes>,
}

impl Element {
    /// Constructs an element of a known kind with all fields zeroed.
    pub fn new(desc: &'static TypeDescriptor) -> Element {
        Element {
            desc: ElementDesc::Known(desc),
            message_id: 0,
            fields: desc
                .fields
                .iter()
                .map(|f| FieldValue::default_for(&f.ty))
                .collect(),
            children: Vec::new(),
            opaque: None,
        }
    }

    /// Wraps an unrecognized parameter. `raw` holds the entire TLV run
    /// including its 4-byte header.
    pub fn opaque_parameter(type_num: u16, raw: Bytes) -> Element {
        Element {
            desc: ElementDesc::Unknown { type_num },
            message_id: 0,
            fields: Vec::new(),
            children: Vec::new(),
            opaque: Some(raw),
        }
    }

    pub fn desc(&self) -> ElementDesc {
        self.desc
    }

    pub fn descriptor(&self) -> Option<&'static TypeDescriptor> {
        self.desc.descriptor()
    }

    pub fn type_num(&self) -> u16 {
        self.desc.type_num()
    }

    pub fn name(&self) -> &'static str {
        self.desc.name()
    }

    /// True if this element is an instance of `td`.
    pub fn is(&self, td: &TypeDescriptor) -> bool {
        match self.desc {
            ElementDesc::Known(mine) => mine == td,
            ElementDesc::Unknown { .. } => false,
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.opaque.is_some()
    }

    pub fn opaque_bytes(&self) -> Option<&Bytes> {
        self.opaque.as_ref()
    }

    pub fn message_id(&self) -> u32 {
        self.message_id
    }

    pub fn set_message_id(&mut self, id: u32) {
        self.message_id = id;
    }

    pub fn with_message_id(mut self, id: u32) -> Element {
        self.message_id = id;
        self
    }

    // Fields.

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        let td = self.descriptor()?;
        Some(&self.fields[td.field_index(name)?])
    }

    /// Sets a field, checking the value against the schema: the variant
    /// must match the declared type and enumerated values must lie in
    /// their declared domain.
    pub fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), ProtocolError> {
        let td = match self.desc {
            ElementDesc::Known(td) => td,
            ElementDesc::Unknown { .. } => {
                return Err(ProtocolError::UnknownField {
                    type_name: self.desc.name(),
                    field: name.to_owned(),
                })
            }
        };
        let idx = td
            .field_index(name)
            .ok_or_else(|| ProtocolError::UnknownField {
                type_name: td.name,
                field: name.to_owned(),
            })?;
        let fd = &td.fields[idx];

        let ok = match (&fd.ty, &value) {
            (FieldType::U8, FieldValue::U8(_)) => true,
            (FieldType::U16, FieldValue::U16(_)) => true,
            (FieldType::U32, FieldValue::U32(_)) => true,
            (FieldType::U64, FieldValue::U64(_)) => true,
            (FieldType::Bool8, FieldValue::Bool(_)) => true,
            (FieldType::EnumU8(ed), FieldValue::U8(v)) => {
                if !ed.contains(*v as u16) {
                    return Err(ProtocolError::InvalidEnumValue {
                        type_name: td.name,
                        field: fd.name,
                        value: *v as u32,
                        offset: 0,
                    });
                }
                true
            }
            (FieldType::EnumU16(ed), FieldValue::U16(v)) => {
                if !ed.contains(*v) {
                    return Err(ProtocolError::InvalidEnumValue {
                        type_name: td.name,
                        field: fd.name,
                        value: *v as u32,
                        offset: 0,
                    });
                }
                true
            }
            (FieldType::U16V, FieldValue::U16V(_)) => true,
            (FieldType::BytesV, FieldValue::Bytes(_)) => true,
            (FieldType::Utf8V, FieldValue::Utf8(_)) => true,
            _ => false,
        };
        if !ok {
            return Err(ProtocolError::FieldTypeMismatch {
                type_name: td.name,
                field: fd.name,
                expected: fd.ty.expected_name(),
            });
        }

        self.fields[idx] = value;
        Ok(())
    }

    /// Sets an enumerated field by its label.
    pub fn set_enum(&mut self, name: &str, label: &str) -> Result<(), ProtocolError> {
        let td = self
            .descriptor()
            .ok_or_else(|| ProtocolError::UnknownField {
                type_name: self.desc.name(),
                field: name.to_owned(),
            })?;
        let idx = td
            .field_index(name)
            .ok_or_else(|| ProtocolError::UnknownField {
                type_name: td.name,
                field: name.to_owned(),
            })?;
        let fd = &td.fields[idx];

        match fd.ty {
            FieldType::EnumU8(ed) => {
                let v = ed
                    .value(label)
                    .ok_or_else(|| ProtocolError::UnknownEnumLabel {
                        type_name: td.name,
                        field: fd.name,
                        label: label.to_owned(),
                    })?;
                self.fields[idx] = FieldValue::U8(v as u8);
                Ok(())
            }
            FieldType::EnumU16(ed) => {
                let v = ed
                    .value(label)
                    .ok_or_else(|| ProtocolError::UnknownEnumLabel {
                        type_name: td.name,
                        field: fd.name,
                        label: label.to_owned(),
                    })?;
                self.fields[idx] = FieldValue::U16(v);
                Ok(())
            }
            _ => Err(ProtocolError::FieldTypeMismatch {
                type_name: td.name,
                field: fd.name,
                expected: "enumeration",
            }),
        }
    }

    /// Builder form of [`Element::set_field`].
    pub fn with_field(mut self, name: &str, value: FieldValue) -> Result<Element, ProtocolError> {
        self.set_field(name, value)?;
        Ok(self)
    }

    /// Builder form of [`Element::set_enum`].
    pub fn with_enum(mut self, name: &str, label: &str) -> Result<Element, ProtocolError> {
        self.set_enum(name, label)?;
        Ok(self)
    }

    // Typed getters. Each returns None if the field is absent or holds a
    // different variant.

    pub fn u8_field(&self, name: &str) -> Option<u8> {
        match self.field(name)? {
            FieldValue::U8(v) => Some(*v),
            _ => None,
        }
    }

    pub fn u16_field(&self, name: &str) -> Option<u16> {
        match self.field(name)? {
            FieldValue::U16(v) => Some(*v),
            _ => None,
        }
    }

    pub fn u32_field(&self, name: &str) -> Option<u32> {
        match self.field(name)? {
            FieldValue::U32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn u64_field(&self, name: &str) -> Option<u64> {
        match self.field(name)? {
            FieldValue::U64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn bool_field(&self, name: &str) -> Option<bool> {
        match self.field(name)? {
            FieldValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn bytes_field(&self, name: &str) -> Option<&[u8]> {
        match self.field(name)? {
            FieldValue::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        match self.field(name)? {
            FieldValue::Utf8(v) => Some(v),
            _ => None,
        }
    }

    pub fn u16v_field(&self, name: &str) -> Option<&[u16]> {
        match self.field(name)? {
            FieldValue::U16V(v) => Some(v),
            _ => None,
        }
    }

    /// Label of an enumerated field's current value.
    pub fn enum_label(&self, name: &str) -> Option<&'static str> {
        let td = self.descriptor()?;
        let idx = td.field_index(name)?;
        match (&td.fields[idx].ty, &self.fields[idx]) {
            (FieldType::EnumU8(ed), FieldValue::U8(v)) => ed.label(*v as u16),
            (FieldType::EnumU16(ed), FieldValue::U16(v)) => ed.label(*v),
            _ => None,
        }
    }

    // Children.

    /// Appends a child parameter. The child is moved in; it cannot be
    /// attached anywhere else afterwards.
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Builder form of [`Element::add_child`].
    pub fn with_child(mut self, child: Element) -> Element {
        self.children.push(child);
        self
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn into_children(self) -> Vec<Element> {
        self.children
    }

    /// First child of the given parameter kind.
    pub fn first_child(&self, param_type: u16) -> Option<&Element> {
        self.children
            .iter()
            .find(|c| c.type_num() == param_type && !c.is_opaque())
    }

    /// All children of the given parameter kind, in wire order.
    pub fn children_of(&self, param_type: u16) -> impl Iterator<Item = &Element> {
        self.children
            .iter()
            .filter(move |c| c.type_num() == param_type && !c.is_opaque())
    }
}
