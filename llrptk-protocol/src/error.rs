//! Protocol error types.

use thiserror::Error;

/// Errors raised during frame extraction, decode, or encode.
///
/// Decode errors carry the name of the offending type descriptor, the field
/// involved (when one is), and the absolute byte offset within the frame so
/// a failing capture can be located without re-parsing.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("frame of {size} bytes exceeds maximum {max}")]
    FrameTooLarge { size: u64, max: u32 },

    #[error("unsupported protocol version {0}")]
    UnsupportedVersion(u8),

    #[error("unknown message type {0}")]
    UnknownMessageType(u16),

    #[error("truncated {type_name}: field {field} at offset {offset}")]
    Truncated {
        type_name: &'static str,
        field: &'static str,
        offset: usize,
    },

    #[error("parameter type {child_type} at offset {offset} has invalid length {len}")]
    InvalidParameterLength {
        parent: &'static str,
        child_type: u16,
        len: usize,
        offset: usize,
    },

    #[error("parameter type {child_type} at offset {offset} overruns enclosing {parent}")]
    ChildOverrun {
        parent: &'static str,
        child_type: u16,
        offset: usize,
    },

    #[error("{type_name} is missing required {child} parameter")]
    MissingParameter {
        type_name: &'static str,
        child: &'static str,
    },

    #[error("{type_name} allows at most one {child} parameter")]
    DuplicateParameter {
        type_name: &'static str,
        child: &'static str,
    },

    #[error("field {field} of {type_name} holds {value}, outside its enumeration (offset {offset})")]
    InvalidEnumValue {
        type_name: &'static str,
        field: &'static str,
        value: u32,
        offset: usize,
    },

    #[error("field {field} of {type_name} is not valid UTF-8 (offset {offset})")]
    InvalidUtf8 {
        type_name: &'static str,
        field: &'static str,
        offset: usize,
    },

    #[error("{count} trailing bytes after {type_name} at offset {offset}")]
    TrailingBytes {
        type_name: &'static str,
        count: usize,
        offset: usize,
    },

    #[error("{0} is a parameter kind, not a message")]
    NotAMessage(&'static str),

    #[error("{type_name} has no field named {field}")]
    UnknownField {
        type_name: &'static str,
        field: String,
    },

    #[error("field {field} of {type_name} has no enumeration entry named {label}")]
    UnknownEnumLabel {
        type_name: &'static str,
        field: &'static str,
        label: String,
    },

    #[error("field {field} of {type_name} expects a {expected} value")]
    FieldTypeMismatch {
        type_name: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    #[error("field {field} of {type_name} is too long to encode")]
    FieldTooLong {
        type_name: &'static str,
        field: &'static str,
    },

    #[error("encoded {type_name} exceeds the parameter length limit")]
    ParameterTooLong { type_name: &'static str },
}

impl ProtocolError {
    /// Name of the type descriptor the error refers to, if any.
    pub fn ref_type(&self) -> Option<&'static str> {
        match self {
            ProtocolError::Truncated { type_name, .. }
            | ProtocolError::InvalidParameterLength {
                parent: type_name, ..
            }
            | ProtocolError::ChildOverrun {
                parent: type_name, ..
            }
            | ProtocolError::MissingParameter { type_name, .. }
            | ProtocolError::DuplicateParameter { type_name, .. }
            | ProtocolError::InvalidEnumValue { type_name, .. }
            | ProtocolError::InvalidUtf8 { type_name, .. }
            | ProtocolError::TrailingBytes { type_name, .. }
            | ProtocolError::UnknownField { type_name, .. }
            | ProtocolError::UnknownEnumLabel { type_name, .. }
            | ProtocolError::FieldTypeMismatch { type_name, .. }
            | ProtocolError::FieldTooLong { type_name, .. }
            | ProtocolError::ParameterTooLong { type_name }
            | ProtocolError::NotAMessage(type_name) => Some(type_name),
            _ => None,
        }
    }

    /// Name of the field the error refers to, if any.
    pub fn ref_field(&self) -> Option<&str> {
        match self {
            ProtocolError::Truncated { field, .. }
            | ProtocolError::InvalidEnumValue { field, .. }
            | ProtocolError::InvalidUtf8 { field, .. }
            | ProtocolError::UnknownEnumLabel { field, .. }
            | ProtocolError::FieldTypeMismatch { field, .. }
            | ProtocolError::FieldTooLong { field, .. } => Some(field),
            ProtocolError::UnknownField { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Absolute byte offset within the frame, if the error arose mid-decode.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ProtocolError::Truncated { offset, .. }
            | ProtocolError::InvalidParameterLength { offset, .. }
            | ProtocolError::ChildOverrun { offset, .. }
            | ProtocolError::InvalidEnumValue { offset, .. }
            | ProtocolError::InvalidUtf8 { offset, .. }
            | ProtocolError::TrailingBytes { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_details_accessors() {
        let err = ProtocolError::Truncated {
            type_name: "ROSpec",
            field: "ROSpecID",
            offset: 23,
        };
        assert_eq!(err.ref_type(), Some("ROSpec"));
        assert_eq!(err.ref_field(), Some("ROSpecID"));
        assert_eq!(err.offset(), Some(23));

        let err = ProtocolError::UnknownMessageType(999);
        assert_eq!(err.ref_type(), None);
        assert_eq!(err.ref_field(), None);
        assert_eq!(err.offset(), None);
    }

    #[test]
    fn test_error_display() {
        let err = ProtocolError::FrameTooLarge {
            size: 70_000,
            max: 32_768,
        };
        assert!(err.to_string().contains("70000"));

        let err = ProtocolError::InvalidEnumValue {
            type_name: "ROSpecStartTrigger",
            field: "ROSpecStartTriggerType",
            value: 9,
            offset: 19,
        };
        let msg = err.to_string();
        assert!(msg.contains("ROSpecStartTriggerType"));
        assert!(msg.contains('9'));
    }
}
