//! LLRP wire protocol: framing, schema-driven codec, and the generic
//! element tree.
//!
//! The protocol is binary, big endian, and carried over TCP. Each frame
//! is a 19-byte header followed by a body of fixed fields and nested
//! TLV parameters. Nothing in this crate performs I/O; the client crate
//! layers connection handling on top.
//!
//! The codec is table driven: one decode and one encode routine walk
//! [`types::TypeDescriptor`] tables, so adding a message or parameter
//! kind means adding data to [`schema`], not code.

pub mod codec;
pub mod element;
pub mod error;
pub mod frame;
pub mod registry;
pub mod schema;
pub mod text;
pub mod types;

pub use codec::{decode_message, encode_message};
pub use element::{Element, ElementDesc, FieldValue};
pub use error::ProtocolError;
pub use frame::{FrameExtract, FrameHeader, MIN_FRAME_SIZE, PROTOCOL_VERSION};
pub use registry::TypeRegistry;
pub use text::to_xml_string;
pub use types::{
    ChildDescriptor, EnumDescriptor, FieldDescriptor, FieldType, Multiplicity, TypeDescriptor,
};

/// IANA-assigned TCP port LLRP readers listen on.
pub const DEFAULT_PORT: u16 = 5084;
