//! Binary codec: bytes to element trees and back, dispatched through
//! type descriptors.
//!
//! Decode is strict about structure (lengths, required children, enum
//! domains) but tolerant of unknown parameter kinds, which are wrapped as
//! opaque elements so vendor extensions survive a round trip. Encode is
//! the structural inverse: children are emitted first and each parameter's
//! length is patched into its TLV header afterwards, since the header
//! must carry the encoded length of everything below it.
//!
//! Any failure aborts the whole top-level operation; partially built
//! subtrees are dropped on unwind of the `?` chain, so no half-decoded
//! message ever reaches a caller.

use crate::element::{Element, ElementDesc, FieldValue};
use crate::error::ProtocolError;
use crate::frame::{FrameHeader, MIN_FRAME_SIZE, PROTOCOL_VERSION};
use crate::registry::TypeRegistry;
use crate::types::{FieldDescriptor, FieldType, TypeDescriptor};
use bytes::{BufMut, Bytes, BytesMut};

/// Size of a parameter's TLV header: u16 type, u16 length.
const PARAM_HEADER_SIZE: usize = 4;

/// Decodes one complete frame into an element tree.
///
/// `frame` must span exactly the bytes the extractor declared ready; a
/// mismatch between the slice and the header's length field is an error.
pub fn decode_message(
    registry: &TypeRegistry,
    frame: &[u8],
) -> Result<Element, ProtocolError> {
    if frame.len() < MIN_FRAME_SIZE {
        return Err(ProtocolError::Truncated {
            type_name: "Message",
            field: "frame header",
            offset: frame.len(),
        });
    }

    let hdr = FrameHeader::parse(frame)?;
    let desc = registry
        .message(hdr.message_type)
        .ok_or(ProtocolError::UnknownMessageType(hdr.message_type))?;

    let end = MIN_FRAME_SIZE + hdr.body_len;
    if end > frame.len() {
        return Err(ProtocolError::Truncated {
            type_name: desc.name,
            field: "message body",
            offset: frame.len(),
        });
    }
    if end < frame.len() {
        return Err(ProtocolError::TrailingBytes {
            type_name: desc.name,
            count: frame.len() - end,
            offset: end,
        });
    }

    let mut elem = decode_element(registry, desc, &frame[MIN_FRAME_SIZE..end], MIN_FRAME_SIZE)?;
    elem.set_message_id(hdr.message_id);
    Ok(elem)
}

/// Encodes a message element into one complete frame.
pub fn encode_message(elem: &Element) -> Result<BytesMut, ProtocolError> {
    let desc = match elem.desc() {
        ElementDesc::Known(td) if td.is_message => td,
        ElementDesc::Known(td) => return Err(ProtocolError::NotAMessage(td.name)),
        ElementDesc::Unknown { type_num } => {
            return Err(ProtocolError::UnknownMessageType(type_num))
        }
    };

    let mut buf = BytesMut::with_capacity(MIN_FRAME_SIZE + 64);
    buf.resize(MIN_FRAME_SIZE, 0);
    encode_fields(desc, elem, &mut buf)?;
    check_children(desc, elem)?;
    for child in elem.children() {
        encode_parameter(child, &mut buf)?;
    }

    let hdr = FrameHeader {
        version: PROTOCOL_VERSION,
        message_type: desc.type_num,
        message_id: elem.message_id(),
        body_len: buf.len() - MIN_FRAME_SIZE,
    };
    let mut head = &mut buf[..MIN_FRAME_SIZE];
    hdr.emit(&mut head);
    Ok(buf)
}

/// Decodes one element's declared span: fixed fields, then the child
/// parameter run. `base` is the span's absolute offset within the frame,
/// carried along purely for error reporting.
fn decode_element(
    registry: &TypeRegistry,
    desc: &'static TypeDescriptor,
    span: &[u8],
    base: usize,
) -> Result<Element, ProtocolError> {
    let mut elem = Element::new(desc);
    let mut off = 0usize;

    for (idx, fd) in desc.fields.iter().enumerate() {
        elem.fields[idx] = decode_field(desc, fd, span, &mut off, base)?;
    }

    while off < span.len() {
        let remaining = span.len() - off;
        if remaining < PARAM_HEADER_SIZE {
            return Err(ProtocolError::Truncated {
                type_name: desc.name,
                field: "parameter header",
                offset: base + off,
            });
        }
        let child_type = u16::from_be_bytes([span[off], span[off + 1]]);
        let child_len = u16::from_be_bytes([span[off + 2], span[off + 3]]) as usize;
        if child_len < PARAM_HEADER_SIZE {
            return Err(ProtocolError::InvalidParameterLength {
                parent: desc.name,
                child_type,
                len: child_len,
                offset: base + off,
            });
        }
        if child_len > remaining {
            return Err(ProtocolError::ChildOverrun {
                parent: desc.name,
                child_type,
                offset: base + off,
            });
        }

        let child = match registry.parameter(child_type) {
            Some(cd) => decode_element(
                registry,
                cd,
                &span[off + PARAM_HEADER_SIZE..off + child_len],
                base + off + PARAM_HEADER_SIZE,
            )?,
            // Self-describing length lets us carry the parameter opaquely
            // and keep decoding its siblings.
            None => Element::opaque_parameter(
                child_type,
                Bytes::copy_from_slice(&span[off..off + child_len]),
            ),
        };
        elem.children.push(child);
        off += child_len;
    }

    check_children(desc, &elem)?;
    Ok(elem)
}

/// Enforces the descriptor's child multiplicities. Shared by decode and
/// encode; opaque children are outside the schema and exempt.
fn check_children(desc: &TypeDescriptor, elem: &Element) -> Result<(), ProtocolError> {
    for cd in desc.children {
        let count = elem.children_of(cd.param_type).count();
        if count == 0 && cd.multiplicity.is_required() {
            return Err(ProtocolError::MissingParameter {
                type_name: desc.name,
                child: cd.name,
            });
        }
        if count > 1 && !cd.multiplicity.is_repeatable() {
            return Err(ProtocolError::DuplicateParameter {
                type_name: desc.name,
                child: cd.name,
            });
        }
    }
    Ok(())
}

fn take<'a>(
    span: &'a [u8],
    off: &mut usize,
    n: usize,
    type_name: &'static str,
    field: &'static str,
    base: usize,
) -> Result<&'a [u8], ProtocolError> {
    if span.len() - *off < n {
        return Err(ProtocolError::Truncated {
            type_name,
            field,
            offset: base + *off,
        });
    }
    let bytes = &span[*off..*off + n];
    *off += n;
    Ok(bytes)
}

fn decode_field(
    desc: &'static TypeDescriptor,
    fd: &'static FieldDescriptor,
    span: &[u8],
    off: &mut usize,
    base: usize,
) -> Result<FieldValue, ProtocolError> {
    let start = base + *off;
    match fd.ty {
        FieldType::U8 => {
            let b = take(span, off, 1, desc.name, fd.name, base)?;
            Ok(FieldValue::U8(b[0]))
        }
        FieldType::U16 => {
            let b = take(span, off, 2, desc.name, fd.name, base)?;
            Ok(FieldValue::U16(u16::from_be_bytes([b[0], b[1]])))
        }
        FieldType::U32 => {
            let b = take(span, off, 4, desc.name, fd.name, base)?;
            Ok(FieldValue::U32(u32::from_be_bytes([b[0], b[1], b[2], b[3]])))
        }
        FieldType::U64 => {
            let b = take(span, off, 8, desc.name, fd.name, base)?;
            Ok(FieldValue::U64(u64::from_be_bytes([
                b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
            ])))
        }
        FieldType::Bool8 => {
            let b = take(span, off, 1, desc.name, fd.name, base)?;
            Ok(FieldValue::Bool(b[0] & 0x80 != 0))
        }
        FieldType::EnumU8(ed) => {
            let b = take(span, off, 1, desc.name, fd.name, base)?;
            if !ed.contains(b[0] as u16) {
                return Err(ProtocolError::InvalidEnumValue {
                    type_name: desc.name,
                    field: fd.name,
                    value: b[0] as u32,
                    offset: start,
                });
            }
            Ok(FieldValue::U8(b[0]))
        }
        FieldType::EnumU16(ed) => {
            let b = take(span, off, 2, desc.name, fd.name, base)?;
            let v = u16::from_be_bytes([b[0], b[1]]);
            if !ed.contains(v) {
                return Err(ProtocolError::InvalidEnumValue {
                    type_name: desc.name,
                    field: fd.name,
                    value: v as u32,
                    offset: start,
                });
            }
            Ok(FieldValue::U16(v))
        }
        FieldType::U16V => {
            let b = take(span, off, 2, desc.name, fd.name, base)?;
            let n = u16::from_be_bytes([b[0], b[1]]) as usize;
            let b = take(span, off, n * 2, desc.name, fd.name, base)?;
            Ok(FieldValue::U16V(
                b.chunks_exact(2)
                    .map(|c| u16::from_be_bytes([c[0], c[1]]))
                    .collect(),
            ))
        }
        FieldType::BytesV => {
            let b = take(span, off, 2, desc.name, fd.name, base)?;
            let n = u16::from_be_bytes([b[0], b[1]]) as usize;
            let b = take(span, off, n, desc.name, fd.name, base)?;
            Ok(FieldValue::Bytes(b.to_vec()))
        }
        FieldType::Utf8V => {
            let b = take(span, off, 2, desc.name, fd.name, base)?;
            let n = u16::from_be_bytes([b[0], b[1]]) as usize;
            let b = take(span, off, n, desc.name, fd.name, base)?;
            let s = std::str::from_utf8(b).map_err(|_| ProtocolError::InvalidUtf8 {
                type_name: desc.name,
                field: fd.name,
                offset: start,
            })?;
            Ok(FieldValue::Utf8(s.to_owned()))
        }
    }
}

/// Encodes one parameter as a TLV run: header reserved first, body
/// emitted, length patched in once known.
fn encode_parameter(elem: &Element, buf: &mut BytesMut) -> Result<(), ProtocolError> {
    if let Some(raw) = elem.opaque_bytes() {
        buf.extend_from_slice(raw);
        return Ok(());
    }
    let desc = match elem.desc() {
        ElementDesc::Known(td) => td,
        // Unreachable through public constructors; unknown elements
        // always carry opaque bytes.
        ElementDesc::Unknown { type_num } => {
            return Err(ProtocolError::UnknownMessageType(type_num))
        }
    };

    let start = buf.len();
    buf.put_u16(desc.type_num);
    buf.put_u16(0); // length, patched below
    encode_fields(desc, elem, buf)?;
    check_children(desc, elem)?;
    for child in elem.children() {
        encode_parameter(child, buf)?;
    }

    let len = buf.len() - start;
    if len > u16::MAX as usize {
        return Err(ProtocolError::ParameterTooLong {
            type_name: desc.name,
        });
    }
    buf[start + 2..start + 4].copy_from_slice(&(len as u16).to_be_bytes());
    Ok(())
}

fn encode_fields(
    desc: &'static TypeDescriptor,
    elem: &Element,
    buf: &mut BytesMut,
) -> Result<(), ProtocolError> {
    for (fd, value) in desc.fields.iter().zip(elem.fields.iter()) {
        match (&fd.ty, value) {
            (FieldType::U8, FieldValue::U8(v)) | (FieldType::EnumU8(_), FieldValue::U8(v)) => {
                buf.put_u8(*v)
            }
            (FieldType::U16, FieldValue::U16(v))
            | (FieldType::EnumU16(_), FieldValue::U16(v)) => buf.put_u16(*v),
            (FieldType::U32, FieldValue::U32(v)) => buf.put_u32(*v),
            (FieldType::U64, FieldValue::U64(v)) => buf.put_u64(*v),
            (FieldType::Bool8, FieldValue::Bool(v)) => {
                buf.put_u8(if *v { 0x80 } else { 0x00 })
            }
            (FieldType::U16V, FieldValue::U16V(values)) => {
                let n = u16::try_from(values.len()).map_err(|_| {
                    ProtocolError::FieldTooLong {
                        type_name: desc.name,
                        field: fd.name,
                    }
                })?;
                buf.put_u16(n);
                for v in values {
                    buf.put_u16(*v);
                }
            }
            (FieldType::BytesV, FieldValue::Bytes(bytes)) => {
                let n = u16::try_from(bytes.len()).map_err(|_| {
                    ProtocolError::FieldTooLong {
                        type_name: desc.name,
                        field: fd.name,
                    }
                })?;
                buf.put_u16(n);
                buf.put_slice(bytes);
            }
            (FieldType::Utf8V, FieldValue::Utf8(s)) => {
                let n = u16::try_from(s.len()).map_err(|_| ProtocolError::FieldTooLong {
                    type_name: desc.name,
                    field: fd.name,
                })?;
                buf.put_u16(n);
                buf.put_slice(s.as_bytes());
            }
            _ => {
                return Err(ProtocolError::FieldTypeMismatch {
                    type_name: desc.name,
                    field: fd.name,
                    expected: fd.ty.expected_name(),
                })
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{self, msg, param};

    fn registry() -> TypeRegistry {
        TypeRegistry::new()
    }

    /// The ADD_ROSPEC tree the demo application sends: a representative,
    /// deeply nested message.
    fn sample_add_rospec() -> Element {
        let start_trigger = Element::new(&schema::RO_SPEC_START_TRIGGER)
            .with_enum("ROSpecStartTriggerType", "Null")
            .unwrap();
        let stop_trigger = Element::new(&schema::RO_SPEC_STOP_TRIGGER)
            .with_enum("ROSpecStopTriggerType", "Null")
            .unwrap();
        let boundary = Element::new(&schema::RO_BOUNDARY_SPEC)
            .with_child(start_trigger)
            .with_child(stop_trigger);

        let ai_stop = Element::new(&schema::AI_SPEC_STOP_TRIGGER)
            .with_enum("AISpecStopTriggerType", "Duration")
            .unwrap()
            .with_field("DurationTrigger", FieldValue::U32(5000))
            .unwrap();
        let inventory = Element::new(&schema::INVENTORY_PARAMETER_SPEC)
            .with_field("InventoryParameterSpecID", FieldValue::U16(1234))
            .unwrap()
            .with_enum("ProtocolID", "EPCGlobalClass1Gen2")
            .unwrap();
        let ai_spec = Element::new(&schema::AI_SPEC)
            .with_field("AntennaIDs", FieldValue::U16V(vec![0]))
            .unwrap()
            .with_child(ai_stop)
            .with_child(inventory);

        let selector = Element::new(&schema::TAG_REPORT_CONTENT_SELECTOR);
        let report_spec = Element::new(&schema::RO_REPORT_SPEC)
            .with_enum("ROReportTrigger", "Upon_N_Tags_Or_End_Of_ROSpec")
            .unwrap()
            .with_child(selector);

        let rospec = Element::new(&schema::RO_SPEC)
            .with_field("ROSpecID", FieldValue::U32(123))
            .unwrap()
            .with_child(boundary)
            .with_child(ai_spec)
            .with_child(report_spec);

        Element::new(&schema::ADD_ROSPEC)
            .with_message_id(201)
            .with_child(rospec)
    }

    #[test]
    fn test_roundtrip_add_rospec() {
        let reg = registry();
        let original = sample_add_rospec();

        let encoded = encode_message(&original).unwrap();
        let decoded = decode_message(&reg, &encoded).unwrap();
        assert_eq!(decoded, original);

        let reencoded = encode_message(&decoded).unwrap();
        assert_eq!(reencoded, encoded);
    }

    #[test]
    fn test_decode_is_idempotent() {
        let reg = registry();
        let encoded = encode_message(&sample_add_rospec()).unwrap();

        let first = decode_message(&reg, &encoded).unwrap();
        let second = decode_message(&reg, &encoded).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_decoded_tree_matches_wire_order() {
        let reg = registry();
        let encoded = encode_message(&sample_add_rospec()).unwrap();
        let decoded = decode_message(&reg, &encoded).unwrap();

        let rospec = decoded.first_child(param::RO_SPEC).unwrap();
        let kinds: Vec<u16> = rospec.children().iter().map(|c| c.type_num()).collect();
        assert_eq!(
            kinds,
            vec![
                param::RO_BOUNDARY_SPEC,
                param::AI_SPEC,
                param::RO_REPORT_SPEC
            ]
        );
        assert_eq!(rospec.u32_field("ROSpecID"), Some(123));
    }

    #[test]
    fn test_message_id_survives_roundtrip() {
        let reg = registry();
        let msg = Element::new(&schema::KEEPALIVE).with_message_id(0xCAFE);
        let encoded = encode_message(&msg).unwrap();
        let decoded = decode_message(&reg, &encoded).unwrap();
        assert_eq!(decoded.message_id(), 0xCAFE);
    }

    #[test]
    fn test_unknown_message_type_is_hard_error() {
        let reg = registry();
        // Hand-build a frame with message type 999 and empty body.
        let hdr = FrameHeader {
            version: PROTOCOL_VERSION,
            message_type: 999,
            message_id: 1,
            body_len: 0,
        };
        let mut buf = BytesMut::new();
        hdr.emit(&mut buf);

        let result = decode_message(&reg, &buf);
        assert!(matches!(
            result,
            Err(ProtocolError::UnknownMessageType(999))
        ));
    }

    #[test]
    fn test_unknown_parameter_is_tolerated() {
        let reg = registry();

        // RO_ACCESS_REPORT with one known TagReportData followed by an
        // unknown trailing parameter (type 900, 6 bytes total).
        let report = Element::new(&schema::RO_ACCESS_REPORT)
            .with_child(Element::new(&schema::TAG_REPORT_DATA));
        let mut encoded = encode_message(&report).unwrap();
        encoded.extend_from_slice(&[0x03, 0x84, 0x00, 0x06, 0xAA, 0xBB]);
        let body_len = (encoded.len() - MIN_FRAME_SIZE) as u32;
        encoded[11..15].copy_from_slice(&body_len.to_be_bytes());

        let decoded = decode_message(&reg, &encoded).unwrap();
        assert_eq!(decoded.children().len(), 2);
        assert!(!decoded.children()[0].is_opaque());
        let unknown = &decoded.children()[1];
        assert!(unknown.is_opaque());
        assert_eq!(unknown.type_num(), 900);

        // And the opaque bytes survive re-encoding verbatim.
        let reencoded = encode_message(&decoded).unwrap();
        assert_eq!(&reencoded[..], &encoded[..]);
    }

    #[test]
    fn test_truncation_never_panics_and_always_errors() {
        let reg = registry();
        let encoded = encode_message(&sample_add_rospec()).unwrap();

        for cut in 0..encoded.len() {
            let result = decode_message(&reg, &encoded[..cut]);
            assert!(result.is_err(), "decode of {cut}-byte prefix succeeded");
        }
    }

    #[test]
    fn test_child_overrun_detected() {
        let reg = registry();
        let report = Element::new(&schema::RO_ACCESS_REPORT)
            .with_child(Element::new(&schema::TAG_REPORT_DATA));
        let mut encoded = encode_message(&report).unwrap();

        // Inflate the child's declared length past the message body.
        let child_len_at = MIN_FRAME_SIZE + 2;
        encoded[child_len_at..child_len_at + 2].copy_from_slice(&100u16.to_be_bytes());

        let result = decode_message(&reg, &encoded);
        assert!(matches!(
            result,
            Err(ProtocolError::ChildOverrun {
                parent: "RO_ACCESS_REPORT",
                ..
            })
        ));
    }

    #[test]
    fn test_undersized_parameter_length_rejected() {
        let reg = registry();
        let report = Element::new(&schema::RO_ACCESS_REPORT)
            .with_child(Element::new(&schema::TAG_REPORT_DATA));
        let mut encoded = encode_message(&report).unwrap();

        // A TLV length below 4 cannot even cover its own header.
        let child_len_at = MIN_FRAME_SIZE + 2;
        encoded[child_len_at..child_len_at + 2].copy_from_slice(&3u16.to_be_bytes());

        let result = decode_message(&reg, &encoded);
        assert!(matches!(
            result,
            Err(ProtocolError::InvalidParameterLength { len: 3, .. })
        ));
    }

    #[test]
    fn test_missing_required_child() {
        let reg = registry();

        // ERROR_MESSAGE requires an LLRPStatus; encode refuses to build it
        // and decode refuses to accept it.
        let bad = Element::new(&schema::ERROR_MESSAGE);
        assert!(matches!(
            encode_message(&bad),
            Err(ProtocolError::MissingParameter {
                type_name: "ERROR_MESSAGE",
                child: "LLRPStatus"
            })
        ));

        let hdr = FrameHeader {
            version: PROTOCOL_VERSION,
            message_type: msg::ERROR_MESSAGE,
            message_id: 1,
            body_len: 0,
        };
        let mut buf = BytesMut::new();
        hdr.emit(&mut buf);
        assert!(matches!(
            decode_message(&reg, &buf),
            Err(ProtocolError::MissingParameter { .. })
        ));
    }

    #[test]
    fn test_duplicate_singleton_child_rejected() {
        let reg = registry();
        let status = || {
            Element::new(&schema::LLRP_STATUS)
                .with_enum("StatusCode", "M_Success")
                .unwrap()
        };
        let bad = Element::new(&schema::ERROR_MESSAGE)
            .with_child(status())
            .with_child(status());

        assert!(matches!(
            encode_message(&bad),
            Err(ProtocolError::DuplicateParameter {
                child: "LLRPStatus",
                ..
            })
        ));
        let _ = reg;
    }

    #[test]
    fn test_invalid_enum_value_reports_location() {
        let reg = registry();
        let msg = Element::new(&schema::GET_READER_CAPABILITIES).with_message_id(7);
        let mut encoded = encode_message(&msg).unwrap();

        // RequestedData is the first body byte; 99 is outside the table.
        encoded[MIN_FRAME_SIZE] = 99;

        let err = decode_message(&reg, &encoded).unwrap_err();
        match err {
            ProtocolError::InvalidEnumValue {
                type_name,
                field,
                value,
                offset,
            } => {
                assert_eq!(type_name, "GET_READER_CAPABILITIES");
                assert_eq!(field, "RequestedData");
                assert_eq!(value, 99);
                assert_eq!(offset, MIN_FRAME_SIZE);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let reg = registry();
        let status = Element::new(&schema::LLRP_STATUS)
            .with_enum("StatusCode", "R_DeviceError")
            .unwrap()
            .with_field("ErrorDescription", FieldValue::Utf8("ab".into()))
            .unwrap();
        let err_msg = Element::new(&schema::ERROR_MESSAGE).with_child(status);
        let mut encoded = encode_message(&err_msg).unwrap();

        // Corrupt the description bytes in place.
        let len = encoded.len();
        encoded[len - 2] = 0xFF;
        encoded[len - 1] = 0xFE;

        let result = decode_message(&reg, &encoded);
        assert!(matches!(
            result,
            Err(ProtocolError::InvalidUtf8 {
                field: "ErrorDescription",
                ..
            })
        ));
    }

    #[test]
    fn test_trailing_bytes_after_body_rejected() {
        let reg = registry();
        let keepalive = Element::new(&schema::KEEPALIVE);
        let mut encoded = encode_message(&keepalive).unwrap();
        encoded.extend_from_slice(&[0x00]);

        // Length field still says zero body, so the extra byte is junk.
        let result = decode_message(&reg, &encoded);
        assert!(matches!(
            result,
            Err(ProtocolError::TrailingBytes { count: 1, .. })
        ));
    }

    #[test]
    fn test_encode_rejects_parameter_element_at_top_level() {
        let status = Element::new(&schema::LLRP_STATUS);
        assert!(matches!(
            encode_message(&status),
            Err(ProtocolError::NotAMessage("LLRPStatus"))
        ));
    }

    #[test]
    fn test_error_message_roundtrip_with_description() {
        let reg = registry();
        let status = Element::new(&schema::LLRP_STATUS)
            .with_enum("StatusCode", "M_ParameterError")
            .unwrap()
            .with_field("ErrorDescription", FieldValue::Utf8("bad ROSpec".into()))
            .unwrap();
        let err_msg = Element::new(&schema::ERROR_MESSAGE)
            .with_message_id(42)
            .with_child(status);

        let encoded = encode_message(&err_msg).unwrap();
        let decoded = decode_message(&reg, &encoded).unwrap();

        let status = decoded.first_child(param::LLRP_STATUS).unwrap();
        assert_eq!(status.enum_label("StatusCode"), Some("M_ParameterError"));
        assert_eq!(status.str_field("ErrorDescription"), Some("bad ROSpec"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Arbitrary bytes must never panic the decoder, whatever
            /// else they do.
            #[test]
            fn decode_arbitrary_bytes_never_panics(data in proptest::collection::vec(any::<u8>(), 0..256)) {
                let reg = TypeRegistry::new();
                let _ = decode_message(&reg, &data);
            }

            /// Corrupting any single byte of a valid frame must never
            /// panic the decoder.
            #[test]
            fn decode_corrupted_frame_never_panics(pos in 0usize..64, val in any::<u8>()) {
                let reg = TypeRegistry::new();
                let mut encoded = encode_message(&sample_add_rospec()).unwrap();
                let pos = pos % encoded.len();
                encoded[pos] = val;
                let _ = decode_message(&reg, &encoded);
            }

            /// Round-trip holds for every well-formed DELETE_ROSPEC.
            #[test]
            fn roundtrip_delete_rospec(rospec_id in any::<u32>(), message_id in any::<u32>()) {
                let reg = TypeRegistry::new();
                let msg = Element::new(&schema::DELETE_ROSPEC)
                    .with_message_id(message_id)
                    .with_field("ROSpecID", FieldValue::U32(rospec_id))
                    .unwrap();
                let encoded = encode_message(&msg).unwrap();
                let decoded = decode_message(&reg, &encoded).unwrap();
                prop_assert_eq!(&decoded, &msg);
                prop_assert_eq!(encode_message(&decoded).unwrap(), encoded);
            }
        }
    }
}
