//! Human-readable rendering of element trees, for logging and debug
//! output.

use crate::element::{Element, FieldValue};
use crate::types::{FieldType, TypeDescriptor};
use std::fmt::Write;

/// Renders an element tree as indented XML-style text.
///
/// Enumerated fields print their labels, unknown parameters print as
/// `<UnknownParameter>` with their raw bytes in hex. The output is for
/// humans; no parser on the other side.
pub fn to_xml_string(elem: &Element) -> String {
    let mut out = String::new();
    render(elem, 0, &mut out);
    out
}

fn render(elem: &Element, depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);

    if let Some(raw) = elem.opaque_bytes() {
        let _ = writeln!(
            out,
            "{pad}<UnknownParameter Type=\"{}\" Bytes=\"{}\"/>",
            elem.type_num(),
            hex(raw)
        );
        return;
    }

    let desc = match elem.descriptor() {
        Some(td) => td,
        None => return,
    };

    let attr = if desc.is_message {
        format!(" MessageID=\"{}\"", elem.message_id())
    } else {
        String::new()
    };

    if desc.fields.is_empty() && elem.children().is_empty() {
        let _ = writeln!(out, "{pad}<{}{attr}/>", desc.name);
        return;
    }

    let _ = writeln!(out, "{pad}<{}{attr}>", desc.name);
    render_fields(desc, elem, depth + 1, out);
    for child in elem.children() {
        render(child, depth + 1, out);
    }
    let _ = writeln!(out, "{pad}</{}>", desc.name);
}

fn render_fields(desc: &TypeDescriptor, elem: &Element, depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);
    for fd in desc.fields {
        let value = match elem.field(fd.name) {
            Some(v) => v,
            None => continue,
        };
        let text = match (&fd.ty, value) {
            (FieldType::EnumU8(ed), FieldValue::U8(v)) => match ed.label(*v as u16) {
                Some(label) => label.to_owned(),
                None => v.to_string(),
            },
            (FieldType::EnumU16(ed), FieldValue::U16(v)) => match ed.label(*v) {
                Some(label) => label.to_owned(),
                None => v.to_string(),
            },
            (_, FieldValue::U8(v)) => v.to_string(),
            (_, FieldValue::U16(v)) => v.to_string(),
            (_, FieldValue::U32(v)) => v.to_string(),
            (_, FieldValue::U64(v)) => v.to_string(),
            (_, FieldValue::Bool(v)) => v.to_string(),
            (_, FieldValue::U16V(values)) => values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" "),
            (_, FieldValue::Bytes(bytes)) => hex(bytes),
            (_, FieldValue::Utf8(s)) => s.clone(),
        };
        let _ = writeln!(out, "{pad}<{0}>{text}</{0}>", fd.name);
    }
}

fn hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02X}");
    }
    s
}
