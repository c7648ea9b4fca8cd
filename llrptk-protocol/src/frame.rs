//! LLRP frame boundary detection and header layout.
//!
//! Frame layout (19 byte header + body):
//!
//! ```text
//! +-----------------+----------+------------+------+----------+----------+
//! | rsvd/ver/type   | reserved | message id | rsvd | body len | reserved |
//! |   2 bytes       | 4 bytes  |  4 bytes   | 1 b  | 4 bytes  | 4 bytes  |
//! +-----------------+----------+------------+------+----------+----------+
//! | body (body len bytes): fixed fields then TLV parameters             |
//! +---------------------------------------------------------------------+
//! ```
//!
//! The first two bytes pack 3 reserved bits, a 3-bit protocol version and a
//! 10-bit message type, big endian. The body length sits at byte offsets
//! 11..15 and counts only the body, so the total frame size is `len + 19`.
//! These offsets are wire-compatibility constants; they are deliberately not
//! derived from anything else.

use crate::error::ProtocolError;
use bytes::BufMut;

/// Minimum number of bytes before the length field can be read.
pub const MIN_FRAME_SIZE: usize = 19;

/// Byte offset of the big-endian u32 body length field.
pub const LENGTH_OFFSET: usize = 11;

/// Protocol version emitted and accepted by this implementation.
pub const PROTOCOL_VERSION: u8 = 1;

/// Result of probing a buffer for one complete frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameExtract {
    /// A whole frame of `frame_len` bytes is buffered.
    Ready { frame_len: usize },
    /// At least `needed` more bytes are required.
    NeedMore { needed: usize },
    /// The declared frame length exceeds the configured maximum. The
    /// connection cannot resynchronize past such a frame.
    Oversized { frame_len: u64 },
}

impl FrameExtract {
    /// Decides whether `buf` holds one complete frame.
    ///
    /// Examines only the fixed header offsets, never the body, and never
    /// reads past `buf.len()`. A declared length larger than `max_frame`
    /// yields [`FrameExtract::Oversized`] instead of requesting unbounded
    /// buffering.
    pub fn extract(buf: &[u8], max_frame: u32) -> FrameExtract {
        if buf.len() < MIN_FRAME_SIZE {
            return FrameExtract::NeedMore {
                needed: MIN_FRAME_SIZE - buf.len(),
            };
        }

        let body_len = u32::from_be_bytes([
            buf[LENGTH_OFFSET],
            buf[LENGTH_OFFSET + 1],
            buf[LENGTH_OFFSET + 2],
            buf[LENGTH_OFFSET + 3],
        ]);
        let frame_len = body_len as u64 + MIN_FRAME_SIZE as u64;

        if frame_len > max_frame as u64 {
            return FrameExtract::Oversized { frame_len };
        }

        if buf.len() as u64 >= frame_len {
            FrameExtract::Ready {
                frame_len: frame_len as usize,
            }
        } else {
            FrameExtract::NeedMore {
                needed: (frame_len - buf.len() as u64) as usize,
            }
        }
    }
}

/// Parsed fixed header of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub version: u8,
    pub message_type: u16,
    pub message_id: u32,
    pub body_len: usize,
}

impl FrameHeader {
    /// Parses the 19-byte header. `buf` must hold at least
    /// [`MIN_FRAME_SIZE`] bytes; the caller (extractor) guarantees that.
    pub fn parse(buf: &[u8]) -> Result<FrameHeader, ProtocolError> {
        debug_assert!(buf.len() >= MIN_FRAME_SIZE);

        let ver_type = u16::from_be_bytes([buf[0], buf[1]]);
        let version = ((ver_type >> 10) & 0x7) as u8;
        if version != PROTOCOL_VERSION {
            return Err(ProtocolError::UnsupportedVersion(version));
        }

        let message_type = ver_type & 0x3FF;
        let message_id = u32::from_be_bytes([buf[6], buf[7], buf[8], buf[9]]);
        let body_len = u32::from_be_bytes([
            buf[LENGTH_OFFSET],
            buf[LENGTH_OFFSET + 1],
            buf[LENGTH_OFFSET + 2],
            buf[LENGTH_OFFSET + 3],
        ]) as usize;

        Ok(FrameHeader {
            version,
            message_type,
            message_id,
            body_len,
        })
    }

    /// Appends the 19-byte header. Reserved bytes are written as zero.
    pub fn emit<B: BufMut>(&self, buf: &mut B) {
        let ver_type = ((self.version as u16 & 0x7) << 10) | (self.message_type & 0x3FF);
        buf.put_u16(ver_type);
        buf.put_u32(0); // reserved, bytes 2..6
        buf.put_u32(self.message_id);
        buf.put_u8(0); // reserved, byte 10
        buf.put_u32(self.body_len as u32);
        buf.put_u32(0); // reserved, bytes 15..19
    }
}
