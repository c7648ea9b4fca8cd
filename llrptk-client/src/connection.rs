//! Connection management: framing over a TCP stream, send/receive, and
//! the request/response transaction helper.

use crate::error::ClientError;
use bytes::BytesMut;
use llrptk_protocol::schema::{msg, param};
use llrptk_protocol::{
    codec, FrameExtract, TypeRegistry, Element, ElementDesc, MIN_FRAME_SIZE,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::Instant;

/// Default read buffer size (8 KiB).
pub const DEFAULT_READ_BUFFER_SIZE: usize = 8 * 1024;

/// Minimum read buffer size (1 KiB).
pub const MIN_READ_BUFFER_SIZE: usize = 1024;

/// Maximum read buffer size (1 MiB).
pub const MAX_READ_BUFFER_SIZE: usize = 1024 * 1024;

/// Default maximum accepted frame size (32 KiB).
pub const DEFAULT_MAX_FRAME_SIZE: u32 = 32 * 1024;

/// Connection configuration.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Largest frame accepted from the peer. A peer declaring more
    /// poisons the connection.
    pub max_frame_size: u32,
    /// Read buffer size for socket reads.
    pub read_buffer_size: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl ConnectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_max_frame_size(mut self, size: u32) -> Self {
        self.max_frame_size = size.max(MIN_FRAME_SIZE as u32);
        self
    }

    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size.clamp(MIN_READ_BUFFER_SIZE, MAX_READ_BUFFER_SIZE);
        self
    }
}

/// How long a receive may wait for a complete frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvTimeout {
    /// Block until a frame arrives or the connection fails.
    Infinite,
    /// Return immediately: drain buffered data and make at most one
    /// non-blocking read attempt.
    Poll,
    /// Block up to the given duration, counted across however many reads
    /// it takes to complete the frame.
    Bounded(Duration),
}

/// Receive wait mode with the bounded case resolved to a deadline.
#[derive(Debug, Clone, Copy)]
enum Wait {
    Infinite,
    Poll,
    Until(Instant),
}

/// A connection to an LLRP reader.
///
/// Generic over the stream type so tests can drive it with an in-memory
/// transport; production code uses the `TcpStream` default.
pub struct Connection<S = TcpStream> {
    registry: Arc<TypeRegistry>,
    config: ConnectionConfig,
    stream: Option<S>,
    /// Raw receive buffer; frames are split off its front.
    buf: BytesMut,
    next_message_id: u32,
    /// Set when the stream can no longer be trusted to be frame-aligned.
    poisoned: bool,
}

impl Connection<TcpStream> {
    /// Opens a TCP connection to `host:port`.
    pub async fn open(
        registry: Arc<TypeRegistry>,
        config: ConnectionConfig,
        host: &str,
        port: u16,
    ) -> Result<Connection<TcpStream>, ClientError> {
        tracing::debug!("connecting to {host}:{port}");

        let stream = tokio::time::timeout(
            config.connect_timeout,
            TcpStream::connect((host, port)),
        )
        .await
        .map_err(|_| {
            tracing::debug!("connect timeout");
            ClientError::Timeout
        })?
        .map_err(ClientError::Io)?;

        stream.set_nodelay(true).ok();
        tracing::debug!("connected");

        Ok(Connection::from_stream(registry, config, stream))
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> Connection<S> {
    /// Wraps an already-established stream.
    pub fn from_stream(
        registry: Arc<TypeRegistry>,
        config: ConnectionConfig,
        stream: S,
    ) -> Connection<S> {
        let read_buffer_size = config.read_buffer_size;
        Connection {
            registry,
            config,
            stream: Some(stream),
            buf: BytesMut::with_capacity(read_buffer_size),
            next_message_id: 1,
            poisoned: false,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some() && !self.poisoned
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Shuts the stream down and drops any buffered bytes.
    pub async fn close(&mut self) -> Result<(), ClientError> {
        if let Some(mut stream) = self.stream.take() {
            tracing::debug!("closing connection");
            let _ = stream.shutdown().await;
        }
        self.buf.clear();
        Ok(())
    }

    /// Encodes and sends one message, returning the message id used.
    ///
    /// An element whose id is zero gets the connection's next id assigned
    /// automatically; a nonzero id is sent as-is.
    pub async fn send(&mut self, elem: &Element) -> Result<u32, ClientError> {
        if self.poisoned {
            return Err(ClientError::NotConnected);
        }
        let stream = self.stream.as_mut().ok_or(ClientError::NotConnected)?;

        let mut frame = codec::encode_message(elem)?;

        let id = if elem.message_id() == 0 {
            let id = self.next_message_id;
            self.next_message_id = self.next_message_id.wrapping_add(1).max(1);
            frame[6..10].copy_from_slice(&id.to_be_bytes());
            id
        } else {
            elem.message_id()
        };

        tracing::debug!(
            "sending {} id={} ({} bytes)",
            elem.name(),
            id,
            frame.len()
        );
        if let Err(e) = stream.write_all(&frame).await {
            // A short or failed write leaves the peer mid-frame.
            self.poisoned = true;
            return Err(ClientError::Io(e));
        }
        Ok(id)
    }

    /// Receives the next message, waiting according to `timeout`.
    ///
    /// A decode failure consumes the offending frame and leaves the
    /// connection usable; an oversized frame, I/O failure, or EOF poisons
    /// it, since frame alignment is lost.
    pub async fn receive(&mut self, timeout: RecvTimeout) -> Result<Element, ClientError> {
        if self.poisoned {
            return Err(ClientError::NotConnected);
        }
        // Resolve a bounded wait to an absolute deadline up front so it
        // spans every read the frame takes, not each read separately.
        let wait = match timeout {
            RecvTimeout::Infinite => Wait::Infinite,
            RecvTimeout::Poll => Wait::Poll,
            RecvTimeout::Bounded(d) => Wait::Until(Instant::now() + d),
        };

        loop {
            match FrameExtract::extract(&self.buf, self.config.max_frame_size) {
                FrameExtract::Ready { frame_len } => {
                    let frame = self.buf.split_to(frame_len);
                    return match codec::decode_message(&self.registry, &frame) {
                        Ok(elem) => {
                            tracing::debug!(
                                "received {} id={} ({} bytes)",
                                elem.name(),
                                elem.message_id(),
                                frame_len
                            );
                            let unknown = count_unknown(&elem);
                            if unknown > 0 {
                                tracing::warn!(
                                    "{} carries {unknown} unrecognized parameter(s)",
                                    elem.name()
                                );
                            }
                            Ok(elem)
                        }
                        // The frame was consumed whole, so later frames
                        // are still aligned.
                        Err(e) => {
                            tracing::debug!("discarding undecodable frame: {e}");
                            Err(ClientError::Protocol(e))
                        }
                    };
                }
                FrameExtract::Oversized { frame_len } => {
                    tracing::debug!("peer declared oversized frame of {frame_len} bytes");
                    self.poisoned = true;
                    return Err(ClientError::Protocol(
                        llrptk_protocol::ProtocolError::FrameTooLarge {
                            size: frame_len,
                            max: self.config.max_frame_size,
                        },
                    ));
                }
                FrameExtract::NeedMore { .. } => {
                    self.fill(wait).await?;
                }
            }
        }
    }

    /// Reads more bytes into the buffer, honoring the receive timeout.
    async fn fill(&mut self, wait: Wait) -> Result<(), ClientError> {
        let stream = self.stream.as_mut().ok_or(ClientError::NotConnected)?;
        self.buf.reserve(self.config.read_buffer_size);

        let read = match wait {
            Wait::Infinite => stream.read_buf(&mut self.buf).await,
            Wait::Poll => {
                match tokio::time::timeout(Duration::ZERO, stream.read_buf(&mut self.buf)).await
                {
                    Ok(result) => result,
                    Err(_) => return Err(ClientError::Timeout),
                }
            }
            Wait::Until(deadline) => {
                match tokio::time::timeout_at(deadline, stream.read_buf(&mut self.buf)).await {
                    Ok(result) => result,
                    Err(_) => return Err(ClientError::Timeout),
                }
            }
        };

        let n = match read {
            Ok(n) => n,
            // A failed read leaves frame alignment indeterminate.
            Err(e) => {
                self.poisoned = true;
                return Err(ClientError::Io(e));
            }
        };

        if n == 0 {
            tracing::debug!("connection closed by peer");
            self.poisoned = true;
            return Err(ClientError::ConnectionClosed);
        }
        Ok(())
    }

    /// Sends a request and waits for the reader's response.
    ///
    /// ERROR_MESSAGE in place of the expected response becomes
    /// [`ClientError::Reader`] carrying the LLRPStatus code and
    /// description. Any other unexpected response kind is returned to the
    /// caller after a warning; readers are known to interleave kinds.
    pub async fn transact(
        &mut self,
        request: &Element,
        timeout: RecvTimeout,
    ) -> Result<Element, ClientError> {
        let expected = match request.desc() {
            ElementDesc::Known(td) => td.response_type,
            ElementDesc::Unknown { .. } => None,
        };

        self.send(request).await?;
        let response = self.receive(timeout).await?;

        if response.type_num() == msg::ERROR_MESSAGE {
            return Err(reader_error(&response));
        }
        if let Some(expected) = expected {
            if response.type_num() != expected {
                tracing::warn!(
                    "expected response type {expected}, got {} ({})",
                    response.type_num(),
                    response.name()
                );
            }
        }
        Ok(response)
    }
}

/// Counts opaque parameter nodes anywhere in the tree. Opaque nodes have
/// no decoded children, so recursion stops at them.
fn count_unknown(elem: &Element) -> usize {
    elem.children()
        .iter()
        .map(|c| if c.is_opaque() { 1 } else { count_unknown(c) })
        .sum()
}

/// Extracts status code and description from an ERROR_MESSAGE.
fn reader_error(response: &Element) -> ClientError {
    let status = response.first_child(param::LLRP_STATUS);
    ClientError::Reader {
        status: status
            .and_then(|s| s.u16_field("StatusCode"))
            .unwrap_or(0),
        message: status
            .and_then(|s| s.str_field("ErrorDescription"))
            .unwrap_or("")
            .to_owned(),
    }
}
