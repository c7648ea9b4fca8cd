//! Client error types.

use llrptk_protocol::ProtocolError;
use thiserror::Error;

/// Errors surfaced by connection operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("not connected")]
    NotConnected,

    #[error("connection closed by peer")]
    ConnectionClosed,

    #[error("operation timed out")]
    Timeout,

    /// The reader answered with ERROR_MESSAGE instead of the expected
    /// response. `status` is the LLRPStatus code; `message` its
    /// description.
    #[error("reader error {status}: {message}")]
    Reader { status: u16, message: String },
}

impl ClientError {
    /// True for [`ClientError::Timeout`], which a poll-mode caller treats
    /// as "nothing arrived" rather than a failure.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_predicate() {
        assert!(ClientError::Timeout.is_timeout());
        assert!(!ClientError::NotConnected.is_timeout());
    }

    #[test]
    fn test_reader_error_display() {
        let err = ClientError::Reader {
            status: 100,
            message: "bad ROSpec".into(),
        };
        let text = err.to_string();
        assert!(text.contains("100"));
        assert!(text.contains("bad ROSpec"));
    }
}
