//! Async LLRP client: connection handling and request/response
//! transactions over the wire protocol crate.

pub mod connection;
pub mod error;

pub use connection::{Connection, ConnectionConfig, RecvTimeout};
pub use error::ClientError;
