//! Command-dispatching endpoint protocol.
//!
//! This module implements the wire protocol spoken between Courier clients and
//! endpoints: connection acceptance, the per-connection command loop, the
//! concurrency-safe handler registry, and the two demonstration sub-protocols
//! (`STRING` and `RECORD`). It provides everything needed to serve or drive a
//! command-dispatching connection over a plain TCP stream.
//!
//! # Overview
//!
//! A client sends a newline-terminated ASCII command token; the endpoint looks
//! the token up in its registry and hands the connection's buffered stream to
//! the matching handler, which consumes exactly its own sub-protocol's payload
//! and optionally writes a reply. The loop then waits for the next token. A
//! session ends on end-of-stream (normal), a read error, or an unregistered
//! command.
//!
//! # Key Components
//!
//! - [`Endpoint`]: listening socket plus registry; one session thread per
//!   accepted connection, unbounded.
//! - [`HandlerRegistry`]: concurrency-safe command-name-to-handler mapping.
//! - [`WireTransport`]: buffered reader/writer view of a stream, shared by
//!   the session loop and the handlers through the [`Wire`] trait.
//! - [`client`]: demonstration driver issuing both sub-protocols in order.
//!
//! # Wire Format
//!
//! Command tokens are lines. The `STRING` payload is one more line, answered
//! with a fixed acknowledgment line. The `RECORD` payload is one binary
//! value encoded big-endian with fixed integer widths; strings, byte
//! sequences and maps are length-prefixed, so the encoding is
//! self-terminating and needs no outer framing. No reply follows a record.
//!
//! # See Also
//!
//! - [`record`](crate::record): The structured payload type and its on-wire
//!   subset.
pub mod client;

mod endpoint;
mod handlers;
mod registry;
mod session;
mod transport;

pub use client::ClientError;
pub use endpoint::Endpoint;
pub use handlers::{RECORD_COMMAND, STRING_ACK, STRING_COMMAND, handle_record, handle_string};
pub use registry::{Handler, HandlerRegistry};
pub use session::SessionError;
pub use transport::{TransportError, Wire, WireTransport};

/// Well-known port endpoints listen on; fixed for the whole process.
pub const PORT: u16 = 62000;
