//! Demonstration client that drives both sub-protocols over one connection.
use std::{collections::HashMap, net::SocketAddr};

use log::info;
use thiserror::Error;

use super::{
    handlers::{RECORD_COMMAND, STRING_COMMAND},
    transport::{TransportError, Wire, WireTransport},
};
use crate::record::Record;

const STRING_PAYLOAD: &str = "This is a string payload. This is the actual data that must be carried over.";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        source: TransportError,
    },
    #[error("failed to send the '{command}' command: {source}")]
    SendCommand {
        command: &'static str,
        source: TransportError,
    },
    #[error("failed to send the string payload: {0}")]
    SendString(TransportError),
    #[error("failed to read the string reply: {0}")]
    ReadReply(TransportError),
    #[error("endpoint closed the connection before replying")]
    MissingReply,
    #[error("failed to encode the record payload: {0}")]
    SendRecord(TransportError),
    #[error("failed to flush outgoing data: {0}")]
    Flush(TransportError),
}

/// Sample payload sent by the `RECORD` step. The note stays local.
pub fn sample_record() -> Record {
    Record {
        num: 10,
        text: "String sample".to_string(),
        blob: b"lol".to_vec(),
        scores: HashMap::from([
            ("Messi".to_string(), 10),
            ("Neymar".to_string(), 11),
            ("Cristiano".to_string(), 7),
        ]),
        note: "kept off the wire".to_string(),
    }
}

/// Connect to `addr` and issue the `STRING` and `RECORD` commands in order.
///
/// The string step reads one acknowledgment line back; the record step sends
/// and returns without a reply. No retries on failure.
pub fn run(addr: SocketAddr) -> Result<(), ClientError> {
    let mut wire =
        WireTransport::connect(addr).map_err(|source| ClientError::Connect { addr, source })?;

    info!("sending string request");
    wire.write_line(STRING_COMMAND)
        .map_err(|source| ClientError::SendCommand {
            command: STRING_COMMAND,
            source,
        })?;
    wire.write_line(STRING_PAYLOAD)
        .map_err(ClientError::SendString)?;
    wire.flush().map_err(ClientError::Flush)?;

    let reply = wire
        .read_line()
        .map_err(ClientError::ReadReply)?
        .ok_or(ClientError::MissingReply)?;
    info!("string reply from the endpoint: '{}'", reply.trim());

    info!("sending record request");
    wire.write_line(RECORD_COMMAND)
        .map_err(|source| ClientError::SendCommand {
            command: RECORD_COMMAND,
            source,
        })?;
    wire.write_record(&sample_record())
        .map_err(ClientError::SendRecord)?;
    wire.flush().map_err(ClientError::Flush)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{net::TcpListener, thread};

    use super::*;
    use crate::protocol::{
        handlers::{handle_record, handle_string},
        registry::HandlerRegistry,
        session,
    };

    #[test]
    fn drives_both_sub_protocols() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let registry = HandlerRegistry::new();
            registry.register(STRING_COMMAND, handle_string);
            registry.register(RECORD_COMMAND, handle_record);

            for stream in listener.incoming().flatten() {
                session::run(stream, &registry);
            }
        });

        run(addr).unwrap();
    }

    #[test]
    fn dial_failure_is_wrapped() {
        // Bind then immediately drop to get an address nobody listens on.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };

        let err = run(addr).unwrap_err();
        assert!(matches!(err, ClientError::Connect { .. }));
    }
}
