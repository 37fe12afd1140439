use std::net::TcpStream;

use log::{debug, info, warn};
use thiserror::Error;

use super::{
    registry::HandlerRegistry,
    transport::{TransportError, Wire, WireTransport},
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("command '{0}' is not registered")]
    UnknownCommand(String),
    #[error("session transport failure: {0}")]
    Transport(#[from] TransportError),
}

/// Serve one accepted connection until it closes.
///
/// The stream handles are dropped on every exit path, which closes the
/// connection.
pub fn run(stream: TcpStream, registry: &HandlerRegistry) {
    let mut wire = match WireTransport::from_stream(stream) {
        Ok(wire) => wire,
        Err(e) => {
            warn!("failed to set up session transport: {e}");
            return;
        }
    };

    match serve(&mut wire, registry) {
        Ok(()) => debug!("session closed"),
        Err(e) => warn!("session ended: {e}"),
    }
}

/// Per-connection command loop.
///
/// Reads one command token per iteration and dispatches it to the matching
/// handler. End of stream is a normal termination; an unregistered command
/// ends the session. A failing handler is reported and the loop continues,
/// since the next read surfaces a broken connection anyway.
pub fn serve(wire: &mut dyn Wire, registry: &HandlerRegistry) -> Result<(), SessionError> {
    loop {
        let line = match wire.read_line()? {
            Some(line) => line,
            None => {
                debug!("end of stream");
                return Ok(());
            }
        };

        let name = line.trim();
        info!("received command '{name}'");

        let handler = registry
            .lookup(name)
            .ok_or_else(|| SessionError::UnknownCommand(name.to_string()))?;

        if let Err(e) = handler.handle(wire) {
            warn!("'{name}' handler failed: {e}");
        }
    }
}
