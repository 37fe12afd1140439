use log::info;

use super::transport::{TransportError, Wire};

/// Command token for the line-echo sub-protocol.
pub const STRING_COMMAND: &str = "STRING";
/// Command token for the structured-record sub-protocol.
pub const RECORD_COMMAND: &str = "RECORD";

/// Fixed acknowledgment line sent back for every `STRING` payload.
pub const STRING_ACK: &str = "Got it";

/// `STRING` sub-protocol: one payload line in, one acknowledgment line out.
pub fn handle_string(wire: &mut dyn Wire) -> Result<(), TransportError> {
    let line = wire.read_line()?.ok_or(TransportError::Eof)?;
    info!("received string '{}'", line.trim());

    wire.write_line(STRING_ACK)?;
    wire.flush()?;
    Ok(())
}

/// `RECORD` sub-protocol: decode one record, no reply.
pub fn handle_record(wire: &mut dyn Wire) -> Result<(), TransportError> {
    let record = wire.read_record()?;
    info!("received record: {record:?}");
    Ok(())
}
