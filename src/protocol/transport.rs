use std::{
    io::{self, BufRead, BufReader, BufWriter, Read, Write},
    net::{SocketAddr, TcpStream},
};

use bincode::{
    config::{BigEndian, Configuration, Fixint},
    decode_from_std_read, encode_into_std_write,
};
use log::info;
use thiserror::Error;

use crate::record::{Record, WireRecord};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to encode record: {0}")]
    Serialize(#[from] bincode::error::EncodeError),
    #[error("failed to decode record: {0}")]
    Deserialize(#[from] bincode::error::DecodeError),
    #[error("Transport IO Error: {0}")]
    Io(#[from] io::Error),
    #[error("unexpected end of stream")]
    Eof,
}

/// Operations a handler may perform on its connection's stream.
///
/// Object-safe so that handlers can be stored behind trait objects in the
/// registry; implemented by [`WireTransport`] for any reader/writer pair.
pub trait Wire {
    /// Read one newline-terminated line; `Ok(None)` on end of stream.
    fn read_line(&mut self) -> Result<Option<String>, TransportError>;
    /// Write `line` followed by a newline. Does not flush.
    fn write_line(&mut self, line: &str) -> Result<(), TransportError>;
    fn flush(&mut self) -> Result<(), TransportError>;
    /// Decode exactly one record from the stream.
    fn read_record(&mut self) -> Result<Record, TransportError>;
    fn write_record(&mut self, record: &Record) -> Result<(), TransportError>;
}

pub struct WireTransport<R: Read, W: Write> {
    reader: BufReader<R>,
    writer: BufWriter<W>,
    config: Configuration<BigEndian, Fixint>,
}

impl<R: Read, W: Write> WireTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_fixed_int_encoding();
        Self {
            reader: BufReader::new(reader),
            writer: BufWriter::new(writer),
            config,
        }
    }

    /// Flush and return the underlying writer.
    pub fn into_writer(self) -> Result<W, TransportError> {
        self.writer
            .into_inner()
            .map_err(|e| TransportError::Io(e.into_error()))
    }
}

impl WireTransport<TcpStream, TcpStream> {
    /// Open an outbound connection and wrap it with buffered read/write.
    pub fn connect(addr: SocketAddr) -> Result<Self, TransportError> {
        info!("dialing {addr}");
        let stream = TcpStream::connect(addr)?;
        let reader = stream.try_clone()?;
        Ok(Self::new(reader, stream))
    }

    /// Wrap an accepted connection with buffered read/write.
    pub fn from_stream(stream: TcpStream) -> Result<Self, TransportError> {
        let reader = stream.try_clone()?;
        Ok(Self::new(reader, stream))
    }
}

impl<R: Read, W: Write> Wire for WireTransport<R, W> {
    fn read_line(&mut self) -> Result<Option<String>, TransportError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn write_line(&mut self, line: &str) -> Result<(), TransportError> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.writer.flush()?;
        Ok(())
    }

    fn read_record(&mut self) -> Result<Record, TransportError> {
        let wire: WireRecord = decode_from_std_read(&mut self.reader, self.config)?;
        Ok(wire.into())
    }

    fn write_record(&mut self, record: &Record) -> Result<(), TransportError> {
        encode_into_std_write(WireRecord::from(record), &mut self.writer, self.config)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, io::Cursor};

    use super::*;

    #[test]
    fn write_then_read_line() {
        let mut out = WireTransport::new(io::empty(), Vec::new());
        out.write_line("STRING").unwrap();
        out.write_line("hello").unwrap();

        let bytes = out.into_writer().unwrap();
        let mut input = WireTransport::new(Cursor::new(bytes), Vec::new());

        assert_eq!(input.read_line().unwrap(), Some("STRING\n".to_string()));
        assert_eq!(input.read_line().unwrap(), Some("hello\n".to_string()));
        assert_eq!(input.read_line().unwrap(), None);
    }

    #[test]
    fn read_line_on_empty_stream() {
        let mut input = WireTransport::new(io::empty(), Vec::new());
        assert_eq!(input.read_line().unwrap(), None);
    }

    #[test]
    fn record_encoding_is_self_terminating() {
        let record = Record {
            num: 7,
            text: "trailing data follows".to_string(),
            blob: vec![0xde, 0xad],
            scores: HashMap::from([("one".to_string(), 1)]),
            note: String::default(),
        };

        let mut out = WireTransport::new(io::empty(), Vec::new());
        out.write_record(&record).unwrap();
        out.write_line("STRING").unwrap();

        let bytes = out.into_writer().unwrap();
        let mut input = WireTransport::new(Cursor::new(bytes), Vec::new());

        let decoded = input.read_record().unwrap();
        assert_eq!(decoded.num, record.num);
        assert_eq!(input.read_line().unwrap(), Some("STRING\n".to_string()));
    }

    #[test]
    fn truncated_record_fails_to_decode() {
        let mut input = WireTransport::new(Cursor::new(vec![0x01, 0x02]), Vec::new());
        let err = input.read_record().unwrap_err();
        assert!(matches!(err, TransportError::Deserialize(_)));
    }
}
