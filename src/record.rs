//! Structured record payload for the `RECORD` sub-protocol.
//!
//! A [`Record`] is the demonstration payload carried by the `RECORD` command:
//! a numeric field, a text field, a byte sequence and a string-to-integer
//! mapping. Only those four fields cross the wire; the wire representation is
//! the dedicated [`WireRecord`] subset type, so a field kept off the wire is
//! dropped during encoding and comes back as its default value on the decode
//! side.
use std::collections::HashMap;

use bincode::{Decode, Encode};

/// Demonstration payload decoded by the `RECORD` handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub num: i64,
    pub text: String,
    pub blob: Vec<u8>,
    pub scores: HashMap<String, i64>,
    /// Local annotation; never transmitted.
    pub note: String,
}

/// On-wire subset of [`Record`].
#[derive(Debug, Encode, Decode, PartialEq, Eq)]
pub(crate) struct WireRecord {
    num: i64,
    text: String,
    blob: Vec<u8>,
    scores: HashMap<String, i64>,
}

impl From<&Record> for WireRecord {
    fn from(record: &Record) -> Self {
        Self {
            num: record.num,
            text: record.text.clone(),
            blob: record.blob.clone(),
            scores: record.scores.clone(),
        }
    }
}

impl From<WireRecord> for Record {
    fn from(wire: WireRecord) -> Self {
        Self {
            num: wire.num,
            text: wire.text,
            blob: wire.blob,
            scores: wire.scores,
            note: String::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use crate::protocol::{Wire, WireTransport};

    use super::*;

    fn record() -> Record {
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

    #[test]
    fn transmitted_fields_round_trip() {
        let original = record();
        let mut out = WireTransport::new(io::empty(), Vec::new());
        out.write_record(&original).unwrap();

        let bytes = out.into_writer().unwrap();
        let mut input = WireTransport::new(Cursor::new(bytes), Vec::new());
        let decoded = input.read_record().unwrap();

        assert_eq!(decoded.num, original.num);
        assert_eq!(decoded.text, original.text);
        assert_eq!(decoded.blob, original.blob);
        assert_eq!(decoded.scores, original.scores);
    }

    #[test]
    fn untransmitted_field_decodes_to_default() {
        let mut out = WireTransport::new(io::empty(), Vec::new());
        out.write_record(&record()).unwrap();

        let bytes = out.into_writer().unwrap();
        let mut input = WireTransport::new(Cursor::new(bytes), Vec::new());
        let decoded = input.read_record().unwrap();

        assert_eq!(decoded.note, String::default());
    }
}
