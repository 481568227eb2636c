//! Reader error types.
//!
//! Every error is fatal to the file being read. The caller decides whether
//! that aborts the whole batch or moves on to the next file.

use crate::field::DecodeError;
use crate::sink::SinkError;

/// Errors raised while reading one line of input.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// A single field of a record failed to decode
    #[error("malformed {record} record: {source}")]
    MalformedField {
        record: &'static str,
        #[source]
        source: DecodeError,
    },

    /// The record type is not allowed to follow the previous one
    #[error("unexpected '{found}' record following {after}")]
    UnexpectedRecordType { found: String, after: String },

    /// A delimited line did not have the expected number of columns
    #[error("expected {expected} fields, found {found}")]
    WrongFieldCount { expected: usize, found: usize },

    /// The input stopped before the format's trailer record
    #[error("unexpected end of file following {after}")]
    UnexpectedEndOfFile { after: String },

    /// The sink refused a row
    #[error(transparent)]
    Sink(#[from] SinkError),
}
