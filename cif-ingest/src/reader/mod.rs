//! Line readers for each input format.
//!
//! The fixed-width formats ([`TimetableReader`], [`StationReader`]) are
//! built on the shared [`RecordReader`] state machine. The delimited formats
//! ([`AdditionalLinkReader`], [`InterchangeReader`]) have one record kind
//! and no ordering rules. All of them are driven through [`LineReader`].

mod engine;
mod error;
mod interchange;
mod links;
mod station;
mod timetable;

pub use engine::{Grammar, RecordReader, State};
pub use error::ReadError;
pub use interchange::InterchangeReader;
pub use links::AdditionalLinkReader;
pub use station::{StationGrammar, StationReader};
pub use timetable::{TimetableGrammar, TimetableReader};

#[cfg(test)]
pub(crate) use station::fixtures as station_fixtures;
#[cfg(test)]
pub(crate) use timetable::fixtures as timetable_fixtures;

/// Reads one input stream a line at a time, emitting rows as it goes.
pub trait LineReader {
    /// Process the next line of input. Errors are fatal to the stream.
    fn process(&mut self, line: &str) -> Result<(), ReadError>;

    /// Signal the end of input: check the stream was complete and flush the
    /// sink.
    fn finish(&mut self) -> Result<(), ReadError>;
}
