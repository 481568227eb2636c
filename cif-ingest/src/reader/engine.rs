//! Record-type state machine shared by the fixed-width readers.
//!
//! A [`Grammar`] names the record types that may follow each state. The
//! [`RecordReader`] enforces it line by line and decodes each accepted line
//! with the layout registered for its record type. What to do with the
//! decoded values is left to the format reader that owns it.

use std::fmt;

use tracing::trace;

use crate::field::Row;
use crate::record::{RecordType, Registry, columns};

use super::ReadError;

/// Position of a reader within its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State<R> {
    /// No record read yet
    Start,
    /// The last record accepted was of this type
    After(R),
    /// The last record accepted, `record`, qualifies the earlier record
    /// `owner` and leaves the ordering where `owner` left it
    Attached { record: R, owner: R },
}

impl<R: RecordType> fmt::Display for State<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Start => f.write_str("start of file"),
            State::After(record) | State::Attached { record, .. } => {
                write!(f, "'{}'", record.code())
            }
        }
    }
}

/// Legal record orderings of one fixed-width format.
pub trait Grammar {
    type Record: RecordType;

    /// Width every layout of the format must have.
    const LINE_WIDTH: usize;

    /// Record types allowed to follow `state`.
    fn successors(state: State<Self::Record>) -> &'static [Self::Record];

    /// Whether the input may end in `state`.
    fn may_end(state: State<Self::Record>) -> bool;

    /// State after accepting `record` in `state`.
    fn next_state(_state: State<Self::Record>, record: Self::Record) -> State<Self::Record> {
        State::After(record)
    }
}

/// Validates record order and decodes lines for one input stream.
///
/// Not to be shared between files: the state left by one line determines
/// which records the next may hold.
#[derive(Debug)]
pub struct RecordReader<G: Grammar> {
    registry: Registry<G::Record>,
    state: State<G::Record>,
}

impl<G: Grammar> RecordReader<G> {
    pub fn new(registry: Registry<G::Record>) -> Self {
        debug_assert!(
            registry.iter().all(|(_, layout)| layout.width() == G::LINE_WIDTH),
            "every layout must span the whole line"
        );
        Self {
            registry,
            state: State::Start,
        }
    }

    pub fn state(&self) -> State<G::Record> {
        self.state
    }

    pub fn registry(&self) -> &Registry<G::Record> {
        &self.registry
    }

    /// Accept one line: check its record type may follow the current state,
    /// move to it, and decode the line.
    pub fn read(&mut self, line: &str) -> Result<(G::Record, Row), ReadError> {
        let code: String = columns(line).take(G::Record::CODE_WIDTH).collect();
        let record = G::Record::from_code(&code)
            .filter(|record| G::successors(self.state).contains(record))
            .ok_or_else(|| ReadError::UnexpectedRecordType {
                found: code,
                after: self.state.to_string(),
            })?;

        trace!(from = %self.state, to = record.code(), "record accepted");
        self.state = G::next_state(self.state, record);

        let layout = self.registry.get(record);
        let row = layout
            .read(line)
            .map_err(|source| ReadError::MalformedField {
                record: layout.name(),
                source,
            })?;
        Ok((record, row))
    }

    /// Check the input is allowed to end here.
    pub fn finish(&self) -> Result<(), ReadError> {
        if G::may_end(self.state) {
            Ok(())
        } else {
            Err(ReadError::UnexpectedEndOfFile {
                after: self.state.to_string(),
            })
        }
    }
}
