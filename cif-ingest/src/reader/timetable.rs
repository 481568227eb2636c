//! Full timetable and manual supplement reader.
//!
//! Each train schedule is a transaction:
//! `BS [BX] [TN] LO (LI | CR | LN)* LT LN*`, or a lone `BS` for a
//! cancellation. The schedule header, its
//! extra details and its note are merged into one `basic_schedule` row.
//! Every stop row is prefixed with the train UID, the date the schedule runs
//! from, the STP indicator, the stop's sequence number within the schedule
//! and whether the schedule has passed midnight by that stop.

use chrono::NaiveTime;
use tracing::debug;

use crate::field::{Row, Value};
use crate::record::{
    CifRecord, Registry, bs, stop, supplement_registry, timetable_registry,
};
use crate::sink::RowSink;

use super::{Grammar, LineReader, ReadError, RecordReader, State};

/// STP indicator of a short-term cancellation of a permanent schedule.
const STP_CANCELLATION: char = 'C';

/// Table receiving the merged schedule header rows.
const SCHEDULE_TABLE: &str = "basic_schedule";

/// Record ordering of CIF timetable files.
#[derive(Debug, Clone, Copy)]
pub struct TimetableGrammar;

impl Grammar for TimetableGrammar {
    type Record = CifRecord;

    const LINE_WIDTH: usize = 80;

    fn successors(state: State<CifRecord>) -> &'static [CifRecord] {
        use CifRecord::*;

        let record = match state {
            State::Start => return &[Hd],
            State::After(record) => record,
            // A location note changes nothing about what its location
            // allows next
            State::Attached { owner, .. } => owner,
        };
        match record {
            Hd | Ti => &[Ti, Ta, Td, Aa, Bs, Zz],
            Ta => &[Ta, Td, Aa, Bs, Zz],
            Td => &[Td, Aa, Bs, Zz],
            Aa => &[Aa, Bs, Zz],
            // A cancellation has no locations, so may be followed by the
            // next schedule or the trailer
            Bs => &[Bs, Bx, Tn, Lo, Zz],
            Bx => &[Tn, Lo],
            Tn => &[Lo],
            Lo | Li => &[Li, Cr, Lt, Ln],
            Cr => &[Li, Lt, Ln],
            Lt => &[Bs, Zz, Ln],
            // Only ever held as `Attached` to its location
            Ln => &[Ln],
            Zz => &[],
        }
    }

    fn may_end(state: State<CifRecord>) -> bool {
        state == State::After(CifRecord::Zz)
    }

    fn next_state(state: State<CifRecord>, record: CifRecord) -> State<CifRecord> {
        match (record, state) {
            (CifRecord::Ln, State::After(owner) | State::Attached { owner, .. }) => {
                State::Attached { record, owner }
            }
            _ => State::After(record),
        }
    }
}

/// Values carried from a schedule header to the records that follow it.
#[derive(Debug)]
struct Schedule {
    header: Row,
    extra: Row,
    note: Row,
    header_emitted: bool,
    train_uid: Option<Value>,
    runs_from: Option<Value>,
    stp_indicator: Option<Value>,
    sequence: i64,
    rolled_over: bool,
    last_time: Option<NaiveTime>,
}

impl Schedule {
    fn new(registry: &Registry<CifRecord>) -> Self {
        Self {
            header: registry.get(CifRecord::Bs).blank_row(),
            extra: registry.get(CifRecord::Bx).blank_row(),
            note: registry.get(CifRecord::Tn).blank_row(),
            header_emitted: true,
            train_uid: None,
            runs_from: None,
            stp_indicator: None,
            sequence: 0,
            rolled_over: false,
            last_time: None,
        }
    }

    /// Start a new schedule from its header row.
    fn begin(&mut self, header: Row, registry: &Registry<CifRecord>) {
        self.extra = registry.get(CifRecord::Bx).blank_row();
        self.note = registry.get(CifRecord::Tn).blank_row();
        self.train_uid = header.get(bs::TRAIN_UID).cloned().flatten();
        self.runs_from = header.get(bs::RUNS_FROM).cloned().flatten();
        self.stp_indicator = header.get(bs::STP_INDICATOR).cloned().flatten();
        self.header = header;
        self.header_emitted = false;
    }

    fn is_cancellation(&self) -> bool {
        self.stp_indicator.as_ref().and_then(Value::as_flag) == Some(STP_CANCELLATION)
    }

    /// The header, extra details and note as one row.
    fn merged(&self) -> Row {
        let mut row = Vec::with_capacity(self.header.len() + self.extra.len() + self.note.len());
        row.extend_from_slice(&self.header);
        row.extend_from_slice(&self.extra);
        row.extend_from_slice(&self.note);
        row
    }

    /// Restart stop numbering at the origin.
    fn depart(&mut self, time: Option<NaiveTime>) {
        self.sequence = 0;
        self.rolled_over = false;
        self.last_time = time;
    }

    /// Move on to the next stop, reached at `time`.
    ///
    /// A stop time earlier than the last one means the schedule has passed
    /// midnight. Once passed it stays passed for the rest of the schedule.
    fn advance(&mut self, time: Option<NaiveTime>) {
        self.sequence += 1;
        let Some(time) = time else {
            return;
        };
        match self.last_time {
            Some(last) if !self.rolled_over && time < last => {
                self.rolled_over = true;
                debug!(
                    train_uid = ?self.train_uid,
                    sequence = self.sequence,
                    %last,
                    %time,
                    "schedule passes midnight"
                );
            }
            _ => self.last_time = Some(time),
        }
    }

    /// A stop row: the schedule key, stop position and the record's values.
    fn stop_row(&self, row: Row) -> Row {
        let mut values = Vec::with_capacity(5 + row.len());
        values.extend([
            self.train_uid.clone(),
            self.runs_from.clone(),
            self.stp_indicator.clone(),
            Some(Value::Integer(self.sequence)),
            Some(Value::Boolean(self.rolled_over)),
        ]);
        values.extend(row);
        values
    }
}

fn time_at(row: &Row, index: usize) -> Option<NaiveTime> {
    row.get(index)?.as_ref()?.as_time()
}

/// Reads a CIF timetable file, full or supplement, into a [`RowSink`].
///
/// # Examples
///
/// ```
/// use cif_ingest::reader::{LineReader, TimetableReader};
/// use cif_ingest::sink::MemorySink;
///
/// let mut reader = TimetableReader::full(MemorySink::new());
/// reader.process(&format!("{:<80}", "HDTPS.UDFROC1.PD2403151503242130DFROC1ADFROC1ZUA150324140325")).unwrap();
/// reader.process(&format!("{:<80}", "TDPADTON")).unwrap();
/// reader.process("ZZ").unwrap();
/// reader.finish().unwrap();
///
/// let sink = reader.into_sink();
/// assert_eq!(sink.tables().collect::<Vec<_>>(), vec!["tiploc_delete"]);
/// ```
#[derive(Debug)]
pub struct TimetableReader<S> {
    records: RecordReader<TimetableGrammar>,
    schedule: Schedule,
    sink: S,
}

impl<S: RowSink> TimetableReader<S> {
    pub fn new(registry: Registry<CifRecord>, sink: S) -> Self {
        Self {
            schedule: Schedule::new(&registry),
            records: RecordReader::new(registry),
            sink,
        }
    }

    /// A reader for full timetable extracts.
    pub fn full(sink: S) -> Self {
        Self::new(timetable_registry(), sink)
    }

    /// A reader for manual timetable supplements.
    pub fn supplement(sink: S) -> Self {
        Self::new(supplement_registry(), sink)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn emit(&mut self, record: CifRecord, row: Row) -> Result<(), ReadError> {
        let table = self.records.registry().get(record).table_name();
        self.sink.emit(table, row)?;
        Ok(())
    }

    fn emit_stop(&mut self, record: CifRecord, row: Row) -> Result<(), ReadError> {
        let row = self.schedule.stop_row(row);
        self.emit(record, row)
    }

    /// Emit the merged schedule row, once per schedule.
    fn emit_schedule(&mut self) -> Result<(), ReadError> {
        if self.schedule.header_emitted {
            return Ok(());
        }
        self.sink.emit(SCHEDULE_TABLE, self.schedule.merged())?;
        self.schedule.header_emitted = true;
        Ok(())
    }
}

impl<S: RowSink> LineReader for TimetableReader<S> {
    fn process(&mut self, line: &str) -> Result<(), ReadError> {
        let (record, row) = self.records.read(line)?;
        match record {
            CifRecord::Hd | CifRecord::Zz => {}
            CifRecord::Ti | CifRecord::Ta | CifRecord::Td | CifRecord::Aa => {
                self.emit(record, row)?;
            }
            CifRecord::Bs => {
                self.schedule.begin(row, self.records.registry());
                // Cancellations carry no locations to trigger the emission
                if self.schedule.is_cancellation() {
                    debug!(train_uid = ?self.schedule.train_uid, "short-term cancellation");
                    self.emit_schedule()?;
                }
            }
            CifRecord::Bx => self.schedule.extra = row,
            CifRecord::Tn => self.schedule.note = row,
            CifRecord::Lo => {
                self.emit_schedule()?;
                self.schedule.depart(time_at(&row, stop::LO_DEPARTURE));
                self.emit_stop(record, row)?;
            }
            CifRecord::Li => {
                let time = time_at(&row, stop::LI_ARRIVAL)
                    .or_else(|| time_at(&row, stop::LI_DEPARTURE))
                    .or_else(|| time_at(&row, stop::LI_PASS));
                self.schedule.advance(time);
                self.emit_stop(record, row)?;
            }
            CifRecord::Lt => {
                self.schedule.advance(time_at(&row, stop::LT_ARRIVAL));
                self.emit_stop(record, row)?;
            }
            CifRecord::Cr | CifRecord::Ln => self.emit_stop(record, row)?,
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReadError> {
        self.records.finish()?;
        self.sink.flush()?;
        Ok(())
    }
}
