//! Master station names reader.

use crate::record::{StationRecord, station_registry};
use crate::sink::RowSink;

use super::{Grammar, LineReader, ReadError, RecordReader, State};

/// Record ordering of master station names files: station details, then
/// aliases, then groups, connections and routeing groups, then trailers in
/// any order.
#[derive(Debug, Clone, Copy)]
pub struct StationGrammar;

impl Grammar for StationGrammar {
    type Record = StationRecord;

    const LINE_WIDTH: usize = 82;

    fn successors(state: State<StationRecord>) -> &'static [StationRecord] {
        use StationRecord::*;

        let record = match state {
            State::Start => return &[A],
            State::After(record) | State::Attached { owner: record, .. } => record,
        };
        match record {
            A | B => &[A, B, C, L],
            C => &[A, C, L],
            L => &[L, G, R, V, Z, Zero, M, Dash, E],
            G => &[G, R, V, Z, Zero, M, Dash, E],
            R => &[R, V, Z, Zero, M, Dash, E],
            V => &[V, Z, Zero, M, Dash, E],
            Z | Zero | M | Dash | Space => &[Z, Zero, M, Dash, Space, E],
            E => &[],
        }
    }

    fn may_end(state: State<StationRecord>) -> bool {
        state == State::After(StationRecord::E)
    }
}

/// Reads a master station names file into a [`RowSink`].
///
/// Station details, aliases and routeing groups are emitted as they are
/// read; nothing depends on earlier records.
#[derive(Debug)]
pub struct StationReader<S> {
    records: RecordReader<StationGrammar>,
    sink: S,
}

impl<S: RowSink> StationReader<S> {
    pub fn new(sink: S) -> Self {
        Self {
            records: RecordReader::new(station_registry()),
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: RowSink> LineReader for StationReader<S> {
    fn process(&mut self, line: &str) -> Result<(), ReadError> {
        let (record, row) = self.records.read(line)?;
        match record {
            StationRecord::A | StationRecord::L | StationRecord::V => {
                let table = self.records.registry().get(record).table_name();
                self.sink.emit(table, row)?;
            }
            StationRecord::B
            | StationRecord::C
            | StationRecord::G
            | StationRecord::R
            | StationRecord::Z
            | StationRecord::Zero
            | StationRecord::M
            | StationRecord::Dash
            | StationRecord::Space
            | StationRecord::E => {}
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReadError> {
        self.records.finish()?;
        self.sink.flush()?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::field::Value;
    use crate::sink::MemorySink;

    fn read_all(reader: &mut StationReader<MemorySink>, lines: &[String]) {
        for line in lines {
            reader.process(line).unwrap();
        }
    }

    #[test]
    fn sections_in_order() {
        let mut reader = StationReader::new(MemorySink::new());
        read_all(
            &mut reader,
            &[
                station("READING", "RDNGSTN", "RDG"),
                line("B    READING"),
                station("PADDINGTON", "PADTON", "PAD"),
                line("C    Comments"),
                alias("LONDON PADDINGTON", "PADDINGTON"),
                line("G    GROUP"),
                line("R    CONNECTION"),
                routeing_group("LONDON GROUP", "EUS KGX PAD"),
                line("Z    TRAILER"),
                line("-    USAGE"),
                line(" "),
                line("0"),
                line("M"),
                line("E"),
            ],
        );
        reader.finish().unwrap();

        let sink = reader.into_sink();
        assert_eq!(
            sink.tables().collect::<Vec<_>>(),
            vec![
                "station_detail",
                "station_detail",
                "station_alias",
                "routeing_groups"
            ]
        );
        let detail = sink.table("station_detail").next().unwrap();
        assert_eq!(detail[2], Some(Value::Text("RDNGSTN".into())));
        assert_eq!(sink.flushes(), 1);
    }

    #[test]
    fn alias_after_routeing_group_is_rejected() {
        let mut reader = StationReader::new(MemorySink::new());
        read_all(
            &mut reader,
            &[
                station("READING", "RDNGSTN", "RDG"),
                alias("RDG", "READING"),
                routeing_group("GROUP", "RDG"),
            ],
        );
        let err = reader.process(&alias("X", "Y")).unwrap_err();
        assert_eq!(err.to_string(), "unexpected 'L' record following 'V'");
    }

    #[test]
    fn comments_cannot_follow_aliases() {
        let mut reader = StationReader::new(MemorySink::new());
        read_all(
            &mut reader,
            &[station("READING", "RDNGSTN", "RDG"), alias("RDG", "READING")],
        );
        assert!(reader.process(&line("C    Comments")).is_err());
    }

    #[test]
    fn blank_code_only_among_trailers() {
        let mut reader = StationReader::new(MemorySink::new());
        read_all(
            &mut reader,
            &[station("READING", "RDNGSTN", "RDG"), alias("RDG", "READING")],
        );
        assert!(matches!(
            reader.process(&line(" ")),
            Err(ReadError::UnexpectedRecordType { found, .. }) if found == " "
        ));
    }

    #[test]
    fn file_must_end_with_final_trailer() {
        let mut reader = StationReader::new(MemorySink::new());
        read_all(
            &mut reader,
            &[
                station("READING", "RDNGSTN", "RDG"),
                alias("RDG", "READING"),
                line("Z"),
            ],
        );
        assert!(matches!(
            reader.finish(),
            Err(ReadError::UnexpectedEndOfFile { after }) if after == "'Z'"
        ));
    }

    #[test]
    fn bad_easting_is_malformed() {
        let mut reader = StationReader::new(MemorySink::new());
        let text = station("READING", "RDNGSTN", "RDG").replace("17129", "1712X");
        let err = reader.process(&text).unwrap_err();
        assert!(matches!(
            err,
            ReadError::MalformedField { record: "Station Detail", .. }
        ));
    }

    #[test]
    fn layouts_span_the_line() {
        for (_, layout) in station_registry().iter() {
            assert_eq!(layout.width(), StationGrammar::LINE_WIDTH);
        }
    }
}
