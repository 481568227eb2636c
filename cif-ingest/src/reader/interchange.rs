//! Interchange times reader.

use crate::field::{Field, Row};
use crate::sink::RowSink;

use super::{LineReader, ReadError};

const RECORD: &str = "Interchange Time";
const TABLE: &str = "tsi";

static FIELDS: [Field; 5] = [
    Field::text("Station code", 3),
    Field::text("Arriving train TOC", 2),
    Field::text("Departing train TOC", 2),
    Field::integer("Minimum Interchange Time", 2),
    Field::var_text("Comments", 100),
];

/// Reads a train operator interchange times file into a [`RowSink`].
///
/// Every line holds exactly five comma separated columns.
#[derive(Debug)]
pub struct InterchangeReader<S> {
    sink: S,
}

impl<S: RowSink> InterchangeReader<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Column names of an emitted row.
    pub fn columns() -> impl Iterator<Item = String> {
        FIELDS.iter().map(Field::column_name)
    }
}

impl<S: RowSink> LineReader for InterchangeReader<S> {
    fn process(&mut self, line: &str) -> Result<(), ReadError> {
        let line = line.trim_end();
        if line.is_empty() {
            return Ok(());
        }

        let columns: Vec<&str> = line.split(',').collect();
        if columns.len() != FIELDS.len() {
            return Err(ReadError::WrongFieldCount {
                expected: FIELDS.len(),
                found: columns.len(),
            });
        }

        let row = FIELDS
            .iter()
            .zip(columns)
            .map(|(field, text)| field.decode(text))
            .collect::<Result<Row, _>>()
            .map_err(|source| ReadError::MalformedField {
                record: RECORD,
                source,
            })?;
        self.sink.emit(TABLE, row)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReadError> {
        self.sink.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Value;
    use crate::sink::MemorySink;

    #[test]
    fn five_columns() {
        let mut reader = InterchangeReader::new(MemorySink::new());
        reader
            .process("CLJ,SN,SW,10,Southern platforms are far from the others  \n")
            .unwrap();
        reader.finish().unwrap();

        let sink = reader.into_sink();
        assert_eq!(sink.tables().collect::<Vec<_>>(), vec!["tsi"]);
        assert_eq!(
            sink.rows()[0].values,
            vec![
                Some(Value::Text("CLJ".into())),
                Some(Value::Text("SN".into())),
                Some(Value::Text("SW".into())),
                Some(Value::Integer(10)),
                Some(Value::Text("Southern platforms are far from the others".into())),
            ]
        );
    }

    #[test]
    fn empty_comment() {
        let mut reader = InterchangeReader::new(MemorySink::new());
        reader.process("CLJ,SN,SW,10,").unwrap();
        assert_eq!(
            reader.sink().rows()[0].values[4],
            Some(Value::Text(String::new()))
        );
    }

    #[test]
    fn wrong_field_count() {
        let mut reader = InterchangeReader::new(MemorySink::new());
        let err = reader.process("CLJ,SN,SW,10").unwrap_err();
        assert!(matches!(
            err,
            ReadError::WrongFieldCount {
                expected: 5,
                found: 4
            }
        ));
        assert!(reader.process("CLJ,SN,SW,10,a,b").is_err());
        assert!(reader.sink().rows().is_empty());
    }

    #[test]
    fn bad_minimum_time() {
        let mut reader = InterchangeReader::new(MemorySink::new());
        let err = reader.process("CLJ,SN,SW,ten,").unwrap_err();
        assert!(matches!(
            err,
            ReadError::MalformedField { record: "Interchange Time", .. }
        ));
    }

    #[test]
    fn column_names() {
        let columns: Vec<_> = InterchangeReader::<MemorySink>::columns().collect();
        assert_eq!(
            columns,
            vec![
                "station_code",
                "arriving_train_toc",
                "departing_train_toc",
                "minimum_interchange_time",
                "comments"
            ]
        );
    }
}
