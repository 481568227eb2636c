//! Record layouts and the per-format registries that key them.
//!
//! A [`Layout`] partitions a fixed-width line into [`Field`]s. A
//! [`Registry`] maps every record type of one format to its layout. Format
//! variants are built by taking a base registry and replacing named entries
//! with [`Registry::with`].

mod cif;
mod msn;

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::field::{DecodeError, Field, Row, Value};

pub(crate) use cif::{bs, stop};
pub use cif::{CifRecord, supplement_registry, timetable_registry};
pub use msn::{StationRecord, station_registry};

/// A record type code of one file format.
///
/// Implemented by fieldless enums whose variants are listed in `ALL` in
/// declaration order, so that `index()` is the variant's position in `ALL`.
pub trait RecordType: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Number of leading characters that hold the code.
    const CODE_WIDTH: usize;

    /// Every record type of the format.
    const ALL: &'static [Self];

    /// Look up a record type from its code.
    fn from_code(code: &str) -> Option<Self>;

    /// The code as it appears at the start of a line.
    fn code(self) -> &'static str;

    /// Position of this record type in `ALL`.
    fn index(self) -> usize;
}

/// The characters of a record line with line endings read as spaces,
/// padded with spaces without end.
pub(crate) fn columns(line: &str) -> impl Iterator<Item = char> + '_ {
    line.chars()
        .map(|c| if matches!(c, '\n' | '\r') { ' ' } else { c })
        .chain(std::iter::repeat(' '))
}

/// A named, ordered sequence of fields covering a whole record.
///
/// Immutable once built.
///
/// # Examples
///
/// ```
/// use cif_ingest::field::{Field, Value};
/// use cif_ingest::record::Layout;
///
/// let layout = Layout::new("TIPLOC Delete", [
///     Field::literal("Record Identity", "TD"),
///     Field::text("TIPLOC Code", 7),
///     Field::filler("Spare", 71),
/// ]);
/// assert_eq!(layout.width(), 80);
/// assert_eq!(layout.emitting(), 1);
///
/// // Short lines are padded before slicing
/// let row = layout.read("TDPADTON\n").unwrap();
/// assert_eq!(row, vec![Some(Value::Text("PADTON ".into()))]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    name: &'static str,
    table: String,
    fields: Vec<Field>,
    width: usize,
    emitting: usize,
}

impl Layout {
    pub fn new(name: &'static str, fields: impl IntoIterator<Item = Field>) -> Self {
        let fields: Vec<Field> = fields.into_iter().collect();
        let width = fields.iter().map(Field::width).sum();
        let emitting = fields.iter().filter(|f| f.emits()).count();
        Self {
            name,
            table: name.to_lowercase().replace(' ', "_"),
            fields,
            width,
            emitting,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Table that rows of this layout are emitted to.
    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Total width of all fields.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of fields that produce a value.
    pub fn emitting(&self) -> usize {
        self.emitting
    }

    /// A row with every emittable value absent.
    pub fn blank_row(&self) -> Row {
        vec![None; self.emitting]
    }

    /// Index of the named field within a decoded row.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .filter(|f| f.emits())
            .position(|f| f.name() == name)
    }

    /// Column names of the emitting fields, in row order.
    pub fn columns(&self) -> impl Iterator<Item = String> + '_ {
        self.fields
            .iter()
            .filter(|f| f.emits())
            .map(Field::column_name)
    }

    /// Decode a line into the values of its emitting fields.
    ///
    /// Each field takes exactly its declared width. A line shorter than the
    /// layout is padded with spaces; anything beyond the layout is ignored.
    pub fn read(&self, line: &str) -> Result<Row, DecodeError> {
        let mut row = Vec::with_capacity(self.emitting);
        self.each_field(line, |field, value| {
            if field.emits() {
                row.push(value);
            }
        })?;
        Ok(row)
    }

    /// Decode a line into `(field name, value)` pairs for the emitting fields.
    pub fn read_named(&self, line: &str) -> Result<Vec<(&'static str, Option<Value>)>, DecodeError> {
        let mut named = Vec::with_capacity(self.emitting);
        self.each_field(line, |field, value| {
            if field.emits() {
                named.push((field.name(), value));
            }
        })?;
        Ok(named)
    }

    fn each_field(
        &self,
        line: &str,
        mut visit: impl FnMut(&Field, Option<Value>),
    ) -> Result<(), DecodeError> {
        let mut chars = columns(line);
        for field in &self.fields {
            let text: String = chars.by_ref().take(field.width()).collect();
            visit(field, field.decode(&text)?);
        }
        Ok(())
    }
}

/// Layouts for every record type of one format.
///
/// Built complete from a function over `R::ALL`, so every record type has a
/// layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry<R> {
    layouts: Vec<Layout>,
    _record: PhantomData<R>,
}

impl<R: RecordType> Registry<R> {
    /// Build a registry by asking `layout` for each record type.
    pub fn from_fn(layout: impl FnMut(R) -> Layout) -> Self {
        Self {
            layouts: R::ALL.iter().copied().map(layout).collect(),
            _record: PhantomData,
        }
    }

    pub fn get(&self, record: R) -> &Layout {
        &self.layouts[record.index()]
    }

    /// Replace the layout of one record type, keeping the rest.
    pub fn with(mut self, record: R, layout: Layout) -> Self {
        self.layouts[record.index()] = layout;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (R, &Layout)> + '_ {
        R::ALL.iter().copied().zip(&self.layouts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{DateFormat, DecodeFailure};
    use chrono::NaiveDate;

    fn delete_layout() -> Layout {
        Layout::new(
            "TIPLOC Delete",
            [
                Field::literal("Record Identity", "TD"),
                Field::text("TIPLOC Code", 7),
                Field::filler("Spare", 71),
            ],
        )
    }

    #[test]
    fn width_and_emitting() {
        let layout = delete_layout();
        assert_eq!(layout.width(), 80);
        assert_eq!(layout.emitting(), 1);
        assert_eq!(layout.blank_row(), vec![None]);
    }

    #[test]
    fn table_name_from_layout_name() {
        assert_eq!(delete_layout().table_name(), "tiploc_delete");
    }

    #[test]
    fn read_pads_short_lines() {
        let row = delete_layout().read("TDREDNGSW").unwrap();
        assert_eq!(row, vec![Some(Value::Text("REDNGSW".into()))]);

        let row = delete_layout().read("TDPAD").unwrap();
        assert_eq!(row, vec![Some(Value::Text("PAD    ".into()))]);
    }

    #[test]
    fn read_treats_newlines_as_spaces() {
        let row = delete_layout().read("TDPAD\r\n").unwrap();
        assert_eq!(row, vec![Some(Value::Text("PAD    ".into()))]);
    }

    #[test]
    fn read_ignores_text_past_layout_width() {
        let line = format!("TDREDNGSW{}EXTRA", " ".repeat(71));
        let row = delete_layout().read(&line).unwrap();
        assert_eq!(row, vec![Some(Value::Text("REDNGSW".into()))]);
    }

    #[test]
    fn read_reports_failing_field() {
        let err = delete_layout().read("TIREDNGSW").unwrap_err();
        assert_eq!(err.field(), "Record Identity");
        assert_eq!(
            err.reason(),
            &DecodeFailure::TemplateMismatch { expected: "TD" }
        );
    }

    #[test]
    fn values_keep_field_order() {
        let layout = Layout::new(
            "Test",
            [
                Field::literal("Record Identity", "XX"),
                Field::date("First", DateFormat::YearMonthDay),
                Field::filler("Gap", 2),
                Field::integer("Second", 2),
            ],
        );
        let named = layout.read_named("XX240315  42").unwrap();
        assert_eq!(
            named,
            vec![
                (
                    "First",
                    Some(Value::Date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()))
                ),
                ("Second", Some(Value::Integer(42))),
            ]
        );
        assert_eq!(layout.position("Second"), Some(1));
        assert_eq!(layout.position("Gap"), None);
        assert_eq!(
            layout.columns().collect::<Vec<_>>(),
            vec!["first".to_string(), "second".to_string()]
        );
    }
}
