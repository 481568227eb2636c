//! Master station names records.

use crate::field::Field;

use super::{Layout, RecordType, Registry};

/// Record types of a master station names file, keyed by one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationRecord {
    /// Station detail
    A,
    /// Station table numbers
    B,
    /// Station comments
    C,
    /// Station alias
    L,
    /// Groups
    G,
    /// Connection details
    R,
    /// Routeing groups
    V,
    /// Trailers 1 and 2
    Z,
    /// Trailer 3
    Zero,
    /// Trailer 4
    M,
    /// 3-alpha code usage
    Dash,
    /// 3-alpha code usage, continued
    Space,
    /// Trailer 5
    E,
}

impl RecordType for StationRecord {
    const CODE_WIDTH: usize = 1;

    const ALL: &'static [Self] = &[
        StationRecord::A,
        StationRecord::B,
        StationRecord::C,
        StationRecord::L,
        StationRecord::G,
        StationRecord::R,
        StationRecord::V,
        StationRecord::Z,
        StationRecord::Zero,
        StationRecord::M,
        StationRecord::Dash,
        StationRecord::Space,
        StationRecord::E,
    ];

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.code() == code)
    }

    fn code(self) -> &'static str {
        match self {
            StationRecord::A => "A",
            StationRecord::B => "B",
            StationRecord::C => "C",
            StationRecord::L => "L",
            StationRecord::G => "G",
            StationRecord::R => "R",
            StationRecord::V => "V",
            StationRecord::Z => "Z",
            StationRecord::Zero => "0",
            StationRecord::M => "M",
            StationRecord::Dash => "-",
            StationRecord::Space => " ",
            StationRecord::E => "E",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A record whose content is not loaded.
fn ignored(code: &'static str, name: &'static str) -> Layout {
    Layout::new(
        name,
        [
            Field::literal("Record Type", code),
            Field::filler("Ignored", 81),
        ],
    )
}

fn layout(record: StationRecord) -> Layout {
    match record {
        StationRecord::A => Layout::new(
            "Station Detail",
            [
                Field::literal("Record Type", "A"),
                Field::filler("Spaces", 4),
                Field::text("Station Name", 30),
                Field::integer("CATE Type", 1),
                Field::text("TIPLOC Code", 7),
                Field::text("Subsidiary 3-Alpha Code", 3),
                Field::filler("Spaces 2", 3),
                Field::text("3-Alpha Code", 3),
                Field::integer("Easting", 5),
                Field::flag("Estimated", " E"),
                Field::integer("Northing", 5),
                Field::integer("Change Time", 2),
                Field::filler("CATE Footnote", 2),
                Field::filler("Spaces 3", 11),
                Field::filler("Region", 3),
                Field::filler("Spaces 4", 1),
            ],
        ),
        StationRecord::L => Layout::new(
            "Station Alias",
            [
                Field::literal("Record Type", "L"),
                Field::filler("Spaces 1", 4),
                Field::text("Station Name", 30),
                Field::filler("Spaces 2", 1),
                Field::text("Alias Name", 30),
                Field::filler("Spaces 3", 16),
            ],
        ),
        StationRecord::V => Layout::new(
            "Routeing Groups",
            [
                Field::literal("Record Type", "V"),
                Field::filler("Spaces 1", 4),
                Field::text("Group Name", 30),
                Field::filler("Spaces 2", 1),
                Field::routeing_group("Station"),
                Field::filler("Spaces 3", 6),
            ],
        ),
        StationRecord::B => ignored("B", "Station Table Numbers"),
        StationRecord::C => ignored("C", "Station Comments"),
        StationRecord::G => ignored("G", "Groups"),
        StationRecord::R => ignored("R", "Connection Details"),
        StationRecord::Z => ignored("Z", "Trailer 1 & 2"),
        StationRecord::Zero => ignored("0", "Trailer 3"),
        StationRecord::M => ignored("M", "Trailer 4"),
        StationRecord::Dash => ignored("-", "3-Alpha Code Usage"),
        StationRecord::Space => ignored(" ", "3-Alpha Code Usage (2)"),
        StationRecord::E => ignored("E", "Trailer 5"),
    }
}

/// Layouts of a master station names file.
pub fn station_registry() -> Registry<StationRecord> {
    Registry::from_fn(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Value;

    #[test]
    fn every_layout_is_eighty_two_columns() {
        for (record, layout) in station_registry().iter() {
            assert_eq!(layout.width(), 82, "{:?}", record);
        }
    }

    #[test]
    fn codes_roundtrip() {
        for &record in StationRecord::ALL {
            assert_eq!(StationRecord::from_code(record.code()), Some(record));
            assert_eq!(StationRecord::ALL[record.index()], record);
        }
        assert_eq!(StationRecord::from_code("0"), Some(StationRecord::Zero));
        assert_eq!(StationRecord::from_code(" "), Some(StationRecord::Space));
        assert_eq!(StationRecord::from_code("Q"), None);
    }

    #[test]
    fn only_three_record_types_carry_data() {
        let emitting: Vec<_> = station_registry()
            .iter()
            .filter(|(_, layout)| layout.emitting() > 0)
            .map(|(record, _)| record)
            .collect();
        assert_eq!(
            emitting,
            vec![StationRecord::A, StationRecord::L, StationRecord::V]
        );
    }

    #[test]
    fn decode_station_detail() {
        let text = "A    READING                       2READINGRDG   RDG17129E6173010                 ";
        assert_eq!(text.len(), 82);
        let row = station_registry().get(StationRecord::A).read(text).unwrap();
        assert_eq!(
            row,
            vec![
                Some(Value::Text(format!("{:<30}", "READING"))),
                Some(Value::Integer(2)),
                Some(Value::Text("READING".into())),
                Some(Value::Text("RDG".into())),
                Some(Value::Text("RDG".into())),
                Some(Value::Integer(17129)),
                Some(Value::Flag('E')),
                Some(Value::Integer(61730)),
                Some(Value::Integer(10)),
            ]
        );
    }

    #[test]
    fn decode_routeing_group() {
        let text = format!("V    {:<30} {:<40}      ", "LONDON GROUP", "EUS KGX STP");
        assert_eq!(text.len(), 82);
        let row = station_registry().get(StationRecord::V).read(&text).unwrap();
        let Some(Some(Value::Codes(codes))) = row.get(1) else {
            panic!("expected codes, got {:?}", row);
        };
        assert_eq!(&codes[..3], ["EUS", "KGX", "STP"]);
        assert_eq!(station_registry().get(StationRecord::V).table_name(), "routeing_groups");
    }
}
