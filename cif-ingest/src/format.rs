//! Input formats and the reader each one needs.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::reader::{
    AdditionalLinkReader, InterchangeReader, LineReader, StationReader, TimetableReader,
};
use crate::sink::RowSink;

/// The file formats found in a timetable distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Full CIF timetable (`.mca`)
    Timetable,
    /// Manual timetable supplement (`.ztr`)
    Supplement,
    /// Master station names (`.msn`)
    StationMaster,
    /// Additional fixed links (`.alf`)
    AdditionalLinks,
    /// Train operator interchange times (`.tsi`)
    InterchangeTimes,
}

/// Error returned when parsing an unrecognised format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown file format: {0:?}")]
pub struct UnknownFormat(pub String);

impl Format {
    pub const ALL: [Format; 5] = [
        Format::Timetable,
        Format::Supplement,
        Format::StationMaster,
        Format::AdditionalLinks,
        Format::InterchangeTimes,
    ];

    /// The file extension (lower case) this format is distributed under.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Timetable => "mca",
            Format::Supplement => "ztr",
            Format::StationMaster => "msn",
            Format::AdditionalLinks => "alf",
            Format::InterchangeTimes => "tsi",
        }
    }

    /// Match an extension, ignoring case.
    pub fn from_extension(extension: &str) -> Option<Format> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(extension))
    }

    /// Work out the format of a file from its name.
    pub fn from_path(path: &Path) -> Option<Format> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }

    /// Whether the first line of a file is a banner rather than a record.
    pub fn has_header_line(self) -> bool {
        matches!(self, Format::StationMaster)
    }

    /// A fresh reader for one file of this format.
    pub fn reader<'a, S>(self, sink: S) -> Box<dyn LineReader + Send + 'a>
    where
        S: RowSink + Send + 'a,
    {
        match self {
            Format::Timetable => Box::new(TimetableReader::full(sink)),
            Format::Supplement => Box::new(TimetableReader::supplement(sink)),
            Format::StationMaster => Box::new(StationReader::new(sink)),
            Format::AdditionalLinks => Box::new(AdditionalLinkReader::new(sink)),
            Format::InterchangeTimes => Box::new(InterchangeReader::new(sink)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::from_extension(s.trim()).ok_or_else(|| UnknownFormat(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use std::path::PathBuf;

    #[test]
    fn extensions_roundtrip() {
        for format in Format::ALL {
            assert_eq!(Format::from_extension(format.extension()), Some(format));
            assert_eq!(format.to_string().parse::<Format>(), Ok(format));
        }
    }

    #[test]
    fn detection_ignores_case() {
        assert_eq!(
            Format::from_path(&PathBuf::from("RJTTF123.MCA")),
            Some(Format::Timetable)
        );
        assert_eq!(
            Format::from_path(&PathBuf::from("data/ttisf123.ztr")),
            Some(Format::Supplement)
        );
        assert_eq!(
            Format::from_path(&PathBuf::from("RJTTF123.Msn")),
            Some(Format::StationMaster)
        );
        assert_eq!(Format::from_path(&PathBuf::from("README.txt")), None);
        assert_eq!(Format::from_path(&PathBuf::from("no_extension")), None);
    }

    #[test]
    fn unknown_name() {
        assert_eq!(
            "xyz".parse::<Format>(),
            Err(UnknownFormat("xyz".to_string()))
        );
        assert_eq!(" ALF ".parse::<Format>(), Ok(Format::AdditionalLinks));
    }

    #[test]
    fn only_station_master_has_banner() {
        let with_banner: Vec<_> = Format::ALL
            .into_iter()
            .filter(|f| f.has_header_line())
            .collect();
        assert_eq!(with_banner, vec![Format::StationMaster]);
    }

    #[test]
    fn reader_matches_format() {
        // A blank interchange line is accepted; a blank timetable line is not
        let mut tsi = Format::InterchangeTimes.reader(MemorySink::new());
        assert!(tsi.process("").is_ok());
        let mut mca = Format::Timetable.reader(MemorySink::new());
        assert!(mca.process("").is_err());
    }
}
