//! Decoder for National Rail timetable interchange files.
//!
//! Reads the fixed-width CIF timetable (`.mca`), its manual supplement
//! (`.ztr`) and the master station names file (`.msn`), plus the delimited
//! additional links (`.alf`) and interchange times (`.tsi`) files. Each
//! valid line becomes a typed row handed to a [`sink::RowSink`], ready for
//! bulk loading into a table named after its record layout.

pub mod config;
pub mod field;
pub mod format;
pub mod ingest;
pub mod reader;
pub mod record;
pub mod sink;
