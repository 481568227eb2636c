//! CIF timetable records (full extracts and manual supplements).

use crate::field::{DateFormat, Field};

use super::{Layout, RecordType, Registry};

/// Record types of a CIF timetable file, keyed by their two-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CifRecord {
    /// Header
    Hd,
    /// Basic schedule
    Bs,
    /// Basic schedule extra details
    Bx,
    /// Train specific note
    Tn,
    /// Origin location
    Lo,
    /// Intermediate location
    Li,
    /// Changes en route
    Cr,
    /// Terminating location
    Lt,
    /// Location specific note
    Ln,
    /// Association
    Aa,
    /// TIPLOC insert
    Ti,
    /// TIPLOC amend
    Ta,
    /// TIPLOC delete
    Td,
    /// Trailer
    Zz,
}

impl RecordType for CifRecord {
    const CODE_WIDTH: usize = 2;

    const ALL: &'static [Self] = &[
        CifRecord::Hd,
        CifRecord::Bs,
        CifRecord::Bx,
        CifRecord::Tn,
        CifRecord::Lo,
        CifRecord::Li,
        CifRecord::Cr,
        CifRecord::Lt,
        CifRecord::Ln,
        CifRecord::Aa,
        CifRecord::Ti,
        CifRecord::Ta,
        CifRecord::Td,
        CifRecord::Zz,
    ];

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.code() == code)
    }

    fn code(self) -> &'static str {
        match self {
            CifRecord::Hd => "HD",
            CifRecord::Bs => "BS",
            CifRecord::Bx => "BX",
            CifRecord::Tn => "TN",
            CifRecord::Lo => "LO",
            CifRecord::Li => "LI",
            CifRecord::Cr => "CR",
            CifRecord::Lt => "LT",
            CifRecord::Ln => "LN",
            CifRecord::Aa => "AA",
            CifRecord::Ti => "TI",
            CifRecord::Ta => "TA",
            CifRecord::Td => "TD",
            CifRecord::Zz => "ZZ",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

const TRANSACTION_TYPES: &str = "NDR";
const STP_INDICATORS: &str = " CNOP";
const PORTION_IDS: &str = " Z01248";
const TRAIN_CLASSES: &str = " BS";
const SLEEPERS: &str = " BFS";
const RESERVATIONS: &str = " AERS";
const NOTE_TYPES: &str = " GW";

fn header() -> Layout {
    Layout::new(
        "Header Record",
        [
            Field::literal("Record Identity", "HD"),
            Field::text("File Mainframe Identity", 20),
            Field::date("Date of Extract", DateFormat::DayMonthYear),
            Field::time("Time of Extract"),
            Field::text("Current-File-Ref", 7),
            Field::text("Last-File-Ref", 7),
            Field::flag("Bleed-off/Update Ind", "UF"),
            Field::text("Version", 1),
            Field::date("User Extract Start Date", DateFormat::DayMonthYear),
            Field::date("User Extract End Date", DateFormat::DayMonthYear),
            Field::filler("Spare", 20),
        ],
    )
}

/// Schedule header, with validity dates in `dates` format.
fn basic_schedule(dates: DateFormat) -> Layout {
    Layout::new(
        "Basic Schedule",
        [
            Field::literal("Record Identity", "BS"),
            Field::flag("Transaction Type", TRANSACTION_TYPES),
            Field::text("Train UID", 6),
            Field::date("Date Runs From", dates),
            Field::date("Date Runs To", dates),
            Field::days("Days Run"),
            Field::flag("Bank Holiday Running", " XEG"),
            Field::flag("Train Status", " BFPST12345"),
            Field::text("Train Category", 2),
            Field::text("Train Identity", 4),
            Field::text("Headcode", 4),
            Field::filler("Course Indicator", 1),
            Field::text("Train Service Code", 8),
            Field::flag("Portion ID", PORTION_IDS),
            Field::text("Power Type", 3),
            Field::text("Timing Load", 4),
            Field::integer("Speed", 3).optional(),
            Field::text("Operating Characteristics", 6),
            Field::flag("Train Class", TRAIN_CLASSES),
            Field::flag("Sleepers", SLEEPERS),
            Field::flag("Reservations", RESERVATIONS),
            Field::filler("Connection Indicator", 1),
            Field::text("Catering Code", 4),
            Field::text("Service Branding", 4),
            Field::filler("Spare", 1),
            Field::flag("STP Indicator", STP_INDICATORS),
        ],
    )
}

/// Schedule extra details, with `timetable_codes` as the legal
/// applicable-timetable flags.
fn extra_details(timetable_codes: &'static str) -> Layout {
    Layout::new(
        "Basic Schedule Extra Details",
        [
            Field::literal("Record Identity", "BX"),
            Field::filler("Traction Class", 4),
            Field::text("UIC Code", 5),
            Field::text("ATOC Code", 2),
            Field::flag("Applicable Timetable Code", timetable_codes),
            Field::text("RSID", 8),
            Field::flag("Data Source", " T"),
            Field::filler("Spare", 57),
        ],
    )
}

fn note(code: &'static str, name: &'static str) -> Layout {
    Layout::new(
        name,
        [
            Field::literal("Record Identity", code),
            Field::flag("Note Type", NOTE_TYPES),
            Field::var_text("Note", 77),
        ],
    )
}

fn origin() -> Layout {
    Layout::new(
        "Origin Location",
        [
            Field::literal("Record Identity", "LO"),
            Field::text("Location", 7),
            Field::text("Location Suffix", 1),
            Field::half_minute_time("Scheduled Departure"),
            Field::time("Public Departure"),
            Field::text("Platform", 3),
            Field::text("Line", 3),
            Field::text("Engineering Allowance", 2),
            Field::text("Pathing Allowance", 2),
            Field::activities("Activity"),
            Field::text("Performance Allowance", 2),
            Field::filler("Spare", 37),
        ],
    )
}

fn intermediate() -> Layout {
    Layout::new(
        "Intermediate Location",
        [
            Field::literal("Record Identity", "LI"),
            Field::text("Location", 7),
            Field::text("Location Suffix", 1),
            Field::half_minute_time("Scheduled Arrival").optional(),
            Field::half_minute_time("Scheduled Departure").optional(),
            Field::half_minute_time("Scheduled Pass").optional(),
            Field::time("Public Arrival"),
            Field::time("Public Departure"),
            Field::text("Platform", 3),
            Field::text("Line", 3),
            Field::text("Path", 3),
            Field::activities("Activity"),
            Field::text("Engineering Allowance", 2),
            Field::text("Pathing Allowance", 2),
            Field::text("Performance Allowance", 2),
            Field::filler("Spare", 20),
        ],
    )
}

fn changes_en_route() -> Layout {
    Layout::new(
        "Changes en Route",
        [
            Field::literal("Record Identity", "CR"),
            Field::text("Location", 7),
            Field::text("Location Suffix", 1),
            Field::text("Train Category", 2),
            Field::text("Train Identity", 4),
            Field::text("Headcode", 4),
            Field::filler("Course Indicator", 1),
            Field::text("Train Service Code", 8),
            Field::flag("Portion ID", PORTION_IDS),
            Field::text("Power Type", 3),
            Field::text("Timing Load", 4),
            Field::integer("Speed", 3).optional(),
            Field::text("Operating Characteristics", 6),
            Field::flag("Train Class", TRAIN_CLASSES),
            Field::flag("Sleepers", SLEEPERS),
            Field::flag("Reservations", RESERVATIONS),
            Field::filler("Connection Indicator", 1),
            Field::text("Catering Code", 4),
            Field::text("Service Branding", 4),
            Field::filler("Traction Class", 4),
            Field::text("UIC Code", 5),
            Field::text("RSID", 8),
            Field::filler("Spare", 5),
        ],
    )
}

fn terminating() -> Layout {
    Layout::new(
        "Terminating Location",
        [
            Field::literal("Record Identity", "LT"),
            Field::text("Location", 7),
            Field::text("Location Suffix", 1),
            Field::half_minute_time("Scheduled Arrival"),
            Field::time("Public Arrival"),
            Field::text("Platform", 3),
            Field::text("Path", 3),
            Field::activities("Activity"),
            Field::filler("Spare", 43),
        ],
    )
}

fn association() -> Layout {
    Layout::new(
        "Associations",
        [
            Field::literal("Record Identity", "AA"),
            Field::flag("Transaction Type", TRANSACTION_TYPES),
            Field::text("Main Train-UID", 6),
            Field::text("Associated Train-UID", 6),
            Field::date("Association-start-date", DateFormat::YearMonthDay),
            Field::date("Association-end-date", DateFormat::YearMonthDay),
            Field::days("Association-days"),
            Field::text("Association-category", 2),
            Field::flag("Association-date-ind", " SNP"),
            Field::text("Association-location", 7),
            Field::text("Base-location-suffix", 1),
            Field::text("Assoc-location-suffix", 1),
            Field::filler("Diagram Type", 1),
            Field::flag("Association Type", " PO"),
            Field::filler("Spare", 31),
            Field::flag("STP Indicator", STP_INDICATORS),
        ],
    )
}

/// TIPLOC insert and amend share everything up to the description.
fn tiploc(code: &'static str, name: &'static str, tail: &[Field]) -> Layout {
    let fields = [
        Field::literal("Record Identity", code),
        Field::text("TIPLOC Code", 7),
        Field::text("Capitals Identification", 2),
        Field::text("Nalco", 6),
        Field::text("NLC check character", 1),
        Field::text("TPS Description", 26),
        Field::text("Stanox", 5),
        Field::filler("PO MCP Code", 4),
        Field::text("CRS Code", 3),
        Field::text("16 character description", 16),
    ];
    Layout::new(name, fields.into_iter().chain(tail.iter().copied()))
}

fn layout(record: CifRecord) -> Layout {
    match record {
        CifRecord::Hd => header(),
        CifRecord::Bs => basic_schedule(DateFormat::YearMonthDay),
        CifRecord::Bx => extra_details("YN"),
        CifRecord::Tn => note("TN", "Train Specific Note"),
        CifRecord::Lo => origin(),
        CifRecord::Li => intermediate(),
        CifRecord::Cr => changes_en_route(),
        CifRecord::Lt => terminating(),
        CifRecord::Ln => note("LN", "Location Specific Note"),
        CifRecord::Aa => association(),
        CifRecord::Ti => tiploc("TI", "TIPLOC Insert", &[Field::filler("Spare", 8)]),
        CifRecord::Ta => tiploc(
            "TA",
            "TIPLOC Amend",
            &[Field::text("New TIPLOC", 7), Field::filler("Spare", 1)],
        ),
        CifRecord::Td => Layout::new(
            "TIPLOC Delete",
            [
                Field::literal("Record Identity", "TD"),
                Field::text("TIPLOC Code", 7),
                Field::filler("Spare", 71),
            ],
        ),
        CifRecord::Zz => Layout::new(
            "Trailer Record",
            [
                Field::literal("Record Identity", "ZZ"),
                Field::filler("Spare", 78),
            ],
        ),
    }
}

/// Layouts of a full CIF timetable extract.
pub fn timetable_registry() -> Registry<CifRecord> {
    Registry::from_fn(layout)
}

/// Layouts of a manual timetable supplement.
///
/// The same as [`timetable_registry`] except for a header with no usable
/// fields, schedule validity dates counted from 1956 and a blank-tolerant
/// applicable-timetable flag.
pub fn supplement_registry() -> Registry<CifRecord> {
    timetable_registry()
        .with(
            CifRecord::Hd,
            Layout::new(
                "Header Record",
                [
                    Field::literal("Record Identity", "HD"),
                    Field::filler("Spare", 78),
                ],
            ),
        )
        .with(
            CifRecord::Bs,
            basic_schedule(DateFormat::YearMonthDaySince1956),
        )
        .with(CifRecord::Bx, extra_details(" YN"))
}

/// Positions of the schedule header values a reader keeps across a
/// transaction.
pub(crate) mod bs {
    pub const TRAIN_UID: usize = 1;
    pub const RUNS_FROM: usize = 2;
    pub const STP_INDICATOR: usize = 21;
}

/// Positions of the working timetable times in stop records.
pub(crate) mod stop {
    pub const LO_DEPARTURE: usize = 2;
    pub const LI_ARRIVAL: usize = 2;
    pub const LI_DEPARTURE: usize = 3;
    pub const LI_PASS: usize = 4;
    pub const LT_ARRIVAL: usize = 2;
}
