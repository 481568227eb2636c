//! Field decoders for fixed-width CIF columns.
//!
//! Every decoder turns a slice of characters into a typed [`Value`] or a
//! [`DecodeError`]. Decoders are pure: a field's width is fixed when it is
//! built, and nothing about a decode depends on earlier input.

mod date;
mod days;
mod error;
mod kind;
mod time;
mod value;

pub use date::DateFormat;
pub use days::DaysRun;
pub use error::{DecodeError, DecodeFailure};
pub use kind::{Field, FieldKind};
pub use value::{Row, Value};
