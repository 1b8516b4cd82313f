//! Spreadsheet decoding for recordbook
//!
//! Reads the first sheet of an uploaded workbook (xlsx, xls, xlsb or ods,
//! detected from the bytes) and turns every data row into a [`RawRow`] keyed
//! by the header text of its column.
//!
//! # Examples
//!
//! ```no_run
//! use recordbook_sheet::decode;
//!
//! let bytes = std::fs::read("people.xlsx").unwrap();
//! for row in decode(&bytes).unwrap() {
//!     println!("{row:?}");
//! }
//! ```
//!
//! [`RawRow`]: recordbook_core::RawRow

mod cell;
mod decode;
mod error;

/// Re-export decoding entry points.
pub use decode::{
    decode, decode_file, decode_rows, is_supported_file, SheetRow, SUPPORTED_EXTENSIONS,
};
/// Re-export decode error types.
pub use error::{DecodeError, Result};
