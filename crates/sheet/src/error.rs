use thiserror::Error;

/// Errors that can occur while decoding a spreadsheet
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Not a readable spreadsheet workbook: {0}")]
    Workbook(String),

    #[error("Cannot read worksheet '{sheet}': {message}")]
    Worksheet { sheet: String, message: String },

    #[error("Unsupported file type: {0} (expected .xlsx or .xls)")]
    UnsupportedFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
