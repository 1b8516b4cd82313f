//! Error types for importing and submitting records.

use recordbook_core::ValidationError;
use recordbook_sheet::DecodeError;
use recordbook_store::StoreError;
use thiserror::Error;

/// Result type for bulk imports.
pub type IngestResult<T> = Result<T, IngestError>;

/// A bulk import that could not start. Per-row store failures are not
/// errors; they are reported in the [`IngestReport`](crate::IngestReport).
#[derive(Debug, Error)]
pub enum IngestError {
    /// The uploaded file is not a readable spreadsheet. Nothing was stored.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Why a single record was not stored.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Record was not saved: {0}")]
    Store(#[from] StoreError),
}
