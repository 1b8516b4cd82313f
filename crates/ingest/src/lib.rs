//! # recordbook-ingest
//!
//! Moves records into a [`RecordStore`](recordbook_store::RecordStore).
//!
//! - [`ingest`] decodes a spreadsheet, normalizes its rows and stores each
//!   one independently, returning a per-row [`IngestReport`].
//! - [`RecordService`] adds form submission and an in-flight guard on top.

/// Error types and result aliases.
pub mod error;
mod pipeline;
mod service;

pub use error::{IngestError, IngestResult, SubmitError};
pub use pipeline::{ingest, ingest_rows, IngestOptions, IngestReport, RowOutcome, RowStatus};
pub use service::{Outcome, RecordService};
