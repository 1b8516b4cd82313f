//! # recordbook-core
//!
//! Core types for recordbook.
//!
//! This crate provides:
//! - The canonical [`Record`] and its [`Field`]s
//! - Header normalization for spreadsheet rows
//! - Validation of manually entered records
//! - Error types

/// Error types and result aliases.
pub mod error;
/// Spreadsheet header normalization.
pub mod normalize;
/// Record model and display projection.
pub mod record;
/// Form validation.
pub mod validate;

/// Re-export core error types.
pub use error::{ValidationError, ValidationResult};
/// Re-export normalization entry points.
pub use normalize::{lookup_alias, normalize, normalize_all};
/// Re-export record types.
pub use record::{Field, RawRow, Record, StoredRecord};
/// Re-export the validator.
pub use validate::{validate, RecordForm};
