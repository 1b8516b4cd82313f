use crate::error::{IngestResult, SubmitError};
use crate::pipeline::{ingest, IngestOptions, IngestReport};
use recordbook_core::{validate, RecordForm, StoredRecord};
use recordbook_store::{RecordStore, StoreResult};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Result of a guarded operation.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The operation ran.
    Done(T),
    /// Another submission or import was still in flight; nothing was done.
    Busy,
}

impl<T> Outcome<T> {
    pub fn is_busy(&self) -> bool {
        matches!(self, Outcome::Busy)
    }

    pub fn done(self) -> Option<T> {
        match self {
            Outcome::Done(value) => Some(value),
            Outcome::Busy => None,
        }
    }
}

/// Holds the in-flight flag for as long as it lives.
struct FlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> FlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Entry point for the record front end: form submission, spreadsheet
/// import and listing over one store.
///
/// Only one submission or import runs at a time; a call made while another
/// is in flight returns [`Outcome::Busy`] without touching the store.
pub struct RecordService<S> {
    store: S,
    options: IngestOptions,
    in_flight: AtomicBool,
}

impl<S: RecordStore> RecordService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            options: IngestOptions::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Set the options used by [`RecordService::import`].
    #[must_use]
    pub fn with_options(mut self, options: IngestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether a submission or import is currently running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate a form and store it.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Validation` if the form is rejected (nothing is
    /// sent to the store), or `SubmitError::Store` if the insert fails.
    pub async fn submit(&self, form: &RecordForm) -> Result<Outcome<StoredRecord>, SubmitError> {
        let Some(_guard) = FlightGuard::acquire(&self.in_flight) else {
            debug!("submission ignored, another one is in flight");
            return Ok(Outcome::Busy);
        };

        let record = validate(form)?;
        let id = self.store.insert(&record).await?;
        info!(%id, "record stored");
        Ok(Outcome::Done(StoredRecord::new(id, record)))
    }

    /// Import a spreadsheet. See [`ingest`].
    ///
    /// # Errors
    ///
    /// Returns `IngestError::Decode` if the bytes are not a readable
    /// spreadsheet.
    pub async fn import(&self, bytes: &[u8]) -> IngestResult<Outcome<IngestReport>> {
        let Some(_guard) = FlightGuard::acquire(&self.in_flight) else {
            debug!("import ignored, another operation is in flight");
            return Ok(Outcome::Busy);
        };

        ingest(&self.store, bytes, &self.options)
            .await
            .map(Outcome::Done)
    }

    /// Fetch every stored record from the store. Not guarded.
    pub async fn list(&self) -> StoreResult<Vec<StoredRecord>> {
        self.store.list_all().await
    }
}
