use crate::error::IngestResult;
use futures::stream::{self, StreamExt};
use recordbook_core::{normalize, StoredRecord};
use recordbook_sheet::{decode_rows, SheetRow};
use recordbook_store::{RecordStore, StoreError};
use tracing::{debug, info, warn};

/// Options for bulk imports.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Maximum number of store submissions in flight at once.
    pub concurrency: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { concurrency: 8 }
    }
}

impl IngestOptions {
    /// Set the submission concurrency. Values below 1 are treated as 1.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}

/// What happened to one spreadsheet row.
#[derive(Debug)]
pub enum RowStatus {
    Stored(StoredRecord),
    Failed(StoreError),
}

/// Outcome of one spreadsheet row, tagged with its 1-based sheet row number.
#[derive(Debug)]
pub struct RowOutcome {
    pub row: u32,
    pub status: RowStatus,
}

impl RowOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self.status, RowStatus::Stored(_))
    }
}

/// Per-row results of a bulk import, in the order the rows appear in the file.
#[derive(Debug, Default)]
pub struct IngestReport {
    rows: Vec<RowOutcome>,
}

impl IngestReport {
    pub fn rows(&self) -> &[RowOutcome] {
        &self.rows
    }

    /// Number of rows in the file that were submitted.
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn succeeded(&self) -> usize {
        self.rows.iter().filter(|outcome| outcome.is_stored()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Records that made it into the store, ready for display.
    pub fn stored(&self) -> impl Iterator<Item = &StoredRecord> {
        self.rows.iter().filter_map(|outcome| match &outcome.status {
            RowStatus::Stored(record) => Some(record),
            RowStatus::Failed(_) => None,
        })
    }

    /// Sheet row numbers that failed, with the store's reason.
    pub fn failures(&self) -> impl Iterator<Item = (u32, &StoreError)> {
        self.rows.iter().filter_map(|outcome| match &outcome.status {
            RowStatus::Failed(err) => Some((outcome.row, err)),
            RowStatus::Stored(_) => None,
        })
    }

    pub fn into_stored(self) -> Vec<StoredRecord> {
        self.rows
            .into_iter()
            .filter_map(|outcome| match outcome.status {
                RowStatus::Stored(record) => Some(record),
                RowStatus::Failed(_) => None,
            })
            .collect()
    }
}

/// Decode a spreadsheet, normalize its rows and store each one.
///
/// Rows are submitted independently: a failed insert is recorded in the
/// report and never stops the other rows. Nothing is retried.
///
/// # Errors
///
/// Returns `IngestError::Decode` if the bytes are not a readable spreadsheet;
/// in that case no row is submitted.
pub async fn ingest<S>(store: &S, bytes: &[u8], options: &IngestOptions) -> IngestResult<IngestReport>
where
    S: RecordStore + ?Sized,
{
    let rows = decode_rows(bytes)?;
    Ok(ingest_rows(store, rows, options).await)
}

/// Normalize and store already decoded rows.
pub async fn ingest_rows<S>(store: &S, rows: Vec<SheetRow>, options: &IngestOptions) -> IngestReport
where
    S: RecordStore + ?Sized,
{
    let concurrency = options.concurrency.max(1);
    debug!(rows = rows.len(), concurrency, "submitting rows");

    // `buffered` yields in input order whatever order the inserts finish in
    let rows: Vec<RowOutcome> = stream::iter(rows)
        .map(|row| submit_row(store, row))
        .buffered(concurrency)
        .collect()
        .await;

    let report = IngestReport { rows };
    info!(
        total = report.total(),
        succeeded = report.succeeded(),
        failed = report.failed(),
        "import finished"
    );
    report
}

async fn submit_row<S>(store: &S, row: SheetRow) -> RowOutcome
where
    S: RecordStore + ?Sized,
{
    let record = normalize(&row.values);
    let status = match store.insert(&record).await {
        Ok(id) => {
            debug!(row = row.number, %id, "row stored");
            RowStatus::Stored(StoredRecord::new(id, record))
        }
        Err(err) => {
            warn!(row = row.number, error = %err, "row not stored");
            RowStatus::Failed(err)
        }
    };
    RowOutcome {
        row: row.number,
        status,
    }
}
