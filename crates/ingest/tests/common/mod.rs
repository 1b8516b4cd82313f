#![allow(dead_code)]

use async_trait::async_trait;
use recordbook_core::{Record, StoredRecord};
use recordbook_store::{MemoryStore, RecordStore, StoreError, StoreResult};
use rust_xlsxwriter::Workbook;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Notify;

pub const HEADERS: [&str; 6] = ["First Name", "Last Name", "Email", "Gender", "Address", "Phone"];

/// Build an xlsx workbook with the standard headers and one row per entry.
pub fn workbook_bytes(rows: &[[&str; 6]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    for (idx, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            sheet.write_string(idx as u32 + 1, col as u16, *value).unwrap();
        }
    }
    workbook.save_to_buffer().unwrap()
}

pub fn person(first: &'static str) -> [&'static str; 6] {
    [first, "Doe", "x@y.com", "other", "1 Rd", "12345"]
}

/// Memory store that rejects records with the given first name and counts
/// every insert attempt.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub reject_first_name: Option<&'static str>,
    pub attempts: AtomicUsize,
}

impl FlakyStore {
    pub fn rejecting(first_name: &'static str) -> Self {
        Self {
            reject_first_name: Some(first_name),
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for FlakyStore {
    async fn insert(&self, record: &Record) -> StoreResult<String> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.reject_first_name == Some(record.first_name.as_str()) {
            return Err(StoreError::Status {
                status: 500,
                message: format!("rejected {}", record.first_name),
            });
        }
        self.inner.insert(record).await
    }

    async fn list_all(&self) -> StoreResult<Vec<StoredRecord>> {
        self.inner.list_all().await
    }
}

/// Store whose inserts sleep for as many milliseconds as the record's mobile
/// number says.
#[derive(Default)]
pub struct SlowStore {
    pub inner: MemoryStore,
}

#[async_trait]
impl RecordStore for SlowStore {
    async fn insert(&self, record: &Record) -> StoreResult<String> {
        let millis: u64 = record.mobile.parse().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(millis)).await;
        self.inner.insert(record).await
    }

    async fn list_all(&self) -> StoreResult<Vec<StoredRecord>> {
        self.inner.list_all().await
    }
}

/// Store whose inserts wait until `gate` is notified.
#[derive(Default)]
pub struct GatedStore {
    pub inner: MemoryStore,
    pub gate: Notify,
}

#[async_trait]
impl RecordStore for GatedStore {
    async fn insert(&self, record: &Record) -> StoreResult<String> {
        self.gate.notified().await;
        self.inner.insert(record).await
    }

    async fn list_all(&self) -> StoreResult<Vec<StoredRecord>> {
        self.inner.list_all().await
    }
}
