mod common;
use common::*;

use recordbook_core::{RecordForm, ValidationError};
use recordbook_ingest::{IngestError, Outcome, RecordService, SubmitError};
use recordbook_store::{MemoryStore, RecordStore};

fn form() -> RecordForm {
    RecordForm {
        first_name: " John ".to_string(),
        last_name: "Doe".to_string(),
        email: "j@d.com".to_string(),
        gender: "male".to_string(),
        address: "1 Rd".to_string(),
        mobile: "12345".to_string(),
    }
}

#[tokio::test]
async fn test_submit_stores_trimmed_record() {
    let service = RecordService::new(MemoryStore::new());

    let stored = service.submit(&form()).await.unwrap().done().unwrap();
    assert_eq!(stored.record.first_name, "John");
    assert_eq!(stored.name(), "John Doe");

    let listed = service.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, stored.id);
    assert!(!service.is_busy());
}

#[tokio::test]
async fn test_invalid_form_is_not_sent() {
    let service = RecordService::new(FlakyStore::default());
    let bad = RecordForm {
        email: "nope".to_string(),
        ..form()
    };

    let err = service.submit(&bad).await.unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Validation(ValidationError::InvalidInput { .. })
    ));
    assert_eq!(err.to_string(), "Invalid input in one or more fields");
    assert_eq!(service.store().attempts(), 0);
    assert!(!service.is_busy());
}

#[tokio::test]
async fn test_store_failure_is_reported() {
    let service = RecordService::new(FlakyStore::rejecting("John"));

    let err = service.submit(&form()).await.unwrap_err();
    assert!(matches!(err, SubmitError::Store(_)));
    assert!(!service.is_busy());
}

#[tokio::test]
async fn test_second_submit_while_in_flight_is_ignored() {
    let service = RecordService::new(GatedStore::default());
    let first_form = form();

    let (first, second) = tokio::join!(service.submit(&first_form), async {
        let second = service.submit(&form()).await;
        service.store().gate.notify_one();
        second
    });

    assert!(matches!(first, Ok(Outcome::Done(_))));
    assert!(matches!(second, Ok(Outcome::Busy)));
    assert_eq!(service.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_import_while_submitting_is_ignored() {
    let service = RecordService::new(GatedStore::default());
    let bytes = workbook_bytes(&[person("Ann")]);
    let first_form = form();

    let (first, second) = tokio::join!(service.submit(&first_form), async {
        let second = service.import(&bytes).await;
        service.store().gate.notify_one();
        second
    });

    assert!(first.unwrap().done().is_some());
    assert!(second.unwrap().is_busy());
    assert_eq!(service.store().inner.len().await, 1);
}

#[tokio::test]
async fn test_import_reports_rows() {
    let service = RecordService::new(FlakyStore::rejecting("Bob"));
    let bytes = workbook_bytes(&[person("Ann"), person("Bob")]);

    let report = service.import(&bytes).await.unwrap().done().unwrap();
    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failures().map(|(row, _)| row).collect::<Vec<_>>(), vec![3]);
    assert_eq!(service.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_import_releases_guard() {
    let service = RecordService::new(MemoryStore::new());

    let result = service.import(b"garbage").await;
    assert!(matches!(result, Err(IngestError::Decode(_))));
    assert!(!service.is_busy());

    assert!(service.submit(&form()).await.unwrap().done().is_some());
    assert_eq!(service.store().list_all().await.unwrap().len(), 1);
}
