/*!
 * Tests for error types and conversions
 */

use nmt_worker::errors::{AppError, EngineError, RequestError, ValidationError, WorkerError};
use serde_json::json;

#[test]
fn test_validationError_withSeveralFields_shouldRenderJsonMap() {
    let mut error = ValidationError::new();
    error.add("tgt", "Must be one of: en, et.");
    error.add("src", "Not a valid string.");
    error.add("src", "Second message.");

    assert_eq!(
        error.to_json(),
        json!({"src": ["Not a valid string.", "Second message."], "tgt": ["Must be one of: en, et."]})
    );
    assert!(error.to_string().contains("src: Not a valid string."));
}

#[test]
fn test_requestError_invalidField_shouldMapTo400() {
    let error = RequestError::from(ValidationError::single("text", "Invalid value."));
    assert_eq!(error.http_status_code(), 400);
    assert_eq!(error.content(), json!({"text": ["Invalid value."]}));
}

#[test]
fn test_requestError_payloadTooLarge_shouldStateLengthAndLimit() {
    let error = RequestError::PayloadTooLarge { length: 10001, limit: 10000 };
    assert_eq!(error.http_status_code(), 413);
    assert_eq!(
        error.content(),
        json!("Request is too large (10001 characters). Maximum request size is 10000 characters.")
    );
}

#[test]
fn test_engineError_misalignedOutput_shouldDisplayCounts() {
    let error = EngineError::MisalignedOutput { expected: 3, actual: 2 };
    let display = format!("{}", error);
    assert!(display.contains("2 items for 3 inputs"));
}

#[test]
fn test_workerError_fromEngineError_shouldWrapCorrectly() {
    let error: WorkerError = EngineError::RequestFailed("timeout".to_string()).into();
    assert!(matches!(error, WorkerError::Engine(_)));
    assert!(error.to_string().contains("timeout"));
}

#[test]
fn test_appError_fromIoError_shouldBeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error = AppError::from(io_error);
    assert!(matches!(error, AppError::File(_)));
}

#[test]
fn test_appError_fromAnyhowWithContext_shouldKeepWholeChain() {
    let source = anyhow::anyhow!("mapping is empty").context("Configuration validation failed");
    let error = AppError::from(source);
    assert!(matches!(error, AppError::Unknown(_)));
    assert_eq!(error.to_string(), "Unknown error: Configuration validation failed: mapping is empty");
}

#[test]
fn test_appError_fromWorkerError_shouldWrapCorrectly() {
    let error = AppError::from(WorkerError::Factors("no mapping for 'xx'".to_string()));
    assert!(error.to_string().starts_with("Worker error: Factor resolution failed"));
}
