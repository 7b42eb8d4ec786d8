/*!
 * Response shape tests: string in, string out; list in, list out
 */

use serde_json::json;

use nmt_worker::engines::mock::{MockEngine, MockQualityEstimator};
use nmt_worker::response::Response;

use crate::common::{worker_with, worker_with_qe};

#[tokio::test]
async fn test_shape_withPlainInput_shouldReturnString() {
    let engine = MockEngine::identity();
    let response = worker_with(&engine)
        .process_request(&json!({"text": "One. Two. Three."}), None)
        .await
        .unwrap();

    assert!(response.content["result"].is_string());
}

#[tokio::test]
async fn test_shape_withListInput_shouldReturnListOfSameLength() {
    let engine = MockEngine::identity();
    let qe = MockQualityEstimator::length_ratio();
    let input = json!(["One. Two.", "Three", "Four!"]);

    let response = worker_with_qe(&engine, &qe)
        .process_request(&json!({"text": input}), None)
        .await
        .unwrap();

    assert_eq!(response.content["result"].as_array().map(Vec::len), Some(3));
    assert_eq!(response.content["qeScore"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_shape_withPlainInputAndQe_shouldReturnSingleScore() {
    let engine = MockEngine::identity();
    let qe = MockQualityEstimator::length_ratio();

    let response = worker_with_qe(&engine, &qe)
        .process_request(&json!({"text": "One. Two. Three."}), None)
        .await
        .unwrap();

    assert_eq!(response.content["qeScore"], json!(1.0));
}

#[test]
fn test_response_shouldSerializeAsTransportEnvelope() {
    let envelope = serde_json::to_value(Response::empty(true)).unwrap();
    assert_eq!(
        envelope,
        json!({"content": {"result": ""}, "mimetype": "application/json", "http_status_code": 200})
    );
}
