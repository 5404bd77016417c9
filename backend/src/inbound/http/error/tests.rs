//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("expert account required"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("user 4 not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("mail already registered"), StatusCode::CONFLICT)]
#[case(Error::unavailable("product cannot be redeemed"), StatusCode::BAD_REQUEST)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

/// Render `error`, check the trace header, and return the decoded JSON body.
async fn render(error: &Error, expected_trace_id: Option<&str>) -> (StatusCode, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace id is ASCII").to_owned());
    assert_eq!(header.as_deref(), expected_trace_id);

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error body is JSON");
    (status, body)
}

#[actix_web::test]
async fn refused_purchase_keeps_its_reason() {
    let error = Error::unavailable("product cannot be redeemed")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"reason": "out_of_stock"}));

    let (status, body) = render(&error, Some(TRACE_ID)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "unavailable");
    assert_eq!(body["traceId"], TRACE_ID);
    assert_eq!(body["details"]["reason"], "out_of_stock");
}

#[actix_web::test]
async fn internal_errors_hide_message_and_details() {
    let error = Error::internal("diesel: relation users does not exist")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"sql": "SELECT 1"}));

    let (status, body) = render(&error, Some(TRACE_ID)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");
    assert_eq!(body["traceId"], TRACE_ID);
    assert!(body.get("details").is_none_or(Value::is_null));
}

#[actix_web::test]
async fn missing_trace_id_omits_header() {
    let error = Error::not_found("product 9 not found");

    let (status, body) = render(&error, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "product 9 not found");
}

#[rstest]
fn redaction_only_touches_internal_errors() {
    let refused = Error::unavailable("product cannot be redeemed")
        .with_details(json!({"reason": "insufficient_score"}));
    assert_eq!(redact_if_internal(&refused), refused);

    let redacted = redact_if_internal(&Error::internal("boom").with_trace_id(TRACE_ID));
    assert_eq!(redacted.message(), "Internal server error");
    assert_eq!(redacted.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn actix_errors_become_internal() {
    let err: Error = actix_web::error::ErrorBadGateway("upstream").into();
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), INTERNAL_MESSAGE);
    assert!(!err.message().contains("upstream"));
}
