use axum::http::HeaderValue;

use cry_relay::infrastructure::observability::{REQUEST_ID_HEADER, RequestId};

#[test]
fn given_request_id_header_constant_when_accessed_then_returns_correct_value() {
    assert_eq!(REQUEST_ID_HEADER, "x-request-id");
}

#[test]
fn given_incoming_header_when_resolving_then_reuses_it() {
    let header = HeaderValue::from_static("client-abc");

    let request_id = RequestId::from_header_or_new(Some(&header));

    assert_eq!(request_id.as_str(), "client-abc");
}

#[test]
fn given_blank_header_when_resolving_then_generates_new_id() {
    let header = HeaderValue::from_static("   ");

    let request_id = RequestId::from_header_or_new(Some(&header));

    assert!(!request_id.as_str().trim().is_empty());
    assert_ne!(request_id.as_str(), "   ");
}

#[test]
fn given_no_header_when_resolving_twice_then_ids_differ() {
    let first = RequestId::from_header_or_new(None);
    let second = RequestId::from_header_or_new(None);

    assert_ne!(first, second);
}
