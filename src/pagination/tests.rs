//! Tests for pagination module

use super::*;
use crate::error::Error;
use crate::model::Entity;
use crate::types::StringMap;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::{Arc, Mutex};
use test_case::test_case;

/// Fetcher returning one fixed body and recording the params it saw
fn recording(body: &'static str) -> (Arc<dyn Fetcher>, Arc<Mutex<Vec<StringMap>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let fetcher = move |_: &str, params: &StringMap| -> crate::Result<RawResponse> {
        log.lock().unwrap().push(params.clone());
        Ok(RawResponse::ok(body))
    };
    (Arc::new(fetcher), seen)
}

fn meta(value: serde_json::Value) -> PageMeta {
    PageMeta::from_value(value)
}

// ============================================================================
// Direction Tests
// ============================================================================

#[test_case("next", Direction::Next ; "next")]
#[test_case("forward", Direction::Next ; "forward")]
#[test_case("previous", Direction::Previous ; "previous")]
#[test_case("prev", Direction::Previous ; "prev")]
#[test_case("backward", Direction::Previous ; "backward")]
fn test_direction_from_str(input: &str, expected: Direction) {
    assert_eq!(input.parse::<Direction>().unwrap(), expected);
}

#[test]
fn test_direction_from_str_unknown() {
    let err = "sideways".parse::<Direction>().unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn test_direction_opposite_and_display() {
    assert_eq!(Direction::Next.opposite(), Direction::Previous);
    assert_eq!(Direction::Previous.opposite(), Direction::Next);
    assert_eq!(Direction::Next.to_string(), "next");
    assert_eq!(Direction::Previous.to_string(), "previous");
}

// ============================================================================
// PageMeta Tests
// ============================================================================

#[test]
fn test_page_meta_tokens() {
    let meta = meta(json!({"next_token": "n1", "previous_token": "p1", "result_count": 5}));

    assert_eq!(meta.token(Direction::Next), Some("n1"));
    assert_eq!(meta.token(Direction::Previous), Some("p1"));
    assert!(meta.has_next());
    assert!(meta.has_previous());
    assert_eq!(meta.result_count, Some(5));
}

#[test]
fn test_page_meta_empty() {
    let meta = meta(json!({}));
    assert!(!meta.has_next());
    assert!(!meta.has_previous());
    assert_eq!(meta, PageMeta::default());
}

#[test]
fn test_page_meta_keeps_unknown_fields() {
    let meta = meta(json!({"result_count": 1, "sent": "2022-01-01T00:00:00Z"}));
    assert_eq!(meta.raw("sent"), Some(&json!("2022-01-01T00:00:00Z")));
}

#[test]
fn test_page_meta_wrong_typed_token_is_absent() {
    let meta = meta(json!({"next_token": 42}));
    assert!(!meta.has_next());
    assert_eq!(meta.raw("next_token"), Some(&json!(42)));
}

// ============================================================================
// Config and State Tests
// ============================================================================

#[test]
fn test_pagination_config_defaults() {
    let config = PaginationConfig::default();
    assert_eq!(config.param(Direction::Next), "next_token");
    assert_eq!(config.param(Direction::Previous), "previous");

    let custom = PaginationConfig::new("pagination_token", "pagination_token");
    assert_eq!(custom.param(Direction::Previous), "pagination_token");
}

#[test]
fn test_pagination_config_deserialize_partial() {
    let config: PaginationConfig = serde_json::from_value(json!({"next_param": "cursor"})).unwrap();
    assert_eq!(config.next_param, "cursor");
    assert_eq!(config.previous_param, "previous");
}

#[test]
fn test_cursor_state_can_fetch() {
    assert!(CursorState::Ready.can_fetch());
    assert!(CursorState::Failed.can_fetch());
    assert!(CursorState::Exhausted(Direction::Next).can_fetch());
    assert!(!CursorState::Fetching.can_fetch());
    assert_eq!(CursorState::default(), CursorState::Ready);
}

// ============================================================================
// RawResponse Tests
// ============================================================================

#[test]
fn test_raw_response() {
    let response = RawResponse::ok(r#"{"data": []}"#);
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().unwrap(), r#"{"data": []}"#);

    let binary = RawResponse::new(200, vec![0xff, 0xfe]);
    assert!(binary.text().unwrap_err().is_malformed_response());
    assert_eq!(binary.into_bytes(), vec![0xff, 0xfe]);
}

// ============================================================================
// Cursor Tests
// ============================================================================

#[test]
fn test_cursor_without_token_does_not_fetch() {
    let (fetcher, seen) = recording(r#"{"data": []}"#);
    let mut cursor = PaginationCursor::new(Some(RequestContext::new(fetcher, "https://x")));

    let page = cursor.advance(Direction::Next, Some(&meta(json!({"previous_token": "p"})))).unwrap();
    assert!(page.is_none());
    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(cursor.state(), CursorState::Exhausted(Direction::Next));
    assert!(cursor.last_request().is_none());

    assert!(cursor.advance(Direction::Previous, None).unwrap().is_none());
    assert_eq!(cursor.state(), CursorState::Exhausted(Direction::Previous));
}

#[test]
fn test_cursor_request_params_merge_base_query() {
    let (fetcher, seen) = recording(r#"{"data": [{"id": "7"}]}"#);
    let context = RequestContext::new(fetcher, "https://x/2/tweets/search/recent")
        .with_param("query", "from:rustlang")
        .with_param("max_results", "10");
    let mut cursor = PaginationCursor::new(Some(context));

    let page = cursor
        .advance(Direction::Next, Some(&meta(json!({"next_token": "abc"}))))
        .unwrap()
        .unwrap();
    assert_eq!(page.tweets.len(), 1);

    let expected: StringMap = [
        ("query", "from:rustlang"),
        ("max_results", "10"),
        ("next_token", "abc"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(seen.lock().unwrap()[0], expected);
    assert_eq!(cursor.request_params(), expected);
    assert_eq!(cursor.state(), CursorState::Ready);

    let last = cursor.last_request().unwrap();
    assert_eq!(last.direction, Direction::Next);
    assert_eq!(last.url, "https://x/2/tweets/search/recent");
}

#[test]
fn test_cursor_switching_direction_swaps_token_param() {
    let (fetcher, seen) = recording(r#"{"data": []}"#);
    let mut cursor = PaginationCursor::new(Some(RequestContext::new(fetcher, "https://x")));
    let both = meta(json!({"next_token": "n", "previous_token": "p"}));

    cursor.advance(Direction::Next, Some(&both)).unwrap();
    cursor.advance(Direction::Previous, Some(&both)).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].get("next_token").map(String::as_str), Some("n"));
    assert!(!seen[0].contains_key("previous"));
    assert_eq!(seen[1].get("previous").map(String::as_str), Some("p"));
    assert!(!seen[1].contains_key("next_token"));
    assert_eq!(cursor.overrides().len(), 1);
}

#[test]
fn test_cursor_base_query_token_stays_with_its_direction() {
    let (fetcher, seen) = recording(r#"{"data": []}"#);
    let context = RequestContext::new(fetcher, "https://x")
        .with_param("query", "rust")
        .with_param("next_token", "t0");
    let mut cursor = PaginationCursor::new(Some(context));

    cursor
        .advance(Direction::Previous, Some(&meta(json!({"previous_token": "p1"}))))
        .unwrap();
    cursor
        .advance(Direction::Next, Some(&meta(json!({"next_token": "t2"}))))
        .unwrap();

    let seen = seen.lock().unwrap();
    assert!(!seen[0].contains_key("next_token"));
    assert_eq!(seen[0].get("previous").map(String::as_str), Some("p1"));
    assert_eq!(seen[0].get("query").map(String::as_str), Some("rust"));
    assert_eq!(seen[1].get("next_token").map(String::as_str), Some("t2"));
    assert!(!seen[1].contains_key("previous"));
    assert_eq!(cursor.request_params(), seen[1]);
}

#[test]
fn test_pagination_config_is_token_param() {
    let config = PaginationConfig::default();
    assert!(config.is_token_param("next_token"));
    assert!(config.is_token_param("previous"));
    assert!(!config.is_token_param("query"));
}

#[test]
fn test_cursor_shared_token_param() {
    let (fetcher, seen) = recording(r#"{"data": []}"#);
    let context = RequestContext::new(fetcher, "https://x")
        .with_pagination(PaginationConfig::new("pagination_token", "pagination_token"));
    let mut cursor = PaginationCursor::new(Some(context));

    cursor
        .advance(Direction::Previous, Some(&meta(json!({"previous_token": "p"}))))
        .unwrap();

    assert_eq!(
        seen.lock().unwrap()[0].get("pagination_token").map(String::as_str),
        Some("p")
    );
}

#[test]
fn test_cursor_without_context() {
    let mut cursor = PaginationCursor::new(None);
    let err = cursor
        .advance(Direction::Next, Some(&meta(json!({"next_token": "n"}))))
        .unwrap_err();

    assert!(matches!(err, Error::MissingFetcher { ref direction } if direction == "next"));
    assert_eq!(cursor.state(), CursorState::Failed);
    assert!(cursor.request_params().is_empty());
}

#[test]
fn test_cursor_fetch_error_is_surfaced() {
    let fetcher = |_: &str, _: &StringMap| -> crate::Result<RawResponse> {
        Err(Error::Timeout { timeout_ms: 500 })
    };
    let mut cursor = PaginationCursor::new(Some(RequestContext::new(Arc::new(fetcher), "https://x")));

    let err = cursor
        .advance(Direction::Next, Some(&meta(json!({"next_token": "n"}))))
        .unwrap_err();
    assert!(matches!(err, Error::Timeout { timeout_ms: 500 }));
    assert_eq!(cursor.state(), CursorState::Failed);
    assert!(cursor.last_request().is_some());
}

#[test]
fn test_cursor_error_status() {
    let fetcher = |_: &str, _: &StringMap| -> crate::Result<RawResponse> {
        Ok(RawResponse::new(401, "Unauthorized"))
    };
    let mut cursor = PaginationCursor::new(Some(RequestContext::new(Arc::new(fetcher), "https://x")));

    let err = cursor
        .advance(Direction::Next, Some(&meta(json!({"next_token": "n"}))))
        .unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "Unauthorized");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}
