//! Handler behaviour over gateway events with stubbed collaborators.

mod common;

use std::sync::Arc;

use alma_record::{CqlQuery, ExtractionError, FetchError};
use serde_json::{json, Value};
use server::envelope::CORS_ALLOW_ORIGIN_HEADER;
use server::handler::search_criteria;
use server::{GatewayResponse, ValidRequest};

use common::{
    handler, handler_with_extractor, today, FailingExtractor, StubFetcher, ALLOWED_ORIGIN,
    SRU_RESPONSE_0_HITS, SRU_RESPONSE_2_HITS,
};

fn valid_event() -> Value {
    json!({
        "queryStringParameters": {
            "scn": "1123456789",
            "creatorName": "Creator, Mock"
        }
    })
}

fn error_message(response: &GatewayResponse) -> String {
    let body: Value = serde_json::from_str(&response.body).unwrap();
    let object = body.as_object().expect("error body is an object");
    assert_eq!(object.len(), 1, "error body has exactly one key: {}", response.body);
    let message = object["error"].as_str().expect("error is a string");
    assert!(!message.is_empty());
    message.to_owned()
}

#[tokio::test]
async fn returns_title_of_first_record() {
    let fetcher = StubFetcher::ok(SRU_RESPONSE_2_HITS);
    let response = handler(fetcher, None)
        .handle_request(Some(&valid_event()), None)
        .await;

    assert_eq!(response.status_code, 200);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body, json!({ "title": "Example Title" }));
    assert_eq!(response.headers["Content-Type"], "application/json");
}

#[tokio::test]
async fn fetcher_receives_encoded_query() {
    let fetcher = StubFetcher::ok(SRU_RESPONSE_2_HITS);
    handler(fetcher.clone(), None)
        .handle_request(Some(&valid_event()), None)
        .await;

    let request = ValidRequest {
        scn: "1123456789".into(),
        creator_name: "Creator, Mock".into(),
    };
    let expected = CqlQuery::new(&search_criteria(&request), today());

    let seen = fetcher.seen();
    assert_eq!(seen, vec![expected.encoded().to_owned()]);
    assert!(seen[0].starts_with("alma.authority_id=1123456789%20AND%20alma.creator=%22Creator,%20Mock%22"));
    assert!(seen[0].contains("alma.main_pub_date=1980%20OR%20"));
    assert!(seen[0].ends_with("alma.main_pub_date=2020%29%20sortBy%20alma.main_pub_date%2Fsort.descending"));
    assert!(!seen[0].contains('/'), "slash must be escaped: {}", seen[0]);
}

#[tokio::test]
async fn validation_failures_are_400_with_specific_message() {
    let cases = [
        (None, "Missing event element 'queryStringParameters'."),
        (Some(json!({})), "Missing event element 'queryStringParameters'."),
        (
            Some(json!({ "queryStringParameters": null })),
            "Missing event element 'queryStringParameters'.",
        ),
        (
            Some(json!({ "queryStringParameters": {} })),
            "Mandatory parameter 'scn' is missing.",
        ),
        (
            Some(json!({ "queryStringParameters": { "creatorName": "Creator, Mock" } })),
            "Mandatory parameter 'scn' is missing.",
        ),
        (
            Some(json!({ "queryStringParameters": { "scn": "1123456789" } })),
            "Mandatory parameter 'creatorName' is missing.",
        ),
    ];

    for (event, expected) in cases {
        let fetcher = StubFetcher::ok(SRU_RESPONSE_2_HITS);
        let response = handler(fetcher.clone(), None)
            .handle_request(event.as_ref(), None)
            .await;

        assert_eq!(response.status_code, 400, "event {event:?}");
        assert_eq!(error_message(&response), expected);
        assert!(fetcher.seen().is_empty(), "no fetch after failed validation");
    }
}

#[tokio::test]
async fn transport_failure_is_500() {
    for err in [
        FetchError::Timeout,
        FetchError::Status(503),
        FetchError::Request("connection refused".into()),
    ] {
        let response = handler(StubFetcher::failing(err), None)
            .handle_request(Some(&valid_event()), None)
            .await;

        assert_eq!(response.status_code, 500);
        error_message(&response);
    }
}

#[tokio::test]
async fn zero_hits_is_500() {
    let response = handler(StubFetcher::ok(SRU_RESPONSE_0_HITS), None)
        .handle_request(Some(&valid_event()), None)
        .await;

    assert_eq!(response.status_code, 500);
    assert_eq!(error_message(&response), "No matching record found in Alma.");
}

#[tokio::test]
async fn extraction_failures_are_500() {
    for err in [
        ExtractionError::NotFound,
        ExtractionError::MalformedPayload("unexpected end of input".into()),
    ] {
        let response = handler_with_extractor(
            StubFetcher::ok(SRU_RESPONSE_2_HITS),
            Arc::new(FailingExtractor(err)),
        )
        .handle_request(Some(&valid_event()), None)
        .await;

        assert_eq!(response.status_code, 500);
        let message = error_message(&response);
        assert!(!message.contains("unexpected end of input"));
    }
}

#[tokio::test]
async fn garbage_payload_is_500() {
    let response = handler(StubFetcher::ok("this is not xml <<<"), None)
        .handle_request(Some(&valid_event()), None)
        .await;

    assert_eq!(response.status_code, 500);
    error_message(&response);
}

#[tokio::test]
async fn cors_header_follows_configuration() {
    let with_origin = handler(StubFetcher::ok(SRU_RESPONSE_2_HITS), Some(ALLOWED_ORIGIN));
    let success = with_origin.handle_request(Some(&valid_event()), None).await;
    let failure = with_origin.handle_request(None, None).await;
    assert_eq!(success.headers[CORS_ALLOW_ORIGIN_HEADER], ALLOWED_ORIGIN);
    assert_eq!(failure.headers[CORS_ALLOW_ORIGIN_HEADER], ALLOWED_ORIGIN);

    for origin in [None, Some("")] {
        let without_origin = handler(StubFetcher::ok(SRU_RESPONSE_2_HITS), origin);
        let success = without_origin.handle_request(Some(&valid_event()), None).await;
        let failure = without_origin.handle_request(None, None).await;
        assert!(!success.headers.contains_key(CORS_ALLOW_ORIGIN_HEADER));
        assert!(!failure.headers.contains_key(CORS_ALLOW_ORIGIN_HEADER));
    }
}

#[tokio::test]
async fn context_is_ignored() {
    let handler = handler(StubFetcher::ok(SRU_RESPONSE_2_HITS), None);
    let context = json!({ "requestId": "abc", "functionName": "alma" });

    let with_context = handler
        .handle_request(Some(&valid_event()), Some(&context))
        .await;
    let without_context = handler.handle_request(Some(&valid_event()), None).await;

    assert_eq!(with_context, without_context);
}
