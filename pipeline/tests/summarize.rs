//! End-to-end pipeline tests against a local mock inference service.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use condense_pipeline::summarize_document_with_client;
use condense_providers::claude::ClaudeClient;
use condense_providers::fallback::FALLBACK_PREFIX;
use condense_types::{Document, InvocationOutcome, SummarizerConfig};

/// Fast settings for tests (millisecond backoff).
fn fast_settings() -> SummarizerConfig {
    SummarizerConfig {
        base_delay: Duration::from_millis(1),
        ..SummarizerConfig::default()
    }
}

fn client_for(server: &MockServer, api_key: Option<&str>) -> ClaudeClient {
    ClaudeClient::new(api_key.map(str::to_string), &fast_settings())
        .with_base_url(format!("{}/v1/messages", server.uri()))
}

fn success_body(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "content": [{ "type": "text", "text": text }]
    }))
}

#[tokio::test]
async fn document_is_summarized_on_first_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(success_body("the summary"))
        .expect(1)
        .mount(&server)
        .await;

    let document = Document::new("A short report about quarterly revenue.").expect("non-empty");
    let summaries = summarize_document_with_client(
        &document,
        &client_for(&server, Some("test-key")),
        &fast_settings(),
        &CancellationToken::new(),
    )
    .await
    .expect("pipeline runs");

    assert_eq!(summaries.len(), 1);
    assert_eq!(
        summaries[0].outcome,
        Some(InvocationOutcome::Success {
            attempts: 1,
            response: "the summary".to_string(),
        })
    );
}

#[tokio::test]
async fn transient_throttling_is_retried_until_success() {
    let server = MockServer::start().await;
    let attempt = AtomicU32::new(0);

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(move |_: &Request| {
            let n = attempt.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                ResponseTemplate::new(429).set_body_string("throttled")
            } else {
                success_body("recovered summary")
            }
        })
        .expect(3)
        .mount(&server)
        .await;

    let document = Document::new("Content worth retrying for.").expect("non-empty");
    let summaries = summarize_document_with_client(
        &document,
        &client_for(&server, Some("test-key")),
        &fast_settings(),
        &CancellationToken::new(),
    )
    .await
    .expect("pipeline runs");

    assert_eq!(
        summaries[0].outcome,
        Some(InvocationOutcome::Success {
            attempts: 3,
            response: "recovered summary".to_string(),
        })
    );
}

#[tokio::test]
async fn missing_credentials_yield_tagged_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(success_body("never reached"))
        .expect(0)
        .mount(&server)
        .await;

    let document = Document::new("Content that cannot reach the service.").expect("non-empty");
    let summaries = summarize_document_with_client(
        &document,
        &client_for(&server, None),
        &fast_settings(),
        &CancellationToken::new(),
    )
    .await
    .expect("pipeline still yields text");

    match &summaries[0].outcome {
        Some(InvocationOutcome::Success { attempts, response }) => {
            assert_eq!(*attempts, 1);
            assert!(response.starts_with(FALLBACK_PREFIX));
        }
        other => panic!("expected fallback Success, got {other:?}"),
    }
}

#[tokio::test]
async fn persistent_outage_reports_structured_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .expect(5)
        .mount(&server)
        .await;

    let document = Document::new("Content the service never answers for.").expect("non-empty");
    let summaries = summarize_document_with_client(
        &document,
        &client_for(&server, Some("test-key")),
        &fast_settings(),
        &CancellationToken::new(),
    )
    .await
    .expect("pipeline still yields an outcome");

    match &summaries[0].outcome {
        Some(InvocationOutcome::Failure {
            attempts,
            diagnostic,
        }) => {
            assert_eq!(*attempts, 5);
            assert!(diagnostic.contains("max retries exceeded"));
        }
        other => panic!("expected structured Failure, got {other:?}"),
    }
}

#[tokio::test]
async fn each_chunk_gets_its_own_invocation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(success_body("chunk summary"))
        .expect(3)
        .mount(&server)
        .await;

    // 1200 chars at 100 tokens * ratio 4 = three 400-char chunks.
    let document = Document::new("m".repeat(1200)).expect("non-empty");
    let settings = SummarizerConfig {
        max_chunk_tokens: 100,
        ..fast_settings()
    };
    let client = ClaudeClient::new(Some("test-key".to_string()), &settings)
        .with_base_url(format!("{}/v1/messages", server.uri()));

    let summaries =
        summarize_document_with_client(&document, &client, &settings, &CancellationToken::new())
            .await
            .expect("pipeline runs");

    assert_eq!(summaries.len(), 3);
    for (index, summary) in summaries.iter().enumerate() {
        assert_eq!(summary.index, index);
        assert!(summary.outcome.as_ref().expect("outcome").is_success());
    }
}
