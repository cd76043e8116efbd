mod common;

use std::time::Duration;

use axum::http::StatusCode;
use roastify::config::LlmConfig;
use roastify::roast::{RoastError, RoastGenerator, fallback_roast, render_prompt};
use roastify::types::{StatItem, Stats};

fn stats() -> Stats {
    Stats {
        top_artists: vec![StatItem {
            name: "Glass Animals".to_string(),
            image: None,
        }],
        recent_tracks: vec![StatItem {
            name: "Heat Waves".to_string(),
            image: Some("https://img.test/dreamland.jpg".to_string()),
        }],
        genres: vec!["indie pop".to_string(), "sad indie".to_string()],
        total_saved: 42,
    }
}

fn generator(api_url: &str) -> RoastGenerator {
    let config = LlmConfig {
        api_key: "llm-key".to_string(),
        api_url: api_url.to_string(),
        model: "test-model".to_string(),
    };
    RoastGenerator::new(reqwest::Client::new(), &config)
}

#[tokio::test]
async fn test_generate_returns_completion_verbatim() {
    let url = common::spawn_llm_ok().await;

    let roast = generator(&url).generate(&stats()).await;

    assert_eq!(roast, common::ROAST_TEXT);
}

#[tokio::test]
async fn test_server_error_falls_back() {
    let url = common::spawn_llm(StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()).await;

    let err = generator(&url).request_roast(&stats()).await.unwrap_err();
    assert!(matches!(err, RoastError::Status { status: 500, .. }));

    assert_eq!(generator(&url).generate(&stats()).await, fallback_roast());
}

#[tokio::test]
async fn test_malformed_body_falls_back() {
    let url = common::spawn_llm(StatusCode::OK, "{not json".to_string()).await;

    let err = generator(&url).request_roast(&stats()).await.unwrap_err();
    assert!(matches!(err, RoastError::Decode(_)));

    assert_eq!(generator(&url).generate(&stats()).await, fallback_roast());
}

#[tokio::test]
async fn test_empty_choices_falls_back() {
    let url = common::spawn_llm(StatusCode::OK, r#"{"choices": []}"#.to_string()).await;

    let err = generator(&url).request_roast(&stats()).await.unwrap_err();
    assert!(matches!(err, RoastError::EmptyCompletion));

    assert_eq!(generator(&url).generate(&stats()).await, fallback_roast());
}

#[tokio::test]
async fn test_timeout_falls_back() {
    let url = common::spawn_llm_slow(Duration::from_secs(2)).await;
    let roaster = generator(&url).with_timeout(Duration::from_millis(100));

    assert!(matches!(
        roaster.request_roast(&stats()).await,
        Err(RoastError::Request(_))
    ));
    assert_eq!(roaster.generate(&stats()).await, fallback_roast());
}

#[tokio::test]
async fn test_unreachable_endpoint_falls_back() {
    // Nothing listens on port 9 locally.
    let roast = generator("http://127.0.0.1:9/chat/completions")
        .generate(&stats())
        .await;

    assert_eq!(roast, fallback_roast());
}

#[test]
fn test_prompt_embeds_every_stat() {
    let prompt = render_prompt(&stats());

    assert!(prompt.contains("Glass Animals"));
    assert!(prompt.contains("Heat Waves"));
    assert!(prompt.contains(r#"["indie pop","sad indie"]"#));
    assert!(prompt.contains("Total Saved (the baggage): 42"));
    assert!(prompt.contains("Final Verdict"));
}
