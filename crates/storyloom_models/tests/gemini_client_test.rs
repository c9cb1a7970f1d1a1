mod test_utils;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::time::Duration;
use storyloom_core::DraftRequest;
use storyloom_interface::{Illustrator, StoryDrafter};
use storyloom_models::{GeminiClient, RetrySettings};
use test_utils::{CannedResponse, MockServer, TEST_PNG};

fn client_for(server: &MockServer) -> anyhow::Result<GeminiClient> {
    Ok(GeminiClient::new("test-key", Duration::from_secs(5))?
        .with_base_url(&server.base_url)
        .with_retry(RetrySettings::new(Some(2), Some(1))))
}

#[tokio::test]
async fn draft_returns_trimmed_story_text() -> anyhow::Result<()> {
    let server = MockServer::start(vec![CannedResponse::json(
        200,
        r#"{"candidates":[{"content":{"parts":[{"text":"  Once upon a time, Hanuman flew.\n"}]}}]}"#,
    )])
    .await?;
    let client = client_for(&server)?;
    let request = DraftRequest::builder().theme("Brave Hanuman").build()?;

    let story = client.draft(&request).await?;

    assert_eq!(story, "Once upon a time, Hanuman flew.");
    let requests = server.requests().await;
    assert!(requests[0].starts_with("POST /models/gemini-2.5-pro:generateContent"));
    assert!(requests[0].to_ascii_lowercase().contains("x-goog-api-key: test-key"));
    assert!(requests[0].contains("Theme: Brave Hanuman"));
    Ok(())
}

#[tokio::test]
async fn draft_retries_after_service_unavailable() -> anyhow::Result<()> {
    let server = MockServer::start(vec![
        CannedResponse::json(503, r#"{"error":"overloaded"}"#),
        CannedResponse::json(
            200,
            r#"{"candidates":[{"content":{"parts":[{"text":"A story."}]}}]}"#,
        ),
    ])
    .await?;
    let client = client_for(&server)?;
    let request = DraftRequest::builder().theme("Patience").build()?;

    let story = client.draft(&request).await?;

    assert_eq!(story, "A story.");
    assert_eq!(server.hits(), 2);
    Ok(())
}

#[tokio::test]
async fn unauthorized_is_not_retried() -> anyhow::Result<()> {
    let server = MockServer::start(vec![
        CannedResponse::json(401, r#"{"error":"bad key"}"#),
        CannedResponse::json(200, "{}"),
    ])
    .await?;
    let client = client_for(&server)?;
    let request = DraftRequest::builder().theme("Patience").build()?;

    assert!(client.draft(&request).await.is_err());
    assert_eq!(server.hits(), 1);
    Ok(())
}

#[tokio::test]
async fn empty_candidates_are_an_error() -> anyhow::Result<()> {
    let server = MockServer::start(vec![CannedResponse::json(200, r#"{"candidates":[]}"#)]).await?;
    let client = client_for(&server)?;
    let request = DraftRequest::builder().theme("Patience").build()?;

    assert!(client.draft(&request).await.is_err());
    Ok(())
}

#[tokio::test]
async fn illustrate_decodes_inline_png() -> anyhow::Result<()> {
    let body = format!(
        r#"{{"candidates":[{{"content":{{"parts":[{{"text":"Here is your image"}},{{"inlineData":{{"mimeType":"image/png","data":"{}"}}}}]}}}}]}}"#,
        STANDARD.encode(TEST_PNG)
    );
    let server = MockServer::start(vec![CannedResponse::json(200, body)]).await?;
    let client = client_for(&server)?;

    let bytes = client.illustrate("a golden deer in a forest").await?;

    assert_eq!(bytes, TEST_PNG);
    let requests = server.requests().await;
    assert!(requests[0].contains("gemini-2.0-flash-preview-image-generation:generateContent"));
    assert!(requests[0].contains(r#""responseModalities":["TEXT","IMAGE"]"#));
    Ok(())
}

#[tokio::test]
async fn illustrate_rejects_non_image_payload() -> anyhow::Result<()> {
    let body = format!(
        r#"{{"candidates":[{{"content":{{"parts":[{{"inlineData":{{"mimeType":"image/png","data":"{}"}}}}]}}}}]}}"#,
        STANDARD.encode(b"definitely not a png")
    );
    let server = MockServer::start(vec![CannedResponse::json(200, body)]).await?;
    let client = client_for(&server)?;

    assert!(client.illustrate("anything").await.is_err());
    Ok(())
}

#[tokio::test]
async fn illustrate_without_image_part_is_an_error() -> anyhow::Result<()> {
    let server = MockServer::start(vec![CannedResponse::json(
        200,
        r#"{"candidates":[{"content":{"parts":[{"text":"I cannot draw that"}]}}]}"#,
    )])
    .await?;
    let client = client_for(&server)?;

    assert!(client.illustrate("anything").await.is_err());
    Ok(())
}

#[tokio::test]
async fn describe_scene_uses_first_text_part() -> anyhow::Result<()> {
    let server = MockServer::start(vec![CannedResponse::json(
        200,
        r#"{"candidates":[{"content":{"parts":[{"text":" A monkey god soaring over a blue sea. "},{"text":"ignored"}]}}]}"#,
    )])
    .await?;
    let client = client_for(&server)?;

    let description = client.describe_scene("Hanuman leapt across the ocean").await?;

    assert_eq!(description, "A monkey god soaring over a blue sea.");
    Ok(())
}
