use llm::{
    check_api_key, generate_structured, GeminiProvider, GenerationRequest, GenerativeModel,
    LlmError, ResponseSchema,
};
use mockito::{Matcher, Server};
use serde::Deserialize;
use serde_json::json;

fn reply_body(text: &str) -> String {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 7, "totalTokenCount": 19 }
    })
    .to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Triage {
    category: String,
    should_go_to_vet: bool,
}

fn triage_schema() -> ResponseSchema {
    ResponseSchema::object()
        .property("category", ResponseSchema::string())
        .property("shouldGoToVet", ResponseSchema::boolean())
        .require(&["category", "shouldGoToVet"])
}

#[tokio::test]
async fn test_generate_sends_key_and_schema() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-3-flash-preview:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .match_body(Matcher::PartialJson(json!({
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": { "type": "OBJECT", "required": ["category", "shouldGoToVet"] }
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(reply_body(r#"{"category":"HEALTH","shouldGoToVet":true}"#))
        .create_async()
        .await;

    let provider = GeminiProvider::new("test-key", "gemini-3-flash-preview")
        .unwrap()
        .with_base_url(server.url());

    let triage: Triage = generate_structured(
        &provider,
        GenerationRequest::new("My cat is straining in the litter box"),
        triage_schema(),
    )
    .await
    .unwrap();

    assert_eq!(triage.category, "HEALTH");
    assert!(triage.should_go_to_vet);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_is_classified() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1beta/models/gemini-3-pro-preview:generateContent")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_body(r#"{"error":{"status":"RESOURCE_EXHAUSTED","message":"quota exceeded"}}"#)
        .create_async()
        .await;

    let provider = GeminiProvider::new("test-key", "gemini-3-pro-preview")
        .unwrap()
        .with_base_url(server.url());

    let err = provider
        .generate(GenerationRequest::new("hello"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LlmError::Api {
            status: 429,
            kind: "quota_exceeded",
            ..
        }
    ));
}

#[tokio::test]
async fn test_malformed_output_fails_closed() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1beta/models/gemini-3-flash-preview:generateContent")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(reply_body(r#"{"category":"HEALTH"}"#))
        .create_async()
        .await;

    let provider = GeminiProvider::new("test-key", "gemini-3-flash-preview")
        .unwrap()
        .with_base_url(server.url());

    let result: Result<Triage, _> =
        generate_structured(&provider, GenerationRequest::new("q"), triage_schema()).await;
    assert!(matches!(result, Err(LlmError::SchemaViolation(_))));
}

#[tokio::test]
async fn test_empty_candidates_is_empty_response() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1beta/models/gemini-3-flash-preview:generateContent")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"candidates":[]}"#)
        .create_async()
        .await;

    let provider = GeminiProvider::new("test-key", "gemini-3-flash-preview")
        .unwrap()
        .with_base_url(server.url());

    let err = provider
        .generate(GenerationRequest::new("q"))
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse));
}

#[tokio::test]
async fn test_key_check_picks_first_runnable_model() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/v1beta/models")
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(200)
        .with_body(
            json!({
                "models": [
                    { "name": "models/embedding-001", "supportedGenerationMethods": ["embedContent"] },
                    { "name": "models/gemini-3-flash-preview", "supportedGenerationMethods": ["generateContent", "countTokens"] }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let probe = server
        .mock("POST", "/v1beta/models/gemini-3-flash-preview:generateContent")
        .match_query(Matcher::Any)
        .match_body(Matcher::PartialJson(json!({
            "contents": [{ "parts": [{ "text": "Say hello in one short sentence." }] }]
        })))
        .with_status(200)
        .with_body(reply_body("Hello there!"))
        .create_async()
        .await;

    let provider = GeminiProvider::new("test-key", "unused")
        .unwrap()
        .with_base_url(server.url());
    let report = check_api_key(&provider).await.unwrap();

    assert_eq!(report.model, "models/gemini-3-flash-preview");
    assert_eq!(report.sample, "Hello there!");
    list.assert_async().await;
    probe.assert_async().await;
}

#[tokio::test]
async fn test_key_check_without_runnable_model() {
    let mut server = Server::new_async().await;
    let _list = server
        .mock("GET", "/v1beta/models")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"models":[{"name":"models/embedding-001","supportedGenerationMethods":["embedContent"]}]}"#)
        .create_async()
        .await;

    let provider = GeminiProvider::new("test-key", "unused")
        .unwrap()
        .with_base_url(server.url());

    assert!(matches!(
        check_api_key(&provider).await,
        Err(LlmError::NoRunnableModel)
    ));
}
