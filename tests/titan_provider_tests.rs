use aws_credential_types::Credentials;
use aws_sdk_bedrockruntime::config::retry::RetryConfig;
use aws_sdk_bedrockruntime::config::{BehaviorVersion, Region};
use aws_sdk_bedrockruntime::{Client, Config};
use titan_chat::inference::{
    BedrockSettings, GenerateError, GenerationConfig, TextGenerator, TitanProvider,
};
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

const INVOKE_PATH: &str = "/model/amazon.titan-text-express-v1/invoke";

/// Builds a provider whose client talks to `endpoint` with static test credentials.
fn provider_for(endpoint: &str) -> TitanProvider {
    let settings = BedrockSettings {
        endpoint_url: Some(endpoint.to_string()),
        ..BedrockSettings::default()
    };
    let config = Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()))
        .endpoint_url(endpoint)
        .credentials_provider(Credentials::new("akid", "secret", None, None, "test"))
        .retry_config(RetryConfig::disabled())
        .build();
    TitanProvider::with_client(Client::from_conf(config), settings, GenerationConfig::default())
}

fn titan_body(text: &str) -> String {
    serde_json::json!({
        "inputTextTokenCount": 7,
        "results": [{ "tokenCount": 2, "outputText": text, "completionReason": "FINISH" }]
    })
    .to_string()
}

fn service_error(status: u16, error_type: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .insert_header("x-amzn-ErrorType", error_type)
        .insert_header("content-type", "application/json")
        .set_body_string(serde_json::json!({ "message": message }).to_string())
}

// ============================================================================
// Success Path
// ============================================================================

#[tokio::test]
async fn test_titan_returns_first_result_text() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(titan_body("Paris.")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server.uri());
    let text = assert_ok!(provider.generate("What is the capital of France?").await);
    assert_eq!(text, "Paris.");
}

#[tokio::test]
async fn test_titan_sends_exact_request_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(body_string(
            r#"{"inputText":"hi","textGenerationConfig":{"temperature":0,"topP":1,"maxTokenCount":3000}}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(titan_body("hello")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server.uri());
    assert_eq!(provider.generate("hi").await.unwrap(), "hello");
}

#[tokio::test]
async fn test_titan_multiline_completion_is_untouched() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(titan_body("\nline one\nline two")))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server.uri());
    assert_eq!(
        provider.generate("list").await.unwrap(),
        "\nline one\nline two"
    );
}

// ============================================================================
// Failure Classification
// ============================================================================

#[tokio::test]
async fn test_titan_empty_results_is_malformed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"inputTextTokenCount":1,"results":[]}"#),
        )
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server.uri());
    let err = assert_err!(provider.generate("hi").await);
    assert!(matches!(err, GenerateError::MalformedResponse(_)), "{err:?}");
}

#[tokio::test]
async fn test_titan_resource_not_found_is_model_unresolved() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .respond_with(service_error(
            404,
            "ResourceNotFoundException",
            "Model not found",
        ))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server.uri());
    let err = assert_err!(provider.generate("hi").await);
    assert!(
        matches!(
            err,
            GenerateError::ModelUnresolved { ref model_id, .. }
                if model_id == "amazon.titan-text-express-v1"
        ),
        "{err:?}"
    );
    assert_eq!(
        err.summary(),
        "model not found (amazon.titan-text-express-v1)"
    );
}

#[tokio::test]
async fn test_titan_invalid_model_identifier_is_model_unresolved() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .respond_with(service_error(
            400,
            "ValidationException",
            "The provided model identifier is invalid.",
        ))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server.uri());
    let err = assert_err!(provider.generate("hi").await);
    assert!(matches!(err, GenerateError::ModelUnresolved { .. }), "{err:?}");
}

#[tokio::test]
async fn test_titan_other_validation_error_is_invocation_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .respond_with(service_error(
            400,
            "ValidationException",
            "Malformed input request: expected maxTokenCount <= 8192",
        ))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server.uri());
    let err = assert_err!(provider.generate("hi").await);
    assert!(matches!(err, GenerateError::InvocationFailed(_)), "{err:?}");
}

#[tokio::test]
async fn test_titan_server_error_is_invocation_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INVOKE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1) // Retries are disabled
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server.uri());
    let err = assert_err!(provider.generate("hi").await);
    assert!(matches!(err, GenerateError::InvocationFailed(_)), "{err:?}");
    assert_eq!(err.summary(), "invocation failed");
}

#[tokio::test]
async fn test_titan_unreachable_endpoint_is_region_unavailable() {
    // Bind then drop a listener so the port is known to be closed
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let provider = provider_for(&format!("http://127.0.0.1:{port}"));
    let err = assert_err!(provider.generate("hi").await);
    assert!(
        matches!(err, GenerateError::RegionUnavailable { ref region, .. } if region == "us-east-1"),
        "{err:?}"
    );
}
