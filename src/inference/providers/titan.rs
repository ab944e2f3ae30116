//! Amazon Titan Text provider, invoked through the Bedrock runtime API.
//!
//! One `InvokeModel` call per prompt, no streaming. The SDK client and the
//! credential load happen once in [`TitanProvider::connect`]; every prompt
//! reuses them.
//!
//! Failures are classified from the SDK's typed errors:
//! - dispatch failures at the I/O layer (DNS, refused connection) mean the
//!   service is not reachable from the configured region or endpoint
//! - `ResourceNotFoundException`, or a `ValidationException` about the model
//!   identifier, means the model id does not resolve in this region
//! - everything else is a plain invocation failure

use std::fmt;

use async_trait::async_trait;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::config::Region;
use aws_sdk_bedrockruntime::config::retry::RetryConfig;
use aws_sdk_bedrockruntime::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_bedrockruntime::operation::invoke_model::InvokeModelError;
use aws_sdk_bedrockruntime::primitives::Blob;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::inference::{GenerateError, GenerationConfig, TextGenerator};

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_MODEL_ID: &str = "amazon.titan-text-express-v1";
const CONTENT_TYPE: &str = "application/json";

/// Lower-cased fragments the service uses when a model id cannot be resolved.
const UNRESOLVED_MODEL_MARKERS: &[&str] = &[
    "could not resolve the foundation model",
    "model identifier is invalid",
    "modelnotfoundexception",
];

// ============================================================================
// Titan Wire Types
// ============================================================================

/// The request body for Titan text models
#[derive(Serialize, Debug)]
struct TitanRequest<'a> {
    #[serde(rename = "inputText")]
    input_text: &'a str,
    #[serde(rename = "textGenerationConfig")]
    text_generation_config: &'a GenerationConfig,
}

/// The response body. Only the fields we consume are modelled.
#[derive(Deserialize, Debug)]
struct TitanResponse {
    #[serde(rename = "inputTextTokenCount", default)]
    input_text_token_count: u32,
    results: Vec<TitanResult>,
}

#[derive(Deserialize, Debug)]
struct TitanResult {
    #[serde(rename = "tokenCount", default)]
    token_count: u32,
    #[serde(rename = "outputText")]
    output_text: String,
    #[serde(rename = "completionReason", default)]
    completion_reason: Option<String>,
}

/// Encodes `prompt` into a Titan request body. The prompt is not trimmed or wrapped.
pub fn encode_request(prompt: &str, config: &GenerationConfig) -> Result<Vec<u8>, GenerateError> {
    let request = TitanRequest {
        input_text: prompt,
        text_generation_config: config,
    };
    serde_json::to_vec(&request).map_err(|e| GenerateError::MarshalFailure(e.to_string()))
}

/// Decodes a Titan response body and returns the first result's text.
pub fn decode_response(body: &[u8]) -> Result<String, GenerateError> {
    let response: TitanResponse = serde_json::from_slice(body)
        .map_err(|e| GenerateError::MalformedResponse(e.to_string()))?;

    let input_tokens = response.input_text_token_count;
    let first = response.results.into_iter().next().ok_or_else(|| {
        GenerateError::MalformedResponse("response contained no results".to_string())
    })?;

    debug!(
        "Titan result: input_tokens={}, output_tokens={}, completion_reason={:?}",
        input_tokens, first.token_count, first.completion_reason
    );
    Ok(first.output_text)
}

// ============================================================================
// Error Classification
// ============================================================================

fn mentions_unresolved_model(message: Option<&str>) -> bool {
    message.is_some_and(|m| {
        let m = m.to_ascii_lowercase();
        UNRESOLVED_MODEL_MARKERS.iter().any(|marker| m.contains(marker))
    })
}

/// Maps an `InvokeModel` SDK error onto our error taxonomy.
pub fn classify_invoke_error<R>(
    err: &SdkError<InvokeModelError, R>,
    settings: &BedrockSettings,
) -> GenerateError
where
    R: fmt::Debug,
{
    let detail = DisplayErrorContext(err).to_string();
    match err {
        SdkError::DispatchFailure(failure) if failure.is_io() => GenerateError::RegionUnavailable {
            region: settings.region.clone(),
            detail,
        },
        SdkError::ServiceError(service) => {
            let service_err = service.err();
            let unresolved = service_err.is_resource_not_found_exception()
                || (service_err.is_validation_exception()
                    && mentions_unresolved_model(service_err.message()));
            if unresolved {
                GenerateError::ModelUnresolved {
                    model_id: settings.model_id.clone(),
                    detail,
                }
            } else {
                GenerateError::InvocationFailed(detail)
            }
        }
        _ => GenerateError::InvocationFailed(detail),
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Where and what to invoke.
#[derive(Debug, Clone, PartialEq)]
pub struct BedrockSettings {
    pub region: String,
    pub model_id: String,
    /// Overrides the regional endpoint (proxies, tests).
    pub endpoint_url: Option<String>,
}

impl Default for BedrockSettings {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            endpoint_url: None,
        }
    }
}

pub struct TitanProvider {
    client: Client,
    settings: BedrockSettings,
    generation: GenerationConfig,
}

impl TitanProvider {
    /// Loads the default AWS configuration for `settings.region`, checks that
    /// the credential chain yields credentials, and builds the session client.
    pub async fn connect(
        settings: BedrockSettings,
        generation: GenerationConfig,
    ) -> Result<Self, GenerateError> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .retry_config(RetryConfig::disabled());
        if let Some(url) = &settings.endpoint_url {
            loader = loader.endpoint_url(url.clone());
        }
        let sdk_config = loader.load().await;

        let credentials = sdk_config.credentials_provider().ok_or_else(|| {
            GenerateError::CredentialsUnavailable("no credentials provider configured".to_string())
        })?;
        credentials
            .provide_credentials()
            .await
            .map_err(|e| GenerateError::CredentialsUnavailable(DisplayErrorContext(&e).to_string()))?;
        info!("Loaded AWS credentials for region {}", settings.region);

        Ok(Self::with_client(Client::new(&sdk_config), settings, generation))
    }

    /// Wraps an already configured client.
    pub fn with_client(client: Client, settings: BedrockSettings, generation: GenerationConfig) -> Self {
        Self {
            client,
            settings,
            generation,
        }
    }
}

#[async_trait]
impl TextGenerator for TitanProvider {
    fn name(&self) -> &str {
        "titan"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let body = encode_request(prompt, &self.generation)?;

        info!(
            "Titan InvokeModel request: model={}, region={}, prompt_len={}",
            self.settings.model_id,
            self.settings.region,
            prompt.len()
        );

        let output = self
            .client
            .invoke_model()
            .model_id(&self.settings.model_id)
            .content_type(CONTENT_TYPE)
            .accept(CONTENT_TYPE)
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|err| {
                let classified = classify_invoke_error(&err, &self.settings);
                warn!("Couldn't invoke model \"{}\": {}", self.settings.model_id, classified);
                classified
            })?;

        let text = decode_response(output.body().as_ref()).inspect_err(|e| {
            warn!("Failed to decode Titan response: {}", e);
        })?;
        debug!("Titan completion received: {} bytes", text.len());
        Ok(text)
    }
}
