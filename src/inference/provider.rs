use std::fmt;

use async_trait::async_trait;

/// Errors that can occur while generating a completion.
///
/// Each variant is distinguishable by the caller; the UI renders a short
/// summary inline and the full detail goes to the log.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateError {
    /// The endpoint could not be reached at all (DNS failure, refused connection).
    RegionUnavailable { region: String, detail: String },
    /// The model id does not resolve to a foundation model in this region.
    ModelUnresolved { model_id: String, detail: String },
    /// Any other transport or service failure.
    InvocationFailed(String),
    /// The service answered with a body we could not decode.
    MalformedResponse(String),
    /// The request body could not be encoded.
    MarshalFailure(String),
    /// The credential chain produced no usable credentials.
    CredentialsUnavailable(String),
}

impl GenerateError {
    /// Short, user-facing description used in the transcript.
    pub fn summary(&self) -> String {
        match self {
            GenerateError::RegionUnavailable { region, .. } => {
                format!("region unavailable ({region})")
            }
            GenerateError::ModelUnresolved { model_id, .. } => {
                format!("model not found ({model_id})")
            }
            GenerateError::InvocationFailed(_) => "invocation failed".to_string(),
            GenerateError::MalformedResponse(_) => "malformed response".to_string(),
            GenerateError::MarshalFailure(_) => "could not encode request".to_string(),
            GenerateError::CredentialsUnavailable(_) => "credentials unavailable".to_string(),
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::RegionUnavailable { region, detail } => write!(
                f,
                "service is not reachable in region {region}: {detail}"
            ),
            GenerateError::ModelUnresolved { model_id, detail } => write!(
                f,
                "model \"{model_id}\" not found; verify that it exists and is accessible in the configured region: {detail}"
            ),
            GenerateError::InvocationFailed(msg) => write!(f, "couldn't invoke model: {msg}"),
            GenerateError::MalformedResponse(msg) => write!(f, "malformed response: {msg}"),
            GenerateError::MarshalFailure(msg) => write!(f, "failed to encode request: {msg}"),
            GenerateError::CredentialsUnavailable(msg) => {
                write!(f, "failed to load credentials: {msg}")
            }
        }
    }
}

impl std::error::Error for GenerateError {}

/// A hosted text-generation model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the name of the generator (used in logs).
    fn name(&self) -> &str;

    /// Produces a completion for `prompt`. The prompt is sent as-is.
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}
