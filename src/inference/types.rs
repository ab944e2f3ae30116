use std::fmt;

use serde::{Serialize, Serializer};

/// Correlation id handed out by the invoker for every dispatched prompt.
/// Ids increase monotonically within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub const DEFAULT_TEMPERATURE: f64 = 0.0;
pub const DEFAULT_TOP_P: f64 = 1.0;
pub const DEFAULT_MAX_TOKENS: u32 = 3000;

/// Sampling settings sent with every prompt.
///
/// Serializes to the `textGenerationConfig` object of a Titan request.
/// Whole-number floats are written as JSON integers (`0`, not `0.0`) so the
/// default payload matches what the service documents byte for byte.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    #[serde(serialize_with = "serialize_compact_f64")]
    pub temperature: f64,
    #[serde(rename = "topP", serialize_with = "serialize_compact_f64")]
    pub top_p: f64,
    #[serde(rename = "maxTokenCount")]
    pub max_tokens: u32,
    #[serde(rename = "stopSequences", skip_serializing_if = "Vec::is_empty")]
    pub stop_sequences: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            max_tokens: DEFAULT_MAX_TOKENS,
            stop_sequences: Vec::new(),
        }
    }
}

fn serialize_compact_f64<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < (i64::MAX as f64) {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// One dispatched prompt's outcome, posted back to the UI loop.
#[derive(Debug)]
pub struct ReplyEvent {
    pub ticket: RequestId,
    pub outcome: Result<String, super::GenerateError>,
}
