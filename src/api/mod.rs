pub mod handlers;
pub mod response;
pub mod routes;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::tts::{SynthesisRequest, VoiceDescriptor};

/// Body of `POST .../synthesize`. Every field may be missing or `null`.
#[derive(Debug, Default, Deserialize)]
pub struct SynthesizeBody {
    pub text: Option<String>,
    pub voice: Option<String>,
    pub engine: Option<String>,
    /// Any JSON value; read with Python-style truthiness.
    pub ssml: Option<serde_json::Value>,
}

impl SynthesizeBody {
    /// Parse a raw body; an empty body or JSON `null` counts as `{}`.
    pub fn parse(bytes: &[u8]) -> Result<Self, AppError> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        let body: Option<Self> = serde_json::from_slice(bytes)?;
        Ok(body.unwrap_or_default())
    }

    pub fn validate(self, default_voice: &str) -> Result<SynthesisRequest, AppError> {
        let text = self.text.unwrap_or_default().trim().to_string();
        if text.is_empty() {
            return Err(AppError::BadRequest("Missing 'text'.".into()));
        }

        // An empty voice falls back to the default; whitespace alone does not.
        let voice_id = self
            .voice
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default_voice.to_string())
            .trim()
            .to_string();

        let engine = self
            .engine
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        Ok(SynthesisRequest {
            text,
            voice_id,
            engine,
            force_ssml: self.ssml.as_ref().is_some_and(is_truthy),
        })
    }
}

/// `null`, `false`, zero, `""`, `[]` and `{}` are false; everything else is true.
fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

#[derive(Debug, Serialize)]
pub struct SynthesizeResponse {
    pub url: String,
    pub key: String,
    pub voice: String,
}

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceDescriptor>,
}
