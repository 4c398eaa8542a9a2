//! AWS Polly speech provider

use async_trait::async_trait;
use aws_sdk_polly::error::DisplayErrorContext;
use aws_sdk_polly::types::{Engine, OutputFormat, TextType, Voice, VoiceId};
use aws_sdk_polly::Client;

use crate::error::AppError;
use crate::tts::voice::{default_engines, VoiceDescriptor};

/// Parameters for a single synthesis call.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisParams {
    pub text: String,
    pub voice_id: String,
    pub output_format: String,
    /// Sends `TextType=ssml` when set; otherwise the provider default applies.
    pub text_is_ssml: bool,
    pub engine: Option<String>,
}

/// Text-to-speech backend used by the catalog and the synthesis path.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, AppError>;

    /// Returns the raw audio payload, which may be empty.
    async fn synthesize(&self, params: &SynthesisParams) -> Result<Vec<u8>, AppError>;
}

pub struct PollyProvider {
    client: Client,
}

impl PollyProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SpeechProvider for PollyProvider {
    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, AppError> {
        let mut voices = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .client
                .describe_voices()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| {
                    AppError::Provider(format!("DescribeVoices failed: {}", DisplayErrorContext(&e)))
                })?;

            voices.extend(
                output
                    .voices
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(to_descriptor),
            );

            match output.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }

        Ok(voices)
    }

    async fn synthesize(&self, params: &SynthesisParams) -> Result<Vec<u8>, AppError> {
        let mut request = self
            .client
            .synthesize_speech()
            .text(&params.text)
            .output_format(OutputFormat::from(params.output_format.as_str()))
            .voice_id(VoiceId::from(params.voice_id.as_str()));

        if params.text_is_ssml {
            request = request.text_type(TextType::Ssml);
        }

        if let Some(engine) = &params.engine {
            request = request.engine(Engine::from(engine.as_str()));
        }

        let response = request.send().await.map_err(|e| {
            AppError::Provider(format!("SynthesizeSpeech failed: {}", DisplayErrorContext(&e)))
        })?;

        let audio = response
            .audio_stream
            .collect()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to read audio stream: {}", e)))?
            .into_bytes()
            .to_vec();

        tracing::debug!("Polly returned {} bytes for voice {}", audio.len(), params.voice_id);

        Ok(audio)
    }
}

fn to_descriptor(voice: Voice) -> Option<VoiceDescriptor> {
    let id = voice.id?.as_str().to_string();

    Some(VoiceDescriptor {
        id,
        language_code: voice.language_code.map(|c| c.as_str().to_string()),
        language_name: voice.language_name,
        gender: voice.gender.map(|g| g.as_str().to_string()),
        supported_engines: voice
            .supported_engines
            .map(|engines| engines.iter().map(|e| e.as_str().to_string()).collect())
            .unwrap_or_else(default_engines),
    })
}
