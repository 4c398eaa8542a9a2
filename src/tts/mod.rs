pub mod polly;
pub mod storage;
pub mod voice;

#[cfg(test)]
pub mod mock;

use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;

pub use polly::{PollyProvider, SpeechProvider, SynthesisParams};
pub use storage::{ObjectStore, S3Store};
pub use voice::{VoiceCatalog, VoiceDescriptor};

/// A validated synthesis request.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_id: String,
    pub engine: Option<String>,
    pub force_ssml: bool,
}

impl SynthesisRequest {
    /// SSML when forced, or when the text opens with `<speak` (any case).
    pub fn text_is_ssml(&self) -> bool {
        self.force_ssml || self.text.trim_start().to_lowercase().starts_with("<speak")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisOutcome {
    pub url: String,
    pub key: String,
    pub voice_id: String,
}

pub struct TtsService {
    catalog: VoiceCatalog,
    provider: Arc<dyn SpeechProvider>,
    store: Arc<dyn ObjectStore>,
    config: Config,
}

impl TtsService {
    pub fn new(
        provider: Arc<dyn SpeechProvider>,
        store: Arc<dyn ObjectStore>,
        config: Config,
    ) -> Self {
        Self {
            catalog: VoiceCatalog::new(Arc::clone(&provider)),
            provider,
            store,
            config,
        }
    }

    pub fn default_voice(&self) -> &str {
        &self.config.default_voice
    }

    pub async fn list_voices(&self, lang: Option<&str>) -> Result<Vec<VoiceDescriptor>, AppError> {
        self.catalog.list(lang).await
    }

    pub async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisOutcome, AppError> {
        // 1. Voice must be known to the provider
        if !self.catalog.contains(&request.voice_id).await? {
            return Err(AppError::BadRequest(format!(
                "Unsupported voice '{}'.",
                request.voice_id
            )));
        }

        // 2. Synthesize
        let params = SynthesisParams {
            text_is_ssml: request.text_is_ssml(),
            text: request.text,
            voice_id: request.voice_id,
            output_format: self.config.audio_format.clone(),
            engine: request.engine,
        };
        let audio = self.provider.synthesize(&params).await?;
        if audio.is_empty() {
            return Err(AppError::EmptyAudio);
        }

        // 3. Store
        let key = storage::new_storage_key(&self.config.audio_prefix, &self.config.audio_format);
        let size = audio.len();
        self.store
            .put_object(
                &self.config.audio_bucket,
                &key,
                audio,
                storage::AUDIO_CONTENT_TYPE,
            )
            .await?;

        // 4. Hand out a link
        let url = self
            .store
            .presign_get(&self.config.audio_bucket, &key, self.config.presign_ttl)
            .await?;

        tracing::info!("Stored {} bytes at {} (voice {})", size, key, params.voice_id);

        Ok(SynthesisOutcome {
            url,
            key,
            voice_id: params.voice_id,
        })
    }
}
