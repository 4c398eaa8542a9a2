use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::error::AppError;
use crate::tts::polly::SpeechProvider;

/// A voice as reported by the synthesis provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDescriptor {
    pub id: String,
    pub language_code: Option<String>,
    pub language_name: Option<String>,
    pub gender: Option<String>,
    #[serde(default = "default_engines")]
    pub supported_engines: Vec<String>,
}

pub fn default_engines() -> Vec<String> {
    vec!["standard".to_string()]
}

/// Lazily loaded, process-lifetime cache of the provider's voices.
///
/// The first successful fetch is kept until restart. Concurrent first callers
/// share one fetch; a failed fetch leaves the cache empty.
pub struct VoiceCatalog {
    provider: Arc<dyn SpeechProvider>,
    voices: OnceCell<Vec<VoiceDescriptor>>,
}

impl VoiceCatalog {
    pub fn new(provider: Arc<dyn SpeechProvider>) -> Self {
        Self {
            provider,
            voices: OnceCell::new(),
        }
    }

    pub async fn ensure_loaded(&self) -> Result<&[VoiceDescriptor], AppError> {
        let voices = self
            .voices
            .get_or_try_init(|| async {
                let mut voices = self.provider.list_voices().await?;
                sort_voices(&mut voices);
                tracing::info!("Loaded {} voices from provider", voices.len());
                Ok::<_, AppError>(voices)
            })
            .await?;

        Ok(voices.as_slice())
    }

    /// List cached voices, optionally narrowed to a language code.
    pub async fn list(&self, lang: Option<&str>) -> Result<Vec<VoiceDescriptor>, AppError> {
        let voices = self.ensure_loaded().await?;
        Ok(filter_by_language(voices, lang.unwrap_or_default()))
    }

    pub async fn contains(&self, voice_id: &str) -> Result<bool, AppError> {
        let voices = self.ensure_loaded().await?;
        Ok(voices.iter().any(|v| v.id == voice_id))
    }
}

/// Order by `(language_code, id)`; a missing language code sorts first.
pub fn sort_voices(voices: &mut [VoiceDescriptor]) {
    voices.sort_by(|a, b| {
        let a_lang = a.language_code.as_deref().unwrap_or_default();
        let b_lang = b.language_code.as_deref().unwrap_or_default();
        a_lang.cmp(b_lang).then_with(|| a.id.cmp(&b.id))
    });
}

/// Keep voices whose language code equals `lang`, starts with `lang-`, or
/// starts with `lang`. An empty filter keeps everything.
pub fn filter_by_language(voices: &[VoiceDescriptor], lang: &str) -> Vec<VoiceDescriptor> {
    if lang.is_empty() {
        return voices.to_vec();
    }

    let dashed = format!("{}-", lang);
    voices
        .iter()
        .filter(|v| match v.language_code.as_deref() {
            Some(code) => code == lang || code.starts_with(&dashed) || code.starts_with(lang),
            None => false,
        })
        .cloned()
        .collect()
}
