//! In-memory collaborators that record how they were called.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::AppError;
use crate::tts::polly::{SpeechProvider, SynthesisParams};
use crate::tts::storage::ObjectStore;
use crate::tts::voice::{default_engines, VoiceDescriptor};

pub fn voice(id: &str, language_code: Option<&str>) -> VoiceDescriptor {
    VoiceDescriptor {
        id: id.to_string(),
        language_code: language_code.map(str::to_string),
        language_name: None,
        gender: None,
        supported_engines: default_engines(),
    }
}

/// Joanna (en-US), Mathieu and Celine (fr-FR), deliberately unsorted.
pub fn sample_voices() -> Vec<VoiceDescriptor> {
    vec![
        voice("Mathieu", Some("fr-FR")),
        voice("Joanna", Some("en-US")),
        voice("Celine", Some("fr-FR")),
    ]
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| (key == "AUDIO_BUCKET").then(|| "clips".to_string()))
        .expect("test config")
}

pub struct MockProvider {
    voices: Vec<VoiceDescriptor>,
    audio: Vec<u8>,
    fail_listing: bool,
    list_calls: AtomicUsize,
    synth_calls: Mutex<Vec<SynthesisParams>>,
}

impl MockProvider {
    pub fn new(voices: Vec<VoiceDescriptor>) -> Self {
        Self {
            voices,
            audio: b"ID3fake-mp3".to_vec(),
            fail_listing: false,
            list_calls: AtomicUsize::new(0),
            synth_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_audio(mut self, audio: Vec<u8>) -> Self {
        self.audio = audio;
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn synth_calls(&self) -> Vec<SynthesisParams> {
        self.synth_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechProvider for MockProvider {
    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, AppError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing {
            return Err(AppError::Provider("DescribeVoices failed: access denied".into()));
        }
        Ok(self.voices.clone())
    }

    async fn synthesize(&self, params: &SynthesisParams) -> Result<Vec<u8>, AppError> {
        self.synth_calls.lock().unwrap().push(params.clone());
        Ok(self.audio.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
pub struct MockStore {
    fail_put: bool,
    objects: Mutex<Vec<StoredObject>>,
}

impl MockStore {
    pub fn failing_put() -> Self {
        Self {
            fail_put: true,
            ..Self::default()
        }
    }

    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MockStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), AppError> {
        if self.fail_put {
            return Err(AppError::Provider("PutObject failed: NoSuchBucket".into()));
        }
        self.objects.lock().unwrap().push(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body,
            content_type: content_type.to_string(),
        });
        Ok(())
    }

    async fn presign_get(&self, bucket: &str, key: &str, ttl: Duration) -> Result<String, AppError> {
        Ok(format!(
            "https://{}.s3.test/{}?X-Amz-Expires={}",
            bucket,
            key,
            ttl.as_secs()
        ))
    }
}
