use std::time::Duration;

/// Longest expiry S3 accepts for a presigned URL (seven days).
const MAX_PRESIGN_TTL_SECS: u64 = 604_800;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub audio_bucket: String,
    pub audio_prefix: String,
    pub audio_format: String,
    pub default_voice: String,
    pub presign_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    ///
    /// Unset keys fall back to their defaults; a key set to the empty string
    /// keeps the empty value, except `AUDIO_BUCKET` which must be non-empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let audio_bucket = lookup("AUDIO_BUCKET")
            .filter(|b| !b.is_empty())
            .ok_or(ConfigError::Missing("AUDIO_BUCKET"))?;

        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => 3000,
        };

        let presign_ttl = match lookup("PRESIGN_TTL") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if (1..=MAX_PRESIGN_TTL_SECS).contains(&secs) => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "PRESIGN_TTL",
                        value,
                    })
                }
            },
            None => 3600,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            audio_bucket,
            audio_prefix: lookup("AUDIO_PREFIX").unwrap_or_else(|| "audio/".to_string()),
            audio_format: lookup("AUDIO_FORMAT").unwrap_or_else(|| "mp3".to_string()),
            default_voice: lookup("DEFAULT_VOICE").unwrap_or_else(|| "Joanna".to_string()),
            presign_ttl: Duration::from_secs(presign_ttl),
        })
    }
}
