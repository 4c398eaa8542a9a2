use axum::{
    body::Body,
    extract::Query,
    http::{StatusCode, Uri},
};

use super::response::{self, Envelope};
use super::{SynthesizeBody, SynthesizeResponse, VoicesResponse};
use crate::api::routes::AppState;
use crate::error::AppError;

/// Upper bound on a synthesize request body.
const MAX_BODY_BYTES: usize = 1024 * 1024;

pub async fn list_voices(state: &AppState, uri: &Uri) -> Result<Envelope, AppError> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri)
        .map_err(|e| AppError::Internal(format!("Invalid query string: {}", e)))?;

    // Repeated `lang` keys are joined with commas, as API gateways do.
    let lang = pairs
        .into_iter()
        .filter(|(key, _)| key == "lang")
        .map(|(_, value)| value)
        .collect::<Vec<_>>()
        .join(",");
    let lang = lang.trim();
    let voices = state.tts.list_voices(Some(lang)).await?;

    tracing::debug!("Listing {} voices (lang={:?})", voices.len(), lang);

    Ok(response::format(StatusCode::OK, &VoicesResponse { voices }))
}

pub async fn synthesize(state: &AppState, body: Body) -> Result<Envelope, AppError> {
    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read request body: {}", e)))?;

    // Validate input
    let request = SynthesizeBody::parse(&bytes)?.validate(state.tts.default_voice())?;

    // Generate, store and sign
    let outcome = state.tts.synthesize(request).await?;

    Ok(response::format(
        StatusCode::OK,
        &SynthesizeResponse {
            url: outcome.url,
            key: outcome.key,
            voice: outcome.voice_id,
        },
    ))
}
