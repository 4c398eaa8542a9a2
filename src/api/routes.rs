use axum::{
    extract::{Request, State},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::response::Envelope;
use crate::error::AppError;
use crate::tts::TtsService;

pub struct AppState {
    pub tts: TtsService,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // Routing is by path suffix, so every request goes through the dispatcher.
    Router::new()
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Match `.../voices` (GET) and `.../synthesize` (POST); everything else is 404.
/// Path and method are both compared case-insensitively.
pub async fn dispatch(State(state): State<Arc<AppState>>, request: Request) -> Envelope {
    let path = request.uri().path().to_ascii_lowercase();
    let method = request.method().as_str().to_ascii_uppercase();

    let result = if path.ends_with("/voices") && method == "GET" {
        handlers::list_voices(&state, request.uri()).await
    } else if path.ends_with("/synthesize") && method == "POST" {
        handlers::synthesize(&state, request.into_body()).await
    } else {
        Err(AppError::NotFound)
    };

    result.unwrap_or_else(|e| e.to_envelope())
}
