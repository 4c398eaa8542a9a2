use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Headers attached to every response, errors included.
pub const RESPONSE_HEADERS: [(&str, &str); 3] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "OPTIONS,GET,POST"),
];

/// Uniform response shape: status, fixed headers and a serialized JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub status: StatusCode,
    pub headers: [(&'static str, &'static str); 3],
    pub body: String,
}

/// Wrap a serializable body into an [`Envelope`].
pub fn format<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Envelope {
    match serde_json::to_string(body) {
        Ok(body) => Envelope {
            status,
            headers: RESPONSE_HEADERS,
            body,
        },
        Err(e) => Envelope {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            headers: RESPONSE_HEADERS,
            body: serde_json::json!({ "error": "Server error", "detail": e.to_string() })
                .to_string(),
        },
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        let headers = response.headers_mut();

        // Overrides the text/plain type set for the String body.
        for (name, value) in self.headers {
            if let Ok(name) = HeaderName::from_bytes(name.as_bytes()) {
                headers.insert(name, HeaderValue::from_static(value));
            }
        }

        response
    }
}
