use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::{self, HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// ============================================================================
// CORS
// ============================================================================

/// Headers attached to every response, success or error, so the
/// browser-hosted application form can read it cross-origin.
fn cors_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("*"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST,OPTIONS"),
        ),
    ]
}

// ============================================================================
// Response envelope
// ============================================================================

/// Minimal response body: a short user-facing message.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 200 response carrying any serializable envelope body.
#[derive(Debug)]
pub struct ApiOk<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for ApiOk<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, cors_headers(), Json(self.0)).into_response()
    }
}

// ============================================================================
// Unified error type for handlers
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    /// Client error: the message is returned verbatim (4xx).
    Fail(StatusCode, String),
    /// Server error: the detail is logged, the caller gets a generic 500.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Fail(code, message) => {
                (code, cors_headers(), Json(MessageBody::new(message))).into_response()
            }
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    cors_headers(),
                    Json(MessageBody::new("Internal server error")),
                )
                    .into_response()
            }
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::Fail(StatusCode::BAD_REQUEST, message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Fail(StatusCode::FORBIDDEN, message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::Fail(StatusCode::NOT_FOUND, message.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        ApiError::Internal(detail.into())
    }
}

// ============================================================================
// Custom extractors (reject with enveloped ApiError)
// ============================================================================

/// JSON body extractor that distinguishes an absent body from malformed JSON
/// and rejects with enveloped errors. Unlike `axum::Json` it does not demand
/// a Content-Type header; the submission form cannot always set one.
pub struct AppJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, ApiError> {
        let bytes = Bytes::from_request(req, state).await.map_err(|_| {
            ApiError::Fail(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body too large".into(),
            )
        })?;

        if bytes.is_empty() {
            return Err(ApiError::bad_request("Missing request body"));
        }

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(AppJson(value)),
            Err(e) if e.is_data() => {
                Err(ApiError::bad_request(format!("Invalid request body: {e}")))
            }
            Err(_) => Err(ApiError::bad_request("Malformed JSON in request body")),
        }
    }
}

/// Drop-in replacement for `axum::extract::Query` that rejects with
/// enveloped errors.
pub struct AppQuery<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, ApiError> {
        let query = parts.uri.query().unwrap_or_default();
        serde_qs::from_str(query)
            .map(AppQuery)
            .map_err(|e| ApiError::bad_request(format!("Invalid query parameter: {e}")))
    }
}
