use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::response::{ApiError, AppQuery};
use crate::object_store::ObjectStoreError;
use crate::resume_store::ResumeStoreError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub expires: i64,
    pub signature: String,
}

/// Serve a stored resume when presented with a valid signed link.
/// Route: GET /resumes/:key (local storage backend only)
pub async fn download_resume(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    AppQuery(params): AppQuery<DownloadParams>,
) -> Result<Response, ApiError> {
    if !state.signer.verify(&key, params.expires, &params.signature) {
        return Err(ApiError::forbidden("Invalid or expired resume link"));
    }

    let data = state.resumes.fetch(&key).await.map_err(|e| match e {
        ResumeStoreError::Store(ObjectStoreError::NotFound(_)) => {
            ApiError::not_found("Resume not found")
        }
        _ => ApiError::internal(format!("Failed to retrieve resume: {e}")),
    })?;

    let mut response = (StatusCode::OK, data).into_response();
    let headers = response.headers_mut();

    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/pdf"),
    );

    if let Ok(value) = format!("inline; filename=\"{key}\"").parse() {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    // Links expire; never let intermediaries cache the content
    headers.insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("private, no-store"),
    );

    Ok(response)
}
