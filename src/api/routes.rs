use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::config::StorageBackend;
use crate::validation;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Base64 inflates payloads by ~4/3, so the raw body cap sits above the
    // decoded resume limit enforced by validation.
    let body_limit = 2 * validation::MAX_RESUME_SIZE;

    let mut router = Router::new()
        // Submissions
        .route(
            "/applications",
            post(handlers::submit_application)
                .options(handlers::preflight)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        // Internal
        .route("/_internal/health", get(handlers::health));

    // GCS presigned URLs point straight at the bucket; only the local backend
    // serves resume downloads through this process.
    if matches!(state.config.storage.backend, StorageBackend::Local) {
        router = router.route("/resumes/:key", get(handlers::download_resume));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
