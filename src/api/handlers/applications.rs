use axum::extract::State;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::api::response::{ApiError, ApiOk, AppJson, MessageBody};
use crate::storage::models::{ApplicationRecord, ApplicationStatus};
use crate::validation::{self, ApplicationSubmission};
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SubmissionReceipt {
    pub message: String,
    pub application_id: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// CORS pre-flight acknowledgment for the submission route.
pub async fn preflight() -> ApiOk<MessageBody> {
    ApiOk(MessageBody::new("CORS OK"))
}

pub async fn submit_application(
    State(state): State<Arc<AppState>>,
    AppJson(submission): AppJson<ApplicationSubmission>,
) -> Result<ApiOk<SubmissionReceipt>, ApiError> {
    validation::validate_application(&submission)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    // The resume is mandatory
    let resume_base64 = submission
        .resume_base64
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("resume_base64 is required"))?;

    validation::validate_resume(resume_base64)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    // Present and non-empty once validation has passed
    let name = submission.name.as_deref().unwrap_or_default();
    let email = submission.email.as_deref().unwrap_or_default();
    let position = submission.position.as_deref().unwrap_or_default();

    let application_id = uuid::Uuid::new_v4().to_string();

    // Phase 1: Upload the resume to object storage (keyed by the new id)
    let resume_url = state
        .resumes
        .upload(resume_base64, &application_id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to store resume: {e}")))?;

    // Phase 2: Persist the application record. If this fails the uploaded
    // resume is orphaned; there is no compensating delete.
    let record = ApplicationRecord {
        application_id: application_id.clone(),
        name: name.to_string(),
        email: email.to_string(),
        position: position.to_string(),
        resume_url: resume_url.clone(),
        status: ApplicationStatus::Submitted,
        created_at: Utc::now(),
    };
    state
        .db
        .put_application(&record)
        .map_err(|e| ApiError::internal(format!("Failed to save application: {e}")))?;

    tracing::info!(application_id = %application_id, position, "Application saved");

    // Notifications are best-effort; a failed send never fails the request.
    match &state.mailer {
        Some(mailer) => {
            if let Err(e) = mailer
                .notify_admin(name, email, position, &resume_url)
                .await
            {
                tracing::warn!(
                    application_id = %application_id,
                    error = %e,
                    "Failed to send admin notification"
                );
            }
            if let Err(e) = mailer.notify_applicant(email, name, position).await {
                tracing::warn!(
                    application_id = %application_id,
                    error = %e,
                    "Failed to send confirmation email"
                );
            }
        }
        None => {
            tracing::debug!("Email delivery not configured; skipping notifications");
        }
    }

    Ok(ApiOk(SubmissionReceipt {
        message: "Application submitted successfully".to_string(),
        application_id,
    }))
}
