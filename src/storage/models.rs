use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an application. Submissions always start (and, in this
/// service, stay) at `Submitted`; later stages are an administrative concern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Submitted,
}

/// A job application record stored in redb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub application_id: String,
    pub name: String,
    pub email: String,
    pub position: String,
    /// Time-limited retrieval URL for the stored resume; set once at
    /// submission and never refreshed.
    pub resume_url: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}
