//! application-intake - Job application intake API
//!
//! This crate accepts job application submissions and handles them end to end:
//! - Field and resume validation (base64 PDF, size and signature checks)
//! - Swappable object storage backends for resumes (local filesystem, GCS)
//! - redb embedded database for application records (ACID, MVCC, crash-safe)
//! - Best-effort email notifications over SMTP
//! - REST API with permissive CORS for browser-hosted application forms

pub mod api;
pub mod config;
pub mod mailer;
pub mod object_store;
pub mod resume_store;
pub mod storage;
pub mod validation;

use std::sync::Arc;

use config::Config;
use mailer::Mailer;
use object_store::UrlSigner;
use resume_store::ResumeStore;
use storage::Database;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub resumes: ResumeStore,
    /// `None` when SMTP is not configured; notifications are skipped.
    pub mailer: Option<Mailer>,
    /// Signs and verifies locally served resume download URLs.
    pub signer: Arc<UrlSigner>,
}
