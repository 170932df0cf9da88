//! Pure validation of application submissions and resume payloads.

use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

/// Maximum decoded resume size: 2 MiB
pub const MAX_RESUME_SIZE: usize = 2 * 1024 * 1024;

/// Every PDF starts with this signature.
const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Minimal `local@domain.tld` shape check.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("email regex compiles"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Invalid base64 resume")]
    InvalidEncoding,
    #[error("Resume exceeds 2MB limit")]
    TooLarge,
    #[error("Resume must be a PDF")]
    NotPdf,
}

/// An inbound submission as posted by the application form. All fields are
/// optional at the deserialization layer so that presence checks can produce
/// field-specific messages instead of serde errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub resume_base64: Option<String>,
}

/// Check that `name`, `email`, and `position` are present and non-empty, and
/// that the email has a plausible shape. No side effects.
pub fn validate_application(submission: &ApplicationSubmission) -> Result<(), ValidationError> {
    let required = [
        ("name", &submission.name),
        ("email", &submission.email),
        ("position", &submission.position),
    ];

    for (field, value) in required {
        if value.as_deref().is_none_or(str::is_empty) {
            return Err(ValidationError::MissingField(field));
        }
    }

    if !EMAIL_RE.is_match(submission.email.as_deref().unwrap_or_default()) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}

/// Check that a base64 resume payload decodes, fits the size limit, and is a
/// PDF. The decoded bytes are discarded; the upload path decodes again.
pub fn validate_resume(resume_base64: &str) -> Result<(), ValidationError> {
    let data = decode_resume(resume_base64).map_err(|_| ValidationError::InvalidEncoding)?;

    if data.len() > MAX_RESUME_SIZE {
        return Err(ValidationError::TooLarge);
    }

    if !data.starts_with(PDF_MAGIC) {
        return Err(ValidationError::NotPdf);
    }

    Ok(())
}

/// Strip an optional data-URL prefix (`data:application/pdf;base64,` or
/// similar — everything up to the first comma) and decode the remainder as
/// standard base64.
pub fn decode_resume(resume_base64: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let payload = match resume_base64.split_once(',') {
        Some((_, rest)) => rest,
        None => resume_base64,
    };

    base64::engine::general_purpose::STANDARD.decode(payload)
}
