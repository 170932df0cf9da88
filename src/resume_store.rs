//! Uploads validated resumes to object storage and hands out retrieval URLs.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;

use crate::object_store::{ObjectStore, ObjectStoreError};
use crate::validation;

#[derive(Debug, Error)]
pub enum ResumeStoreError {
    #[error("Invalid resume encoding: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error(transparent)]
    Store(#[from] ObjectStoreError),
}

pub struct ResumeStore {
    store: Arc<dyn ObjectStore>,
    url_ttl: Duration,
}

impl ResumeStore {
    pub fn new(store: Arc<dyn ObjectStore>, url_ttl: Duration) -> Self {
        Self { store, url_ttl }
    }

    /// Decode a base64 resume (the caller has already validated it), write it
    /// to `<application_id>.pdf`, and return a time-limited retrieval URL.
    pub async fn upload(
        &self,
        resume_base64: &str,
        application_id: &str,
    ) -> Result<String, ResumeStoreError> {
        let pdf_data = validation::decode_resume(resume_base64)?;
        let key = format!("{application_id}.pdf");

        self.store
            .put(&key, Bytes::from(pdf_data), "application/pdf")
            .await?;

        let url = self.store.presign_get(&key, self.url_ttl).await?;
        Ok(url)
    }

    /// Read a stored resume back, for the signed download route.
    pub async fn fetch(&self, key: &str) -> Result<Bytes, ResumeStoreError> {
        Ok(self.store.get(key).await?)
    }
}
