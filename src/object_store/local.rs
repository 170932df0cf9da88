use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use super::{ObjectStore, ObjectStoreError, UrlSigner};

/// Local filesystem object store for development and testing.
///
/// "Presigned" URLs point back at this service's `/resumes/:key` route and
/// carry an HMAC signature produced by the shared [`UrlSigner`].
pub struct LocalStore {
    base_path: PathBuf,
    signer: Arc<UrlSigner>,
}

impl LocalStore {
    pub fn new<P: AsRef<Path>>(base_path: P, signer: Arc<UrlSigner>) -> Result<Self, std::io::Error> {
        let base_path = base_path.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_path)?;
        Ok(Self { base_path, signer })
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        _content_type: &str,
    ) -> Result<(), ObjectStoreError> {
        // Content type is implied by the key suffix; the download route sets it.
        let path = self.object_path(key);
        tokio::fs::write(&path, &data).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Bytes, ObjectStoreError> {
        let path = self.object_path(key);
        if !path.exists() {
            return Err(ObjectStoreError::NotFound(key.to_string()));
        }
        let data = tokio::fs::read(&path).await?;
        Ok(Bytes::from(data))
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String, ObjectStoreError> {
        Ok(self.signer.signed_url(key, ttl))
    }
}
