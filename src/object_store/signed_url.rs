use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ring::hmac;

/// Signs and verifies expiring download URLs for locally stored resumes.
///
/// The signed payload is `<key>:<expires>` where `expires` is a unix
/// timestamp. Anyone holding the URL can fetch the object until it expires;
/// nothing else is granted.
pub struct UrlSigner {
    key: hmac::Key,
    base_url: String,
}

impl UrlSigner {
    pub fn new(secret: &[u8], base_url: impl Into<String>) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret),
            base_url: base_url.into(),
        }
    }

    /// Build a signed URL for `key` valid for `ttl`.
    pub fn signed_url(&self, key: &str, ttl: std::time::Duration) -> String {
        let expires = chrono::Utc::now().timestamp() + ttl.as_secs() as i64;
        let signature = self.signature(key, expires);
        format!(
            "{}/resumes/{key}?expires={expires}&signature={signature}",
            self.base_url
        )
    }

    /// Check a presented signature against `key` and `expires`.
    /// Rejects expired URLs before doing any crypto.
    pub fn verify(&self, key: &str, expires: i64, signature: &str) -> bool {
        if expires < chrono::Utc::now().timestamp() {
            return false;
        }

        let provided = match URL_SAFE_NO_PAD.decode(signature) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };

        let payload = format!("{key}:{expires}");
        hmac::verify(&self.key, payload.as_bytes(), &provided).is_ok()
    }

    fn signature(&self, key: &str, expires: i64) -> String {
        let payload = format!("{key}:{expires}");
        let tag = hmac::sign(&self.key, payload.as_bytes());
        URL_SAFE_NO_PAD.encode(tag.as_ref())
    }
}
