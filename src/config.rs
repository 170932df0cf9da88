use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    /// SMTP settings; `None` disables email notifications entirely.
    pub email: Option<EmailConfig>,
    /// Recipient of internal new-application notifications, also the default
    /// From address for outbound mail.
    pub admin_email: String,
    /// Validity window for resume retrieval URLs (seconds)
    pub resume_url_ttl_secs: u64,
    /// HMAC key for locally served download URLs. Generated fresh per process
    /// when unset, which invalidates outstanding URLs on restart.
    pub download_signing_secret: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Externally reachable base URL, used when signing local download links
    pub public_url: String,
    pub data_dir: String,
}

#[derive(Debug, Clone)]
pub enum StorageBackend {
    Gcs,
    Local,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory for local storage backend
    pub local_storage_path: String,
    /// GCS bucket name (required when backend is gcs)
    pub gcs_bucket: Option<String>,
    /// Path to GCS service account JSON (optional, defaults to ADC)
    pub gcs_credentials_file: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 "From" address for outbound mail
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            public_url: "http://localhost:8080".to_string(),
            data_dir: "./data".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Local,
            local_storage_path: "./resumes".to_string(),
            gcs_bucket: None,
            gcs_credentials_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let public_url = std::env::var("PUBLIC_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string())
            .trim_end_matches('/')
            .to_string();

        let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string());

        let storage_backend = match std::env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "local".to_string())
            .to_lowercase()
            .as_str()
        {
            "gcs" => StorageBackend::Gcs,
            _ => StorageBackend::Local,
        };

        let local_storage_path =
            std::env::var("LOCAL_STORAGE_PATH").unwrap_or_else(|_| "./resumes".to_string());

        let gcs_bucket = std::env::var("GCS_BUCKET").ok();
        let gcs_credentials_file = std::env::var("GCS_CREDENTIALS_FILE").ok();

        let admin_email =
            std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "hr@example.com".to_string());

        let email = std::env::var("SMTP_HOST").ok().map(|smtp_host| EmailConfig {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(587),
            from_address: std::env::var("SMTP_FROM").unwrap_or_else(|_| admin_email.clone()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        });

        let resume_url_ttl_secs = std::env::var("RESUME_URL_TTL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(86_400); // 24 hours

        let download_signing_secret = std::env::var("DOWNLOAD_SIGNING_SECRET")
            .unwrap_or_else(|_| uuid::Uuid::new_v4().to_string());

        let config = Config {
            server: ServerConfig {
                bind_address,
                public_url,
                data_dir,
            },
            storage: StorageConfig {
                backend: storage_backend,
                local_storage_path,
                gcs_bucket,
                gcs_credentials_file,
            },
            email,
            admin_email,
            resume_url_ttl_secs,
            download_signing_secret,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.admin_email.is_empty() {
            return Err(ConfigError::ValidationError(
                "ADMIN_EMAIL cannot be empty".to_string(),
            ));
        }

        if matches!(self.storage.backend, StorageBackend::Gcs) && self.storage.gcs_bucket.is_none()
        {
            return Err(ConfigError::ValidationError(
                "GCS_BUCKET is required when STORAGE_BACKEND=gcs".to_string(),
            ));
        }

        if matches!(self.storage.backend, StorageBackend::Gcs)
            && self.storage.gcs_credentials_file.is_none()
        {
            tracing::warn!(
                "GCS backend without GCS_CREDENTIALS_FILE: uploads use the metadata \
                 server, but signed resume URLs require a service account key."
            );
        }

        if self.email.is_none() {
            tracing::warn!("SMTP_HOST not set — email notifications are disabled.");
        }

        Ok(())
    }
}
