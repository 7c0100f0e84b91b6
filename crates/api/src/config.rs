use std::path::PathBuf;

use dermatrack_core::storage::ImageStore;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    /// Reserved for connection draining.
    #[allow(dead_code)]
    pub shutdown_timeout_secs: u64,
    /// Maximum accepted request body size in bytes (default: 50 MiB).
    /// Device pushes carry several full-resolution photos per request.
    pub max_upload_bytes: usize,
    /// Root directory for stored images and QR codes (default: `local_files`).
    pub storage_root: PathBuf,
    /// Operator account and session lifetime configuration.
    pub auth: AuthConfig,
}

/// Operator credentials and session lifetime.
///
/// The clinic runs single-operator: one account, upserted at startup
/// from these values.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Operator login name (default: `admin-user`).
    pub operator_username: String,
    /// Operator password (default: `admin123user`).
    pub operator_password: String,
    /// Bearer session lifetime in days (default: `30`).
    pub session_expire_days: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                   |
    /// |-----------------------|---------------------------|
    /// | `HOST`                | `0.0.0.0`                 |
    /// | `PORT`                | `8000`                    |
    /// | `CORS_ORIGINS`        | `http://localhost:8501`   |
    /// | `REQUEST_TIMEOUT_SECS`| `30`                      |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                     |
    /// | `MAX_UPLOAD_BYTES`    | `52428800`                |
    /// | `STORAGE_ROOT`        | `local_files`             |
    /// | `OPERATOR_USERNAME`   | `admin-user`              |
    /// | `OPERATOR_PASSWORD`   | `admin123user`            |
    /// | `SESSION_EXPIRE_DAYS` | `30`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8501".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "52428800".into())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let storage_root =
            PathBuf::from(std::env::var("STORAGE_ROOT").unwrap_or_else(|_| "local_files".into()));

        let auth = AuthConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            max_upload_bytes,
            storage_root,
            auth,
        }
    }

    /// The image store rooted at `storage_root`.
    pub fn image_store(&self) -> ImageStore {
        ImageStore::new(self.storage_root.clone())
    }
}

impl AuthConfig {
    /// Load operator credentials and session lifetime from the environment.
    pub fn from_env() -> Self {
        let operator_username =
            std::env::var("OPERATOR_USERNAME").unwrap_or_else(|_| "admin-user".into());

        let operator_password =
            std::env::var("OPERATOR_PASSWORD").unwrap_or_else(|_| "admin123user".into());

        let session_expire_days: i64 = std::env::var("SESSION_EXPIRE_DAYS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SESSION_EXPIRE_DAYS must be a valid i64");

        Self {
            operator_username,
            operator_password,
            session_expire_days,
        }
    }
}

/// Compose the PostgreSQL connection URL.
///
/// `DATABASE_URL` wins when set; otherwise the URL is assembled from the
/// `POSTGRES_*` variables with local-development defaults.
///
/// | Env Var             | Default                  |
/// |---------------------|--------------------------|
/// | `POSTGRES_USER`     | `admin_user`             |
/// | `POSTGRES_PASSWORD` | `admin123user`           |
/// | `POSTGRES_HOST`     | `localhost`              |
/// | `POSTGRES_PORT`     | `5432`                   |
/// | `POSTGRES_DB`       | `skin_disease_detection` |
pub fn database_url() -> String {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return url;
    }

    let user = std::env::var("POSTGRES_USER").unwrap_or_else(|_| "admin_user".into());
    let password = std::env::var("POSTGRES_PASSWORD").unwrap_or_else(|_| "admin123user".into());
    let host = std::env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".into());
    let port = std::env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".into());
    let db = std::env::var("POSTGRES_DB").unwrap_or_else(|_| "skin_disease_detection".into());

    format!("postgres://{user}:{password}@{host}:{port}/{db}")
}
