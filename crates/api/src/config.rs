use agriburn_pipeline::LandcoverPolicy;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Earth Engine REST API base URL.
    pub ee_api_url: String,
    /// Cloud project computations are billed to.
    pub ee_project: String,
    /// Bearer token for the compute endpoint, if required.
    pub ee_auth_token: Option<String>,
    /// Whether a missing agricultural mask aborts a run instead of
    /// degrading to a spectral-only analysis.
    pub landcover_policy: LandcoverPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                              |
    /// |------------------------|--------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                            |
    /// | `PORT`                 | `3000`                               |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`              |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                 |
    /// | `EE_API_URL`           | `https://earthengine.googleapis.com` |
    /// | `EE_PROJECT`           | `ee-agriburn`                        |
    /// | `EE_AUTH_TOKEN`        | (unset)                              |
    /// | `AGRI_MASK_REQUIRED`   | `false`                              |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let ee_api_url = std::env::var("EE_API_URL")
            .unwrap_or_else(|_| "https://earthengine.googleapis.com".into());

        let ee_project = std::env::var("EE_PROJECT").unwrap_or_else(|_| "ee-agriburn".into());

        let ee_auth_token = std::env::var("EE_AUTH_TOKEN").ok();

        let landcover_policy = match std::env::var("AGRI_MASK_REQUIRED").as_deref() {
            Ok("true") | Ok("1") => LandcoverPolicy::Require,
            _ => LandcoverPolicy::Skip,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            ee_api_url,
            ee_project,
            ee_auth_token,
            landcover_policy,
        }
    }
}
