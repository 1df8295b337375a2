//! Gateway configuration.

use std::env;
use std::path::PathBuf;

use axum::http::HeaderValue;

use common::{env_parse, ConfigError, DatabaseConfig, JwtConfig, ServiceConfig};

/// Default maximum size of an uploaded image (10 MiB)
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// HTTP surface settings.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Directory holding the `images` folder
    pub image_root: PathBuf,
    /// Maximum accepted image upload size in bytes
    pub max_upload_bytes: usize,
    /// Allowed CORS origin (any origin when unset)
    pub cors_allowed_origin: Option<HeaderValue>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            image_root: PathBuf::from("."),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            cors_allowed_origin: None,
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub http: HttpConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = ServiceConfig::default();
        let service = ServiceConfig {
            service_name: defaults.service_name,
            host: env::var("GATEWAY_HOST").unwrap_or(defaults.host),
            port: env_parse("GATEWAY_PORT")?.unwrap_or(defaults.port),
        };

        let cors_allowed_origin = match env::var("CORS_ALLOWED_ORIGIN") {
            Ok(origin) if origin != "*" => Some(HeaderValue::from_str(&origin).map_err(|e| {
                ConfigError::Invalid {
                    name: "CORS_ALLOWED_ORIGIN",
                    reason: e.to_string(),
                }
            })?),
            _ => None,
        };

        let http = HttpConfig {
            image_root: env::var("IMAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            max_upload_bytes: env_parse("UPLOAD_MAX_BYTES")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            cors_allowed_origin,
        };

        Ok(Self {
            service,
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env()?,
            http,
        })
    }

    /// Address the HTTP server binds to.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.service.host, self.service.port)
    }
}
