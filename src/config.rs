// src/config.rs
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::errors::ConfigError;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;
// An open form nobody touches for this long is dropped.
const DEFAULT_FORM_IDLE_SECS: u64 = 30 * 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub max_upload_bytes: usize,
    pub form_idle_timeout: Duration,
}

impl AppConfig {
    /// Loads `.env` (if present) and reads the admin server settings.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(
            env::var("ADMIN_LISTEN_ADDR").ok(),
            env::var("MAX_UPLOAD_BYTES").ok(),
            env::var("FORM_IDLE_SECS").ok(),
        )
    }

    fn from_vars(
        listen_addr: Option<String>,
        max_upload_bytes: Option<String>,
        form_idle_secs: Option<String>,
    ) -> Result<Self, ConfigError> {
        let listen_addr = listen_addr.unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid {
                name: "ADMIN_LISTEN_ADDR",
                value: listen_addr.clone(),
            })?;

        let max_upload_bytes = match max_upload_bytes {
            Some(raw) => raw.parse::<usize>().map_err(|_| ConfigError::Invalid {
                name: "MAX_UPLOAD_BYTES",
                value: raw,
            })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let form_idle_secs = match form_idle_secs {
            Some(raw) => raw.parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "FORM_IDLE_SECS",
                value: raw,
            })?,
            None => DEFAULT_FORM_IDLE_SECS,
        };

        Ok(Self {
            listen_addr,
            max_upload_bytes,
            form_idle_timeout: Duration::from_secs(form_idle_secs),
        })
    }
}
