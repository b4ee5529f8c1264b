// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

//! Library configuration options and environment definitions.

use std::env;
use std::path::PathBuf;

use url::Url;

use crate::inv;
use crate::inv::error::ErrorKind;

pub const DEFAULT_BACKEND_PROTOCOL: &str = "http";
pub const DEFAULT_BACKEND_HOST: &str = "localhost";
pub const DEFAULT_BACKEND_PORT: &str = "5001";
pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_PUBLIC_DIR: &str = "public";

// Reads an environment variable, falling back to a default if unset:
fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{} not set, using default: {}", key, default);
        default.to_string()
    })
}

/// Connection parameters of the inventory backend, as handed out by the
/// config provider at `/api/config`.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(rename = "BACKEND_PROTOCOL")]
    protocol: String,
    #[serde(rename = "BACKEND_HOST")]
    host: String,
    #[serde(rename = "BACKEND_PORT")]
    port: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_BACKEND_PROTOCOL,
            DEFAULT_BACKEND_HOST,
            DEFAULT_BACKEND_PORT,
        )
    }
}

impl BackendConfig {
    pub fn new<P, H, Q>(protocol: P, host: H, port: Q) -> Self
    where
        P: Into<String>,
        H: Into<String>,
        Q: Into<String>,
    {
        Self {
            protocol: protocol.into(),
            host: host.into(),
            port: port.into(),
        }
    }

    /// Reads `BACKEND_PROTOCOL`, `BACKEND_HOST` and `BACKEND_PORT`, applying
    /// the defaults for any that are unset.
    pub fn from_env() -> Self {
        Self::new(
            var_or("BACKEND_PROTOCOL", DEFAULT_BACKEND_PROTOCOL),
            var_or("BACKEND_HOST", DEFAULT_BACKEND_HOST),
            var_or("BACKEND_PORT", DEFAULT_BACKEND_PORT),
        )
    }

    pub fn protocol(&self) -> &String {
        &self.protocol
    }

    pub fn host(&self) -> &String {
        &self.host
    }

    pub fn port(&self) -> &String {
        &self.port
    }

    /// The backend base URL, `{protocol}://{host}:{port}`.
    pub fn api_url(&self) -> inv::Result<Url> {
        let raw = format!("{}://{}:{}", self.protocol, self.host, self.port);
        raw.parse::<Url>()
            .map_err(|e| inv::Error::with_chain(e, ErrorKind::InvalidConfig("BACKEND".into(), raw)))
    }
}

/// Configuration options for the inventory API client.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Config {
    backend: BackendConfig,
}

impl Config {
    pub fn new(backend: BackendConfig) -> Self {
        Self { backend }
    }

    pub fn from_env() -> Self {
        Self::new(BackendConfig::from_env())
    }

    pub fn backend(&self) -> &BackendConfig {
        &self.backend
    }

    pub fn api_url(&self) -> inv::Result<Url> {
        self.backend.api_url()
    }
}

/// Configuration of the config provider / static file server.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    port: u16,
    public_dir: PathBuf,
    backend: BackendConfig,
}

impl ServerConfig {
    pub fn new<P: Into<PathBuf>>(port: u16, public_dir: P, backend: BackendConfig) -> Self {
        Self {
            port,
            public_dir: public_dir.into(),
            backend,
        }
    }

    /// Reads `PORT` and `PUBLIC_DIR` plus the backend variables.
    pub fn from_env() -> inv::Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| inv::Error::with_chain(e, ErrorKind::InvalidConfig("PORT".into(), raw)))?,
            Err(_) => {
                info!("PORT not set, using default: {}", DEFAULT_SERVER_PORT);
                DEFAULT_SERVER_PORT
            }
        };
        Ok(Self::new(
            port,
            var_or("PUBLIC_DIR", DEFAULT_PUBLIC_DIR),
            BackendConfig::from_env(),
        ))
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn public_dir(&self) -> &PathBuf {
        &self.public_dir
    }

    pub fn backend(&self) -> &BackendConfig {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_defaults_match_the_provider() {
        let backend = BackendConfig::default();
        assert_eq!(backend.protocol(), "http");
        assert_eq!(backend.host(), "localhost");
        assert_eq!(backend.port(), "5001");
    }

    #[test]
    fn api_url_is_assembled_from_parts() {
        let backend = BackendConfig::new("https", "inventory.example.com", "8443");
        let url = backend.api_url().unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("inventory.example.com"));
        assert_eq!(url.port(), Some(8443));
    }

    #[test]
    fn api_url_rejects_garbage_ports() {
        let backend = BackendConfig::new("http", "localhost", "not-a-port");
        assert!(backend.api_url().is_err());
    }

    #[test]
    fn backend_config_uses_provider_wire_names() {
        let json = serde_json::to_value(&BackendConfig::default()).unwrap();
        assert_eq!(json["BACKEND_PROTOCOL"], "http");
        assert_eq!(json["BACKEND_HOST"], "localhost");
        assert_eq!(json["BACKEND_PORT"], "5001");

        let parsed: BackendConfig = serde_json::from_str(
            r#"{"BACKEND_PROTOCOL":"https","BACKEND_HOST":"api","BACKEND_PORT":"443"}"#,
        )
        .unwrap();
        assert_eq!(parsed, BackendConfig::new("https", "api", "443"));
    }
}
