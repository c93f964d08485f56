//! GeoServer connection settings

use gspump_fs::{BackupPath, ConfigStore};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Environment variables consulted by [`ServerConfig::with_env`].
pub const ENV_ADMIN_URL: &str = "GSPUMP_ADMIN_URL";
pub const ENV_USERNAME: &str = "GSPUMP_USERNAME";
pub const ENV_PASSWORD: &str = "GSPUMP_PASSWORD";

/// Where and as whom to talk to GeoServer.
///
/// Fields missing from a config file keep the stock GeoServer defaults.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// REST endpoint root, e.g. `http://localhost:8080/geoserver/rest`
    pub admin_url: String,
    pub username: String,
    pub password: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            admin_url: "http://localhost:8080/geoserver/rest".to_string(),
            username: "admin".to_string(),
            password: "geoserver".to_string(),
            timeout_secs: 60,
        }
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("admin_url", &self.admin_url)
            .field("username", &self.username)
            .field("password", &"********")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ServerConfig {
    /// Load from a TOML, JSON or YAML file.
    pub fn load(path: &BackupPath) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }

    /// Overlay `GSPUMP_*` values from the process environment.
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable lookup.
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_ADMIN_URL) {
            self.admin_url = url;
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            self.username = username;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = password;
        }
        self
    }

    /// Check the settings and normalize the admin URL.
    pub fn validated(mut self) -> Result<Self> {
        let trimmed = self.admin_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(Error::config("admin_url is empty"));
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(Error::config(format!(
                "admin_url must start with http:// or https://, got {}",
                trimmed
            )));
        }
        self.admin_url = trimmed.to_string();
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_point_at_local_geoserver() {
        let config = ServerConfig::default();
        assert_eq!(config.admin_url, "http://localhost:8080/geoserver/rest");
        assert_eq!(config.username, "admin");
    }

    #[test]
    fn debug_hides_password() {
        let config = ServerConfig {
            password: "s3cret".to_string(),
            ..ServerConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("admin_url"));
    }

    #[test]
    fn env_overrides_only_present_keys() {
        let vars: HashMap<&str, &str> = [(ENV_USERNAME, "ops")].into_iter().collect();
        let config = ServerConfig::default().with_env_from(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.username, "ops");
        assert_eq!(config.password, "geoserver");
    }

    #[test]
    fn validated_trims_trailing_slashes() {
        let config = ServerConfig {
            admin_url: "https://gs.example.com/geoserver/rest//".to_string(),
            ..ServerConfig::default()
        };
        assert_eq!(
            config.validated().unwrap().admin_url,
            "https://gs.example.com/geoserver/rest"
        );
    }

    #[test]
    fn validated_rejects_empty_and_schemeless_urls() {
        for url in ["", "  /", "gs.example.com/rest"] {
            let config = ServerConfig {
                admin_url: url.to_string(),
                ..ServerConfig::default()
            };
            assert!(matches!(config.validated(), Err(Error::Config { .. })), "{url}");
        }
    }
}
