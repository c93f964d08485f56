//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use gspump_fs::BackupPath;
use gspump_rest::ServerConfig;

use crate::error::Result;

/// gspump - Restore a GeoServer configuration backup through the REST API
#[derive(Parser, Debug)]
#[command(name = "gspump")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Connection settings file (TOML, JSON or YAML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// GeoServer REST root, e.g. http://localhost:8080/geoserver/rest
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// REST user name
    #[arg(long)]
    pub user: Option<String>,

    /// REST password
    #[arg(long)]
    pub password: Option<String>,

    /// Skip a broken workspace, datastore or feature type instead of stopping
    #[arg(long)]
    pub keep_going: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Backup directory to restore from
    #[arg(default_value = "data")]
    pub input_dir: PathBuf,
}

impl Cli {
    /// Resolve connection settings from the process environment.
    pub fn server_config(&self) -> Result<ServerConfig> {
        self.server_config_with(|key| std::env::var(key).ok())
    }

    /// Defaults, then the config file, then `lookup`, then flags.
    pub fn server_config_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(&BackupPath::new(path))?,
            None => ServerConfig::default(),
        }
        .with_env_from(lookup);

        if let Some(url) = &self.url {
            config.admin_url = url.clone();
        }
        if let Some(user) = &self.user {
            config.username = user.clone();
        }
        if let Some(password) = &self.password {
            config.password = password.clone();
        }

        Ok(config.validated()?)
    }
}
