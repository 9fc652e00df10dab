use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.turfgame.com/v4/zones";
pub const DEFAULT_CONFIG_FILE: &str = "turf-map.toml";
pub const API_URL_ENV: &str = "TURF_API_URL";

/// Contents of `turf-map.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,

    /// None means the request may wait indefinitely
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Resolve configuration: flag > `TURF_API_URL` > config file > default.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>, api_url_flag: Option<String>) -> Result<Self> {
        let file = match path {
            Some(path) => read_file_config(path)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    read_file_config(&default_path)?
                } else {
                    FileConfig::default()
                }
            }
        };

        let api_url = api_url_flag
            .or_else(|| std::env::var(API_URL_ENV).ok().filter(|v| !v.trim().is_empty()))
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            api_url,
            request_timeout: file.request_timeout_secs.map(Duration::from_secs),
        })
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Invalid {}", path.display()))
}
