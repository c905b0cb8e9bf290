//! `config.toml` loading

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use logdeck_client::DEFAULT_BACKEND_URL;
use serde::Deserialize;

const DEFAULT_TICK_RATE_MS: u64 = 250;

/// Settings from `config.toml`; keys left out keep their defaults
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the analysis backend
    pub backend_url: String,
    /// Interval between UI ticks
    pub tick_rate_ms: u64,
    /// Per-request timeout, 0 for none
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            request_timeout_secs: 0,
        }
    }
}

impl Config {
    /// `<config_dir>/logdeck/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("logdeck").join("config.toml"))
    }

    /// Load from `path`, or from the default location when `path` is None.
    /// A missing default file yields defaults; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    tracing::debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config("backend_url = \"http://analysis:8080\"\n");
        let config = Config::load(Some(file.path())).unwrap();

        assert_eq!(config.backend_url, "http://analysis:8080");
        assert_eq!(config.tick_rate_ms, DEFAULT_TICK_RATE_MS);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_timeout_and_tick_rate() {
        let file = write_config("tick_rate_ms = 100\nrequest_timeout_secs = 30\n");
        let config = Config::load(Some(file.path())).unwrap();

        assert_eq!(config.tick_rate(), Duration::from_millis(100));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let file = write_config("tick_rate_ms = \"fast\"\n");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid config"));
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
