use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::errors::ConfigError;

pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "http://localhost:8080/query";
pub const ENDPOINT_ENV: &str = "PROJECTIVITY_GRAPHQL_ENDPOINT";

const APP_DIR: &str = "projectivity";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub graphql_endpoint: String,
    /// Applied to every gateway request; submissions have no other timeout.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graphql_endpoint: DEFAULT_GRAPHQL_ENDPOINT.into(),
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Replaces the endpoint when `endpoint` holds a non-blank value.
    pub fn with_endpoint_override(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
        {
            self.graphql_endpoint = endpoint;
        }
        self
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manager rooted in the platform config directory.
    pub fn new() -> Result<Self, ConfigError> {
        let base = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self::with_base_dir(base)
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Reads the stored file without environment overrides.
    pub fn load_file(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    /// Stored configuration with `PROJECTIVITY_GRAPHQL_ENDPOINT` applied.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let config = self.load_file()?;
        let config = config.with_endpoint_override(env::var(ENDPOINT_ENV).ok());
        tracing::debug!(endpoint = %config.graphql_endpoint, "Configuration loaded");
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load_file().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.graphql_endpoint, DEFAULT_GRAPHQL_ENDPOINT);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().join("nested")).unwrap();
        let config = Config {
            graphql_endpoint: "https://api.example.test/query".into(),
            request_timeout_secs: 5,
        };
        manager.save(&config).unwrap();
        assert!(manager.path().exists());
        assert!(!tmp_path(manager.path()).exists());
        assert_eq!(manager.load_file().unwrap(), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "request_timeout_secs": 12 }"#).unwrap();
        let config = manager.load_file().unwrap();
        assert_eq!(config.request_timeout_secs, 12);
        assert_eq!(config.graphql_endpoint, DEFAULT_GRAPHQL_ENDPOINT);
    }

    #[test]
    fn malformed_file_is_a_serde_error() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "{ not json").unwrap();
        assert!(matches!(manager.load_file(), Err(ConfigError::Serde(_))));
    }

    #[test]
    fn endpoint_override_ignores_blank_values() {
        let config = Config::default().with_endpoint_override(Some("  ".into()));
        assert_eq!(config.graphql_endpoint, DEFAULT_GRAPHQL_ENDPOINT);

        let config = Config::default().with_endpoint_override(Some("http://gw:9000/query".into()));
        assert_eq!(config.graphql_endpoint, "http://gw:9000/query");
    }

    #[test]
    fn timeout_is_never_zero() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
