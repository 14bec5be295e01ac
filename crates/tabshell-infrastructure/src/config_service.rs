//! Loads `ShellConfig` from `config.toml`.

use std::path::Path;

use tabshell_core::config::ShellConfig;
use tabshell_core::error::Result;

use crate::paths::ShellPaths;

/// Overrides `api.base_url` when set.
pub const ENV_API_BASE_URL: &str = "TABSHELL_API_BASE_URL";

pub struct ConfigService;

impl ConfigService {
    /// Loads the config from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the defaults. Environment overrides are applied
    /// last and the result is validated.
    pub fn load(path: Option<&Path>, paths: &ShellPaths) -> Result<ShellConfig> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => paths.config_file()?,
        };

        let config = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            tracing::debug!(path = %path.display(), "Loaded configuration");
            toml::from_str(&content)?
        } else {
            tracing::debug!(path = %path.display(), "No configuration file, using defaults");
            ShellConfig::default()
        };

        let config = Self::apply_env_overrides(config, |key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Applies environment overrides through `lookup` so tests need not touch
    /// the process environment.
    pub fn apply_env_overrides<F>(mut config: ShellConfig, lookup: F) -> ShellConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_API_BASE_URL) {
            config.api.base_url = base_url;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ShellPaths::new(Some(temp_dir.path().to_path_buf()));
        let config = ConfigService::load(None, &paths).unwrap();
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn test_explicit_file_is_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"https://api.example.com\"\ntimeout_secs = 3\n\n[storage]\npath = \"/var/lib/tabshell/session.toml\"\n",
        )
        .unwrap();

        let config = ConfigService::load(Some(&path), &ShellPaths::default()).unwrap();
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(
            config.storage.path.as_deref(),
            Some(Path::new("/var/lib/tabshell/session.toml"))
        );
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[api]\ntimeout_secs = 0\n").unwrap();

        let err = ConfigService::load(Some(&path), &ShellPaths::default()).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_env_override() {
        let config = ConfigService::apply_env_overrides(ShellConfig::default(), |key| {
            (key == ENV_API_BASE_URL).then(|| "https://staging.example.com".to_string())
        });
        assert_eq!(config.api.base_url, "https://staging.example.com");
    }
}
