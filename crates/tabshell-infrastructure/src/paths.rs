//! Path management for TabShell configuration and session files.
//!
//! ```text
//! ~/.config/tabshell/          # Config directory (platform dependent)
//! ├── config.toml              # Application configuration
//! └── session.toml             # Durable session keys
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "tabshell";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for tabshell_core::ShellError {
    fn from(err: PathError) -> Self {
        tabshell_core::ShellError::config(err.to_string())
    }
}

/// Resolves where TabShell keeps its files.
///
/// A base override (tests, portable installs) replaces the platform config
/// directory entirely.
#[derive(Debug, Clone, Default)]
pub struct ShellPaths {
    base_override: Option<PathBuf>,
}

impl ShellPaths {
    pub fn new(base_override: Option<PathBuf>) -> Self {
        Self { base_override }
    }

    /// `~/.config/tabshell` on Linux, the platform equivalent elsewhere.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_override {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn session_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("session.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_replaces_config_dir() {
        let paths = ShellPaths::new(Some(PathBuf::from("/tmp/tabshell-test")));
        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/tabshell-test/config.toml")
        );
        assert_eq!(
            paths.session_file().unwrap(),
            PathBuf::from("/tmp/tabshell-test/session.toml")
        );
    }
}
