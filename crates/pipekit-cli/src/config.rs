//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it — it only receives
//! the resolved [`RepoIdentity`].
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `--config <FILE>` (an unreadable explicit file is an error)
//! 3. `.pipekit.toml` in the project directory
//! 4. The user-level config file (`directories` config dir)
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use pipekit_core::domain::RepoIdentity;

/// Project-local configuration file name.
pub const PROJECT_CONFIG_FILE: &str = ".pipekit.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Which remote catalog components come from.
    pub repository: RepositoryConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    pub remote_url: String,
    pub repo_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            remote_url: "https://github.com/pipekit/components.git".into(),
            repo_path: "pipekit".into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { no_color: false }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path the user passed via `--config` (or `None`
    /// to search the default locations).
    pub fn load(config_file: Option<&PathBuf>, project_dir: &Path) -> anyhow::Result<Self> {
        if let Some(path) = config_file {
            // an explicitly named file must exist and parse
            return Self::from_file(path);
        }

        let project_config = project_dir.join(PROJECT_CONFIG_FILE);
        if project_config.is_file() {
            return Self::from_file(&project_config);
        }

        let user_config = Self::config_path();
        if user_config.is_file() {
            return Self::from_file(&user_config);
        }

        Ok(Self::default())
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context as _;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Path to the user-level configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.pipekit.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "pipekit", "pipekit")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE))
    }

    /// The repository identity passed through to the core services.
    pub fn repo_identity(&self) -> RepoIdentity {
        RepoIdentity::new(&self.repository.remote_url, &self.repository.repo_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_shared_catalog() {
        let cfg = AppConfig::default();
        assert!(cfg.repository.remote_url.contains("pipekit"));
        assert_eq!(cfg.repository.repo_path, "pipekit");
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn load_without_any_file_returns_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load(None, tmp.path()).unwrap();
        assert_eq!(cfg.repository.repo_path, "pipekit");
    }

    #[test]
    fn project_config_file_is_picked_up() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(PROJECT_CONFIG_FILE),
            "[repository]\nremote_url = \"https://example.com/own.git\"\nrepo_path = \"own\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(None, tmp.path()).unwrap();
        assert_eq!(cfg.repository.remote_url, "https://example.com/own.git");
        assert_eq!(cfg.repository.repo_path, "own");
    }

    #[test]
    fn partial_config_keeps_defaults_for_the_rest() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(PROJECT_CONFIG_FILE), "[output]\nno_color = true\n")
            .unwrap();

        let cfg = AppConfig::load(None, tmp.path()).unwrap();
        assert!(cfg.output.no_color);
        assert_eq!(cfg.repository.repo_path, "pipekit");
    }

    #[test]
    fn explicit_missing_config_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing), tmp.path()).is_err());
    }

    #[test]
    fn config_path_is_non_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
