use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::manifest::ExclusionPolicy;

/// Root configuration structure, deserialized from `.license-fetchr/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub manifest: ManifestConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Which manifest entries are shown.
#[derive(Debug, Deserialize)]
pub struct ManifestConfig {
    /// Hide the entry whose identity is `self_identity`. Defaults to `false`.
    #[serde(default)]
    pub exclude_self: bool,
    /// Identity of this tool as it appears in the manifest.
    #[serde(default = "default_self_identity")]
    pub self_identity: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            exclude_self: false,
            self_identity: default_self_identity(),
        }
    }
}

impl ManifestConfig {
    pub fn exclusion_policy(&self) -> ExclusionPolicy {
        ExclusionPolicy {
            self_identity: self.exclude_self.then(|| self.self_identity.clone()),
        }
    }
}

/// HTTP client settings for license downloads.
#[derive(Debug, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_self_identity() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<working_dir>/.license-fetchr/config.toml`
/// 3. `~/.config/license-fetchr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(working_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = working_dir.join(".license-fetchr").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-fetchr")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("parsing config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert!(!cfg.manifest.exclude_self);
        assert_eq!(cfg.manifest.self_identity, "license-fetchr");
        assert_eq!(cfg.fetch.timeout(), Duration::from_secs(10));
        assert!(cfg.fetch.user_agent.starts_with("license-fetchr/"));
        assert!(cfg.manifest.exclusion_policy().self_identity.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str("[manifest]\nexclude_self = true\n").unwrap();
        assert_eq!(
            cfg.manifest.exclusion_policy().self_identity.as_deref(),
            Some("license-fetchr")
        );
        assert_eq!(cfg.fetch.timeout_secs, 10);
    }

    #[test]
    fn test_load_override() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            r#"
[manifest]
exclude_self = true
self_identity = "my-app"

[fetch]
timeout_secs = 3
user_agent = "my-app/2.0"
"#
        )
        .unwrap();
        let cfg = load_config(Path::new("/nonexistent"), Some(f.path())).unwrap();
        assert_eq!(cfg.manifest.self_identity, "my-app");
        assert_eq!(cfg.fetch.timeout(), Duration::from_secs(3));
        assert_eq!(cfg.fetch.user_agent, "my-app/2.0");
    }

    #[test]
    fn test_load_local_config() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_dir = dir.path().join(".license-fetchr");
        std::fs::create_dir_all(&cfg_dir).unwrap();
        std::fs::write(cfg_dir.join("config.toml"), "[fetch]\ntimeout_secs = 1\n").unwrap();

        let cfg = load_config(dir.path(), None).unwrap();
        assert_eq!(cfg.fetch.timeout_secs, 1);
    }

    #[test]
    fn test_invalid_override_is_error() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "[fetch]\ntimeout_secs = \"soon\"\n").unwrap();
        assert!(load_config(Path::new("/nonexistent"), Some(f.path())).is_err());
    }
}
