use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PluginError;
use crate::plugin::paths;
use crate::plugin::registry::DEFAULT_REGISTRY_URL;

const DEFAULTS: &str = include_str!("../../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub plugins: PluginsConfig,
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    pub log_filter: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PluginsConfig {
    /// Overrides the per-OS plugin directory when non-empty.
    pub dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    pub url: String,
}

impl AppConfig {
    /// Load configuration with layering: defaults → user config.
    pub fn load() -> Result<Self> {
        let user_path = directories::ProjectDirs::from("", "", "claude-plugins")
            .map(|dirs| dirs.config_dir().join("config.toml"));

        match user_path {
            Some(path) if path.exists() => Self::load_with(Some(&path)),
            _ => Self::load_with(None),
        }
    }

    pub fn load_with(user_path: Option<&Path>) -> Result<Self> {
        let mut merged: toml::Table = toml::from_str(DEFAULTS)?;

        if let Some(path) = user_path {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let user: toml::Table = toml::from_str(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            merge_tables(&mut merged, user);
        }

        Ok(toml::Value::Table(merged).try_into()?)
    }

    /// Plugin directory to scan: the configured override, or the per-OS default.
    pub fn plugin_dir(&self) -> Result<PathBuf, PluginError> {
        if self.plugins.dir.trim().is_empty() {
            return paths::resolve_plugin_dir();
        }
        paths::expand_tilde(Path::new(&self.plugins.dir))
    }

    pub fn registry_url(&self) -> &str {
        if self.registry.url.trim().is_empty() {
            DEFAULT_REGISTRY_URL
        } else {
            &self.registry.url
        }
    }
}

/// Merge `overlay` into `base`; nested tables merge key by key, everything else is replaced.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let config = AppConfig::load_with(None).unwrap();
        assert_eq!(config.general.log_filter, "claude_plugins=info");
        assert_eq!(config.plugins.dir, "");
        assert_eq!(config.registry_url(), DEFAULT_REGISTRY_URL);
    }

    #[test]
    fn user_config_overrides_only_given_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[registry]\nurl = \"http://localhost:4873\"\n").unwrap();

        let config = AppConfig::load_with(Some(&path)).unwrap();
        assert_eq!(config.registry_url(), "http://localhost:4873");
        assert_eq!(config.general.log_filter, "claude_plugins=info");
        assert_eq!(config.plugins.dir, "");
    }

    #[test]
    fn invalid_user_config_names_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[registry\nurl = ").unwrap();

        let err = AppConfig::load_with(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn plugin_dir_override_is_used() {
        let mut config = AppConfig::load_with(None).unwrap();
        config.plugins.dir = "/srv/claude/extensions".to_string();
        assert_eq!(
            config.plugin_dir().unwrap(),
            PathBuf::from("/srv/claude/extensions")
        );
    }

    #[test]
    fn empty_registry_url_uses_default() {
        let mut config = AppConfig::load_with(None).unwrap();
        config.registry.url = "  ".to_string();
        assert_eq!(config.registry_url(), DEFAULT_REGISTRY_URL);
    }

    #[test]
    fn merge_replaces_scalars_and_recurses_into_tables() {
        let mut base: toml::Table = toml::from_str("a = 1\n[t]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Table = toml::from_str("a = 5\n[t]\ny = 3\n").unwrap();
        merge_tables(&mut base, overlay);

        assert_eq!(base["a"].as_integer(), Some(5));
        assert_eq!(base["t"]["x"].as_integer(), Some(1));
        assert_eq!(base["t"]["y"].as_integer(), Some(3));
    }
}
