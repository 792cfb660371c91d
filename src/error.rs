use std::io;

use thiserror::Error;

/// Failures while locating or reading installed plugins.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("failed to get home directory")]
    HomeDirUnavailable,

    #[error("failed to read plugin directory: {0}")]
    ReadDir(#[source] io::Error),

    #[error("failed to read package.json: {0}")]
    ReadDescriptor(#[source] io::Error),

    #[error("failed to parse package.json: {0}")]
    ParseDescriptor(#[source] serde_json::Error),
}

/// Failures talking to the package registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("npm registry returned status {0}")]
    Status(u16),

    #[error("invalid registry url: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Body(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum UpgradeError {
    #[error("failed to check latest version: {0}")]
    LatestVersion(#[source] RegistryError),
}

/// Fatal command outcomes. `Display` is the line written to stderr.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Error: {0}")]
    Environment(#[source] PluginError),

    #[error("Error discovering plugins: {0}")]
    Discovery(#[source] PluginError),

    #[error("Plugin '{0}' not found.")]
    PluginNotFound(String),

    #[error("Failed to upgrade {name}: {source}")]
    UpgradeFailed {
        name: String,
        #[source]
        source: UpgradeError,
    },

    #[error("Error writing output: {0}")]
    Output(#[from] io::Error),
}
