use crate::error::UpgradeError;
use crate::plugin::manifest::PluginInfo;
use crate::plugin::registry::RegistryClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeCheck {
    NoInformation,
    UpToDate,
    Available { latest: String },
}

/// Compare the installed version against the registry's latest tag.
///
/// Versions are compared as plain strings, not as semver.
pub fn check_for_update(
    plugin: &PluginInfo,
    registry: &RegistryClient,
) -> Result<UpgradeCheck, UpgradeError> {
    let latest = registry
        .latest_version(&plugin.name)
        .map_err(UpgradeError::LatestVersion)?;

    Ok(match latest {
        None => UpgradeCheck::NoInformation,
        Some(latest) if latest == plugin.version => UpgradeCheck::UpToDate,
        Some(latest) => UpgradeCheck::Available { latest },
    })
}

#[derive(Debug)]
pub struct PluginInstaller;

impl PluginInstaller {
    /// Report what installing `version` of `plugin` would do. Nothing is
    /// downloaded or written.
    pub fn install(plugin: &PluginInfo, version: &str) -> Vec<String> {
        tracing::info!(
            name = %plugin.name,
            from = %plugin.version,
            to = version,
            "upgrade available, install not performed"
        );

        vec![
            "Upgrade functionality would be implemented here".to_string(),
            "(downloading and installing new version)".to_string(),
        ]
    }
}
