use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::PluginError;
use crate::plugin::manifest::{self, DESCRIPTOR_FILE, PluginInfo};

/// A plugin folder whose descriptor exists but could not be read.
#[derive(Debug)]
pub struct SkippedPlugin {
    pub dir_name: String,
    pub error: PluginError,
}

#[derive(Debug, Default)]
pub struct Discovery {
    pub plugins: Vec<PluginInfo>,
    pub skipped: Vec<SkippedPlugin>,
}

/// Scan the immediate subdirectories of `plugin_dir` for `package.json`.
///
/// A missing directory means nothing is installed yet and yields an empty
/// result. Entries come back in directory listing order.
pub fn discover_plugins(plugin_dir: &Path) -> Result<Discovery, PluginError> {
    let mut discovery = Discovery::default();

    let entries = match fs::read_dir(plugin_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(?plugin_dir, "plugin directory does not exist");
            return Ok(discovery);
        }
        Err(err) => return Err(PluginError::ReadDir(err)),
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?plugin_dir, %err, "skipping unreadable directory entry");
                continue;
            }
        };

        // Symlinks are not followed; only real subdirectories count as plugins.
        match entry.file_type() {
            Ok(file_type) if file_type.is_dir() => {}
            Ok(_) => continue,
            Err(err) => {
                tracing::debug!(path = ?entry.path(), %err, "skipping entry with unknown type");
                continue;
            }
        }

        let plugin_path = entry.path();
        let descriptor = plugin_path.join(DESCRIPTOR_FILE);
        if !descriptor.exists() {
            continue;
        }

        match manifest::read_plugin_info(&descriptor, &plugin_path) {
            Ok(info) => discovery.plugins.push(info),
            Err(error) => {
                tracing::warn!(?descriptor, %error, "skipping plugin");
                discovery.skipped.push(SkippedPlugin {
                    dir_name: entry.file_name().to_string_lossy().into_owned(),
                    error,
                });
            }
        }
    }

    tracing::info!(
        ?plugin_dir,
        found = discovery.plugins.len(),
        skipped = discovery.skipped.len(),
        "plugin discovery finished"
    );

    Ok(discovery)
}
