use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::PluginError;

pub const DESCRIPTOR_FILE: &str = "package.json";

/// One installed plugin, as read from its `package.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
    pub path: PathBuf,
}

/// The subset of `package.json` we care about. Fields that are missing or
/// not strings decode as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub name: Option<String>,
    pub version: Option<String>,
}

impl PackageDescriptor {
    pub fn parse(raw: &str) -> Result<Self, PluginError> {
        // `null` decodes as a descriptor with no fields.
        let fields: Map<String, Value> = serde_json::from_str::<Option<Map<String, Value>>>(raw)
            .map_err(PluginError::ParseDescriptor)?
            .unwrap_or_default();

        Ok(Self {
            name: string_field(&fields, "name"),
            version: string_field(&fields, "version"),
        })
    }

    pub fn into_plugin_info(self, plugin_dir: &Path) -> PluginInfo {
        PluginInfo {
            name: self.name.unwrap_or_default(),
            version: self.version.unwrap_or_default(),
            path: plugin_dir.to_path_buf(),
        }
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Invalid UTF-8 in the descriptor is replaced with U+FFFD rather than rejected.
pub fn read_plugin_info(
    descriptor_path: &Path,
    plugin_dir: &Path,
) -> Result<PluginInfo, PluginError> {
    let bytes = fs::read(descriptor_path).map_err(PluginError::ReadDescriptor)?;
    let raw = String::from_utf8_lossy(&bytes);
    Ok(PackageDescriptor::parse(&raw)?.into_plugin_info(plugin_dir))
}
