use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::PluginError;

const APP_DIR: &str = "Claude Code";
const PLUGIN_SUBDIR: &str = "extensions";

/// Plugin storage directory for `os` (as in `std::env::consts::OS`).
///
/// `app_data` is only consulted on Windows; `None` or an empty value falls
/// back to `<home>/AppData/Roaming`.
pub fn plugin_dir_for(os: &str, home: &Path, app_data: Option<OsString>) -> PathBuf {
    match os {
        "macos" => home
            .join("Library")
            .join("Application Support")
            .join(APP_DIR)
            .join(PLUGIN_SUBDIR),
        "linux" => home.join(".config").join("claude-code").join(PLUGIN_SUBDIR),
        "windows" => {
            let app_data = app_data
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| home.join("AppData").join("Roaming"));
            app_data.join(APP_DIR).join(PLUGIN_SUBDIR)
        }
        _ => home.join(".claude-code").join(PLUGIN_SUBDIR),
    }
}

/// Resolve the plugin directory for the running host. Does not check that it exists.
pub fn resolve_plugin_dir() -> Result<PathBuf, PluginError> {
    let home = home_dir().ok_or(PluginError::HomeDirUnavailable)?;
    Ok(plugin_dir_for(env::consts::OS, &home, env::var_os("APPDATA")))
}

pub fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}

pub fn expand_tilde(path: &Path) -> Result<PathBuf, PluginError> {
    let text = path.to_string_lossy();
    if !text.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home_dir().ok_or(PluginError::HomeDirUnavailable)?;
    Ok(PathBuf::from(text.replacen('~', &home.to_string_lossy(), 1)))
}
