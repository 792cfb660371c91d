pub mod discover;
pub mod installer;
pub mod manifest;
pub mod paths;
pub mod registry;

pub use discover::discover_plugins;
pub use installer::{PluginInstaller, UpgradeCheck, check_for_update};
pub use manifest::PluginInfo;
pub use registry::RegistryClient;
