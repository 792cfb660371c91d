/// What a single invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Print every installed plugin.
    List,
    /// Check every installed plugin against the registry.
    UpgradeAll,
    /// Check one plugin, matched case-insensitively by name.
    UpgradeOne(String),
    /// No action flag given.
    Usage,
}

impl Mode {
    /// `list` takes precedence over `upgrade`; `plugin` only matters with `upgrade`.
    pub fn from_flags(list: bool, upgrade: bool, plugin: Option<String>) -> Self {
        if list {
            return Mode::List;
        }

        if upgrade {
            return match plugin.filter(|name| !name.is_empty()) {
                Some(name) => Mode::UpgradeOne(name),
                None => Mode::UpgradeAll,
            };
        }

        Mode::Usage
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::List => "list",
            Mode::UpgradeAll => "upgrade-all",
            Mode::UpgradeOne(_) => "upgrade-one",
            Mode::Usage => "usage",
        }
    }
}
