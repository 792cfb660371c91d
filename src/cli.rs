use clap::Parser;

use crate::model::mode::Mode;

#[derive(Debug, Parser)]
#[command(
    name = "claude-plugins",
    version,
    about = "List installed Claude Code plugins and check them for updates"
)]
pub struct Cli {
    /// List all installed Claude Code plugins
    #[arg(long)]
    pub list: bool,

    /// Upgrade all plugins to latest versions
    #[arg(long)]
    pub upgrade: bool,

    /// Specific plugin name to upgrade
    #[arg(long, value_name = "NAME")]
    pub plugin: Option<String>,
}

impl Cli {
    pub fn mode(self) -> Mode {
        Mode::from_flags(self.list, self.upgrade, self.plugin)
    }
}
