use std::io::Write;
use std::path::PathBuf;

use clap::CommandFactory;

use crate::cli::Cli;
use crate::error::CommandError;
use crate::model::config::AppConfig;
use crate::model::mode::Mode;
use crate::plugin::{
    PluginInfo, PluginInstaller, RegistryClient, UpgradeCheck, check_for_update, discover_plugins,
};

/// Runs one command, writing the report to `out` and diagnostics to `err`.
pub struct App<'a> {
    config: AppConfig,
    registry: RegistryClient,
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
}

impl<'a> App<'a> {
    pub fn new(
        config: AppConfig,
        registry: RegistryClient,
        out: &'a mut dyn Write,
        err: &'a mut dyn Write,
    ) -> Self {
        Self {
            config,
            registry,
            out,
            err,
        }
    }

    pub fn run(&mut self, mode: &Mode) -> Result<(), CommandError> {
        tracing::info!(mode = mode.label(), "running command");

        match mode {
            Mode::List => self.list_plugins(),
            Mode::UpgradeAll => self.upgrade_all_plugins(),
            Mode::UpgradeOne(name) => self.upgrade_plugin(name),
            Mode::Usage => self.print_usage(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────

    fn list_plugins(&mut self) -> Result<(), CommandError> {
        let (plugin_dir, plugins) = self.discover()?;

        if plugins.is_empty() {
            writeln!(self.out, "No Claude Code plugins found.")?;
            writeln!(self.out, "Plugin directory: {}", plugin_dir.display())?;
            return Ok(());
        }

        writeln!(self.out, "Installed Claude Code plugins:")?;
        writeln!(self.out, "-------------------------------")?;
        for plugin in &plugins {
            writeln!(self.out, "Name:    {}", plugin.name)?;
            writeln!(self.out, "Version: {}", plugin.version)?;
            writeln!(self.out, "Path:    {}", plugin.path.display())?;
            writeln!(self.out)?;
        }

        Ok(())
    }

    fn upgrade_all_plugins(&mut self) -> Result<(), CommandError> {
        let (_, plugins) = self.discover()?;

        if plugins.is_empty() {
            writeln!(self.out, "No Claude Code plugins found to upgrade.")?;
            return Ok(());
        }

        writeln!(
            self.out,
            "Found {} plugin(s) to check for updates...",
            plugins.len()
        )?;
        writeln!(self.out)?;

        for plugin in &plugins {
            writeln!(self.out, "Checking {}...", plugin.name)?;
            match self.check_and_report(plugin) {
                Ok(()) => {}
                Err(err @ CommandError::UpgradeFailed { .. }) => {
                    tracing::warn!(name = %plugin.name, %err, "upgrade check failed");
                    writeln!(self.err, "{err}")?;
                }
                Err(err) => return Err(err),
            }
            writeln!(self.out)?;
        }

        Ok(())
    }

    fn upgrade_plugin(&mut self, name: &str) -> Result<(), CommandError> {
        let (_, plugins) = self.discover()?;

        let wanted = name.to_lowercase();
        let Some(plugin) = plugins
            .iter()
            .find(|plugin| plugin.name.to_lowercase() == wanted)
        else {
            return Err(CommandError::PluginNotFound(name.to_string()));
        };

        writeln!(self.out, "Upgrading {}...", plugin.name)?;
        self.check_and_report(plugin)
    }

    fn print_usage(&mut self) -> Result<(), CommandError> {
        writeln!(self.out, "{}", Cli::command().render_help())?;
        Ok(())
    }

    // ── Helpers ──────────────────────────────────────────────────

    fn discover(&mut self) -> Result<(PathBuf, Vec<PluginInfo>), CommandError> {
        let plugin_dir = self
            .config
            .plugin_dir()
            .map_err(CommandError::Environment)?;
        let discovery = discover_plugins(&plugin_dir).map_err(CommandError::Discovery)?;

        for skipped in &discovery.skipped {
            writeln!(
                self.err,
                "Warning: failed to read plugin info for {}: {}",
                skipped.dir_name, skipped.error
            )?;
        }

        Ok((plugin_dir, discovery.plugins))
    }

    fn check_and_report(&mut self, plugin: &PluginInfo) -> Result<(), CommandError> {
        writeln!(self.out, "  Current version: {}", plugin.version)?;

        let check = check_for_update(plugin, &self.registry).map_err(|source| {
            CommandError::UpgradeFailed {
                name: plugin.name.clone(),
                source,
            }
        })?;

        match check {
            UpgradeCheck::NoInformation => writeln!(
                self.out,
                "  No update information available (plugin may not be in registry)"
            )?,
            UpgradeCheck::UpToDate => writeln!(self.out, "  Already up to date!")?,
            UpgradeCheck::Available { latest } => {
                writeln!(self.out, "  Latest version: {latest}")?;
                for line in PluginInstaller::install(plugin, &latest) {
                    writeln!(self.out, "  {line}")?;
                }
            }
        }

        Ok(())
    }
}
