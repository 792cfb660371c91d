mod app;
mod cli;
mod error;
mod model;
mod plugin;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use app::App;
use cli::Cli;
use model::config::AppConfig;
use plugin::RegistryClient;

fn main() -> Result<ExitCode> {
    let mode = Cli::parse().mode();
    let config = AppConfig::load()?;

    let _guard = init_logging(&config);
    tracing::info!("claude-plugins starting");

    let registry = RegistryClient::new(config.registry_url())?;

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();
    let result = App::new(config, registry, &mut stdout, &mut stderr).run(&mode);

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::error!(mode = mode.label(), %err, "command failed");
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Log to a daily file (never stdout). Logging is skipped if the log
/// directory cannot be created.
fn init_logging(config: &AppConfig) -> Option<WorkerGuard> {
    let log_dir = directories::ProjectDirs::from("", "", "claude-plugins")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("claude-plugins"));
    std::fs::create_dir_all(&log_dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "claude-plugins.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(config.general.log_filter.as_str())
        .init();

    Some(guard)
}
