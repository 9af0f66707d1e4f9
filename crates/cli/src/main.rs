//! Offline tools for the automatic XP runtime.
//!
//! Run with: `auto-xp <command>`

mod commands;
mod dirs;
mod scenario;

use anyhow::Result;
use clap::Parser;
use commands::{Replay, Table};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Automatic encounter XP tools
#[derive(Parser)]
#[command(name = "auto-xp")]
#[command(about = "Replay combat events and inspect XP rules", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Replay a JSON scenario of host events and print the resulting XP
    Replay(Replay),

    /// Print the level-difference XP table
    Table(Table),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = setup_logging()?;

    match cli.command {
        Command::Replay(cmd) => cmd.execute().await,
        Command::Table(cmd) => cmd.execute(),
    }
}

/// Setup logging to both stderr and file.
///
/// The returned guard flushes the file writer when dropped.
fn setup_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = dirs::log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "auto-xp.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::debug!("Log file: {}/auto-xp.log", log_dir.display());

    Ok(guard)
}
