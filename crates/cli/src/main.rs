//! FitCoach CLI - sign in and manage workout plans from the terminal

mod commands;
mod config;
mod env;
mod logging;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::{Commands, Session};
use fitcoach_session::AuthService;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{Level, debug, error};

#[derive(Parser)]
#[command(name = "fitcoach")]
#[command(about = "Sign in to FitCoach and manage workout plans")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Directory holding the session file, config and logs
    #[arg(short = 'd', long, global = true, env = "FITCOACH_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Configuration file (defaults to <state dir>/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Disable file logging (only log to stderr)
    #[arg(long, global = true)]
    no_file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let state_dir = cli.state_dir.unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fitcoach")
    });
    logging::init_logging(cli.log_level.into(), &state_dir, cli.no_file_log)?;
    debug!(state_dir = %state_dir.display(), "Starting FitCoach CLI");

    let auth_config = config::load_auth_config(cli.config.as_deref(), &state_dir)?;
    let env = Rc::new(env::FileEnvironment::open(&state_dir));
    let auth = Rc::new(AuthService::new(auth_config, env.clone())?);
    let session = Session { env, auth };

    if let Err(e) = cli.command.execute(&session).await {
        error!("Command failed: {e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}
