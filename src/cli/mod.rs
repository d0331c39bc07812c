use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{ConfigLoader, ConfigPaths, CONFIG_ENV, DATA_ENV};

pub mod commands;

use self::commands::{AgendaArgs, ExportArgs};

#[derive(Parser, Debug)]
#[command(
    name = "timelinetui",
    version,
    about = "Keyboard-first terminal timeline of mail, meetings, notes and tasks"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Override the config file location (takes precedence over TIMELINETUI_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the data directory (takes precedence over TIMELINETUI_DATA)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Minimum log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Treat this YYYY-MM-DD date as today (noon)
    #[arg(long, global = true)]
    pub today: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive timeline (default)
    Tui,
    /// Print the day, two-day or week summary for a date
    Agenda(AgendaArgs),
    /// Write the generated sample timeline as JSON
    ExportSample(ExportArgs),
}

/// Where log lines go. The TUI owns the terminal, so it logs to a file.
#[derive(Debug, Clone)]
pub enum LogSink {
    Stderr,
    File(PathBuf),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        env::set_var(CONFIG_ENV, path);
    }
    if let Some(path) = &cli.data_dir {
        env::set_var(DATA_ENV, path);
    }

    let loader = ConfigLoader::discover()?;
    loader.paths().ensure_directories()?;
    let paths = loader.paths().clone();

    let command = cli.command.unwrap_or(Commands::Tui);
    let sink = match command {
        Commands::Tui => LogSink::File(log_file(&paths)),
        _ => LogSink::Stderr,
    };
    init_tracing(&cli.log_level, &sink)
        .with_context(|| format!("initialising logging at level {}", cli.log_level))?;
    let config = loader.load_or_init()?;
    let reference = commands::resolve_reference(cli.today.as_deref(), &config)?;

    match command {
        Commands::Tui => commands::run_tui(&config, &paths, reference),
        Commands::Agenda(args) => {
            let store = commands::load_store(&config, &paths, reference)?;
            let text = commands::render_agenda(&store, &config, reference, &args)?;
            print!("{text}");
            Ok(())
        }
        Commands::ExportSample(args) => commands::export_sample(&config, reference, &args),
    }
}

pub fn log_file(paths: &ConfigPaths) -> PathBuf {
    paths.log_dir.join("timelinetui.log")
}

fn init_tracing(level: &str, sink: &LogSink) -> Result<()> {
    static INIT: OnceCell<()> = OnceCell::new();
    INIT.get_or_try_init(|| -> Result<()> {
        let env_filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
        match sink {
            LogSink::Stderr => fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init(),
            LogSink::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("opening log file {}", path.display()))?;
                fmt()
                    .with_env_filter(env_filter)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .init();
            }
        }
        Ok(())
    })
    .map(|_| ())
}
