use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use nudger_core::{PcgRandom, ReminderConfig, ReminderScheduler, Shutdown};

use crate::logging::{self, DEFAULT_LOG_FILE};
use crate::terminal::TerminalGateway;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Configuration file (JSON, or TOML with a .toml extension)
    #[arg(long, short)]
    pub config: Option<PathBuf>,
    /// Append-only log file
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
    /// Seed for reproducible intervals and message picks
    #[arg(long)]
    pub seed: Option<u64>,
    /// Mirror log lines to stderr
    #[arg(long, short)]
    pub verbose: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let log_file = args.log_file;
    let subscriber = logging::subscriber(&log_file, args.verbose)
        .map_err(|e| format!("cannot open log file {}: {e}", log_file.display()))?;
    let config_path = super::resolve_config_path(args.config);

    tracing::subscriber::with_default(subscriber, || start(&config_path, args.seed))
}

fn start(config_path: &Path, seed: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    info!("Nudger {} starting", env!("CARGO_PKG_VERSION"));

    let config = match ReminderConfig::load(config_path) {
        Ok(config) => {
            info!("Configuration loaded successfully from {}", config_path.display());
            config
        }
        Err(e) => {
            error!("Error loading config: {e}");
            return Err(format!("Failed to start application: {e}").into());
        }
    };

    let shutdown = Shutdown::new();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;
    let listener = shutdown.clone();
    runtime.spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => listener.trigger(),
            Err(e) => eprintln!("cannot listen for Ctrl-C: {e}"),
        }
    });

    let random = match seed {
        Some(seed) => {
            info!("Using fixed random seed {seed}");
            PcgRandom::seeded(seed)
        }
        None => PcgRandom::from_entropy(),
    };
    let gateway = TerminalGateway::spawn(shutdown.clone())?;

    println!("Nudger is running. Press Ctrl-C to stop.");
    let mut scheduler = ReminderScheduler::new(config, gateway, random, shutdown);
    let summary = scheduler.run();

    println!("\nReminder app stopped after {} reminder(s).", summary.cycles);
    runtime.shutdown_background();
    Ok(())
}
