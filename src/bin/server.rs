//! RosterDB Server Binary
//!
//! Opens the record files, binds the TCP listener and serves until SIGINT
//! or SIGTERM.

use std::process::ExitCode;
use std::sync::Arc;
use std::thread;

use clap::Parser;
use rosterdb::network::{Server, Shutdown};
use rosterdb::{Config, Dispatcher};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use tracing_subscriber::{fmt, EnvFilter};

/// RosterDB Server
#[derive(Parser, Debug)]
#[command(name = "rosterdb-server")]
#[command(about = "Threaded TCP server for species and trainer records")]
#[command(version)]
struct Args {
    /// TCP port to listen on
    #[arg(short, long)]
    port: u16,

    /// Species catalog file (read-only)
    #[arg(short = 'm', long = "species")]
    species: String,

    /// Trainer file (created if missing)
    #[arg(short = 't', long = "trainers")]
    trainers: String,

    /// Request audit log file
    #[arg(short = 'l', long = "log")]
    log: String,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rosterdb=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("RosterDB Server v{}", rosterdb::VERSION);
    tracing::info!("Species catalog: {}", args.species);
    tracing::info!("Trainer file: {}", args.trainers);
    tracing::info!("Audit log: {}", args.log);

    // Build config from args
    let config = Config::builder()
        .listen_addr(format!("{}:{}", args.host, args.port))
        .species_path(&args.species)
        .trainer_path(&args.trainers)
        .log_path(&args.log)
        .build();

    let dispatcher = match Dispatcher::open(&config) {
        Ok(d) => Arc::new(d),
        Err(e) => {
            tracing::error!("Failed to open record files: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let server = match Server::bind(&config, dispatcher) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = install_signal_handler(server.shutdown_handle()) {
        tracing::error!("Failed to install signal handler: {}", e);
        return ExitCode::FAILURE;
    }

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}

/// Trigger shutdown on the first SIGINT/SIGTERM
fn install_signal_handler(shutdown: Shutdown) -> std::io::Result<()> {
    let mut signals = Signals::new([SIGINT, SIGTERM])?;

    thread::Builder::new()
        .name("signal".to_string())
        .spawn(move || {
            if let Some(sig) = signals.forever().next() {
                tracing::info!("Received signal {}, shutting down...", sig);
                shutdown.trigger();
            }
        })?;

    Ok(())
}
