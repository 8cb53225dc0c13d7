//! Bookshelf - interactive library management console
//!
//! Drives a `RecordStore` from a numbered menu on stdin/stdout. Logs go to
//! stderr so they never interleave with the menu.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use bookshelf_engine::RecordStore;

mod config;
mod session;

use session::Session;

/// Bookshelf - in-memory book catalogue with title and ISBN lookup
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ISBN hash buckets (overrides the config file)
    #[arg(short, long)]
    buckets: Option<usize>,

    /// Remove deleted books from the title and insertion-order indexes too
    #[arg(long)]
    cascade_deletes: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let mut store_config = config::load(args.config.as_deref())?;
    config::apply_overrides(&mut store_config, args.buckets, args.cascade_deletes);
    let store = RecordStore::with_config(&store_config)?;

    info!("Starting bookshelf v{}", env!("CARGO_PKG_VERSION"));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(store, stdin.lock(), stdout.lock());
    session.run()?;

    let stats = session.stats().clone();
    let store = session.into_store();
    info!(
        "Session ended after {} commands ({} invalid), {} books indexed by ISBN",
        stats.total_commands,
        stats.invalid_commands,
        store.len()
    );

    Ok(())
}
