//! Tallyweb main entry point

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tallyweb_api::start_server;
use tallyweb_config::Config;
use tallyweb_core::{Ledger, MemoryStore, StoreRef};
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "tallyweb")]
#[command(author = "Tallyweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight personal finance ledger with monthly reports", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = Config::load_or_default(&args.config).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load configuration from {}\n{}",
            args.config.display(),
            e.to_details()
        )
    })?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!(
        "Config loaded: listen={}, snapshot={}",
        config.bind_address(),
        config
            .data
            .snapshot_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none (in-memory only)".to_string())
    );

    let rt = Runtime::new()?;

    rt.block_on(async {
        let store: StoreRef = match &config.data.snapshot_file {
            Some(path) => Arc::new(
                MemoryStore::open(path)
                    .await
                    .with_context(|| format!("Failed to open snapshot {}", path.display()))?,
            ),
            None => {
                log::warn!("No snapshot file configured; transactions will not survive a restart");
                Arc::new(MemoryStore::new())
            }
        };

        let ledger = Arc::new(Ledger::new(store, config.reports.clone()));
        start_server(config, ledger).await
    })
}
