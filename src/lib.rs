// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod payload;
pub mod supervisor;

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::loader::{discover_config_path, load_and_validate};
use crate::config::model::BinariesConfig;
use crate::errors::BinherdError;
use crate::payload::StaticPayload;
use crate::supervisor::Supervisor;

/// Helper binaries compiled into this executable.
///
/// Empty by default; a downstream build replaces this table with real
/// `include_bytes!` entries keyed as `bin/<name>` (see
/// [`StaticPayload`](payload::StaticPayload)).
pub static EMBEDDED_BINARIES: StaticPayload = StaticPayload::empty();

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config discovery + loading
/// - supervisor construction and ordered startup
/// - Ctrl-C handling
/// - teardown of all launched binaries
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = discover_config_path(Path::new(&args.config));
    let cfg = load_and_validate(&config_path)?;

    if args.dry_run {
        print_dry_run(&cfg.binaries);
        return Ok(());
    }

    // A disabled or empty [binaries] section means "feature unavailable",
    // not a fatal error for the host.
    let supervisor = match Supervisor::new(&cfg.binaries, Box::new(EMBEDDED_BINARIES)) {
        Ok(s) => s,
        Err(BinherdError::Config(reason)) => {
            warn!(%reason, "helper binaries unavailable; nothing to supervise");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    supervisor.start_all().await?;

    info!(
        running = supervisor.process_count(),
        "supervisor running; press Ctrl-C to stop"
    );

    tokio::signal::ctrl_c().await?;

    info!("shutdown requested; terminating helper binaries");
    supervisor.cleanup();

    Ok(())
}

/// Simple dry-run output: print the resolved launch plan.
fn print_dry_run(cfg: &BinariesConfig) {
    println!("binherd dry-run");
    println!("  enabled: {}", cfg.enabled);
    if cfg.use_embedded {
        match dirs::cache_dir() {
            Some(root) => println!(
                "  mode: embedded (extracts to {})",
                supervisor::embedded_cache_dir(&root).display()
            ),
            None => println!("  mode: embedded (user cache directory unavailable)"),
        }
    } else {
        println!("  mode: local (bin_path: {})", cfg.bin_path);
    }
    println!("  startup_order ({}):", cfg.startup_order.len());
    for name in &cfg.startup_order {
        println!("    - {name}");
    }
}
