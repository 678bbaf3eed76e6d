//! strcache - An embeddable in-process string cache
//!
//! Interactive host shell: reads commands from stdin and writes one JSON
//! reply per line to stdout. Logs go to stderr.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use strcache::shell::run_line;
use strcache::{shared, spawn_sweeper_task, CacheEngine, Config};

/// Main entry point for the strcache shell.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the engine with the configured LRU capacity
/// 4. Start the background expiry sweep task
/// 5. Serve commands from stdin until EOF or Ctrl+C
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "strcache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting strcache shell");

    let config = Config::from_env();
    info!(
        "Configuration loaded: lru_capacity={}, sweep_interval={}s",
        config.lru_capacity, config.sweep_interval
    );

    let engine = shared(CacheEngine::from_config(&config).context("Failed to create cache engine")?);
    info!("Cache engine initialized");

    let sweeper = spawn_sweeper_task(engine.clone(), config.sweep_interval);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    info!("End of input, shutting down");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                for reply in run_line(&engine, &config, &line).await {
                    let mut out = serde_json::to_string(&reply)?;
                    out.push('\n');
                    stdout.write_all(out.as_bytes()).await?;
                }
                stdout.flush().await?;
            }
            _ = signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down");
                break;
            }
        }
    }

    sweeper.abort();
    warn!("Sweep task aborted");

    info!("Shutdown complete");
    Ok(())
}
