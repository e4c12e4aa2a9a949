use std::env;

use page_watchdog::Error;
use page_watchdog::PageEventKind;
use page_watchdog::Result;
use page_watchdog::WatchdogConfig;
use page_watchdog::WatcherBuilder;
use tokio::signal::unix::signal;
use tokio::signal::unix::SignalKind;
use tokio::sync::watch;
use tracing::error;
use tracing::info;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<()> {
    init_observability();

    let mut config = WatchdogConfig::new()?;
    if let Some(path) = env::args().nth(1) {
        info!("with_override_config from: {}", &path);
        config = config.with_override_config(&path)?;
    }
    let config = config.validate()?;
    info!(?config, "configuration loaded");

    // Initializing Shutdown Signal
    let (graceful_tx, mut graceful_rx) = watch::channel(());

    let watcher = WatcherBuilder::from_config(config)
        .subscribe(PageEventKind::Update, |_| info!("Page has new scripts"))
        .subscribe(PageEventKind::NoUpdate, |_| info!("Page scripts are unchanged"))
        .subscribe(PageEventKind::Error, |event| {
            if let Some(e) = event.error() {
                warn!("Watcher encountered an error: {}", e);
            }
        })
        .build()
        .await?;

    info!("Application started. Waiting for CTRL+C signal...");
    tokio::spawn(async {
        if let Err(e) = graceful_shutdown(graceful_tx).await {
            error!("Failed to shutdown: {:?}", e);
        }
    });

    if graceful_rx.changed().await.is_err() {
        warn!("shutdown channel closed");
    }
    watcher.stop();

    println!("Exiting program.");
    Ok(())
}

async fn graceful_shutdown(graceful_tx: watch::Sender<()>) -> Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT detected.");
        },
        _ = sigterm.recv() => {
            info!("SIGTERM detected.");
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl+C detected.");
        },
    }

    graceful_tx.send(()).map_err(|e| {
        error!("Failed to send shutdown signal: {}", e);
        Error::Fatal(format!("Failed to send shutdown signal: {}", e))
    })?;

    info!("Shutdown completed");
    Ok(())
}

fn init_observability() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let base_subscriber = tracing_subscriber::fmt::layer().with_filter(filter);
    tracing_subscriber::registry().with(base_subscriber).init();
}
