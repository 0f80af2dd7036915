//! # Roster
//!
//! Console entry point: loads configuration, builds the DI module and runs
//! the directory walk-through until it finishes or a shutdown signal arrives.

use roster_app::demo::run_demo;
use roster_app::di::{build_module, ServiceResolver};
use roster_config::ConfigLoader;
use roster_core::RosterResult;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    init_logging();

    info!("Starting Roster...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        error!("Application error: {} (root cause: {})", e, e.root_cause());
        std::process::exit(1);
    }
}

async fn run() -> RosterResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    info!("Environment: {}", config.app.environment);
    info!("Directory API: {}", config.api.base_url);

    let module = build_module(&config)?;
    let directory = module.directory_service();

    let cancel = CancellationToken::new();
    let shutdown = tokio::spawn(cancel_on_shutdown(cancel.clone()));

    let mut stdout = std::io::stdout().lock();
    let result = run_demo(directory.as_ref(), &cancel, &mut stdout).await;
    shutdown.abort();

    if let Err(e) = &result {
        if e.is_cancelled() {
            warn!("Interrupted before the directory walk-through finished");
            return Ok(());
        }
    }
    result
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,roster=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn cancel_on_shutdown(cancel: CancellationToken) {
    shutdown_signal().await;
    cancel.cancel();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, cancelling outstanding requests...");
        }
        () = terminate => {
            info!("Received terminate signal, cancelling outstanding requests...");
        }
    }
}
