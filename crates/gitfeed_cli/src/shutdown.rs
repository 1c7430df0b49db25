use console::Term;

/// Wait for the first Ctrl+C, then arm a force-quit on a second one.
///
/// Returning from this future means a graceful shutdown was requested;
/// the caller finishes the in-flight tick before exiting. A second
/// Ctrl+C while that drain is underway terminates the process.
pub(crate) async fn wait_for_shutdown() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to install Ctrl+C handler");
        return;
    }

    let is_tty = Term::stdout().is_term();
    if is_tty {
        eprintln!("\n\nShutdown requested, finishing current tick...");
        eprintln!("Press Ctrl+C again to force quit.");
    } else {
        tracing::warn!("Shutdown requested, finishing current tick");
    }

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            if is_tty {
                eprintln!("Force quit!");
            }
            std::process::exit(130);
        }
    });
}
