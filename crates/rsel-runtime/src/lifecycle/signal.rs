use tokio_util::sync::CancellationToken;

/// Wait for Ctrl-C (SIGINT) or SIGTERM, then cancel `cancel`.
///
/// If the handlers cannot be installed the run simply cannot be interrupted;
/// this is logged and the function waits on the token instead.
pub async fn wait_for_signal(cancel: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                rs_warn!(sys, error = %e, "cannot listen for SIGTERM");
                cancel.cancelled().await;
                return;
            }
        };
        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                if let Err(e) = res {
                    rs_warn!(sys, error = %e, "cannot listen for Ctrl-C");
                    cancel.cancelled().await;
                    return;
                }
                rs_info!(sys, signal = "SIGINT", "received signal, cancelling run");
            }
            _ = sigterm.recv() => {
                rs_info!(sys, signal = "SIGTERM", "received signal, cancelling run");
            }
            _ = cancel.cancelled() => return,
        }
    }
    #[cfg(not(unix))]
    {
        tokio::select! {
            res = tokio::signal::ctrl_c() => {
                if let Err(e) = res {
                    rs_warn!(sys, error = %e, "cannot listen for Ctrl-C");
                    cancel.cancelled().await;
                    return;
                }
                rs_info!(sys, "received Ctrl-C, cancelling run");
            }
            _ = cancel.cancelled() => return,
        }
    }
    cancel.cancel();
}
