// src/supervisor/waiter.rs

//! Per-process exit observer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::process::Child;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Spawn the background waiter for one launched binary.
///
/// This is fire-and-forget: the task owns the `Child`, blocks until the
/// process exits (naturally or because the supervisor signalled `kill_rx`),
/// records the outcome, and sets `exit_observed`. It never restarts the
/// process and never reports back into the startup control flow — it exists
/// purely so the launch path is not blocked on processes that are expected to
/// run for the application's entire lifetime.
pub fn spawn_waiter(
    name: String,
    mut child: Child,
    kill_rx: oneshot::Receiver<()>,
    exit_observed: Arc<AtomicBool>,
) {
    tokio::spawn(async move {
        tokio::select! {
            status_res = child.wait() => {
                match status_res {
                    Ok(status) => {
                        let code = status.code().unwrap_or(-1);
                        if status.success() {
                            info!(binary = %name, "binary exited cleanly");
                        } else {
                            warn!(
                                binary = %name,
                                exit_code = code,
                                "binary exited with failure"
                            );
                        }
                    }
                    Err(err) => {
                        warn!(binary = %name, error = %err, "failed to wait on binary");
                    }
                }
            }

            res = kill_rx => {
                match res {
                    Ok(()) => {
                        info!(binary = %name, "termination requested; killing binary");
                        if let Err(err) = child.kill().await {
                            warn!(
                                binary = %name,
                                error = %err,
                                "failed to kill binary (it may have already exited)"
                            );
                        }
                    }
                    Err(_) => {
                        // Supervisor dropped without explicit cleanup; wait
                        // for a natural exit. kill_on_drop(true) covers the
                        // runtime shutting down underneath us.
                        debug!(binary = %name, "kill channel closed without request");
                        if let Err(err) = child.wait().await {
                            warn!(binary = %name, error = %err, "failed to wait on binary");
                        }
                    }
                }
            }
        }

        exit_observed.store(true, Ordering::SeqCst);
        debug!(binary = %name, "exit observed");
    });
}
