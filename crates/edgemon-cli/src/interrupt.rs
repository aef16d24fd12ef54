//! Ctrl-C handling for `edgemon generate`.
//!
//! A dedicated thread runs a current-thread tokio runtime that waits for
//! the interrupt and trips the run's [`StopSignal`]. The sampling loop
//! itself stays synchronous.

use anyhow::{Context, Result};
use edgemon_sensor::StopSignal;

/// Spawn the watcher thread. It lives until the interrupt arrives or the
/// process exits.
pub fn watch(stop: StopSignal) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build interrupt runtime")?;

    std::thread::Builder::new()
        .name("edgemon-interrupt".into())
        .spawn(move || {
            runtime.block_on(async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        tracing::debug!("interrupt received");
                        stop.trigger();
                    }
                    Err(e) => tracing::warn!(error = %e, "cannot listen for interrupt"),
                }
            });
        })
        .context("failed to spawn interrupt watcher")?;

    Ok(())
}
