//! Logging setup
//!
//! The shell owns the terminal, so log records go to a file under the
//! config root instead of stderr.

use crate::error::Result;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file created inside the config root
pub const LOG_FILE_NAME: &str = "wapi.log";

/// Install the global subscriber writing to `log_path`.
///
/// `RUST_LOG` takes precedence over `verbose`. Calling this twice keeps the
/// first subscriber.
pub fn init_logging(log_path: &Path, verbose: bool) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let default_filter = if verbose { "wapi=debug" } else { "wapi=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_level(true),
        )
        .try_init();

    if installed.is_ok() {
        tracing::info!("wapi logging initialized at {}", log_path.display());
    }
    Ok(())
}
