//! Per-instance log initialization.
//!
//! Every instance gets its own append-only log file under the configured
//! `log_dir`. Since the whole ensemble lives in one process, the global
//! tracing subscriber can only be installed once; the first instance wins
//! and later instances share it.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;

use crate::config::InstanceConfig;
use crate::errors::CreationError;
use crate::utils::file_io;
use crate::Result;

/// Initializes log output for one instance, writing to
/// `<log_dir>/<name>.log`.
///
/// Returns the writer guard when this call installed the subscriber; the
/// guard must be held for the instance's lifetime so buffered lines keep
/// draining. Returns `Ok(None)` when a subscriber was already installed.
/// Failure to open the log file aborts instance creation.
pub fn init_instance_logging(config: &InstanceConfig) -> Result<Option<WorkerGuard>> {
    let file_name = sanitize_file_stem(&config.name);
    let log_file = file_io::open_file_for_append(config.log_dir.join(format!("{file_name}.log")))
        .map_err(CreationError::LoggerInit)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(log_file);
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::from_default_env());

    match tracing_subscriber::registry().with(layer).try_init() {
        Ok(()) => Ok(Some(guard)),
        // Another instance (or the host test) installed the subscriber
        // first; its writer stays in effect.
        Err(_) => Ok(None),
    }
}

/// Instance names are addresses like `http://127.0.0.1:20180`; flatten them
/// into a usable file stem.
fn sanitize_file_stem(name: &str) -> String {
    name.replace(|c: char| !c.is_ascii_alphanumeric() && c != '.' && c != '-', "_")
}
