//! Error hierarchy for the ensemble harness, categorized by operational
//! concern: instance creation, registry bookkeeping and leader discovery.

use std::io;
use std::time::Duration;

use config::ConfigError;

use crate::GroupKey;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failures while allocating, configuring or starting an instance
    #[error(transparent)]
    Creation(#[from] CreationError),

    /// Registry bookkeeping violations
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Leader discovery failures
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Configuration loading and validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Any failure on the way from a requested address to a running, registered
/// instance. Surfaced synchronously to the caller; never retried here.
#[derive(Debug, thiserror::Error)]
pub enum CreationError {
    #[error("failed to allocate an ephemeral listen address: {0}")]
    AddressAllocation(#[source] io::Error),

    #[error("invalid instance configuration: {0}")]
    ConfigResolution(String),

    #[error("failed to initialize instance logging: {0}")]
    LoggerInit(#[source] io::Error),

    #[error("instance startup failed: {0}")]
    InstanceStart(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("an instance is already registered under {0}")]
    DuplicateAddress(String),

    /// Non-fatal for destroy paths: callers that already tore the instance
    /// down treat this as benign.
    #[error("no instance registered under {0}")]
    NotFound(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The primary test-failure signal this harness produces.
    #[error("no primary elected for {group} within {waited:?}")]
    ConvergenceTimeout { group: GroupKey, waited: Duration },

    #[error("no instance is currently serving {group}")]
    NoCurrentPrimary { group: GroupKey },
}
