//! Boundary traits for the externally-provided timestamp service.
//!
//! The harness never implements timestamp allocation or leader election
//! itself. It drives opaque instances through these seams:
//! - [`TimestampInstance`] is one running service reporting its own
//!   leadership state,
//! - [`InstanceFactory`] starts instances from a resolved configuration,
//! - [`ShutdownHandle`] is the single-use capability that releases every
//!   resource an instance owns.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio_util::sync::CancellationToken;

use crate::config::InstanceConfig;
use crate::constants::DEFAULT_KEYSPACE_GROUP_ID;
use crate::constants::DEFAULT_KEYSPACE_ID;
use crate::Result;

/// One unit of independent leadership: a keyspace group within a keyspace.
///
/// Passed through to instances unchanged; the harness attaches no meaning to
/// the two parts beyond identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub keyspace_id: u32,
    pub group_id: u32,
}

impl GroupKey {
    pub const fn new(
        keyspace_id: u32,
        group_id: u32,
    ) -> Self {
        Self {
            keyspace_id,
            group_id,
        }
    }
}

impl Default for GroupKey {
    fn default() -> Self {
        Self::new(DEFAULT_KEYSPACE_ID, DEFAULT_KEYSPACE_GROUP_ID)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "keyspace {} group {}", self.keyspace_id, self.group_id)
    }
}

/// A running timestamp-allocation service instance.
///
/// Instances run concurrently and independently of the harness; the only
/// thread-safety required of them here is that [`is_serving`] may be called
/// while the instance is live.
///
/// [`is_serving`]: TimestampInstance::is_serving
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TimestampInstance: Send + Sync {
    /// Whether this instance currently holds leadership for `group`.
    fn is_serving(
        &self,
        group: GroupKey,
    ) -> bool;

    /// The resolved listen address this instance serves on.
    fn address(&self) -> String;

    /// Asks the instance to step down from the leadership it holds.
    async fn resign_leadership(&self) -> Result<()>;
}

/// One-shot capability that stops the paired instance and releases all
/// resources it owns. Consuming [`shutdown`] makes a second invocation
/// unrepresentable.
///
/// [`shutdown`]: ShutdownHandle::shutdown
pub struct ShutdownHandle(Box<dyn FnOnce() + Send>);

impl ShutdownHandle {
    pub fn new(cleanup: impl FnOnce() + Send + 'static) -> Self {
        Self(Box::new(cleanup))
    }

    pub fn shutdown(self) {
        (self.0)()
    }
}

impl fmt::Debug for ShutdownHandle {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("ShutdownHandle").finish()
    }
}

/// Starts instances for the ensemble.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InstanceFactory: Send + Sync {
    /// Starts one instance from a fully-resolved configuration.
    ///
    /// `ctx` is cancelled when the owner of the ensemble shuts down the whole
    /// process tree. On error the caller registers nothing.
    async fn start(
        &self,
        ctx: CancellationToken,
        config: InstanceConfig,
    ) -> Result<(Arc<dyn TimestampInstance>, ShutdownHandle)>;
}
