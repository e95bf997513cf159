use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use super::registry::InstanceRegistry;
use crate::config::InstanceConfig;
use crate::instance::InstanceFactory;
use crate::instance::TimestampInstance;
use crate::logging;
use crate::utils::net;
use crate::Result;

/// A test ensemble of timestamp-allocation service instances sharing one
/// election backend.
///
/// The ensemble exclusively owns every instance and its shutdown capability.
/// All operations run to completion on the calling task; the harness assumes
/// a single-threaded test driver and provides no internal locking.
pub struct Ensemble {
    backend_endpoints: String,
    factory: Arc<dyn InstanceFactory>,
    shutdown_ctx: CancellationToken,
    pub(super) registry: InstanceRegistry,
    // Held so per-instance log writers keep draining until teardown.
    log_guards: Vec<WorkerGuard>,
}

impl fmt::Debug for Ensemble {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Ensemble")
            .field("backend_endpoints", &self.backend_endpoints)
            .field("servers", &self.registry.len())
            .finish()
    }
}

impl Ensemble {
    /// Creates an ensemble with `initial_count` instances on freshly
    /// allocated ephemeral addresses.
    ///
    /// Instances start sequentially; the first failure aborts with that
    /// error and no rollback of the instances already started. Test setup is
    /// expected to discard the whole process on failure.
    pub async fn new(
        ctx: CancellationToken,
        initial_count: usize,
        backend_endpoints: impl Into<String>,
        factory: Arc<dyn InstanceFactory>,
    ) -> Result<Self> {
        let mut ensemble = Self {
            backend_endpoints: backend_endpoints.into(),
            factory,
            shutdown_ctx: ctx,
            registry: InstanceRegistry::with_capacity(initial_count),
            log_guards: Vec::new(),
        };
        for _ in 0..initial_count {
            let addr = net::alloc_ephemeral_addr().await?;
            ensemble.add_server(&addr).await?;
        }
        Ok(ensemble)
    }

    /// Starts one more instance listening on `addr`.
    ///
    /// The instance configuration clones the cluster-wide settings and sets
    /// `listen_addr = name = addr`; the instance is registered under the
    /// *resolved* listen address, which is the address later lookups must
    /// use. Any failure aborts the whole call with nothing registered.
    pub async fn add_server(
        &mut self,
        addr: &str,
    ) -> Result<()> {
        let config = InstanceConfig {
            name: addr.to_string(),
            listen_addr: addr.to_string(),
            backend_endpoints: self.backend_endpoints.clone(),
            ..InstanceConfig::default()
        };
        let config = config.resolve()?;

        if let Some(guard) = logging::init_instance_logging(&config)? {
            self.log_guards.push(guard);
        }

        let resolved_addr = config.listen_addr.clone();
        let (instance, shutdown) = self.factory.start(self.shutdown_ctx.clone(), config).await?;

        self.registry.add(resolved_addr.clone(), instance, shutdown)?;
        info!("instance {} joined the ensemble", resolved_addr);
        Ok(())
    }

    /// Stops the instance registered under `addr` and forgets it.
    ///
    /// Fails with `RegistryError::NotFound` when the address is absent;
    /// destroy paths tolerate that, everything else treats it as a caller
    /// error.
    pub fn destroy_server(
        &mut self,
        addr: &str,
    ) -> Result<()> {
        let shutdown = self.registry.remove(addr)?;
        shutdown.shutdown();
        info!("instance {} destroyed", addr);
        Ok(())
    }

    /// Stops every instance and consumes the ensemble.
    ///
    /// Each stored shutdown capability is invoked exactly once, in no
    /// particular order. Consuming `self` is what makes the handle terminal:
    /// there is no way to address a destroyed ensemble afterwards.
    pub fn destroy_all(mut self) {
        let count = self.registry.len();
        for shutdown in self.registry.drain() {
            shutdown.shutdown();
        }
        info!("ensemble destroyed ({} instances)", count);
    }

    /// Returns the instance registered under `addr`, if any.
    pub fn get_server(
        &self,
        addr: &str,
    ) -> Option<Arc<dyn TimestampInstance>> {
        self.registry.get(addr)
    }

    /// Snapshot of every live instance with its registered address.
    ///
    /// The order is unspecified; callers must not rely on it.
    pub fn servers(&self) -> Vec<(String, Arc<dyn TimestampInstance>)> {
        self.registry
            .iter()
            .map(|(addr, instance)| (addr.clone(), Arc::clone(instance)))
            .collect()
    }

    pub fn server_count(&self) -> usize {
        self.registry.len()
    }

    pub fn backend_endpoints(&self) -> &str {
        &self.backend_endpoints
    }
}
