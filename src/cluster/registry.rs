use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::RegistryError;
use crate::instance::ShutdownHandle;
use crate::instance::TimestampInstance;
use crate::Result;

/// Owns the address -> (instance, shutdown) mapping for one ensemble.
///
/// Invariant: the key sets of both maps are equal except transiently inside
/// `add`/`remove` — an address is either fully registered or absent, never
/// half-registered. Iteration order is unspecified.
#[derive(Default)]
pub(super) struct InstanceRegistry {
    instances: HashMap<String, Arc<dyn TimestampInstance>>,
    shutdowns: HashMap<String, ShutdownHandle>,
}

impl InstanceRegistry {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: HashMap::with_capacity(capacity),
            shutdowns: HashMap::with_capacity(capacity),
        }
    }

    pub(super) fn add(
        &mut self,
        address: String,
        instance: Arc<dyn TimestampInstance>,
        shutdown: ShutdownHandle,
    ) -> Result<()> {
        if self.instances.contains_key(&address) {
            return Err(RegistryError::DuplicateAddress(address).into());
        }
        self.shutdowns.insert(address.clone(), shutdown);
        self.instances.insert(address, instance);
        Ok(())
    }

    /// Removes both entries for `address`, handing invocation rights of the
    /// shutdown capability back to the caller.
    pub(super) fn remove(
        &mut self,
        address: &str,
    ) -> Result<ShutdownHandle> {
        let shutdown = self
            .shutdowns
            .remove(address)
            .ok_or_else(|| RegistryError::NotFound(address.to_string()))?;
        self.instances.remove(address);
        Ok(shutdown)
    }

    /// Absence is a normal query result, not an error.
    pub(super) fn get(
        &self,
        address: &str,
    ) -> Option<Arc<dyn TimestampInstance>> {
        self.instances.get(address).cloned()
    }

    pub(super) fn iter(&self) -> impl Iterator<Item = (&String, &Arc<dyn TimestampInstance>)> {
        self.instances.iter()
    }

    pub(super) fn len(&self) -> usize {
        self.instances.len()
    }

    /// Clears both maps and returns every shutdown capability exactly once.
    pub(super) fn drain(&mut self) -> Vec<ShutdownHandle> {
        self.instances.clear();
        self.shutdowns.drain().map(|(_, shutdown)| shutdown).collect()
    }
}
