use std::collections::HashSet;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::config::InstanceConfig;
use crate::errors::CreationError;
use crate::instance::GroupKey;
use crate::instance::InstanceFactory;
use crate::instance::ShutdownHandle;
use crate::instance::TimestampInstance;
use crate::Result;

/// A scriptable stand-in for a running timestamp service. Tests flip which
/// groups it claims leadership for via [`set_serving`].
///
/// [`set_serving`]: FakeInstance::set_serving
pub struct FakeInstance {
    address: String,
    serving: Mutex<HashSet<GroupKey>>,
    resignations: AtomicUsize,
}

impl FakeInstance {
    pub fn new(address: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            address: address.into(),
            serving: Mutex::new(HashSet::new()),
            resignations: AtomicUsize::new(0),
        })
    }

    pub fn set_serving(
        &self,
        group: GroupKey,
        serving: bool,
    ) {
        let mut groups = self.serving.lock().unwrap();
        if serving {
            groups.insert(group);
        } else {
            groups.remove(&group);
        }
    }

    pub fn resignation_count(&self) -> usize {
        self.resignations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TimestampInstance for FakeInstance {
    fn is_serving(
        &self,
        group: GroupKey,
    ) -> bool {
        self.serving.lock().unwrap().contains(&group)
    }

    fn address(&self) -> String {
        self.address.clone()
    }

    async fn resign_leadership(&self) -> Result<()> {
        self.resignations.fetch_add(1, Ordering::SeqCst);
        self.serving.lock().unwrap().clear();
        Ok(())
    }
}

/// Hands out [`FakeInstance`]s and keeps hold of everything it started, so
/// tests can script leadership and count shutdown invocations afterwards.
pub struct FakeFactory {
    started: Mutex<Vec<Arc<FakeInstance>>>,
    shutdown_calls: Arc<AtomicUsize>,
    fail_after: Option<usize>,
}

impl FakeFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            started: Mutex::new(Vec::new()),
            shutdown_calls: Arc::new(AtomicUsize::new(0)),
            fail_after: None,
        })
    }

    /// A factory that refuses to start any instance beyond the first
    /// `limit`, for exercising partial-creation failures.
    pub fn failing_after(limit: usize) -> Arc<Self> {
        Arc::new(Self {
            started: Mutex::new(Vec::new()),
            shutdown_calls: Arc::new(AtomicUsize::new(0)),
            fail_after: Some(limit),
        })
    }

    pub fn instances(&self) -> Vec<Arc<FakeInstance>> {
        self.started.lock().unwrap().clone()
    }

    pub fn instance_at(
        &self,
        index: usize,
    ) -> Arc<FakeInstance> {
        Arc::clone(&self.started.lock().unwrap()[index])
    }

    pub fn started_count(&self) -> usize {
        self.started.lock().unwrap().len()
    }

    pub fn shutdown_count(&self) -> usize {
        self.shutdown_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InstanceFactory for FakeFactory {
    async fn start(
        &self,
        _ctx: CancellationToken,
        config: InstanceConfig,
    ) -> Result<(Arc<dyn TimestampInstance>, ShutdownHandle)> {
        let mut started = self.started.lock().unwrap();
        if let Some(limit) = self.fail_after {
            if started.len() >= limit {
                return Err(CreationError::InstanceStart(format!(
                    "refusing to start {}",
                    config.listen_addr
                ))
                .into());
            }
        }

        let instance = FakeInstance::new(config.listen_addr.clone());
        started.push(Arc::clone(&instance));

        let counter = Arc::clone(&self.shutdown_calls);
        let shutdown = ShutdownHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        Ok((instance as Arc<dyn TimestampInstance>, shutdown))
    }
}
