#![allow(dead_code)]

//! Shared helpers for integration tests: a scriptable timestamp service
//! stand-in and a factory that records everything it started.

use std::collections::HashSet;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use tempo_harness::CreationError;
use tempo_harness::Ensemble;
use tempo_harness::GroupKey;
use tempo_harness::InstanceConfig;
use tempo_harness::InstanceFactory;
use tempo_harness::Result;
use tempo_harness::ShutdownHandle;
use tempo_harness::TimestampInstance;
use tokio_util::sync::CancellationToken;

pub const BACKEND_ENDPOINTS: &str = "http://127.0.0.1:2379";

pub struct TestInstance {
    address: String,
    serving: Mutex<HashSet<GroupKey>>,
    resignations: AtomicUsize,
}

impl TestInstance {
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
impl TimestampInstance for TestInstance {
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
        // Stepping down drops leadership of every group this stand-in held.
        self.serving.lock().unwrap().clear();
        Ok(())
    }
}

#[derive(Default)]
pub struct TestFactory {
    started: Mutex<Vec<Arc<TestInstance>>>,
    shutdown_calls: Arc<AtomicUsize>,
}

impl TestFactory {
    pub fn instance_at(
        &self,
        index: usize,
    ) -> Arc<TestInstance> {
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
impl InstanceFactory for TestFactory {
    async fn start(
        &self,
        _ctx: CancellationToken,
        config: InstanceConfig,
    ) -> Result<(Arc<dyn TimestampInstance>, ShutdownHandle)> {
        if config.backend_endpoints.is_empty() {
            return Err(
                CreationError::InstanceStart("no backend endpoints configured".to_string()).into(),
            );
        }

        let instance = Arc::new(TestInstance {
            address: config.listen_addr.clone(),
            serving: Mutex::new(HashSet::new()),
            resignations: AtomicUsize::new(0),
        });
        self.started.lock().unwrap().push(Arc::clone(&instance));

        let counter = Arc::clone(&self.shutdown_calls);
        let shutdown = ShutdownHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        Ok((instance as Arc<dyn TimestampInstance>, shutdown))
    }
}

/// Spins up an ensemble of `initial_count` stand-in instances.
pub async fn start_ensemble(initial_count: usize) -> (Ensemble, Arc<TestFactory>) {
    let factory = Arc::new(TestFactory::default());
    let ensemble = Ensemble::new(
        CancellationToken::new(),
        initial_count,
        BACKEND_ENDPOINTS,
        Arc::clone(&factory) as Arc<dyn InstanceFactory>,
    )
    .await
    .expect("ensemble setup should succeed");
    (ensemble, factory)
}
