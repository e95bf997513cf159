//! Bounded-polling leader discovery over the current instance set.
//!
//! Leadership is externally reported: each instance answers "am I serving
//! this keyspace group" and the harness combines the answers. Nothing here
//! arbitrates split-brain; a transient double-true during handover yields an
//! arbitrary winner for the duration of one scan.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tracing::debug;
use tracing::warn;

use super::Ensemble;
use crate::config::PollPolicy;
use crate::errors::DiscoveryError;
use crate::instance::GroupKey;
use crate::instance::TimestampInstance;
use crate::Result;

impl Ensemble {
    /// Point-in-time scan for the instance currently serving `group`.
    ///
    /// Returns the first instance reporting leadership in snapshot order, or
    /// `None` when none does (an empty ensemble always yields `None`). This
    /// is a best-effort query, not a consistency guarantee.
    pub fn find_primary(
        &self,
        group: GroupKey,
    ) -> Option<Arc<dyn TimestampInstance>> {
        self.registry
            .iter()
            .find(|(_, instance)| instance.is_serving(group))
            .map(|(_, instance)| Arc::clone(instance))
    }

    /// Polls [`find_primary`] at `tick` cadence until one instance reports
    /// leadership for `group`, or fails with `ConvergenceTimeout` once
    /// `wait_for` elapses.
    ///
    /// A positive result is returned immediately, without waiting out the
    /// deadline. Against an empty ensemble this always times out.
    ///
    /// [`find_primary`]: Ensemble::find_primary
    pub async fn wait_for_primary(
        &self,
        group: GroupKey,
        wait_for: Duration,
        tick: Duration,
    ) -> Result<Arc<dyn TimestampInstance>> {
        let poll = async {
            loop {
                if let Some(primary) = self.find_primary(group) {
                    return primary;
                }
                debug!("no primary for {} yet, retrying...", group);
                time::sleep(tick).await;
            }
        };

        match time::timeout(wait_for, poll).await {
            Ok(primary) => Ok(primary),
            Err(_) => {
                warn!("no primary elected for {} within {:?}", group, wait_for);
                Err(DiscoveryError::ConvergenceTimeout {
                    group,
                    waited: wait_for,
                }
                .into())
            }
        }
    }

    /// Waits for a primary of the default keyspace group under the default
    /// poll policy.
    pub async fn wait_for_default_primary(&self) -> Result<Arc<dyn TimestampInstance>> {
        let policy = PollPolicy::default();
        self.wait_for_primary(GroupKey::default(), policy.wait_for(), policy.tick_interval())
            .await
    }

    /// Asks the current primary for `group` to step down.
    ///
    /// Resigning when nothing serves the group is a caller error and fails
    /// with `NoCurrentPrimary` rather than silently succeeding.
    pub async fn resign_primary(
        &self,
        group: GroupKey,
    ) -> Result<()> {
        let primary = self
            .find_primary(group)
            .ok_or(DiscoveryError::NoCurrentPrimary { group })?;
        primary.resign_leadership().await
    }
}
