//! Projection of ensemble membership for external consumers.

use serde::Deserialize;
use serde::Serialize;

use crate::cluster::Ensemble;
use crate::instance::TimestampInstance;

/// Address-only descriptor of one ensemble member, in the shape group
/// configuration writers expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub address: String,
}

impl Ensemble {
    /// Materializes every live instance as an address-only member
    /// descriptor, in snapshot order. Pure projection: no filtering, no side
    /// effects, nothing stored.
    pub fn group_members(&self) -> Vec<GroupMember> {
        self.servers()
            .iter()
            .map(|(_, instance)| GroupMember {
                address: instance.address(),
            })
            .collect()
    }
}
