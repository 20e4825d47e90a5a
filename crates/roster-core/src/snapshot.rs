//! Immutable membership snapshots.

use indexmap::IndexMap;
use uuid::Uuid;

use crate::entities::Membership;

/// A fully built mapping from membership UUID to `Membership`, produced
/// wholesale by one refresh cycle and never mutated after publication.
///
/// Entries keep feed insertion order, so duplicate-UUID resolution is
/// deterministic and `ids()` is stable within one snapshot.
#[derive(Debug, Default)]
pub struct Snapshot {
    memberships: IndexMap<Uuid, Membership>,
}

impl Snapshot {
    pub(crate) fn new(memberships: IndexMap<Uuid, Membership>) -> Self {
        Self { memberships }
    }

    pub fn len(&self) -> usize {
        self.memberships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memberships.is_empty()
    }

    /// All membership UUIDs in feed insertion order.
    pub fn ids(&self) -> Vec<Uuid> {
        self.memberships.keys().copied().collect()
    }

    pub fn get(&self, uuid: &Uuid) -> Option<&Membership> {
        self.memberships.get(uuid)
    }
}
