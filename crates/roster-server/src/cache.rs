//! The in-memory membership cache.
//!
//! Holds the current snapshot behind an `ArcSwapOption`: readers pay one
//! atomic load and never block on a refresh in flight. A refresh builds a
//! complete replacement snapshot off to the side and installs it with an
//! atomic pointer swap; readers holding the old snapshot keep it alive
//! until they drop it.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tokio::sync::Mutex;
use uuid::Uuid;

use roster_core::{Membership, Snapshot, build_snapshot};
use roster_feed::{FeedError, FeedSource};

/// Counts from one successful refresh, for the log line and the refresh
/// response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshStats {
    pub authors: usize,
    pub roles: usize,
    pub memberships: usize,
}

/// Queryable snapshot of all current memberships.
///
/// Observable states: Empty (no snapshot ever installed; reads answer
/// zero/none) and Populated (the last successfully built snapshot). A
/// failed refresh leaves the state unchanged - stale-but-available beats
/// empty-but-fresh.
pub struct MembershipCache {
    feed: Arc<dyn FeedSource>,
    current: ArcSwapOption<Snapshot>,
    // Single-flight: overlapping refresh calls serialize here, so at most
    // one fetch/join is in flight and install order is refresh order.
    refresh_guard: Mutex<()>,
}

impl MembershipCache {
    pub fn new(feed: Arc<dyn FeedSource>) -> Self {
        Self {
            feed,
            current: ArcSwapOption::const_empty(),
            refresh_guard: Mutex::new(()),
        }
    }

    /// Pull both feeds, join, and install the new snapshot.
    ///
    /// Either fetch failing aborts the refresh; the installed snapshot is
    /// untouched.
    pub async fn refresh(&self) -> Result<RefreshStats, FeedError> {
        let _guard = self.refresh_guard.lock().await;

        let (authors, roles) =
            tokio::try_join!(self.feed.fetch_authors(), self.feed.fetch_roles())?;

        let (author_count, role_count) = (authors.len(), roles.len());
        let snapshot = build_snapshot(authors, roles);
        let stats = RefreshStats {
            authors: author_count,
            roles: role_count,
            memberships: snapshot.len(),
        };

        self.current.store(Some(Arc::new(snapshot)));
        tracing::info!(
            authors = stats.authors,
            roles = stats.roles,
            memberships = stats.memberships,
            "membership cache refreshed"
        );
        Ok(stats)
    }

    /// Size of the current snapshot; 0 while Empty.
    pub fn count(&self) -> usize {
        self.current.load().as_ref().map_or(0, |s| s.len())
    }

    /// All membership UUIDs of the current snapshot, in feed order.
    pub fn ids(&self) -> Vec<Uuid> {
        self.current.load().as_ref().map_or_else(Vec::new, |s| s.ids())
    }

    /// The membership for `uuid`, or `None` if absent from the current
    /// snapshot.
    pub fn get(&self, uuid: &Uuid) -> Option<Membership> {
        self.current
            .load()
            .as_ref()
            .and_then(|s| s.get(uuid).cloned())
    }

    pub fn is_populated(&self) -> bool {
        self.current.load().is_some()
    }
}
