//! Per-feed connectivity checks and combined readiness.

use std::sync::Arc;

use serde::Serialize;

use roster_feed::{Feed, FeedSource};

/// Result of one connectivity probe.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub name: String,
    pub ok: bool,
    pub output: String,
}

/// Aggregate readiness: OK only if every individual check passes.
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessStatus {
    #[serde(rename = "goodToGo")]
    pub good_to_go: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Maps feed connectivity into health-check outcomes. Probes go through
/// the same `FeedSource` seam the cache refreshes through, but never touch
/// cache state.
pub struct HealthReporter {
    feed: Arc<dyn FeedSource>,
}

impl HealthReporter {
    pub fn new(feed: Arc<dyn FeedSource>) -> Self {
        Self { feed }
    }

    pub async fn authors_check(&self) -> CheckOutcome {
        Self::outcome(Feed::Authors, self.feed.check_authors_connectivity().await)
    }

    pub async fn roles_check(&self) -> CheckOutcome {
        Self::outcome(Feed::Roles, self.feed.check_roles_connectivity().await)
    }

    /// Both checks evaluated concurrently; the first failure's output is
    /// surfaced as the readiness message.
    pub async fn good_to_go(&self) -> ReadinessStatus {
        let (authors, roles) = tokio::join!(self.authors_check(), self.roles_check());

        let failure = [&authors, &roles].into_iter().find(|c| !c.ok);
        ReadinessStatus {
            good_to_go: failure.is_none(),
            message: failure.map(|c| c.output.clone()),
        }
    }

    fn outcome(feed: Feed, result: Result<(), roster_feed::FeedError>) -> CheckOutcome {
        match result {
            Ok(()) => CheckOutcome {
                name: feed.to_string(),
                ok: true,
                output: format!("Connectivity to the {feed} feed is ok"),
            },
            Err(e) => {
                tracing::warn!(feed = %feed, error = %e, "connectivity check failed");
                CheckOutcome {
                    name: feed.to_string(),
                    ok: false,
                    output: e.to_string(),
                }
            }
        }
    }
}
