//! Feed error taxonomy.

use thiserror::Error;

/// The two upstream feeds. Carried on every error and log line so failures
/// name the dataset they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Authors,
    Roles,
}

impl std::fmt::Display for Feed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authors => write!(f, "authors"),
            Self::Roles => write!(f, "roles"),
        }
    }
}

/// Errors from fetching or parsing an upstream feed.
///
/// These abort only the refresh that triggered them; the cache keeps
/// serving its installed snapshot.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The authority could not be reached, or the request timed out.
    #[error("{feed} feed unavailable: {reason}")]
    Unavailable { feed: Feed, reason: String },

    /// The authority answered with a non-success status code.
    #[error("{feed} feed returned status {status}")]
    Status { feed: Feed, status: u16 },

    /// The payload could not be parsed into the expected records.
    #[error("{feed} feed payload malformed: {reason}")]
    Malformed { feed: Feed, reason: String },

    /// The payload exceeded the configured response size bound.
    #[error("{feed} feed response exceeds {max_bytes} bytes")]
    TooLarge { feed: Feed, max_bytes: usize },
}

impl FeedError {
    pub fn unavailable(feed: Feed, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            feed,
            reason: reason.into(),
        }
    }

    pub fn status(feed: Feed, status: u16) -> Self {
        Self::Status { feed, status }
    }

    pub fn malformed(feed: Feed, reason: impl Into<String>) -> Self {
        Self::Malformed {
            feed,
            reason: reason.into(),
        }
    }

    pub fn too_large(feed: Feed, max_bytes: usize) -> Self {
        Self::TooLarge { feed, max_bytes }
    }

    /// The feed this error came from.
    pub fn feed(&self) -> Feed {
        match self {
            Self::Unavailable { feed, .. }
            | Self::Status { feed, .. }
            | Self::Malformed { feed, .. }
            | Self::TooLarge { feed, .. } => *feed,
        }
    }
}
