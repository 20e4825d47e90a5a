pub mod entities;
pub mod joiner;
pub mod snapshot;
pub mod text;

pub use entities::{AuthorRecord, Identifier, Membership, Person, RoleRecord, UPSTREAM_AUTHORITY};
pub use joiner::build_snapshot;
pub use snapshot::Snapshot;
pub use text::html_to_plain;
