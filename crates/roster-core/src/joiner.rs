//! Joins the two upstream feeds into a membership snapshot.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::entities::{AuthorRecord, Identifier, Membership, Person, RoleRecord, UPSTREAM_AUTHORITY};
use crate::snapshot::Snapshot;
use crate::text::html_to_plain;

/// Build a complete snapshot from one pull of both feeds.
///
/// Pure function of its inputs: authors are indexed by external id, then
/// each role in feed order is joined to its author and keyed by the role's
/// membership UUID. A later role with the same UUID overwrites an earlier
/// one. Roles with no matching author contribute nothing; that is feed
/// inconsistency tolerated by policy, not an error.
pub fn build_snapshot(authors: Vec<AuthorRecord>, roles: Vec<RoleRecord>) -> Snapshot {
    let authors_by_id: HashMap<&str, &AuthorRecord> =
        authors.iter().map(|a| (a.id.as_str(), a)).collect();

    let mut memberships = IndexMap::new();
    for role in &roles {
        let Some(author) = authors_by_id.get(role.id.as_str()) else {
            tracing::debug!(
                external_id = %role.id,
                membership_uuid = %role.membership_uuid,
                "dropping orphan role with no matching author"
            );
            continue;
        };

        let membership = Membership {
            uuid: role.membership_uuid,
            title: role.title.clone(),
            person: author_to_person(author),
        };
        memberships.insert(role.membership_uuid, membership);
    }

    Snapshot::new(memberships)
}

/// Shape an author record into a `Person`.
///
/// A biography that fails to render degrades to an empty description; one
/// record's formatting problem must not block the feed.
fn author_to_person(author: &AuthorRecord) -> Person {
    let description = match html_to_plain(&author.biography) {
        Ok(plain) => plain,
        Err(e) => {
            tracing::warn!(
                author_id = %author.id,
                error = %e,
                "biography rendering failed, degrading to empty description"
            );
            String::new()
        }
    };

    Person {
        uuid: author.uuid,
        name: author.name.clone(),
        email_address: author.email.clone(),
        twitter_handle: author.twitter_handle.clone(),
        description,
        description_xml: author.biography.clone(),
        image_url: author.image_url.clone(),
        identifiers: vec![Identifier {
            authority: UPSTREAM_AUTHORITY.to_string(),
            identifier_value: author.id.clone(),
        }],
    }
}
