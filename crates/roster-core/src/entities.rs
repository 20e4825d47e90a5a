//! Record and entity types for the membership service.
//!
//! `AuthorRecord` and `RoleRecord` are the wire shapes of the two upstream
//! feeds. `Person` and `Membership` are the normalized entities derived from
//! them by the joiner and served to API consumers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authority tag attached to the upstream external identifier on derived
/// `Person` entities.
pub const UPSTREAM_AUTHORITY: &str = "http://api.roster.dev/system/UPSTREAM-ID";

/// One row of the authors feed.
///
/// The external `id` is the join key correlating an author to its roles.
/// String fields other than `id` may be absent upstream and default to empty;
/// a missing or malformed `uuid` fails the whole feed parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "twitterHandle", default)]
    pub twitter_handle: String,
    #[serde(default)]
    pub biography: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    pub uuid: Uuid,
}

/// One row of the roles feed, linking an author's external `id` to a
/// membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "membershipUuid")]
    pub membership_uuid: Uuid,
}

/// An `{authority, value}` identifier pair carried on a `Person`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub authority: String,
    #[serde(rename = "identifierValue")]
    pub identifier_value: String,
}

/// An author reshaped for API consumers: biography rendered to plain text
/// (the original markup kept alongside) and external identifiers normalized
/// into `{authority, value}` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub uuid: Uuid,
    pub name: String,
    #[serde(rename = "emailAddress")]
    pub email_address: String,
    #[serde(rename = "twitterHandle")]
    pub twitter_handle: String,
    pub description: String,
    #[serde(rename = "descriptionXML")]
    pub description_xml: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub identifiers: Vec<Identifier>,
}

/// A person joined to one role, uniquely keyed by the role's membership UUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub uuid: Uuid,
    pub title: String,
    pub person: Person,
}
