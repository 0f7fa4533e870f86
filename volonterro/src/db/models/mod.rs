//! Storage record models and the shared entity contract.
//!
//! Each resource module defines the row struct returned by repositories plus
//! the `…CreateDBRequest`/`…UpdateDBRequest` types accepted by them. Storage
//! models are distinct from API models so the wire format and the schema can
//! evolve independently.

use serde::Deserialize;
use std::fmt;
use std::hash::Hash;

pub mod bans;
pub mod chat_message_attachments;
pub mod followings;
pub mod post_donations;
pub mod posts;
pub mod registration_methods;
pub mod user_roles;
pub mod users;

/// Offset pagination carried inside every list filter. An absent limit
/// returns the full matching set.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Page {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl Page {
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> Option<i64> {
        self.limit.filter(|l| *l >= 0)
    }
}

/// Contract every stored resource implements: an identifier, the request
/// types its repository accepts, and a filter for list operations.
///
/// Keys are either generated UUIDs or caller-assigned natural keys (a role
/// name, a user/follower pair); both are immutable as far as the generic CRUD
/// surface is concerned, and both must be printable for not-found messages.
pub trait Entity: Clone + Send + Sync + 'static {
    type Key: Clone + fmt::Display + Eq + Hash + Ord + serde::de::DeserializeOwned + Send + Sync + 'static;
    type CreateRequest: Send + Sync + 'static;
    type UpdateRequest: Send + Sync + 'static;
    type Filter: Default + Send + Sync + 'static;

    /// Resource name used in user-facing messages ("Post with ID … not found")
    const NAME: &'static str;

    fn key(&self) -> Self::Key;

    fn page(filter: &Self::Filter) -> Page;
}
