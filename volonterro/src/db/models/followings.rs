//! Storage models for the following relationship.

use super::{Entity, Page};
use crate::types::UserId;
use serde::Deserialize;
use sqlx::FromRow;
use std::fmt;

/// Natural key of a following relationship: the followed user and the
/// follower, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub struct FollowingKey {
    pub user_id: UserId,
    pub follower_id: UserId,
}

impl fmt::Display for FollowingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.user_id, self.follower_id)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Following {
    pub user_id: UserId,
    pub follower_id: UserId,
}

#[derive(Debug, Clone)]
pub struct FollowingCreateDBRequest {
    pub user_id: UserId,
    pub follower_id: UserId,
}

/// A following pair has no mutable fields; the update request exists only to
/// satisfy the repository contract and is not routed.
#[derive(Debug, Clone, Default)]
pub struct FollowingUpdateDBRequest {}

/// Filter for listing relationships from either end
#[derive(Debug, Clone, Default)]
pub struct FollowingFilter {
    pub user_id: Option<UserId>,
    pub follower_id: Option<UserId>,
    pub page: Page,
}

impl Entity for Following {
    type Key = FollowingKey;
    type CreateRequest = FollowingCreateDBRequest;
    type UpdateRequest = FollowingUpdateDBRequest;
    type Filter = FollowingFilter;

    const NAME: &'static str = "Following";

    fn key(&self) -> FollowingKey {
        FollowingKey {
            user_id: self.user_id,
            follower_id: self.follower_id,
        }
    }

    fn page(filter: &FollowingFilter) -> Page {
        filter.page
    }
}
