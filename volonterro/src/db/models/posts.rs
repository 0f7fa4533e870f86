//! Storage models for posts.

use super::{Entity, Page};
use crate::types::{PostId, UserId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A fundraising post. Removal is logical: a non-null `removed_at` hides the
/// row from reads without deleting it.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct PostCreateDBRequest {
    pub author_id: UserId,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct PostUpdateDBRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Filter for listing posts
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub author_id: Option<UserId>,
    pub page: Page,
}

impl Entity for Post {
    type Key = PostId;
    type CreateRequest = PostCreateDBRequest;
    type UpdateRequest = PostUpdateDBRequest;
    type Filter = PostFilter;

    const NAME: &'static str = "Post";

    fn key(&self) -> PostId {
        self.id
    }

    fn page(filter: &PostFilter) -> Page {
        filter.page
    }
}
