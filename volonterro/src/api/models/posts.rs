//! API request/response models for posts.

use crate::db::models::{
    Page,
    posts::{Post, PostCreateDBRequest, PostFilter, PostUpdateDBRequest},
};
use crate::types::{PostId, UserId};
use crate::validation::{Constraint, EntitySchema, FieldSchema, ValidatedEntity};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCreate {
    pub author_id: UserId,
    pub title: String,
    pub content: String,
}

static POST_CREATE_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new(vec![
        FieldSchema::required("authorId", vec![Constraint::Uuid]),
        FieldSchema::required("title", vec![Constraint::String, Constraint::MaxLength(255)]),
        FieldSchema::required("content", vec![Constraint::String]),
    ])
});

impl ValidatedEntity for PostCreate {
    fn schema() -> &'static EntitySchema {
        &POST_CREATE_SCHEMA
    }
}

impl From<PostCreate> for PostCreateDBRequest {
    fn from(api: PostCreate) -> Self {
        Self {
            author_id: api.author_id,
            title: api.title,
            content: api.content,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

static POST_UPDATE_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new(vec![
        FieldSchema::optional("title", vec![Constraint::String, Constraint::MaxLength(255)]),
        FieldSchema::optional("content", vec![Constraint::String]),
    ])
});

impl ValidatedEntity for PostUpdate {
    fn schema() -> &'static EntitySchema {
        &POST_UPDATE_SCHEMA
    }
}

impl From<PostUpdate> for PostUpdateDBRequest {
    fn from(api: PostUpdate) -> Self {
        Self {
            title: api.title,
            content: api.content,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: PostId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            author_id: post.author_id,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at,
            removed_at: post.removed_at,
        }
    }
}

/// Query parameters for listing posts
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPostsQuery {
    pub author_id: Option<UserId>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl From<ListPostsQuery> for PostFilter {
    fn from(query: ListPostsQuery) -> Self {
        Self {
            author_id: query.author_id,
            page: Page {
                skip: query.skip,
                limit: query.limit,
            },
        }
    }
}
