//! Repository implementations for posts.

use crate::db::errors::{DbError, Result};
use crate::db::handlers::memory::{ForeignRef, MemEntity};
use crate::db::handlers::postgres::PgStore;
use crate::db::handlers::repository::Repository;
use crate::db::models::posts::{Post, PostCreateDBRequest, PostFilter, PostUpdateDBRequest};
use crate::types::{PostId, abbrev_uuid};
use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

#[async_trait::async_trait]
impl Repository<Post> for PgStore {
    #[instrument(skip(self, filter), fields(author_id = ?filter.author_id), err)]
    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT * FROM posts
             WHERE removed_at IS NULL AND ($1::uuid IS NULL OR author_id = $1)
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(filter.author_id)
        .bind(filter.page.limit())
        .bind(filter.page.skip())
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    #[instrument(skip(self), fields(post_id = %abbrev_uuid(id)), err)]
    async fn get_by_id(&self, id: &PostId) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1 AND removed_at IS NULL")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    #[instrument(skip(self, request), fields(title = %request.title), err)]
    async fn create(&self, request: &PostCreateDBRequest) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            "INSERT INTO posts (id, author_id, title, content)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(request.author_id)
        .bind(&request.title)
        .bind(&request.content)
        .fetch_one(&self.pool)
        .await?;
        Ok(post)
    }

    #[instrument(skip(self, request), fields(post_id = %abbrev_uuid(id)), err)]
    async fn update(&self, id: &PostId, request: &PostUpdateDBRequest) -> Result<Post> {
        sqlx::query_as::<_, Post>(
            "UPDATE posts SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                updated_at = NOW()
             WHERE id = $1 AND removed_at IS NULL
             RETURNING *",
        )
        .bind(id)
        .bind(&request.title)
        .bind(&request.content)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(post_id = %abbrev_uuid(id)), err)]
    async fn remove(&self, id: &PostId) -> Result<Post> {
        // Soft removal: the row survives with its removal marker set
        sqlx::query_as::<_, Post>(
            "UPDATE posts SET removed_at = NOW()
             WHERE id = $1 AND removed_at IS NULL
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)
    }
}

impl MemEntity for Post {
    const TABLE: &'static str = "posts";

    fn from_create(request: &PostCreateDBRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id: request.author_id,
            title: request.title.clone(),
            content: request.content.clone(),
            created_at: now,
            updated_at: now,
            removed_at: None,
        }
    }

    fn apply_update(&mut self, request: &PostUpdateDBRequest, now: DateTime<Utc>) {
        if let Some(title) = &request.title {
            self.title = title.clone();
        }
        if let Some(content) = &request.content {
            self.content = content.clone();
        }
        self.updated_at = now;
    }

    fn create_refs(request: &PostCreateDBRequest) -> Vec<ForeignRef> {
        vec![ForeignRef::User(request.author_id)]
    }

    fn soft_remove(&mut self, now: DateTime<Utc>) -> bool {
        self.removed_at = Some(now);
        true
    }

    fn visible(&self) -> bool {
        self.removed_at.is_none()
    }

    fn matches(&self, filter: &PostFilter) -> bool {
        filter.author_id.is_none_or(|author_id| self.author_id == author_id)
    }
}
