//! Repository implementations for the following relationship.

use crate::db::errors::{DbError, Result};
use crate::db::handlers::memory::{ForeignRef, MemEntity};
use crate::db::handlers::postgres::PgStore;
use crate::db::handlers::repository::Repository;
use crate::db::models::followings::{
    Following, FollowingCreateDBRequest, FollowingFilter, FollowingKey, FollowingUpdateDBRequest,
};
use chrono::{DateTime, Utc};
use tracing::instrument;

#[async_trait::async_trait]
impl Repository<Following> for PgStore {
    #[instrument(skip(self, filter), fields(user_id = ?filter.user_id, follower_id = ?filter.follower_id), err)]
    async fn list(&self, filter: &FollowingFilter) -> Result<Vec<Following>> {
        let followings = sqlx::query_as::<_, Following>(
            "SELECT * FROM followings
             WHERE ($1::uuid IS NULL OR user_id = $1)
               AND ($2::uuid IS NULL OR follower_id = $2)
             ORDER BY user_id, follower_id
             LIMIT $3 OFFSET $4",
        )
        .bind(filter.user_id)
        .bind(filter.follower_id)
        .bind(filter.page.limit())
        .bind(filter.page.skip())
        .fetch_all(&self.pool)
        .await?;
        Ok(followings)
    }

    #[instrument(skip(self), fields(key = %id), err)]
    async fn get_by_id(&self, id: &FollowingKey) -> Result<Option<Following>> {
        let following = sqlx::query_as::<_, Following>("SELECT * FROM followings WHERE user_id = $1 AND follower_id = $2")
            .bind(id.user_id)
            .bind(id.follower_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(following)
    }

    #[instrument(skip(self, request), fields(user_id = %request.user_id, follower_id = %request.follower_id), err)]
    async fn create(&self, request: &FollowingCreateDBRequest) -> Result<Following> {
        let following = sqlx::query_as::<_, Following>(
            "INSERT INTO followings (user_id, follower_id)
             VALUES ($1, $2)
             RETURNING *",
        )
        .bind(request.user_id)
        .bind(request.follower_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(following)
    }

    // A following pair carries no mutable fields; update degenerates to a
    // presence check so the contract's not-found semantics still hold.
    #[instrument(skip(self, _request), fields(key = %id), err)]
    async fn update(&self, id: &FollowingKey, _request: &FollowingUpdateDBRequest) -> Result<Following> {
        self.get_by_id(id).await?.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(key = %id), err)]
    async fn remove(&self, id: &FollowingKey) -> Result<Following> {
        sqlx::query_as::<_, Following>("DELETE FROM followings WHERE user_id = $1 AND follower_id = $2 RETURNING *")
            .bind(id.user_id)
            .bind(id.follower_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }
}

impl MemEntity for Following {
    const TABLE: &'static str = "followings";

    fn from_create(request: &FollowingCreateDBRequest, _now: DateTime<Utc>) -> Self {
        Self {
            user_id: request.user_id,
            follower_id: request.follower_id,
        }
    }

    fn apply_update(&mut self, _request: &FollowingUpdateDBRequest, _now: DateTime<Utc>) {}

    fn conflicts_with(request: &FollowingCreateDBRequest, existing: &Following) -> Option<&'static str> {
        (existing.user_id == request.user_id && existing.follower_id == request.follower_id).then_some("followings_pkey")
    }

    fn create_refs(request: &FollowingCreateDBRequest) -> Vec<ForeignRef> {
        vec![ForeignRef::User(request.user_id), ForeignRef::User(request.follower_id)]
    }

    fn matches(&self, filter: &FollowingFilter) -> bool {
        filter.user_id.is_none_or(|user_id| self.user_id == user_id)
            && filter.follower_id.is_none_or(|follower_id| self.follower_id == follower_id)
    }
}
