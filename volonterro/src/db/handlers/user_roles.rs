//! Repository implementations for user roles.

use crate::db::errors::{DbError, Result};
use crate::db::handlers::memory::MemEntity;
use crate::db::handlers::postgres::PgStore;
use crate::db::handlers::repository::Repository;
use crate::db::models::user_roles::{UserRole, UserRoleCreateDBRequest, UserRoleFilter, UserRoleUpdateDBRequest};
use chrono::{DateTime, Utc};
use tracing::instrument;

#[async_trait::async_trait]
impl Repository<UserRole> for PgStore {
    #[instrument(skip(self, filter), err)]
    async fn list(&self, filter: &UserRoleFilter) -> Result<Vec<UserRole>> {
        let roles = sqlx::query_as::<_, UserRole>("SELECT * FROM user_roles ORDER BY name LIMIT $1 OFFSET $2")
            .bind(filter.page.limit())
            .bind(filter.page.skip())
            .fetch_all(&self.pool)
            .await?;
        Ok(roles)
    }

    #[instrument(skip(self), fields(name = %name), err)]
    async fn get_by_id(&self, name: &String) -> Result<Option<UserRole>> {
        let role = sqlx::query_as::<_, UserRole>("SELECT * FROM user_roles WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(role)
    }

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&self, request: &UserRoleCreateDBRequest) -> Result<UserRole> {
        let role = sqlx::query_as::<_, UserRole>("INSERT INTO user_roles (name) VALUES ($1) RETURNING *")
            .bind(&request.name)
            .fetch_one(&self.pool)
            .await?;
        Ok(role)
    }

    #[instrument(skip(self, request), fields(name = %name), err)]
    async fn update(&self, name: &String, request: &UserRoleUpdateDBRequest) -> Result<UserRole> {
        sqlx::query_as::<_, UserRole>(
            "UPDATE user_roles SET name = COALESCE($2, name)
             WHERE name = $1
             RETURNING *",
        )
        .bind(name)
        .bind(&request.name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(name = %name), err)]
    async fn remove(&self, name: &String) -> Result<UserRole> {
        sqlx::query_as::<_, UserRole>("DELETE FROM user_roles WHERE name = $1 RETURNING *")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }
}

impl MemEntity for UserRole {
    const TABLE: &'static str = "user_roles";

    fn from_create(request: &UserRoleCreateDBRequest, _now: DateTime<Utc>) -> Self {
        Self {
            name: request.name.clone(),
        }
    }

    fn apply_update(&mut self, request: &UserRoleUpdateDBRequest, _now: DateTime<Utc>) {
        if let Some(name) = &request.name {
            self.name = name.clone();
        }
    }

    fn conflicts_with(request: &UserRoleCreateDBRequest, existing: &UserRole) -> Option<&'static str> {
        (existing.name == request.name).then_some("user_roles_pkey")
    }

    fn matches(&self, _filter: &UserRoleFilter) -> bool {
        true
    }
}
