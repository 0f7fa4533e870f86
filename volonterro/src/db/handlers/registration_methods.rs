//! Repository implementations for user registration methods.

use crate::db::errors::{DbError, Result};
use crate::db::handlers::memory::MemEntity;
use crate::db::handlers::postgres::PgStore;
use crate::db::handlers::repository::Repository;
use crate::db::models::registration_methods::{
    RegistrationMethodCreateDBRequest, RegistrationMethodFilter, RegistrationMethodUpdateDBRequest, UserRegistrationMethod,
};
use chrono::{DateTime, Utc};
use tracing::instrument;

#[async_trait::async_trait]
impl Repository<UserRegistrationMethod> for PgStore {
    #[instrument(skip(self, filter), err)]
    async fn list(&self, filter: &RegistrationMethodFilter) -> Result<Vec<UserRegistrationMethod>> {
        let methods =
            sqlx::query_as::<_, UserRegistrationMethod>("SELECT * FROM user_registration_methods ORDER BY name LIMIT $1 OFFSET $2")
                .bind(filter.page.limit())
                .bind(filter.page.skip())
                .fetch_all(&self.pool)
                .await?;
        Ok(methods)
    }

    #[instrument(skip(self), fields(name = %name), err)]
    async fn get_by_id(&self, name: &String) -> Result<Option<UserRegistrationMethod>> {
        let method = sqlx::query_as::<_, UserRegistrationMethod>("SELECT * FROM user_registration_methods WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(method)
    }

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&self, request: &RegistrationMethodCreateDBRequest) -> Result<UserRegistrationMethod> {
        let method =
            sqlx::query_as::<_, UserRegistrationMethod>("INSERT INTO user_registration_methods (name) VALUES ($1) RETURNING *")
                .bind(&request.name)
                .fetch_one(&self.pool)
                .await?;
        Ok(method)
    }

    #[instrument(skip(self, request), fields(name = %name), err)]
    async fn update(&self, name: &String, request: &RegistrationMethodUpdateDBRequest) -> Result<UserRegistrationMethod> {
        sqlx::query_as::<_, UserRegistrationMethod>(
            "UPDATE user_registration_methods SET name = COALESCE($2, name)
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
    async fn remove(&self, name: &String) -> Result<UserRegistrationMethod> {
        sqlx::query_as::<_, UserRegistrationMethod>("DELETE FROM user_registration_methods WHERE name = $1 RETURNING *")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }
}

impl MemEntity for UserRegistrationMethod {
    const TABLE: &'static str = "user_registration_methods";

    fn from_create(request: &RegistrationMethodCreateDBRequest, _now: DateTime<Utc>) -> Self {
        Self {
            name: request.name.clone(),
        }
    }

    fn apply_update(&mut self, request: &RegistrationMethodUpdateDBRequest, _now: DateTime<Utc>) {
        if let Some(name) = &request.name {
            self.name = name.clone();
        }
    }

    fn conflicts_with(request: &RegistrationMethodCreateDBRequest, existing: &UserRegistrationMethod) -> Option<&'static str> {
        (existing.name == request.name).then_some("user_registration_methods_pkey")
    }

    fn matches(&self, _filter: &RegistrationMethodFilter) -> bool {
        true
    }
}
