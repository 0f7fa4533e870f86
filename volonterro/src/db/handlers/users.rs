//! Repository implementations for users.

use crate::db::errors::{DbError, Result};
use crate::db::handlers::memory::{ForeignRef, MemEntity};
use crate::db::handlers::postgres::PgStore;
use crate::db::handlers::repository::Repository;
use crate::db::models::users::{User, UserCreateDBRequest, UserFilter, UserUpdateDBRequest};
use crate::types::{UserId, abbrev_uuid};
use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

#[async_trait::async_trait]
impl Repository<User> for PgStore {
    #[instrument(skip(self, filter), fields(role = ?filter.role), err)]
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users
             WHERE $1::text IS NULL OR role = $1
             ORDER BY registered_at DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(&filter.role)
        .bind(filter.page.limit())
        .bind(filter.page.skip())
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(id)), err)]
    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn create(&self, request: &UserCreateDBRequest) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, role, registration_method, first_name, last_name, email, phone, bio, birth_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&request.role)
        .bind(&request.registration_method)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.bio)
        .bind(request.birth_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(id)), err)]
    async fn update(&self, id: &UserId, request: &UserUpdateDBRequest) -> Result<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET
                role = COALESCE($2, role),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                bio = COALESCE($7, bio),
                birth_date = COALESCE($8, birth_date)
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&request.role)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.bio)
        .bind(request.birth_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(id)), err)]
    async fn remove(&self, id: &UserId) -> Result<User> {
        sqlx::query_as::<_, User>("DELETE FROM users WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }
}

impl MemEntity for User {
    const TABLE: &'static str = "users";

    fn from_create(request: &UserCreateDBRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: request.role.clone(),
            registration_method: request.registration_method.clone(),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            bio: request.bio.clone(),
            birth_date: request.birth_date,
            registered_at: now,
        }
    }

    fn apply_update(&mut self, request: &UserUpdateDBRequest, _now: DateTime<Utc>) {
        if let Some(role) = &request.role {
            self.role = role.clone();
        }
        if let Some(first_name) = &request.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &request.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(email) = &request.email {
            self.email = email.clone();
        }
        if let Some(phone) = &request.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(bio) = &request.bio {
            self.bio = Some(bio.clone());
        }
        if let Some(birth_date) = request.birth_date {
            self.birth_date = Some(birth_date);
        }
    }

    fn conflicts_with(request: &UserCreateDBRequest, existing: &User) -> Option<&'static str> {
        (existing.email == request.email).then_some("users_email_key")
    }

    fn create_refs(request: &UserCreateDBRequest) -> Vec<ForeignRef> {
        vec![
            ForeignRef::Role(request.role.clone()),
            ForeignRef::RegistrationMethod(request.registration_method.clone()),
        ]
    }

    fn update_refs(request: &UserUpdateDBRequest) -> Vec<ForeignRef> {
        request.role.iter().map(|role| ForeignRef::Role(role.clone())).collect()
    }

    fn matches(&self, filter: &UserFilter) -> bool {
        filter.role.as_deref().is_none_or(|role| self.role == role)
    }
}
