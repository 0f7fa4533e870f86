//! Repository implementations for users-ban-list records.

use crate::db::errors::{DbError, Result};
use crate::db::handlers::memory::{ForeignRef, MemEntity};
use crate::db::handlers::postgres::PgStore;
use crate::db::handlers::repository::Repository;
use crate::db::models::bans::{BanCreateDBRequest, BanFilter, BanUpdateDBRequest, UsersBanListRecord};
use crate::types::{BanRecordId, abbrev_uuid};
use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

#[async_trait::async_trait]
impl Repository<UsersBanListRecord> for PgStore {
    #[instrument(skip(self, filter), fields(user_id = ?filter.user_id), err)]
    async fn list(&self, filter: &BanFilter) -> Result<Vec<UsersBanListRecord>> {
        let records = sqlx::query_as::<_, UsersBanListRecord>(
            "SELECT * FROM users_ban_list_records
             WHERE $1::uuid IS NULL OR user_id = $1
             ORDER BY registered_at DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(filter.user_id)
        .bind(filter.page.limit())
        .bind(filter.page.skip())
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    #[instrument(skip(self), fields(ban_id = %abbrev_uuid(id)), err)]
    async fn get_by_id(&self, id: &BanRecordId) -> Result<Option<UsersBanListRecord>> {
        let record = sqlx::query_as::<_, UsersBanListRecord>("SELECT * FROM users_ban_list_records WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    #[instrument(skip(self, request), fields(user_id = %abbrev_uuid(&request.user_id), status = %request.status), err)]
    async fn create(&self, request: &BanCreateDBRequest) -> Result<UsersBanListRecord> {
        let record = sqlx::query_as::<_, UsersBanListRecord>(
            "INSERT INTO users_ban_list_records (id, user_id, status, registered_at, due_to, note)
             VALUES ($1, $2, $3, COALESCE($4, NOW()), $5, $6)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(request.user_id)
        .bind(&request.status)
        .bind(request.registered_at)
        .bind(request.due_to)
        .bind(&request.note)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    #[instrument(skip(self, request), fields(ban_id = %abbrev_uuid(id)), err)]
    async fn update(&self, id: &BanRecordId, request: &BanUpdateDBRequest) -> Result<UsersBanListRecord> {
        sqlx::query_as::<_, UsersBanListRecord>(
            "UPDATE users_ban_list_records SET
                status = COALESCE($2, status),
                due_to = COALESCE($3, due_to),
                note = COALESCE($4, note)
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&request.status)
        .bind(request.due_to)
        .bind(&request.note)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(ban_id = %abbrev_uuid(id)), err)]
    async fn remove(&self, id: &BanRecordId) -> Result<UsersBanListRecord> {
        sqlx::query_as::<_, UsersBanListRecord>("DELETE FROM users_ban_list_records WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }
}

impl MemEntity for UsersBanListRecord {
    const TABLE: &'static str = "users_ban_list_records";

    fn from_create(request: &BanCreateDBRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            status: request.status.clone(),
            registered_at: request.registered_at.unwrap_or(now),
            due_to: request.due_to,
            note: request.note.clone(),
        }
    }

    fn apply_update(&mut self, request: &BanUpdateDBRequest, _now: DateTime<Utc>) {
        if let Some(status) = &request.status {
            self.status = status.clone();
        }
        if let Some(due_to) = request.due_to {
            self.due_to = Some(due_to);
        }
        if let Some(note) = &request.note {
            self.note = Some(note.clone());
        }
    }

    fn create_refs(request: &BanCreateDBRequest) -> Vec<ForeignRef> {
        vec![ForeignRef::User(request.user_id)]
    }

    fn matches(&self, filter: &BanFilter) -> bool {
        filter.user_id.is_none_or(|user_id| self.user_id == user_id)
    }
}
