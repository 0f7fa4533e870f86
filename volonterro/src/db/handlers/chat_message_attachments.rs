//! Repository implementations for chat message attachments.

use crate::db::errors::{DbError, Result};
use crate::db::handlers::memory::MemEntity;
use crate::db::handlers::postgres::PgStore;
use crate::db::handlers::repository::Repository;
use crate::db::models::chat_message_attachments::{
    AttachmentCreateDBRequest, AttachmentFilter, AttachmentUpdateDBRequest, ChatMessageAttachment,
};
use crate::types::{AttachmentId, abbrev_uuid};
use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

#[async_trait::async_trait]
impl Repository<ChatMessageAttachment> for PgStore {
    #[instrument(skip(self, filter), fields(message_id = ?filter.message_id), err)]
    async fn list(&self, filter: &AttachmentFilter) -> Result<Vec<ChatMessageAttachment>> {
        let attachments = sqlx::query_as::<_, ChatMessageAttachment>(
            "SELECT * FROM chat_message_attachments
             WHERE $1::uuid IS NULL OR message_id = $1
             ORDER BY id
             LIMIT $2 OFFSET $3",
        )
        .bind(filter.message_id)
        .bind(filter.page.limit())
        .bind(filter.page.skip())
        .fetch_all(&self.pool)
        .await?;
        Ok(attachments)
    }

    #[instrument(skip(self), fields(attachment_id = %abbrev_uuid(id)), err)]
    async fn get_by_id(&self, id: &AttachmentId) -> Result<Option<ChatMessageAttachment>> {
        let attachment = sqlx::query_as::<_, ChatMessageAttachment>("SELECT * FROM chat_message_attachments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(attachment)
    }

    #[instrument(skip(self, request), fields(message_id = %abbrev_uuid(&request.message_id)), err)]
    async fn create(&self, request: &AttachmentCreateDBRequest) -> Result<ChatMessageAttachment> {
        let attachment = sqlx::query_as::<_, ChatMessageAttachment>(
            "INSERT INTO chat_message_attachments (id, message_id, file, filename, resource_type)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(request.message_id)
        .bind(&request.file)
        .bind(&request.filename)
        .bind(&request.resource_type)
        .fetch_one(&self.pool)
        .await?;
        Ok(attachment)
    }

    #[instrument(skip(self, request), fields(attachment_id = %abbrev_uuid(id)), err)]
    async fn update(&self, id: &AttachmentId, request: &AttachmentUpdateDBRequest) -> Result<ChatMessageAttachment> {
        sqlx::query_as::<_, ChatMessageAttachment>(
            "UPDATE chat_message_attachments SET
                file = COALESCE($2, file),
                filename = COALESCE($3, filename),
                resource_type = COALESCE($4, resource_type)
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&request.file)
        .bind(&request.filename)
        .bind(&request.resource_type)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(attachment_id = %abbrev_uuid(id)), err)]
    async fn remove(&self, id: &AttachmentId) -> Result<ChatMessageAttachment> {
        sqlx::query_as::<_, ChatMessageAttachment>("DELETE FROM chat_message_attachments WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }
}

impl MemEntity for ChatMessageAttachment {
    const TABLE: &'static str = "chat_message_attachments";

    fn from_create(request: &AttachmentCreateDBRequest, _now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message_id: request.message_id,
            file: request.file.clone(),
            filename: request.filename.clone(),
            resource_type: request.resource_type.clone(),
        }
    }

    fn apply_update(&mut self, request: &AttachmentUpdateDBRequest, _now: DateTime<Utc>) {
        if let Some(file) = &request.file {
            self.file = file.clone();
        }
        if let Some(filename) = &request.filename {
            self.filename = Some(filename.clone());
        }
        if let Some(resource_type) = &request.resource_type {
            self.resource_type = resource_type.clone();
        }
    }

    fn matches(&self, filter: &AttachmentFilter) -> bool {
        filter.message_id.is_none_or(|message_id| self.message_id == message_id)
    }
}
