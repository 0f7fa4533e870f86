//! API request/response models for chat message attachments.

use crate::db::models::{
    Page,
    chat_message_attachments::{
        AttachmentCreateDBRequest, AttachmentFilter, AttachmentUpdateDBRequest, ChatMessageAttachment,
    },
};
use crate::types::{AttachmentId, MessageId};
use crate::validation::{Constraint, EntitySchema, FieldSchema, ValidatedEntity};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentCreate {
    pub message_id: MessageId,
    pub file: String,
    pub filename: Option<String>,
    pub resource_type: String,
}

static ATTACHMENT_CREATE_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new(vec![
        FieldSchema::required("messageId", vec![Constraint::Uuid]),
        FieldSchema::required("file", vec![Constraint::String, Constraint::MaxLength(255)]),
        FieldSchema::optional("filename", vec![Constraint::String, Constraint::MaxLength(255)]),
        FieldSchema::required("resourceType", vec![Constraint::String, Constraint::MaxLength(255)]),
    ])
});

impl ValidatedEntity for AttachmentCreate {
    fn schema() -> &'static EntitySchema {
        &ATTACHMENT_CREATE_SCHEMA
    }
}

impl From<AttachmentCreate> for AttachmentCreateDBRequest {
    fn from(api: AttachmentCreate) -> Self {
        Self {
            message_id: api.message_id,
            file: api.file,
            filename: api.filename,
            resource_type: api.resource_type,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentUpdate {
    pub file: Option<String>,
    pub filename: Option<String>,
    pub resource_type: Option<String>,
}

static ATTACHMENT_UPDATE_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new(vec![
        FieldSchema::optional("file", vec![Constraint::String, Constraint::MaxLength(255)]),
        FieldSchema::optional("filename", vec![Constraint::String, Constraint::MaxLength(255)]),
        FieldSchema::optional("resourceType", vec![Constraint::String, Constraint::MaxLength(255)]),
    ])
});

impl ValidatedEntity for AttachmentUpdate {
    fn schema() -> &'static EntitySchema {
        &ATTACHMENT_UPDATE_SCHEMA
    }
}

impl From<AttachmentUpdate> for AttachmentUpdateDBRequest {
    fn from(api: AttachmentUpdate) -> Self {
        Self {
            file: api.file,
            filename: api.filename,
            resource_type: api.resource_type,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentResponse {
    pub id: AttachmentId,
    pub message_id: MessageId,
    pub file: String,
    pub filename: Option<String>,
    pub resource_type: String,
}

impl From<ChatMessageAttachment> for AttachmentResponse {
    fn from(attachment: ChatMessageAttachment) -> Self {
        Self {
            id: attachment.id,
            message_id: attachment.message_id,
            file: attachment.file,
            filename: attachment.filename,
            resource_type: attachment.resource_type,
        }
    }
}

/// Query parameters for listing attachments
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAttachmentsQuery {
    pub message_id: Option<MessageId>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl From<ListAttachmentsQuery> for AttachmentFilter {
    fn from(query: ListAttachmentsQuery) -> Self {
        Self {
            message_id: query.message_id,
            page: Page {
                skip: query.skip,
                limit: query.limit,
            },
        }
    }
}
