//! Storage models for chat message attachments.

use super::{Entity, Page};
use crate::types::{AttachmentId, MessageId};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ChatMessageAttachment {
    pub id: AttachmentId,
    /// Messages live in the messaging service; this id is stored opaque
    pub message_id: MessageId,
    pub file: String,
    pub filename: Option<String>,
    pub resource_type: String,
}

#[derive(Debug, Clone)]
pub struct AttachmentCreateDBRequest {
    pub message_id: MessageId,
    pub file: String,
    pub filename: Option<String>,
    pub resource_type: String,
}

#[derive(Debug, Clone, Default)]
pub struct AttachmentUpdateDBRequest {
    pub file: Option<String>,
    pub filename: Option<String>,
    pub resource_type: Option<String>,
}

/// Filter for listing attachments
#[derive(Debug, Clone, Default)]
pub struct AttachmentFilter {
    pub message_id: Option<MessageId>,
    pub page: Page,
}

impl Entity for ChatMessageAttachment {
    type Key = AttachmentId;
    type CreateRequest = AttachmentCreateDBRequest;
    type UpdateRequest = AttachmentUpdateDBRequest;
    type Filter = AttachmentFilter;

    const NAME: &'static str = "Chat message attachment";

    fn key(&self) -> AttachmentId {
        self.id
    }

    fn page(filter: &AttachmentFilter) -> Page {
        filter.page
    }
}
