//! API request/response models for users-ban-list records.

use crate::db::models::{
    Page,
    bans::{BAN_STATUSES, BanCreateDBRequest, BanFilter, BanUpdateDBRequest, UsersBanListRecord},
};
use crate::types::{BanRecordId, UserId};
use crate::validation::{Constraint, EntitySchema, FieldSchema, ValidatedEntity};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanCreate {
    pub user_id: UserId,
    pub status: String,
    pub registered_at: Option<DateTime<Utc>>,
    pub due_to: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

static BAN_CREATE_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new(vec![
        FieldSchema::required("userId", vec![Constraint::Uuid]),
        FieldSchema::required("status", vec![Constraint::String, Constraint::OneOf(BAN_STATUSES)]),
        FieldSchema::optional("registeredAt", vec![Constraint::DateTime, Constraint::MaxDateNow]),
        FieldSchema::optional("dueTo", vec![Constraint::DateTime]),
        FieldSchema::optional("note", vec![Constraint::String, Constraint::MaxLength(255)]),
    ])
});

impl ValidatedEntity for BanCreate {
    fn schema() -> &'static EntitySchema {
        &BAN_CREATE_SCHEMA
    }
}

impl From<BanCreate> for BanCreateDBRequest {
    fn from(api: BanCreate) -> Self {
        Self {
            user_id: api.user_id,
            status: api.status,
            registered_at: api.registered_at,
            due_to: api.due_to,
            note: api.note,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanUpdate {
    pub status: Option<String>,
    pub due_to: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

static BAN_UPDATE_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new(vec![
        FieldSchema::optional("status", vec![Constraint::String, Constraint::OneOf(BAN_STATUSES)]),
        FieldSchema::optional("dueTo", vec![Constraint::DateTime]),
        FieldSchema::optional("note", vec![Constraint::String, Constraint::MaxLength(255)]),
    ])
});

impl ValidatedEntity for BanUpdate {
    fn schema() -> &'static EntitySchema {
        &BAN_UPDATE_SCHEMA
    }
}

impl From<BanUpdate> for BanUpdateDBRequest {
    fn from(api: BanUpdate) -> Self {
        Self {
            status: api.status,
            due_to: api.due_to,
            note: api.note,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanResponse {
    pub id: BanRecordId,
    pub user_id: UserId,
    pub status: String,
    pub registered_at: DateTime<Utc>,
    pub due_to: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

impl From<UsersBanListRecord> for BanResponse {
    fn from(record: UsersBanListRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            status: record.status,
            registered_at: record.registered_at,
            due_to: record.due_to,
            note: record.note,
        }
    }
}

/// Query parameters for listing ban records
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBansQuery {
    pub user_id: Option<UserId>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl From<ListBansQuery> for BanFilter {
    fn from(query: ListBansQuery) -> Self {
        Self {
            user_id: query.user_id,
            page: Page {
                skip: query.skip,
                limit: query.limit,
            },
        }
    }
}
