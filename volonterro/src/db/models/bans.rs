//! Storage models for users-ban-list records.

use super::{Entity, Page};
use crate::types::{BanRecordId, UserId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Allowed ban statuses, mirrored by the storage check constraint.
pub const BAN_STATUSES: &[&str] = &["PERMANENT", "TEMPORARY"];

#[derive(Debug, Clone, FromRow)]
pub struct UsersBanListRecord {
    pub id: BanRecordId,
    pub user_id: UserId,
    pub status: String,
    pub registered_at: DateTime<Utc>,
    pub due_to: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BanCreateDBRequest {
    pub user_id: UserId,
    pub status: String,
    /// Defaults to the moment of creation when the caller omits it
    pub registered_at: Option<DateTime<Utc>>,
    pub due_to: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BanUpdateDBRequest {
    pub status: Option<String>,
    pub due_to: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

/// Filter for listing ban records
#[derive(Debug, Clone, Default)]
pub struct BanFilter {
    pub user_id: Option<UserId>,
    pub page: Page,
}

impl Entity for UsersBanListRecord {
    type Key = BanRecordId;
    type CreateRequest = BanCreateDBRequest;
    type UpdateRequest = BanUpdateDBRequest;
    type Filter = BanFilter;

    const NAME: &'static str = "Users ban list record";

    fn key(&self) -> BanRecordId {
        self.id
    }

    fn page(filter: &BanFilter) -> Page {
        filter.page
    }
}
