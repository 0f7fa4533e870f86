//! Storage models for users.

use super::{Entity, Page};
use crate::types::UserId;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: UserId,
    /// Natural-key reference to `user_roles.name`
    pub role: String,
    /// Natural-key reference to `user_registration_methods.name`
    pub registration_method: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub role: String,
    pub registration_method: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct UserUpdateDBRequest {
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
}

/// Filter for listing users
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<String>,
    pub page: Page,
}

impl Entity for User {
    type Key = UserId;
    type CreateRequest = UserCreateDBRequest;
    type UpdateRequest = UserUpdateDBRequest;
    type Filter = UserFilter;

    const NAME: &'static str = "User";

    fn key(&self) -> UserId {
        self.id
    }

    fn page(filter: &UserFilter) -> Page {
        filter.page
    }
}
