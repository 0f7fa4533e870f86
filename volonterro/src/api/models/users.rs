//! API request/response models for users.

use crate::db::models::{
    Page,
    users::{User, UserCreateDBRequest, UserFilter, UserUpdateDBRequest},
};
use crate::types::UserId;
use crate::validation::{Constraint, EntitySchema, FieldSchema, ValidatedEntity};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub role: String,
    pub registration_method: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
}

static USER_CREATE_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new(vec![
        FieldSchema::required("role", vec![Constraint::String, Constraint::MaxLength(50)]),
        FieldSchema::required("registrationMethod", vec![Constraint::String, Constraint::MaxLength(50)]),
        FieldSchema::required("firstName", vec![Constraint::String, Constraint::MaxLength(50)]),
        FieldSchema::required("lastName", vec![Constraint::String, Constraint::MaxLength(50)]),
        FieldSchema::required("email", vec![Constraint::String, Constraint::MaxLength(50)]),
        FieldSchema::optional("phone", vec![Constraint::String, Constraint::MaxLength(15)]),
        FieldSchema::optional("bio", vec![Constraint::String, Constraint::MaxLength(255)]),
        FieldSchema::optional("birthDate", vec![Constraint::DateTime, Constraint::MaxDateNow]),
    ])
});

impl ValidatedEntity for UserCreate {
    fn schema() -> &'static EntitySchema {
        &USER_CREATE_SCHEMA
    }
}

impl From<UserCreate> for UserCreateDBRequest {
    fn from(api: UserCreate) -> Self {
        Self {
            role: api.role,
            registration_method: api.registration_method,
            first_name: api.first_name,
            last_name: api.last_name,
            email: api.email,
            phone: api.phone,
            bio: api.bio,
            birth_date: api.birth_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
}

static USER_UPDATE_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new(vec![
        FieldSchema::optional("role", vec![Constraint::String, Constraint::MaxLength(50)]),
        FieldSchema::optional("firstName", vec![Constraint::String, Constraint::MaxLength(50)]),
        FieldSchema::optional("lastName", vec![Constraint::String, Constraint::MaxLength(50)]),
        FieldSchema::optional("email", vec![Constraint::String, Constraint::MaxLength(50)]),
        FieldSchema::optional("phone", vec![Constraint::String, Constraint::MaxLength(15)]),
        FieldSchema::optional("bio", vec![Constraint::String, Constraint::MaxLength(255)]),
        FieldSchema::optional("birthDate", vec![Constraint::DateTime, Constraint::MaxDateNow]),
    ])
});

impl ValidatedEntity for UserUpdate {
    fn schema() -> &'static EntitySchema {
        &USER_UPDATE_SCHEMA
    }
}

impl From<UserUpdate> for UserUpdateDBRequest {
    fn from(api: UserUpdate) -> Self {
        Self {
            role: api.role,
            first_name: api.first_name,
            last_name: api.last_name,
            email: api.email,
            phone: api.phone,
            bio: api.bio,
            birth_date: api.birth_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub role: String,
    pub registration_method: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
    pub registered_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            registration_method: user.registration_method,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            bio: user.bio,
            birth_date: user.birth_date,
            registered_at: user.registered_at,
        }
    }
}

/// Query parameters for listing users
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl From<ListUsersQuery> for UserFilter {
    fn from(query: ListUsersQuery) -> Self {
        Self {
            role: query.role,
            page: Page {
                skip: query.skip,
                limit: query.limit,
            },
        }
    }
}
