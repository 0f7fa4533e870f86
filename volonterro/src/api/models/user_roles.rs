//! API request/response models for user roles.

use crate::db::models::{
    Page,
    user_roles::{UserRole, UserRoleCreateDBRequest, UserRoleFilter, UserRoleUpdateDBRequest},
};
use crate::validation::{Constraint, EntitySchema, FieldSchema, ValidatedEntity};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct UserRoleCreate {
    pub name: String,
}

static ROLE_CREATE_SCHEMA: Lazy<EntitySchema> =
    Lazy::new(|| EntitySchema::new(vec![FieldSchema::required("name", vec![Constraint::String, Constraint::MaxLength(50)])]));

impl ValidatedEntity for UserRoleCreate {
    fn schema() -> &'static EntitySchema {
        &ROLE_CREATE_SCHEMA
    }
}

impl From<UserRoleCreate> for UserRoleCreateDBRequest {
    fn from(api: UserRoleCreate) -> Self {
        Self { name: api.name }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRoleUpdate {
    pub name: Option<String>,
}

static ROLE_UPDATE_SCHEMA: Lazy<EntitySchema> =
    Lazy::new(|| EntitySchema::new(vec![FieldSchema::optional("name", vec![Constraint::String, Constraint::MaxLength(50)])]));

impl ValidatedEntity for UserRoleUpdate {
    fn schema() -> &'static EntitySchema {
        &ROLE_UPDATE_SCHEMA
    }
}

impl From<UserRoleUpdate> for UserRoleUpdateDBRequest {
    fn from(api: UserRoleUpdate) -> Self {
        Self { name: api.name }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRoleResponse {
    pub name: String,
}

impl From<UserRole> for UserRoleResponse {
    fn from(role: UserRole) -> Self {
        Self { name: role.name }
    }
}

/// Query parameters for listing roles
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUserRolesQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl From<ListUserRolesQuery> for UserRoleFilter {
    fn from(query: ListUserRolesQuery) -> Self {
        Self {
            page: Page {
                skip: query.skip,
                limit: query.limit,
            },
        }
    }
}
