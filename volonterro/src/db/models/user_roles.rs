//! Storage models for user roles (natural-key addressed).

use super::{Entity, Page};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct UserRole {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct UserRoleCreateDBRequest {
    pub name: String,
}

/// Renames the role; referencing users follow via ON UPDATE CASCADE.
#[derive(Debug, Clone, Default)]
pub struct UserRoleUpdateDBRequest {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UserRoleFilter {
    pub page: Page,
}

impl Entity for UserRole {
    type Key = String;
    type CreateRequest = UserRoleCreateDBRequest;
    type UpdateRequest = UserRoleUpdateDBRequest;
    type Filter = UserRoleFilter;

    const NAME: &'static str = "User role";

    fn key(&self) -> String {
        self.name.clone()
    }

    fn page(filter: &UserRoleFilter) -> Page {
        filter.page
    }
}
