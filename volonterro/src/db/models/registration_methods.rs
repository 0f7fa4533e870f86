//! Storage models for user registration methods (natural-key addressed).

use super::{Entity, Page};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct UserRegistrationMethod {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct RegistrationMethodCreateDBRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationMethodUpdateDBRequest {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationMethodFilter {
    pub page: Page,
}

impl Entity for UserRegistrationMethod {
    type Key = String;
    type CreateRequest = RegistrationMethodCreateDBRequest;
    type UpdateRequest = RegistrationMethodUpdateDBRequest;
    type Filter = RegistrationMethodFilter;

    const NAME: &'static str = "User registration method";

    fn key(&self) -> String {
        self.name.clone()
    }

    fn page(filter: &RegistrationMethodFilter) -> Page {
        filter.page
    }
}
