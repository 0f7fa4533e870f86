//! API request/response models for user registration methods.

use crate::db::models::{
    Page,
    registration_methods::{
        RegistrationMethodCreateDBRequest, RegistrationMethodFilter, RegistrationMethodUpdateDBRequest, UserRegistrationMethod,
    },
};
use crate::validation::{Constraint, EntitySchema, FieldSchema, ValidatedEntity};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationMethodCreate {
    pub name: String,
}

static METHOD_CREATE_SCHEMA: Lazy<EntitySchema> =
    Lazy::new(|| EntitySchema::new(vec![FieldSchema::required("name", vec![Constraint::String, Constraint::MaxLength(50)])]));

impl ValidatedEntity for RegistrationMethodCreate {
    fn schema() -> &'static EntitySchema {
        &METHOD_CREATE_SCHEMA
    }
}

impl From<RegistrationMethodCreate> for RegistrationMethodCreateDBRequest {
    fn from(api: RegistrationMethodCreate) -> Self {
        Self { name: api.name }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationMethodUpdate {
    pub name: Option<String>,
}

static METHOD_UPDATE_SCHEMA: Lazy<EntitySchema> =
    Lazy::new(|| EntitySchema::new(vec![FieldSchema::optional("name", vec![Constraint::String, Constraint::MaxLength(50)])]));

impl ValidatedEntity for RegistrationMethodUpdate {
    fn schema() -> &'static EntitySchema {
        &METHOD_UPDATE_SCHEMA
    }
}

impl From<RegistrationMethodUpdate> for RegistrationMethodUpdateDBRequest {
    fn from(api: RegistrationMethodUpdate) -> Self {
        Self { name: api.name }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationMethodResponse {
    pub name: String,
}

impl From<UserRegistrationMethod> for RegistrationMethodResponse {
    fn from(method: UserRegistrationMethod) -> Self {
        Self { name: method.name }
    }
}

/// Query parameters for listing registration methods
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRegistrationMethodsQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl From<ListRegistrationMethodsQuery> for RegistrationMethodFilter {
    fn from(query: ListRegistrationMethodsQuery) -> Self {
        Self {
            page: Page {
                skip: query.skip,
                limit: query.limit,
            },
        }
    }
}
