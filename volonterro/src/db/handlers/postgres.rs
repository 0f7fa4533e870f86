//! PostgreSQL storage backend.
//!
//! [`PgStore`] holds the connection pool; the per-resource `Repository`
//! implementations live next to their models in the sibling modules
//! (`posts`, `users`, …). Constraint enforcement - identifier and natural-key
//! uniqueness, foreign keys, check constraints - is delegated to the
//! database; sqlx errors are categorized into [`crate::db::errors::DbError`]
//! at this boundary and never retried.

use crate::db::handlers::repository::{Repository, Store};
use crate::db::models::{
    bans::UsersBanListRecord,
    chat_message_attachments::ChatMessageAttachment,
    followings::Following,
    post_donations::PostDonation,
    posts::Post,
    registration_methods::UserRegistrationMethod,
    user_roles::UserRole,
    users::User,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgStore {
    pub(crate) pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Store for PgStore {
    fn posts(&self) -> &dyn Repository<Post> {
        self
    }

    fn donations(&self) -> &dyn Repository<PostDonation> {
        self
    }

    fn users(&self) -> &dyn Repository<User> {
        self
    }

    fn followings(&self) -> &dyn Repository<Following> {
        self
    }

    fn bans(&self) -> &dyn Repository<UsersBanListRecord> {
        self
    }

    fn attachments(&self) -> &dyn Repository<ChatMessageAttachment> {
        self
    }

    fn user_roles(&self) -> &dyn Repository<UserRole> {
        self
    }

    fn registration_methods(&self) -> &dyn Repository<UserRegistrationMethod> {
        self
    }
}
