//! Base repository trait for storage operations.

use crate::db::errors::Result;
use crate::db::models::{
    Entity,
    bans::UsersBanListRecord,
    chat_message_attachments::ChatMessageAttachment,
    followings::Following,
    post_donations::PostDonation,
    posts::Post,
    registration_methods::UserRegistrationMethod,
    user_roles::UserRole,
    users::User,
};

/// Storage contract shared by every resource.
///
/// Each operation is a single storage transaction: no partial writes are
/// observable and no multi-record coordination happens at this layer.
/// Uniqueness of identifiers and natural keys is enforced by the backing
/// store, so a race between two concurrent creates resolves as one success
/// and one unique-violation error.
#[async_trait::async_trait]
pub trait Repository<R: Entity>: Send + Sync {
    /// List entities matching the filter; an empty filter returns the full
    /// visible set.
    async fn list(&self, filter: &R::Filter) -> Result<Vec<R>>;

    /// Get an entity by its identifier or natural key.
    async fn get_by_id(&self, id: &R::Key) -> Result<Option<R>>;

    /// Create a new entity. Fails with a unique violation when the identifier
    /// or natural key already exists.
    async fn create(&self, request: &R::CreateRequest) -> Result<R>;

    /// Merge the supplied fields onto an existing entity; unsupplied fields
    /// keep their prior values. Fails with [`crate::db::errors::DbError::NotFound`]
    /// when the id does not exist.
    async fn update(&self, id: &R::Key, request: &R::UpdateRequest) -> Result<R>;

    /// Remove an entity and return its final state: soft-removed resources
    /// come back with their removal timestamp set, hard-deleted ones as the
    /// pre-delete row.
    async fn remove(&self, id: &R::Key) -> Result<R>;
}

/// Aggregate storage boundary handed to the API layer.
///
/// One accessor per resource, each yielding the generic [`Repository`]
/// contract. Implemented by the PostgreSQL store and by the in-memory fake
/// used in tests, so handlers never know which backing store they run on.
pub trait Store: Send + Sync + 'static {
    fn posts(&self) -> &dyn Repository<Post>;
    fn donations(&self) -> &dyn Repository<PostDonation>;
    fn users(&self) -> &dyn Repository<User>;
    fn followings(&self) -> &dyn Repository<Following>;
    fn bans(&self) -> &dyn Repository<UsersBanListRecord>;
    fn attachments(&self) -> &dyn Repository<ChatMessageAttachment>;
    fn user_roles(&self) -> &dyn Repository<UserRole>;
    fn registration_methods(&self) -> &dyn Repository<UserRegistrationMethod>;
}
