//! In-memory store implementing the repository contract.
//!
//! This is the storage double used by tests: seeded per test with fixture
//! rows and thrown away afterwards. It enforces the same boundary semantics
//! as PostgreSQL - uniqueness of identifiers and natural keys, foreign-key
//! existence, soft-removal visibility - so handler tests observe the same
//! outcomes they would against the real database.
//!
//! One generic [`Repository`] implementation covers every resource; each
//! entity contributes its schema-specific hooks through [`MemEntity`].

use crate::db::errors::{DbError, Result};
use crate::db::handlers::repository::{Repository, Store};
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
use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// A reference from a create/update request to another resource, checked for
/// existence before the write is applied.
#[derive(Debug, Clone)]
pub enum ForeignRef {
    User(uuid::Uuid),
    Post(uuid::Uuid),
    Role(String),
    RegistrationMethod(String),
}

/// Schema-specific hooks the generic in-memory repository runs per entity.
pub trait MemEntity: Entity {
    /// Backing table name, used to label constraint errors like PostgreSQL does
    const TABLE: &'static str;

    /// Materialize a new row from a create request (id generation, defaults)
    fn from_create(request: &Self::CreateRequest, now: DateTime<Utc>) -> Self;

    /// Merge supplied fields onto the row; unsupplied fields stay untouched
    fn apply_update(&mut self, request: &Self::UpdateRequest, now: DateTime<Utc>);

    /// Natural-key duplication check against an existing row; returns the
    /// name of the violated constraint
    fn conflicts_with(_request: &Self::CreateRequest, _existing: &Self) -> Option<&'static str> {
        None
    }

    /// Foreign references a create request must resolve
    fn create_refs(_request: &Self::CreateRequest) -> Vec<ForeignRef> {
        Vec::new()
    }

    /// Foreign references an update request must resolve
    fn update_refs(_request: &Self::UpdateRequest) -> Vec<ForeignRef> {
        Vec::new()
    }

    /// Mark the row logically removed; return false for hard-deleted resources
    fn soft_remove(&mut self, _now: DateTime<Utc>) -> bool {
        false
    }

    /// Whether reads may observe the row (false once soft-removed)
    fn visible(&self) -> bool {
        true
    }

    fn matches(&self, filter: &Self::Filter) -> bool;
}

pub struct MemTable<R: Entity> {
    rows: DashMap<R::Key, R>,
}

impl<R: Entity> Default for MemTable<R> {
    fn default() -> Self {
        Self { rows: DashMap::new() }
    }
}

/// In-memory storage backend.
#[derive(Default)]
pub struct MemStore {
    posts: MemTable<Post>,
    donations: MemTable<PostDonation>,
    users: MemTable<User>,
    followings: MemTable<Following>,
    bans: MemTable<UsersBanListRecord>,
    attachments: MemTable<ChatMessageAttachment>,
    user_roles: MemTable<UserRole>,
    registration_methods: MemTable<UserRegistrationMethod>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn resolve_ref(&self, reference: &ForeignRef) -> bool {
        match reference {
            ForeignRef::User(id) => self.users.rows.contains_key(id),
            ForeignRef::Post(id) => self.posts.rows.contains_key(id),
            ForeignRef::Role(name) => self.user_roles.rows.contains_key(name),
            ForeignRef::RegistrationMethod(name) => self.registration_methods.rows.contains_key(name),
        }
    }

    fn check_refs(&self, table: &'static str, refs: &[ForeignRef]) -> Result<()> {
        for reference in refs {
            if !self.resolve_ref(reference) {
                return Err(DbError::ForeignKeyViolation {
                    constraint: None,
                    table: Some(table.to_string()),
                    message: format!("unresolved reference {reference:?}"),
                });
            }
        }
        Ok(())
    }
}

/// Per-resource table access for the generic repository implementation.
pub trait TableOf<R: Entity> {
    fn table_of(&self) -> &MemTable<R>;
}

macro_rules! impl_table_of {
    ($field:ident: $entity:ty) => {
        impl TableOf<$entity> for MemStore {
            fn table_of(&self) -> &MemTable<$entity> {
                &self.$field
            }
        }
    };
}

impl_table_of!(posts: Post);
impl_table_of!(donations: PostDonation);
impl_table_of!(users: User);
impl_table_of!(followings: Following);
impl_table_of!(bans: UsersBanListRecord);
impl_table_of!(attachments: ChatMessageAttachment);
impl_table_of!(user_roles: UserRole);
impl_table_of!(registration_methods: UserRegistrationMethod);

#[async_trait::async_trait]
impl<R> Repository<R> for MemStore
where
    R: MemEntity,
    MemStore: TableOf<R>,
{
    async fn list(&self, filter: &R::Filter) -> Result<Vec<R>> {
        let mut rows: Vec<R> = TableOf::<R>::table_of(self)
            .rows
            .iter()
            .filter(|entry| entry.value().visible() && entry.value().matches(filter))
            .map(|entry| entry.value().clone())
            .collect();
        // Deterministic order for a hash-backed table
        rows.sort_by_key(|row| row.key());

        let page = R::page(filter);
        let mut rows: Vec<R> = rows.into_iter().skip(page.skip() as usize).collect();
        if let Some(limit) = page.limit() {
            rows.truncate(limit as usize);
        }
        Ok(rows)
    }

    async fn get_by_id(&self, id: &R::Key) -> Result<Option<R>> {
        Ok(TableOf::<R>::table_of(self)
            .rows
            .get(id)
            .map(|entry| entry.value().clone())
            .filter(R::visible))
    }

    async fn create(&self, request: &R::CreateRequest) -> Result<R> {
        self.check_refs(R::TABLE, &R::create_refs(request))?;

        let table = TableOf::<R>::table_of(self);
        let conflict = table
            .rows
            .iter()
            .find_map(|entry| R::conflicts_with(request, entry.value()));
        if let Some(constraint) = conflict {
            return Err(DbError::UniqueViolation {
                constraint: Some(constraint.to_string()),
                table: Some(R::TABLE.to_string()),
                message: format!("duplicate key value violates unique constraint \"{constraint}\""),
            });
        }

        let row = R::from_create(request, Utc::now());
        table.rows.insert(row.key(), row.clone());
        Ok(row)
    }

    async fn update(&self, id: &R::Key, request: &R::UpdateRequest) -> Result<R> {
        self.check_refs(R::TABLE, &R::update_refs(request))?;

        let table = TableOf::<R>::table_of(self);
        let mut row = table
            .rows
            .get(id)
            .map(|entry| entry.value().clone())
            .filter(R::visible)
            .ok_or(DbError::NotFound)?;

        row.apply_update(request, Utc::now());
        let new_key = row.key();
        if new_key != *id {
            // Natural-key rename: the row moves to its new slot
            if table.rows.contains_key(&new_key) {
                return Err(DbError::UniqueViolation {
                    constraint: Some(format!("{}_pkey", R::TABLE)),
                    table: Some(R::TABLE.to_string()),
                    message: format!("{new_key} already exists"),
                });
            }
            table.rows.remove(id);
        }
        table.rows.insert(new_key, row.clone());
        Ok(row)
    }

    async fn remove(&self, id: &R::Key) -> Result<R> {
        let table = TableOf::<R>::table_of(self);
        let mut row = table
            .rows
            .get(id)
            .map(|entry| entry.value().clone())
            .filter(R::visible)
            .ok_or(DbError::NotFound)?;

        if row.soft_remove(Utc::now()) {
            table.rows.insert(id.clone(), row.clone());
        } else {
            table.rows.remove(id);
        }
        Ok(row)
    }
}

impl Store for MemStore {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::posts::{PostCreateDBRequest, PostFilter, PostUpdateDBRequest};
    use crate::db::models::user_roles::{UserRoleCreateDBRequest, UserRoleUpdateDBRequest};
    use crate::db::models::users::UserCreateDBRequest;

    async fn seed_author(store: &MemStore) -> User {
        store
            .user_roles()
            .create(&UserRoleCreateDBRequest {
                name: "Default".to_string(),
            })
            .await
            .unwrap();
        store
            .registration_methods()
            .create(&crate::db::models::registration_methods::RegistrationMethodCreateDBRequest {
                name: "Google".to_string(),
            })
            .await
            .unwrap();
        store
            .users()
            .create(&UserCreateDBRequest {
                role: "Default".to_string(),
                registration_method: "Google".to_string(),
                first_name: "Alex".to_string(),
                last_name: "Igumnov".to_string(),
                email: "alex@volonterro.com".to_string(),
                phone: None,
                bio: None,
                birth_date: None,
            })
            .await
            .unwrap()
    }

    #[test_log::test(tokio::test)]
    async fn create_then_get_round_trips() {
        let store = MemStore::new();
        let author = seed_author(&store).await;

        let post = store
            .posts()
            .create(&PostCreateDBRequest {
                author_id: author.id,
                title: "Food for shelters".to_string(),
                content: "Help us feed the shelters".to_string(),
            })
            .await
            .unwrap();

        let fetched = store.posts().get_by_id(&post.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, post.id);
        assert_eq!(fetched.title, post.title);
        assert_eq!(fetched.created_at, post.created_at);
    }

    #[test_log::test(tokio::test)]
    async fn soft_removed_posts_are_hidden_from_reads() {
        let store = MemStore::new();
        let author = seed_author(&store).await;
        let post = store
            .posts()
            .create(&PostCreateDBRequest {
                author_id: author.id,
                title: "Short-lived".to_string(),
                content: "…".to_string(),
            })
            .await
            .unwrap();

        let removed = store.posts().remove(&post.id).await.unwrap();
        assert!(removed.removed_at.is_some());

        assert!(store.posts().get_by_id(&post.id).await.unwrap().is_none());
        assert!(store.posts().list(&PostFilter::default()).await.unwrap().is_empty());

        // A second removal behaves as if the row were gone
        assert!(matches!(store.posts().remove(&post.id).await, Err(DbError::NotFound)));
    }

    #[test_log::test(tokio::test)]
    async fn update_merges_only_supplied_fields() {
        let store = MemStore::new();
        let author = seed_author(&store).await;
        let post = store
            .posts()
            .create(&PostCreateDBRequest {
                author_id: author.id,
                title: "Old title".to_string(),
                content: "Body".to_string(),
            })
            .await
            .unwrap();

        let updated = store
            .posts()
            .update(
                &post.id,
                &PostUpdateDBRequest {
                    title: Some("New title".to_string()),
                    content: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "New title");
        assert_eq!(updated.content, "Body");
        assert_eq!(updated.created_at, post.created_at);
    }

    #[test_log::test(tokio::test)]
    async fn missing_author_fails_the_foreign_key_check() {
        let store = MemStore::new();
        let result = store
            .posts()
            .create(&PostCreateDBRequest {
                author_id: uuid::Uuid::new_v4(),
                title: "Orphan".to_string(),
                content: "…".to_string(),
            })
            .await;
        assert!(matches!(result, Err(DbError::ForeignKeyViolation { .. })));
    }

    #[test_log::test(tokio::test)]
    async fn natural_key_rename_moves_the_row() {
        let store = MemStore::new();
        store
            .user_roles()
            .create(&UserRoleCreateDBRequest {
                name: "Volunteer".to_string(),
            })
            .await
            .unwrap();

        let renamed = store
            .user_roles()
            .update(
                &"Volunteer".to_string(),
                &UserRoleUpdateDBRequest {
                    name: Some("Helper".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "Helper");

        assert!(store.user_roles().get_by_id(&"Volunteer".to_string()).await.unwrap().is_none());
        assert!(store.user_roles().get_by_id(&"Helper".to_string()).await.unwrap().is_some());
    }

    #[test_log::test(tokio::test)]
    async fn duplicate_natural_key_is_a_unique_violation() {
        let store = MemStore::new();
        let request = UserRoleCreateDBRequest {
            name: "Administrator".to_string(),
        };
        store.user_roles().create(&request).await.unwrap();

        let result = store.user_roles().create(&request).await;
        assert!(matches!(result, Err(DbError::UniqueViolation { .. })));
        assert_eq!(
            store
                .user_roles()
                .list(&crate::db::models::user_roles::UserRoleFilter::default())
                .await
                .unwrap()
                .len(),
            1
        );
    }
}
