//! Post endpoints.
//!
//! Posts go entirely through the generic CRUD component; the only
//! resource-specific behavior (soft removal, author filtering) lives in the
//! repository and the entity schema.

use crate::api::handlers::crud::CrudResource;
use crate::api::models::posts::{ListPostsQuery, PostCreate, PostResponse, PostUpdate};
use crate::db::handlers::repository::{Repository, Store};
use crate::db::models::posts::Post;

impl CrudResource for Post {
    type Create = PostCreate;
    type Update = PostUpdate;
    type Response = PostResponse;
    type ListQuery = ListPostsQuery;

    fn repository(store: &dyn Store) -> &dyn Repository<Self> {
        store.posts()
    }
}
