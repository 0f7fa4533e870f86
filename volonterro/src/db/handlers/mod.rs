//! Repository implementations for storage access.
//!
//! The [`repository::Repository`] trait is the storage contract: five verbs
//! (list, get, create, update, remove) shared by every resource, each a
//! single atomic storage operation. [`repository::Store`] aggregates one
//! repository per resource and is the only storage type the API layer sees.
//!
//! Two backends implement the contract:
//!
//! - [`postgres::PgStore`] - production storage, with uniqueness and
//!   referential integrity enforced by PostgreSQL constraints
//! - [`memory::MemStore`] - the in-memory fake used by tests

pub mod bans;
pub mod chat_message_attachments;
pub mod followings;
pub mod memory;
pub mod post_donations;
pub mod postgres;
pub mod posts;
pub mod registration_methods;
pub mod repository;
pub mod user_roles;
pub mod users;

pub use memory::MemStore;
pub use postgres::PgStore;
pub use repository::{Repository, Store};
