//! Storage layer.
//!
//! Follows the repository pattern: the API layer talks to
//! [`handlers::Store`], which yields one [`handlers::Repository`] per
//! resource. Row structures live in [`models`], error categorization in
//! [`errors`].
//!
//! Migrations are managed by sqlx and embedded from the `migrations/`
//! directory via [`crate::migrator`].

pub mod errors;
pub mod handlers;
pub mod models;
