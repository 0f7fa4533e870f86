//! API request and response data models.
//!
//! These structures define the public wire contract: camelCase JSON mirroring
//! the platform's original API, kept separate from the storage models so the
//! two can evolve independently. Every create/update payload also declares
//! its validation schema (see [`crate::validation`]), evaluated by the gate
//! before any storage access.

pub mod bans;
pub mod chat_message_attachments;
pub mod followings;
pub mod post_donations;
pub mod posts;
pub mod registration_methods;
pub mod user_roles;
pub mod users;
