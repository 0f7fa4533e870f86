//! HTTP request handlers.
//!
//! [`crud`] is the generic five-verb endpoint component; each resource module
//! binds its entity to it and adds whatever hand-written surface the resource
//! needs (pair-addressed followings, donation expansion, `/users/current`).

pub mod bans;
pub mod chat_message_attachments;
pub mod crud;
pub mod followings;
pub mod post_donations;
pub mod posts;
pub mod registration_methods;
pub mod user_roles;
pub mod users;
