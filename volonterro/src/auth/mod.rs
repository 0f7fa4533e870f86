//! Authentication layer.
//!
//! Token issuance belongs to the platform's identity service; this layer only
//! verifies the JWT presented with each request - either as a bearer token or
//! in the `Volonterro-Access-Token` cookie - and injects the acting user's
//! identity. Requests without a valid token are rejected with 401 before any
//! handler runs.

pub mod middleware;
pub mod session;

use crate::types::UserId;

/// The acting user's identity, decoded from the access token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
}
