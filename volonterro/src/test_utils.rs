//! Test utilities (available with the `test-utils` feature).
//!
//! Tests run the real router against the in-memory store: a fresh
//! [`MemStore`] per test, seeded with the default reference data and
//! whatever fixtures the test creates.

use crate::config::{AuthConfig, Config, DatabaseConfig, SeedConfig};
use crate::db::handlers::{MemStore, Store};
use crate::db::models::bans::{BanCreateDBRequest, UsersBanListRecord};
use crate::db::models::chat_message_attachments::{AttachmentCreateDBRequest, ChatMessageAttachment};
use crate::db::models::post_donations::{PostDonation, PostDonationCreateDBRequest};
use crate::db::models::posts::{Post, PostCreateDBRequest};
use crate::db::models::users::{User, UserCreateDBRequest};
use crate::types::{PostId, UserId};
use crate::{AppState, auth, build_router, seed_reference_data};
use axum::http::{HeaderName, HeaderValue, header};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseConfig {
            url: "postgres://localhost/volonterro-test".to_string(),
        },
        secret_key: Some("test-secret-key-for-testing-only".to_string()),
        auth: AuthConfig::default(),
        seed: SeedConfig::default(),
    }
}

/// Build a test server over the full router, backed by a fresh seeded
/// in-memory store. The store is returned for direct fixture access.
pub async fn create_test_app() -> (TestServer, Arc<MemStore>) {
    let store = Arc::new(MemStore::new());
    seed_reference_data(store.as_ref(), &create_test_config().seed)
        .await
        .expect("Failed to seed reference data");

    let state = AppState::builder().store(store.clone()).config(create_test_config()).build();
    let server = TestServer::new(build_router(state)).expect("Failed to create test server");
    (server, store)
}

pub async fn create_test_user(store: &MemStore) -> User {
    let request = UserCreateDBRequest {
        role: "Default".to_string(),
        registration_method: "Google".to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: format!("user-{}@volonterro.com", Uuid::new_v4()),
        phone: None,
        bio: None,
        birth_date: None,
    };
    store.users().create(&request).await.expect("Failed to create test user")
}

pub async fn create_test_post(store: &MemStore, author_id: UserId) -> Post {
    let request = PostCreateDBRequest {
        author_id,
        title: "Test fundraiser".to_string(),
        content: "Please support the cause".to_string(),
    };
    store.posts().create(&request).await.expect("Failed to create test post")
}

pub async fn create_test_donation(store: &MemStore, post_id: PostId) -> PostDonation {
    let request = PostDonationCreateDBRequest {
        post_id,
        card_number: "5594148605144157".to_string(),
        donation: Decimal::new(10050, 2), // 100.50
        datetime: Utc::now() - Duration::days(1),
    };
    store.donations().create(&request).await.expect("Failed to create test donation")
}

pub async fn create_test_ban(store: &MemStore, user_id: UserId) -> UsersBanListRecord {
    let request = BanCreateDBRequest {
        user_id,
        status: "TEMPORARY".to_string(),
        registered_at: Some(Utc::now() - Duration::days(2)),
        due_to: Some(Utc::now() - Duration::hours(1)),
        note: Some("Test ban record".to_string()),
    };
    store.bans().create(&request).await.expect("Failed to create test ban")
}

pub async fn create_test_attachment(store: &MemStore) -> ChatMessageAttachment {
    let request = AttachmentCreateDBRequest {
        message_id: Uuid::new_v4(),
        file: format!("chat_message_attachments/{}.txt", Uuid::new_v4()),
        filename: Some("Attachment".to_string()),
        resource_type: "raw".to_string(),
    };
    store.attachments().create(&request).await.expect("Failed to create test attachment")
}

/// A signed access token for the given user, using the test secret
pub fn access_token(user: &User) -> String {
    auth::session::create_access_token(user.id, &user.email, &create_test_config()).expect("Failed to sign test token")
}

/// Bearer authorization header pair for request builders
pub fn auth_header(user: &User) -> (HeaderName, HeaderValue) {
    let value = HeaderValue::from_str(&format!("Bearer {}", access_token(user))).expect("Failed to build header value");
    (header::AUTHORIZATION, value)
}
