//! # Volonterro: social donation platform backend
//!
//! REST API backend for the Volonterro platform: fundraising posts, the
//! donations made to them, users with natural-key roles and registration
//! methods, follower relationships, moderation ban records, and chat message
//! attachments.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and PostgreSQL (via sqlx) for persistence. Every request
//! follows the same path:
//!
//! 1. The **authentication middleware** ([`auth`]) verifies the access token
//!    (bearer header or cookie) issued by the platform's identity service and
//!    injects the acting user. Requests without a valid token stop here
//!    with 401.
//! 2. The **validation gate** ([`validation`]) evaluates the payload against
//!    the entity's declared field schema before any storage access,
//!    classifying failures as malformed (400) or constraint conflicts (409)
//!    and reporting every violation at once.
//! 3. The **endpoint layer** ([`api`]) maps the five CRUD verbs onto
//!    repository calls through one generic component instantiated per entity
//!    schema, plus hand-written handlers for pair-addressed followings and
//!    donation expansion.
//! 4. The **storage layer** ([`db`]) applies the single-record operation.
//!    Uniqueness and referential integrity are the backing store's job;
//!    constraint failures are categorized at this boundary and surfaced as
//!    409/404/400 outcomes.
//!
//! Each request is an independently suspendable task that only yields at
//! storage awaits; no in-process locking, caching, or retry logic exists in
//! this layer.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use volonterro::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = volonterro::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     volonterro::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod telemetry;
mod types;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use crate::api::handlers::{crud, followings, post_donations, users};
use crate::config::SeedConfig;
use crate::db::errors::DbError;
use crate::db::handlers::{PgStore, Store};
use crate::db::models::{
    bans::UsersBanListRecord,
    chat_message_attachments::ChatMessageAttachment,
    posts::Post,
    registration_methods::{RegistrationMethodCreateDBRequest, UserRegistrationMethod},
    user_roles::{UserRole, UserRoleCreateDBRequest},
    users::User,
};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use bon::Builder;
pub use config::Config;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info, instrument};

pub use types::{AttachmentId, BanRecordId, DonationId, MessageId, PostId, UserId};

/// Application state shared across all request handlers.
///
/// Carries the storage boundary (PostgreSQL in production, the in-memory
/// fake in tests) and the loaded configuration.
#[derive(Clone, Builder)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Config,
}

/// Get the volonterro database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Ensure the configured reference rows (roles, registration methods) exist.
///
/// Idempotent: rows that already exist are left untouched, so manual changes
/// survive restarts.
#[instrument(skip_all)]
pub async fn seed_reference_data(store: &dyn Store, seed: &SeedConfig) -> Result<(), DbError> {
    for name in &seed.roles {
        match store.user_roles().create(&UserRoleCreateDBRequest { name: name.clone() }).await {
            Ok(_) | Err(DbError::UniqueViolation { .. }) => {}
            Err(err) => return Err(err),
        }
    }
    for name in &seed.registration_methods {
        match store
            .registration_methods()
            .create(&RegistrationMethodCreateDBRequest { name: name.clone() })
            .await
        {
            Ok(_) | Err(DbError::UniqueViolation { .. }) => {}
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

/// Build the application router with all endpoints and middleware.
///
/// Static route segments (`/users/current`, `/users/registration-methods`)
/// are registered alongside the parameterized `/users/{id}` routes; the
/// router matches static segments first.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Posts and their donations
        .merge(crud::resource_routes::<Post>("/posts"))
        .route("/posts/{id}/donations", get(post_donations::list_donations_for_post))
        .route(
            "/donations",
            get(post_donations::list_donations).post(crud::create::<crate::db::models::post_donations::PostDonation>),
        )
        .route(
            "/donations/{id}",
            get(post_donations::get_donation)
                .put(crud::update::<crate::db::models::post_donations::PostDonation>)
                .delete(crud::remove::<crate::db::models::post_donations::PostDonation>),
        )
        // Users, their followers, and natural-key sub-resources
        .route("/users/current", get(users::get_current_user))
        .route(
            "/users/registration-methods",
            get(crud::list::<UserRegistrationMethod>).post(crud::create::<UserRegistrationMethod>),
        )
        .route(
            "/users/registration-methods/{id}",
            get(crud::get_by_id::<UserRegistrationMethod>)
                .put(crud::update::<UserRegistrationMethod>)
                .delete(crud::remove::<UserRegistrationMethod>),
        )
        .merge(crud::resource_routes::<User>("/users"))
        .route("/users/{id}/followers", get(followings::list_followers))
        .route("/users/{id}/followings", get(followings::list_followings))
        .route(
            "/users/{user_id}/followers/{follower_id}",
            get(followings::get_following)
                .post(followings::create_following)
                .delete(followings::remove_following),
        )
        // Moderation and the rest of the flat resources
        .merge(crud::resource_routes::<UserRole>("/user-roles"))
        .merge(crud::resource_routes::<UsersBanListRecord>("/bans"))
        .merge(crud::resource_routes::<ChatMessageAttachment>("/chat-message-attachments"))
        .layer(from_fn_with_state(state.clone(), auth::middleware::require_auth));

    Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .merge(api_routes)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Main application struct that owns all resources and lifecycle.
///
/// 1. **Create**: [`Application::new`] connects to PostgreSQL, runs
///    migrations, and seeds reference data
/// 2. **Serve**: [`Application::serve`] binds the TCP port and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pool = PgPool::connect(&config.database.url).await?;
        migrator().run(&pool).await?;

        let store: Arc<dyn Store> = Arc::new(PgStore::new(pool.clone()));
        seed_reference_data(store.as_ref(), &config.seed).await?;

        let state = AppState::builder().store(store).config(config.clone()).build();
        let router = build_router(state);

        Ok(Self { router, config, pool })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("Volonterro API listening on http://{bind_addr}");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}
