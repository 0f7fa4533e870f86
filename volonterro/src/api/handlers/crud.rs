//! Generic CRUD endpoint component.
//!
//! Every plain resource exposes the same five operations, so they are written
//! once and instantiated per entity schema through [`CrudResource`] instead
//! of being duplicated per resource. The flow for each request is identical:
//! the validation gate classifies the body, the repository applies the single
//! storage operation, and the outcome maps onto one of the platform's
//! response codes (200/201/404/409).
//!
//! Resources with extra surface (following pairs, donation expansion) add
//! hand-written handlers next to this component and reuse these functions for
//! the verbs that stay uniform.

use crate::AppState;
use crate::db::errors::DbError;
use crate::db::handlers::repository::{Repository, Store};
use crate::db::models::Entity;
use crate::errors::{Error, Result};
use crate::validation::{ValidatedEntity, ValidatedJson};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Binds an entity to its API face: request payloads, response shape, list
/// query, and the repository accessor on [`Store`].
pub trait CrudResource: Entity {
    type Create: ValidatedEntity + DeserializeOwned + Into<Self::CreateRequest> + Send + Sync + 'static;
    type Update: ValidatedEntity + DeserializeOwned + Into<Self::UpdateRequest> + Send + Sync + 'static;
    type Response: Serialize + From<Self> + Send;
    type ListQuery: DeserializeOwned + Into<Self::Filter> + Default + Send;

    fn repository(store: &dyn Store) -> &dyn Repository<Self>;
}

/// Build the standard collection + item routes for one resource.
pub fn resource_routes<R: CrudResource>(collection: &str) -> Router<AppState> {
    let item = format!("{collection}/{{id}}");
    Router::new()
        .route(collection, get(list::<R>).post(create::<R>))
        .route(&item, get(get_by_id::<R>).put(update::<R>).delete(remove::<R>))
}

#[tracing::instrument(skip_all)]
pub async fn list<R: CrudResource>(
    State(state): State<AppState>,
    Query(query): Query<R::ListQuery>,
) -> Result<Json<Vec<R::Response>>> {
    let records = R::repository(state.store.as_ref()).list(&query.into()).await?;
    Ok(Json(records.into_iter().map(R::Response::from).collect()))
}

#[tracing::instrument(skip_all)]
pub async fn get_by_id<R: CrudResource>(State(state): State<AppState>, Path(id): Path<R::Key>) -> Result<Json<R::Response>> {
    match R::repository(state.store.as_ref()).get_by_id(&id).await? {
        Some(record) => Ok(Json(R::Response::from(record))),
        None => Err(Error::NotFound {
            resource: R::NAME.to_string(),
            id: id.to_string(),
        }),
    }
}

#[tracing::instrument(skip_all)]
pub async fn create<R: CrudResource>(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<R::Create>,
) -> Result<(StatusCode, Json<R::Response>)> {
    let record = R::repository(state.store.as_ref()).create(&payload.into()).await?;
    Ok((StatusCode::CREATED, Json(R::Response::from(record))))
}

#[tracing::instrument(skip_all)]
pub async fn update<R: CrudResource>(
    State(state): State<AppState>,
    Path(id): Path<R::Key>,
    ValidatedJson(payload): ValidatedJson<R::Update>,
) -> Result<Json<R::Response>> {
    let record = R::repository(state.store.as_ref())
        .update(&id, &payload.into())
        .await
        .map_err(|err| not_found_for::<R>(err, &id))?;
    Ok(Json(R::Response::from(record)))
}

#[tracing::instrument(skip_all)]
pub async fn remove<R: CrudResource>(State(state): State<AppState>, Path(id): Path<R::Key>) -> Result<Json<R::Response>> {
    let record = R::repository(state.store.as_ref())
        .remove(&id)
        .await
        .map_err(|err| not_found_for::<R>(err, &id))?;
    Ok(Json(R::Response::from(record)))
}

/// Lift the adapter's anonymous not-found into the resource-named variant
pub(crate) fn not_found_for<R: Entity>(err: DbError, id: &R::Key) -> Error {
    match err {
        DbError::NotFound => Error::NotFound {
            resource: R::NAME.to_string(),
            id: id.to_string(),
        },
        other => Error::Database(other),
    }
}
