//! Following endpoints.
//!
//! The relationship is addressed by its natural pair in the path, so these
//! handlers bypass the validation gate (there is no body to validate) and go
//! straight to the repository; duplicate pairs surface as the store's
//! unique-violation conflict.

use crate::AppState;
use crate::api::handlers::crud::not_found_for;
use crate::api::models::followings::FollowingResponse;
use crate::db::models::followings::{Following, FollowingCreateDBRequest, FollowingFilter, FollowingKey};
use crate::errors::Result;
use crate::types::UserId;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// Users following the given user
#[tracing::instrument(skip_all)]
pub async fn list_followers(State(state): State<AppState>, Path(user_id): Path<UserId>) -> Result<Json<Vec<FollowingResponse>>> {
    let filter = FollowingFilter {
        user_id: Some(user_id),
        ..FollowingFilter::default()
    };
    let followings = state.store.followings().list(&filter).await?;
    Ok(Json(followings.into_iter().map(FollowingResponse::from).collect()))
}

/// Users the given user follows
#[tracing::instrument(skip_all)]
pub async fn list_followings(State(state): State<AppState>, Path(user_id): Path<UserId>) -> Result<Json<Vec<FollowingResponse>>> {
    let filter = FollowingFilter {
        follower_id: Some(user_id),
        ..FollowingFilter::default()
    };
    let followings = state.store.followings().list(&filter).await?;
    Ok(Json(followings.into_iter().map(FollowingResponse::from).collect()))
}

/// A single relationship, addressed by its pair
#[tracing::instrument(skip_all)]
pub async fn get_following(
    State(state): State<AppState>,
    Path((user_id, follower_id)): Path<(UserId, UserId)>,
) -> Result<Json<FollowingResponse>> {
    use crate::db::models::Entity;

    let key = FollowingKey { user_id, follower_id };
    match state.store.followings().get_by_id(&key).await? {
        Some(following) => Ok(Json(FollowingResponse::from(following))),
        None => Err(crate::errors::Error::NotFound {
            resource: Following::NAME.to_string(),
            id: key.to_string(),
        }),
    }
}

#[tracing::instrument(skip_all)]
pub async fn create_following(
    State(state): State<AppState>,
    Path((user_id, follower_id)): Path<(UserId, UserId)>,
) -> Result<(StatusCode, Json<FollowingResponse>)> {
    let request = FollowingCreateDBRequest { user_id, follower_id };
    let following = state.store.followings().create(&request).await?;
    Ok((StatusCode::CREATED, Json(FollowingResponse::from(following))))
}

#[tracing::instrument(skip_all)]
pub async fn remove_following(
    State(state): State<AppState>,
    Path((user_id, follower_id)): Path<(UserId, UserId)>,
) -> Result<Json<FollowingResponse>> {
    let key = FollowingKey { user_id, follower_id };
    let following = state
        .store
        .followings()
        .remove(&key)
        .await
        .map_err(|err| not_found_for::<Following>(err, &key))?;
    Ok(Json(FollowingResponse::from(following)))
}
