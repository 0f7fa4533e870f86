//! Donation endpoints.
//!
//! Create/update/remove run through the generic CRUD component. The read
//! side is hand-written: both GET variants support `include=post` expansion
//! of the referenced post, and donations can also be listed as a post
//! sub-resource.

use crate::AppState;
use crate::api::handlers::crud::CrudResource;
use crate::api::models::post_donations::{
    GetDonationQuery, ListDonationsQuery, PostDonationCreate, PostDonationResponse, PostDonationUpdate,
};
use crate::api::models::posts::PostResponse;
use crate::db::handlers::repository::{Repository, Store};
use crate::db::models::Entity;
use crate::db::models::post_donations::{PostDonation, PostDonationFilter};
use crate::errors::{Error, Result};
use crate::types::{DonationId, PostId};
use axum::{
    Json,
    extract::{Path, Query, State},
};

impl CrudResource for PostDonation {
    type Create = PostDonationCreate;
    type Update = PostDonationUpdate;
    type Response = PostDonationResponse;
    type ListQuery = ListDonationsQuery;

    fn repository(store: &dyn Store) -> &dyn Repository<Self> {
        store.donations()
    }
}

/// Expand the referenced post onto each response when requested
async fn expand_posts(store: &dyn Store, donations: Vec<PostDonation>) -> Result<Vec<PostDonationResponse>> {
    let mut responses = Vec::with_capacity(donations.len());
    for donation in donations {
        let post = store.posts().get_by_id(&donation.post_id).await?;
        let mut response = PostDonationResponse::from(donation);
        if let Some(post) = post {
            response = response.with_post(PostResponse::from(post));
        }
        responses.push(response);
    }
    Ok(responses)
}

#[tracing::instrument(skip_all)]
pub async fn list_donations(
    State(state): State<AppState>,
    Query(query): Query<ListDonationsQuery>,
) -> Result<Json<Vec<PostDonationResponse>>> {
    let include_post = query.includes_post();
    let store = state.store.as_ref();
    let donations = store.donations().list(&query.into()).await?;

    let responses = if include_post {
        expand_posts(store, donations).await?
    } else {
        donations.into_iter().map(PostDonationResponse::from).collect()
    };
    Ok(Json(responses))
}

#[tracing::instrument(skip_all)]
pub async fn get_donation(
    State(state): State<AppState>,
    Path(id): Path<DonationId>,
    Query(query): Query<GetDonationQuery>,
) -> Result<Json<PostDonationResponse>> {
    let store = state.store.as_ref();
    let Some(donation) = store.donations().get_by_id(&id).await? else {
        return Err(Error::NotFound {
            resource: PostDonation::NAME.to_string(),
            id: id.to_string(),
        });
    };

    let mut response = PostDonationResponse::from(donation.clone());
    if query.includes_post() {
        if let Some(post) = store.posts().get_by_id(&donation.post_id).await? {
            response = response.with_post(PostResponse::from(post));
        }
    }
    Ok(Json(response))
}

/// Donations of one post, 404 when the post itself is unknown
#[tracing::instrument(skip_all)]
pub async fn list_donations_for_post(
    State(state): State<AppState>,
    Path(post_id): Path<PostId>,
) -> Result<Json<Vec<PostDonationResponse>>> {
    use crate::db::models::posts::Post;

    let store = state.store.as_ref();
    if store.posts().get_by_id(&post_id).await?.is_none() {
        return Err(Error::NotFound {
            resource: Post::NAME.to_string(),
            id: post_id.to_string(),
        });
    }

    let filter = PostDonationFilter {
        post_id: Some(post_id),
        ..PostDonationFilter::default()
    };
    let donations = store.donations().list(&filter).await?;
    Ok(Json(donations.into_iter().map(PostDonationResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use crate::api::models::post_donations::PostDonationResponse;
    use crate::test_utils::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use uuid::Uuid;

    #[test_log::test(tokio::test)]
    async fn test_create_donation_round_trips_exact_amount() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;
        let post = create_test_post(&store, user.id).await;

        let response = app
            .post("/donations")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .json(&json!({
                "postId": post.id,
                "cardNumber": "5594148605144157",
                "donation": 1551.6,
                "datetime": "2024-01-03T00:00:00Z",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: serde_json::Value = response.json();
        // Decimal amounts serialize as strings, exactly as given
        assert_eq!(body["donation"], "1551.6");
        assert_eq!(body["cardNumber"], "5594148605144157");

        let created: PostDonationResponse = serde_json::from_value(body).unwrap();
        let fetched = app
            .get(&format!("/donations/{}", created.id))
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .await;
        fetched.assert_status_ok();
        let fetched: PostDonationResponse = fetched.json();
        assert_eq!(fetched.donation, created.donation);
    }

    #[test_log::test(tokio::test)]
    async fn test_zero_donation_violates_the_declared_minimum() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;
        let post = create_test_post(&store, user.id).await;

        let response = app
            .post("/donations")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .json(&json!({
                "postId": post.id,
                "cardNumber": "5594148605144157",
                "donation": 0,
                "datetime": "2024-01-03T00:00:00Z",
            }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"][0], "donation must not be less than 0.01");
    }

    #[test_log::test(tokio::test)]
    async fn test_all_violations_are_reported_together() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;
        let post = create_test_post(&store, user.id).await;

        let response = app
            .post("/donations")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .json(&json!({
                "postId": post.id,
                "cardNumber": "1234",
                "donation": 0,
                "datetime": "2099-01-01T00:00:00Z",
            }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let body: serde_json::Value = response.json();
        let messages = body["message"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
    }

    #[test_log::test(tokio::test)]
    async fn test_donation_for_unknown_post_is_rejected() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;

        let response = app
            .post("/donations")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .json(&json!({
                "postId": Uuid::new_v4(),
                "cardNumber": "5594148605144157",
                "donation": 10,
                "datetime": "2024-01-03T00:00:00Z",
            }))
            .await;

        // Unresolved reference surfaces as a foreign-key failure
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[test_log::test(tokio::test)]
    async fn test_include_post_expands_the_nested_object() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;
        let post = create_test_post(&store, user.id).await;
        let donation = create_test_donation(&store, post.id).await;

        let response = app
            .get(&format!("/donations/{}?include=post", donation.id))
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .await;

        response.assert_status_ok();
        let body: PostDonationResponse = response.json();
        let nested = body.post.expect("post should be expanded");
        assert_eq!(nested.id, post.id);

        // Without the include parameter the nested object is omitted entirely
        let bare = app
            .get(&format!("/donations/{}", donation.id))
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .await;
        let bare: serde_json::Value = bare.json();
        assert!(bare.get("post").is_none());
    }

    #[test_log::test(tokio::test)]
    async fn test_list_donations_for_post() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;
        let post = create_test_post(&store, user.id).await;
        let other_post = create_test_post(&store, user.id).await;
        create_test_donation(&store, post.id).await;
        create_test_donation(&store, post.id).await;
        create_test_donation(&store, other_post.id).await;

        let response = app
            .get(&format!("/posts/{}/donations", post.id))
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .await;

        response.assert_status_ok();
        let donations: Vec<PostDonationResponse> = response.json();
        assert_eq!(donations.len(), 2);
        assert!(donations.iter().all(|d| d.post_id == post.id));
    }

    #[test_log::test(tokio::test)]
    async fn test_list_donations_for_unknown_post_is_not_found() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;

        app.get(&format!("/posts/{}/donations", Uuid::new_v4()))
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .await
            .assert_status_not_found();
    }

    #[test_log::test(tokio::test)]
    async fn test_update_donation_merges_partial_input() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;
        let post = create_test_post(&store, user.id).await;
        let donation = create_test_donation(&store, post.id).await;

        let response = app
            .put(&format!("/donations/{}", donation.id))
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .json(&json!({ "donation": "250.00" }))
            .await;

        response.assert_status_ok();
        let updated: PostDonationResponse = response.json();
        assert_eq!(updated.donation.to_string(), "250.00");
        assert_eq!(updated.card_number, donation.card_number);
    }

    #[test_log::test(tokio::test)]
    async fn test_remove_donation_returns_the_final_state() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;
        let post = create_test_post(&store, user.id).await;
        let donation = create_test_donation(&store, post.id).await;

        let response = app
            .delete(&format!("/donations/{}", donation.id))
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .await;

        response.assert_status_ok();
        let removed: PostDonationResponse = response.json();
        assert_eq!(removed.id, donation.id);

        app.get(&format!("/donations/{}", donation.id))
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .await
            .assert_status_not_found();
    }
}
