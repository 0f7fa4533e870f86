//! User endpoints.
//!
//! CRUD goes through the generic component. `/users/current` resolves the
//! acting user from the verified access token.

use crate::AppState;
use crate::api::handlers::crud::CrudResource;
use crate::api::models::users::{ListUsersQuery, UserCreate, UserResponse, UserUpdate};
use crate::auth::CurrentUser;
use crate::db::handlers::repository::{Repository, Store};
use crate::db::models::{Entity, users::User};
use crate::errors::{Error, Result};
use axum::{Json, extract::State};

impl CrudResource for User {
    type Create = UserCreate;
    type Update = UserUpdate;
    type Response = UserResponse;
    type ListQuery = ListUsersQuery;

    fn repository(store: &dyn Store) -> &dyn Repository<Self> {
        store.users()
    }
}

/// The record behind the presented access token
#[tracing::instrument(skip_all)]
pub async fn get_current_user(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<UserResponse>> {
    match state.store.users().get_by_id(&current_user.id).await? {
        Some(user) => Ok(Json(UserResponse::from(user))),
        None => Err(Error::NotFound {
            resource: User::NAME.to_string(),
            id: current_user.id.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::api::models::users::UserResponse;
    use crate::test_utils::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test_log::test(tokio::test)]
    async fn test_create_user_round_trips_through_get() {
        let (app, store) = create_test_app().await;
        let actor = create_test_user(&store).await;

        let response = app
            .post("/users")
            .add_header(auth_header(&actor).0, auth_header(&actor).1)
            .json(&json!({
                "role": "Volunteer",
                "registrationMethod": "Google",
                "firstName": "Petro",
                "lastName": "Yarmolenko",
                "email": "petro@volonterro.com",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let created: UserResponse = response.json();
        assert_eq!(created.role, "Volunteer");
        assert_eq!(created.email, "petro@volonterro.com");

        let fetched = app
            .get(&format!("/users/{}", created.id))
            .add_header(auth_header(&actor).0, auth_header(&actor).1)
            .await;
        fetched.assert_status_ok();
        let fetched: UserResponse = fetched.json();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.registered_at, created.registered_at);
    }

    #[test_log::test(tokio::test)]
    async fn test_duplicate_email_is_a_conflict_and_leaves_the_set_unchanged() {
        let (app, store) = create_test_app().await;
        let actor = create_test_user(&store).await;

        let body = json!({
            "role": "Default",
            "registrationMethod": "Google",
            "firstName": "Olha",
            "lastName": "Soroka",
            "email": "olha@volonterro.com",
        });

        app.post("/users")
            .add_header(auth_header(&actor).0, auth_header(&actor).1)
            .json(&body)
            .await
            .assert_status(StatusCode::CREATED);

        let listed_before: Vec<UserResponse> = app
            .get("/users")
            .add_header(auth_header(&actor).0, auth_header(&actor).1)
            .await
            .json();

        app.post("/users")
            .add_header(auth_header(&actor).0, auth_header(&actor).1)
            .json(&body)
            .await
            .assert_status(StatusCode::CONFLICT);

        let listed_after: Vec<UserResponse> = app
            .get("/users")
            .add_header(auth_header(&actor).0, auth_header(&actor).1)
            .await
            .json();
        assert_eq!(listed_before.len(), listed_after.len());
    }

    #[test_log::test(tokio::test)]
    async fn test_unknown_role_fails_the_reference_check() {
        let (app, store) = create_test_app().await;
        let actor = create_test_user(&store).await;

        let response = app
            .post("/users")
            .add_header(auth_header(&actor).0, auth_header(&actor).1)
            .json(&json!({
                "role": "Overlord",
                "registrationMethod": "Google",
                "firstName": "No",
                "lastName": "Body",
                "email": "nobody@volonterro.com",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[test_log::test(tokio::test)]
    async fn test_future_birth_date_is_a_conflict() {
        let (app, store) = create_test_app().await;
        let actor = create_test_user(&store).await;

        let response = app
            .post("/users")
            .add_header(auth_header(&actor).0, auth_header(&actor).1)
            .json(&json!({
                "role": "Default",
                "registrationMethod": "Google",
                "firstName": "Unborn",
                "lastName": "Person",
                "email": "unborn@volonterro.com",
                "birthDate": "2099-06-30T00:00:00Z",
            }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"][0], "maximal allowed date for birthDate is the current date");
    }

    #[test_log::test(tokio::test)]
    async fn test_update_user_merges_partial_input() {
        let (app, store) = create_test_app().await;
        let actor = create_test_user(&store).await;
        let user = create_test_user(&store).await;

        let response = app
            .put(&format!("/users/{}", user.id))
            .add_header(auth_header(&actor).0, auth_header(&actor).1)
            .json(&json!({ "bio": "Helping hands since 2023", "role": "Volunteer" }))
            .await;

        response.assert_status_ok();
        let updated: UserResponse = response.json();
        assert_eq!(updated.bio.as_deref(), Some("Helping hands since 2023"));
        assert_eq!(updated.role, "Volunteer");
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.first_name, user.first_name);
    }

    #[test_log::test(tokio::test)]
    async fn test_current_user_resolves_the_token_subject() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;

        let response = app
            .get("/users/current")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .await;

        response.assert_status_ok();
        let current: UserResponse = response.json();
        assert_eq!(current.id, user.id);
        assert_eq!(current.email, user.email);
    }

    #[test_log::test(tokio::test)]
    async fn test_list_users_filtered_by_role() {
        let (app, store) = create_test_app().await;
        let actor = create_test_user(&store).await;

        app.post("/users")
            .add_header(auth_header(&actor).0, auth_header(&actor).1)
            .json(&json!({
                "role": "Volunteer",
                "registrationMethod": "Discord",
                "firstName": "Iryna",
                "lastName": "Bondar",
                "email": "iryna@volonterro.com",
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = app
            .get("/users?role=Volunteer")
            .add_header(auth_header(&actor).0, auth_header(&actor).1)
            .await;

        response.assert_status_ok();
        let users: Vec<UserResponse> = response.json();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, "Volunteer");
    }
}
