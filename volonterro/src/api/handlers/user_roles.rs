//! User role endpoints (natural-key addressed).

use crate::api::handlers::crud::CrudResource;
use crate::api::models::user_roles::{ListUserRolesQuery, UserRoleCreate, UserRoleResponse, UserRoleUpdate};
use crate::db::handlers::repository::{Repository, Store};
use crate::db::models::user_roles::UserRole;

impl CrudResource for UserRole {
    type Create = UserRoleCreate;
    type Update = UserRoleUpdate;
    type Response = UserRoleResponse;
    type ListQuery = ListUserRolesQuery;

    fn repository(store: &dyn Store) -> &dyn Repository<Self> {
        store.user_roles()
    }
}

#[cfg(test)]
mod tests {
    use crate::api::models::user_roles::UserRoleResponse;
    use crate::test_utils::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test_log::test(tokio::test)]
    async fn test_create_role_then_duplicate_name_conflicts() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;

        app.post("/user-roles")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .json(&json!({ "name": "Moderator" }))
            .await
            .assert_status(StatusCode::CREATED);

        app.post("/user-roles")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .json(&json!({ "name": "Moderator" }))
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[test_log::test(tokio::test)]
    async fn test_rename_role_moves_the_natural_key() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;

        app.post("/user-roles")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .json(&json!({ "name": "Moderator" }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = app
            .put("/user-roles/Moderator")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .json(&json!({ "name": "Curator" }))
            .await;
        response.assert_status_ok();
        let renamed: UserRoleResponse = response.json();
        assert_eq!(renamed.name, "Curator");

        app.get("/user-roles/Moderator")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .await
            .assert_status_not_found();
        app.get("/user-roles/Curator")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .await
            .assert_status_ok();
    }

    #[test_log::test(tokio::test)]
    async fn test_update_missing_role_is_not_found() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;

        app.put("/user-roles/Ghost")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .json(&json!({ "name": "Phantom" }))
            .await
            .assert_status_not_found();
    }

    #[test_log::test(tokio::test)]
    async fn test_delete_role_returns_the_record() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;

        app.post("/user-roles")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .json(&json!({ "name": "Moderator" }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = app
            .delete("/user-roles/Moderator")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .await;
        response.assert_status_ok();
        let removed: UserRoleResponse = response.json();
        assert_eq!(removed.name, "Moderator");

        app.delete("/user-roles/Moderator")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .await
            .assert_status_not_found();
    }

    #[test_log::test(tokio::test)]
    async fn test_list_roles_includes_seeded_reference_data() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;

        let response = app
            .get("/user-roles")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .await;

        response.assert_status_ok();
        let roles: Vec<UserRoleResponse> = response.json();
        assert!(roles.iter().any(|role| role.name == "Default"));
    }
}
