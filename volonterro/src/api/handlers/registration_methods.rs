//! User registration method endpoints (natural-key addressed).

use crate::api::handlers::crud::CrudResource;
use crate::api::models::registration_methods::{
    ListRegistrationMethodsQuery, RegistrationMethodCreate, RegistrationMethodResponse, RegistrationMethodUpdate,
};
use crate::db::handlers::repository::{Repository, Store};
use crate::db::models::registration_methods::UserRegistrationMethod;

impl CrudResource for UserRegistrationMethod {
    type Create = RegistrationMethodCreate;
    type Update = RegistrationMethodUpdate;
    type Response = RegistrationMethodResponse;
    type ListQuery = ListRegistrationMethodsQuery;

    fn repository(store: &dyn Store) -> &dyn Repository<Self> {
        store.registration_methods()
    }
}

#[cfg(test)]
mod tests {
    use crate::api::models::registration_methods::RegistrationMethodResponse;
    use crate::test_utils::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test_log::test(tokio::test)]
    async fn test_create_method_then_duplicate_name_conflicts() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;

        app.post("/users/registration-methods")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .json(&json!({ "name": "Apple" }))
            .await
            .assert_status(StatusCode::CREATED);

        app.post("/users/registration-methods")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .json(&json!({ "name": "Apple" }))
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[test_log::test(tokio::test)]
    async fn test_get_method_by_name() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;

        let response = app
            .get("/users/registration-methods/Google")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .await;

        response.assert_status_ok();
        let method: RegistrationMethodResponse = response.json();
        assert_eq!(method.name, "Google");
    }

    #[test_log::test(tokio::test)]
    async fn test_update_missing_method_is_not_found() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;

        app.put("/users/registration-methods/Telegram")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .json(&json!({ "name": "Signal" }))
            .await
            .assert_status_not_found();
    }

    #[test_log::test(tokio::test)]
    async fn test_delete_method_then_get_is_not_found() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;

        app.post("/users/registration-methods")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .json(&json!({ "name": "Apple" }))
            .await
            .assert_status(StatusCode::CREATED);

        app.delete("/users/registration-methods/Apple")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .await
            .assert_status_ok();

        app.get("/users/registration-methods/Apple")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .await
            .assert_status_not_found();
    }
}
