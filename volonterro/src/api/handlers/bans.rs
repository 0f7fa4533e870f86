//! Users-ban-list endpoints.

use crate::api::handlers::crud::CrudResource;
use crate::api::models::bans::{BanCreate, BanResponse, BanUpdate, ListBansQuery};
use crate::db::handlers::repository::{Repository, Store};
use crate::db::models::bans::UsersBanListRecord;

impl CrudResource for UsersBanListRecord {
    type Create = BanCreate;
    type Update = BanUpdate;
    type Response = BanResponse;
    type ListQuery = ListBansQuery;

    fn repository(store: &dyn Store) -> &dyn Repository<Self> {
        store.bans()
    }
}

#[cfg(test)]
mod tests {
    use crate::api::models::bans::BanResponse;
    use crate::test_utils::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test_log::test(tokio::test)]
    async fn test_create_ban_defaults_registered_at() {
        let (app, store) = create_test_app().await;
        let admin = create_test_user(&store).await;
        let banned = create_test_user(&store).await;

        let response = app
            .post("/bans")
            .add_header(auth_header(&admin).0, auth_header(&admin).1)
            .json(&json!({
                "userId": banned.id,
                "status": "TEMPORARY",
                "note": "Spamming the feed",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let ban: BanResponse = response.json();
        assert_eq!(ban.user_id, banned.id);
        assert_eq!(ban.status, "TEMPORARY");
        assert_eq!(ban.note.as_deref(), Some("Spamming the feed"));
    }

    #[test_log::test(tokio::test)]
    async fn test_invalid_status_is_a_conflict() {
        let (app, store) = create_test_app().await;
        let admin = create_test_user(&store).await;
        let banned = create_test_user(&store).await;

        let response = app
            .post("/bans")
            .add_header(auth_header(&admin).0, auth_header(&admin).1)
            .json(&json!({
                "userId": banned.id,
                "status": "FOREVER",
            }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"][0], "status must be one of the following values: PERMANENT, TEMPORARY");
    }

    #[test_log::test(tokio::test)]
    async fn test_future_registered_at_is_a_conflict() {
        let (app, store) = create_test_app().await;
        let admin = create_test_user(&store).await;
        let banned = create_test_user(&store).await;

        let response = app
            .post("/bans")
            .add_header(auth_header(&admin).0, auth_header(&admin).1)
            .json(&json!({
                "userId": banned.id,
                "status": "PERMANENT",
                "registeredAt": "2099-01-01T00:00:00Z",
            }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[test_log::test(tokio::test)]
    async fn test_delete_ban_returns_prior_fields_then_get_is_not_found() {
        let (app, store) = create_test_app().await;
        let admin = create_test_user(&store).await;
        let banned = create_test_user(&store).await;
        let ban = create_test_ban(&store, banned.id).await;

        let response = app
            .delete(&format!("/bans/{}", ban.id))
            .add_header(auth_header(&admin).0, auth_header(&admin).1)
            .await;

        response.assert_status_ok();
        let removed: BanResponse = response.json();
        assert_eq!(removed.id, ban.id);
        assert_eq!(removed.user_id, ban.user_id);
        // The record keeps its original registration timestamp all the way out
        assert_eq!(removed.registered_at, ban.registered_at);

        app.get(&format!("/bans/{}", ban.id))
            .add_header(auth_header(&admin).0, auth_header(&admin).1)
            .await
            .assert_status_not_found();
    }

    #[test_log::test(tokio::test)]
    async fn test_update_ban_merges_partial_input() {
        let (app, store) = create_test_app().await;
        let admin = create_test_user(&store).await;
        let banned = create_test_user(&store).await;
        let ban = create_test_ban(&store, banned.id).await;

        let response = app
            .put(&format!("/bans/{}", ban.id))
            .add_header(auth_header(&admin).0, auth_header(&admin).1)
            .json(&json!({ "status": "PERMANENT" }))
            .await;

        response.assert_status_ok();
        let updated: BanResponse = response.json();
        assert_eq!(updated.status, "PERMANENT");
        assert_eq!(updated.note, ban.note);
        assert_eq!(updated.registered_at, ban.registered_at);
    }

    #[test_log::test(tokio::test)]
    async fn test_list_bans_filtered_by_user() {
        let (app, store) = create_test_app().await;
        let admin = create_test_user(&store).await;
        let first = create_test_user(&store).await;
        let second = create_test_user(&store).await;
        create_test_ban(&store, first.id).await;
        create_test_ban(&store, second.id).await;

        let response = app
            .get(&format!("/bans?user_id={}", first.id))
            .add_header(auth_header(&admin).0, auth_header(&admin).1)
            .await;

        response.assert_status_ok();
        let bans: Vec<BanResponse> = response.json();
        assert_eq!(bans.len(), 1);
        assert_eq!(bans[0].user_id, first.id);
    }
}
