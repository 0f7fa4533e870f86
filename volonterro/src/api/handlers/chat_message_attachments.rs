//! Chat message attachment endpoints.

use crate::api::handlers::crud::CrudResource;
use crate::api::models::chat_message_attachments::{AttachmentCreate, AttachmentResponse, AttachmentUpdate, ListAttachmentsQuery};
use crate::db::handlers::repository::{Repository, Store};
use crate::db::models::chat_message_attachments::ChatMessageAttachment;

impl CrudResource for ChatMessageAttachment {
    type Create = AttachmentCreate;
    type Update = AttachmentUpdate;
    type Response = AttachmentResponse;
    type ListQuery = ListAttachmentsQuery;

    fn repository(store: &dyn Store) -> &dyn Repository<Self> {
        store.attachments()
    }
}

#[cfg(test)]
mod tests {
    use crate::api::models::chat_message_attachments::AttachmentResponse;
    use crate::test_utils::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use uuid::Uuid;

    #[test_log::test(tokio::test)]
    async fn test_create_attachment_with_null_filename() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;
        let message_id = Uuid::new_v4();

        let response = app
            .post("/chat-message-attachments")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .json(&json!({
                "messageId": message_id,
                "file": "chat_message_attachments/989d32c2-abd4-43d3-a420-ee175ae16b98.pptx",
                "filename": null,
                "resourceType": "raw",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let attachment: AttachmentResponse = response.json();
        assert_eq!(attachment.message_id, message_id);
        assert!(attachment.filename.is_none());
    }

    #[test_log::test(tokio::test)]
    async fn test_overlong_filename_is_a_conflict() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;

        let response = app
            .post("/chat-message-attachments")
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .json(&json!({
                "messageId": Uuid::new_v4(),
                "file": "chat_message_attachments/a.txt",
                "filename": "x".repeat(256),
                "resourceType": "raw",
            }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"][0], "filename must be shorter than or equal to 255 characters");
    }

    #[test_log::test(tokio::test)]
    async fn test_list_attachments_filtered_by_message() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;
        let attachment = create_test_attachment(&store).await;
        create_test_attachment(&store).await;

        let response = app
            .get(&format!("/chat-message-attachments?message_id={}", attachment.message_id))
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .await;

        response.assert_status_ok();
        let attachments: Vec<AttachmentResponse> = response.json();
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0].id, attachment.id);
    }

    #[test_log::test(tokio::test)]
    async fn test_update_attachment_merges_partial_input() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;
        let attachment = create_test_attachment(&store).await;

        let response = app
            .put(&format!("/chat-message-attachments/{}", attachment.id))
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .json(&json!({ "resourceType": "image" }))
            .await;

        response.assert_status_ok();
        let updated: AttachmentResponse = response.json();
        assert_eq!(updated.resource_type, "image");
        assert_eq!(updated.file, attachment.file);
    }

    #[test_log::test(tokio::test)]
    async fn test_remove_attachment_then_get_is_not_found() {
        let (app, store) = create_test_app().await;
        let user = create_test_user(&store).await;
        let attachment = create_test_attachment(&store).await;

        app.delete(&format!("/chat-message-attachments/{}", attachment.id))
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .await
            .assert_status_ok();

        app.get(&format!("/chat-message-attachments/{}", attachment.id))
            .add_header(auth_header(&user).0, auth_header(&user).1)
            .await
            .assert_status_not_found();
    }
}
