//! API request/response models for post donations.

use crate::api::models::posts::PostResponse;
use crate::db::models::{
    Page,
    post_donations::{PostDonation, PostDonationCreateDBRequest, PostDonationFilter, PostDonationUpdateDBRequest},
};
use crate::types::{DonationId, PostId};
use crate::validation::{Constraint, EntitySchema, FieldSchema, ValidatedEntity};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Smallest accepted donation amount
fn minimum_donation() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDonationCreate {
    pub post_id: PostId,
    pub card_number: String,
    pub donation: Decimal,
    pub datetime: DateTime<Utc>,
}

static DONATION_CREATE_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new(vec![
        FieldSchema::required("postId", vec![Constraint::Uuid]),
        FieldSchema::required(
            "cardNumber",
            vec![Constraint::String, Constraint::MaxLength(16), Constraint::Digits(16)],
        ),
        FieldSchema::required(
            "donation",
            vec![Constraint::Decimal, Constraint::DecimalMin(minimum_donation())],
        ),
        FieldSchema::required("datetime", vec![Constraint::DateTime, Constraint::MaxDateNow]),
    ])
});

impl ValidatedEntity for PostDonationCreate {
    fn schema() -> &'static EntitySchema {
        &DONATION_CREATE_SCHEMA
    }
}

impl From<PostDonationCreate> for PostDonationCreateDBRequest {
    fn from(api: PostDonationCreate) -> Self {
        Self {
            post_id: api.post_id,
            card_number: api.card_number,
            donation: api.donation,
            datetime: api.datetime,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDonationUpdate {
    pub card_number: Option<String>,
    pub donation: Option<Decimal>,
    pub datetime: Option<DateTime<Utc>>,
}

static DONATION_UPDATE_SCHEMA: Lazy<EntitySchema> = Lazy::new(|| {
    EntitySchema::new(vec![
        FieldSchema::optional(
            "cardNumber",
            vec![Constraint::String, Constraint::MaxLength(16), Constraint::Digits(16)],
        ),
        FieldSchema::optional(
            "donation",
            vec![Constraint::Decimal, Constraint::DecimalMin(minimum_donation())],
        ),
        FieldSchema::optional("datetime", vec![Constraint::DateTime, Constraint::MaxDateNow]),
    ])
});

impl ValidatedEntity for PostDonationUpdate {
    fn schema() -> &'static EntitySchema {
        &DONATION_UPDATE_SCHEMA
    }
}

impl From<PostDonationUpdate> for PostDonationUpdateDBRequest {
    fn from(api: PostDonationUpdate) -> Self {
        Self {
            card_number: api.card_number,
            donation: api.donation,
            datetime: api.datetime,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDonationResponse {
    pub id: DonationId,
    pub post_id: PostId,
    pub card_number: String,
    /// Serialized as a decimal string; exactness over convenience
    pub donation: Decimal,
    pub datetime: DateTime<Utc>,
    /// The referenced post, populated when `include=post` is requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<PostResponse>,
}

impl From<PostDonation> for PostDonationResponse {
    fn from(donation: PostDonation) -> Self {
        Self {
            id: donation.id,
            post_id: donation.post_id,
            card_number: donation.card_number,
            donation: donation.donation,
            datetime: donation.datetime,
            post: None, // Relationships are not included by default
        }
    }
}

impl PostDonationResponse {
    /// Attach the eagerly-expanded post object
    pub fn with_post(mut self, post: PostResponse) -> Self {
        self.post = Some(post);
        self
    }
}

/// Query parameters for listing donations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListDonationsQuery {
    pub post_id: Option<PostId>,
    /// Comma-separated related objects to expand ("post")
    pub include: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl ListDonationsQuery {
    pub fn includes_post(&self) -> bool {
        self.include
            .as_deref()
            .unwrap_or("")
            .split(',')
            .any(|part| part.trim() == "post")
    }
}

impl From<ListDonationsQuery> for PostDonationFilter {
    fn from(query: ListDonationsQuery) -> Self {
        Self {
            post_id: query.post_id,
            page: Page {
                skip: query.skip,
                limit: query.limit,
            },
        }
    }
}

/// Query parameters for fetching a single donation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetDonationQuery {
    pub include: Option<String>,
}

impl GetDonationQuery {
    pub fn includes_post(&self) -> bool {
        self.include
            .as_deref()
            .unwrap_or("")
            .split(',')
            .any(|part| part.trim() == "post")
    }
}
