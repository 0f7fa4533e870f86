//! Storage models for post donations.

use super::{Entity, Page};
use crate::types::{DonationId, PostId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct PostDonation {
    pub id: DonationId,
    pub post_id: PostId,
    pub card_number: String,
    /// Exact decimal amount; never a float, so no rounding loss
    pub donation: Decimal,
    pub datetime: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PostDonationCreateDBRequest {
    pub post_id: PostId,
    pub card_number: String,
    pub donation: Decimal,
    pub datetime: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PostDonationUpdateDBRequest {
    pub card_number: Option<String>,
    pub donation: Option<Decimal>,
    pub datetime: Option<DateTime<Utc>>,
}

/// Filter for listing donations
#[derive(Debug, Clone, Default)]
pub struct PostDonationFilter {
    pub post_id: Option<PostId>,
    pub page: Page,
}

impl Entity for PostDonation {
    type Key = DonationId;
    type CreateRequest = PostDonationCreateDBRequest;
    type UpdateRequest = PostDonationUpdateDBRequest;
    type Filter = PostDonationFilter;

    const NAME: &'static str = "Post donation";

    fn key(&self) -> DonationId {
        self.id
    }

    fn page(filter: &PostDonationFilter) -> Page {
        filter.page
    }
}
