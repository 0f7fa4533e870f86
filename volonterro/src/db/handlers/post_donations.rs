//! Repository implementations for post donations.

use crate::db::errors::{DbError, Result};
use crate::db::handlers::memory::{ForeignRef, MemEntity};
use crate::db::handlers::postgres::PgStore;
use crate::db::handlers::repository::Repository;
use crate::db::models::post_donations::{
    PostDonation, PostDonationCreateDBRequest, PostDonationFilter, PostDonationUpdateDBRequest,
};
use crate::types::{DonationId, abbrev_uuid};
use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

#[async_trait::async_trait]
impl Repository<PostDonation> for PgStore {
    #[instrument(skip(self, filter), fields(post_id = ?filter.post_id), err)]
    async fn list(&self, filter: &PostDonationFilter) -> Result<Vec<PostDonation>> {
        let donations = sqlx::query_as::<_, PostDonation>(
            "SELECT * FROM post_donations
             WHERE $1::uuid IS NULL OR post_id = $1
             ORDER BY datetime DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(filter.post_id)
        .bind(filter.page.limit())
        .bind(filter.page.skip())
        .fetch_all(&self.pool)
        .await?;
        Ok(donations)
    }

    #[instrument(skip(self), fields(donation_id = %abbrev_uuid(id)), err)]
    async fn get_by_id(&self, id: &DonationId) -> Result<Option<PostDonation>> {
        let donation = sqlx::query_as::<_, PostDonation>("SELECT * FROM post_donations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(donation)
    }

    #[instrument(skip(self, request), fields(post_id = %abbrev_uuid(&request.post_id)), err)]
    async fn create(&self, request: &PostDonationCreateDBRequest) -> Result<PostDonation> {
        let donation = sqlx::query_as::<_, PostDonation>(
            "INSERT INTO post_donations (id, post_id, card_number, donation, datetime)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(request.post_id)
        .bind(&request.card_number)
        .bind(request.donation)
        .bind(request.datetime)
        .fetch_one(&self.pool)
        .await?;
        Ok(donation)
    }

    #[instrument(skip(self, request), fields(donation_id = %abbrev_uuid(id)), err)]
    async fn update(&self, id: &DonationId, request: &PostDonationUpdateDBRequest) -> Result<PostDonation> {
        sqlx::query_as::<_, PostDonation>(
            "UPDATE post_donations SET
                card_number = COALESCE($2, card_number),
                donation = COALESCE($3, donation),
                datetime = COALESCE($4, datetime)
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&request.card_number)
        .bind(request.donation)
        .bind(request.datetime)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(donation_id = %abbrev_uuid(id)), err)]
    async fn remove(&self, id: &DonationId) -> Result<PostDonation> {
        sqlx::query_as::<_, PostDonation>("DELETE FROM post_donations WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }
}

impl MemEntity for PostDonation {
    const TABLE: &'static str = "post_donations";

    fn from_create(request: &PostDonationCreateDBRequest, _now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id: request.post_id,
            card_number: request.card_number.clone(),
            donation: request.donation,
            datetime: request.datetime,
        }
    }

    fn apply_update(&mut self, request: &PostDonationUpdateDBRequest, _now: DateTime<Utc>) {
        if let Some(card_number) = &request.card_number {
            self.card_number = card_number.clone();
        }
        if let Some(donation) = request.donation {
            self.donation = donation;
        }
        if let Some(datetime) = request.datetime {
            self.datetime = datetime;
        }
    }

    fn create_refs(request: &PostDonationCreateDBRequest) -> Vec<ForeignRef> {
        vec![ForeignRef::Post(request.post_id)]
    }

    fn matches(&self, filter: &PostDonationFilter) -> bool {
        filter.post_id.is_none_or(|post_id| self.post_id == post_id)
    }
}
