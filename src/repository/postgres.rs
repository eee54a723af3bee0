use super::{ReviewImageRepository, ReviewRepository, StoreError, UpdatedReview};
use crate::db;
use crate::models::{
    Characteristic, CharacteristicFilter, ImageChanges, PageRequest, RatingAggregate, Review,
    ReviewFilter, ReviewImage, ReviewStatus,
};
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn insert(
        &self,
        review: Review,
        image_urls: &[String],
    ) -> Result<(Review, Vec<ReviewImage>), StoreError> {
        db::review::insert(&self.pool, &review, image_urls).await
    }

    async fn update(
        &self,
        review: &Review,
        changes: &ImageChanges,
    ) -> Result<UpdatedReview, StoreError> {
        db::review::update(&self.pool, review, changes).await
    }

    async fn update_status(&self, id: i64, status: ReviewStatus) -> Result<Review, StoreError> {
        db::review::update_status(&self.pool, id, status).await
    }

    async fn soft_delete(&self, id: i64) -> Result<Review, StoreError> {
        db::review::soft_delete(&self.pool, id).await
    }

    async fn fetch(&self, id: i64) -> Result<Option<Review>, StoreError> {
        db::review::fetch(&self.pool, id).await
    }

    async fn exists_active(&self, user_id: i64, product_id: i64) -> Result<bool, StoreError> {
        db::review::exists_active(&self.pool, user_id, product_id).await
    }

    async fn fetch_page(
        &self,
        filter: &ReviewFilter,
        page: PageRequest,
    ) -> Result<(Vec<Review>, i64), StoreError> {
        db::review::fetch_page(&self.pool, filter, page).await
    }

    async fn rating_aggregate(&self, product_id: i64) -> Result<RatingAggregate, StoreError> {
        db::review::rating_aggregate(&self.pool, product_id).await
    }

    async fn distribution(
        &self,
        product_id: i64,
        characteristic: Characteristic,
    ) -> Result<Vec<(String, i64)>, StoreError> {
        db::review::distribution(&self.pool, product_id, characteristic).await
    }

    async fn average_rating(
        &self,
        filter: &CharacteristicFilter,
    ) -> Result<Option<f64>, StoreError> {
        db::review::average_rating(&self.pool, filter).await
    }
}

#[derive(Clone)]
pub struct PgReviewImageRepository {
    pool: PgPool,
}

impl PgReviewImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewImageRepository for PgReviewImageRepository {
    async fn fetch(&self, image_id: i64) -> Result<Option<ReviewImage>, StoreError> {
        db::review_image::fetch(&self.pool, image_id).await
    }

    async fn fetch_by_review(&self, review_id: i64) -> Result<Vec<ReviewImage>, StoreError> {
        db::review_image::fetch_by_review(&self.pool, review_id).await
    }

    async fn fetch_by_reviews(&self, review_ids: &[i64]) -> Result<Vec<ReviewImage>, StoreError> {
        db::review_image::fetch_by_reviews(&self.pool, review_ids).await
    }

    async fn count_by_review(&self, review_id: i64) -> Result<i64, StoreError> {
        db::review_image::count_by_review(&self.pool, review_id).await
    }

    async fn delete(&self, image_id: i64) -> Result<(), StoreError> {
        db::review_image::delete(&self.pool, image_id).await
    }
}
