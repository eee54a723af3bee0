pub mod memory;
pub mod postgres;

use crate::models::{
    Characteristic, CharacteristicFilter, ImageChanges, PageRequest, RatingAggregate, Review,
    ReviewFilter, ReviewImage, ReviewStatus,
};
use async_trait::async_trait;

pub use memory::InMemoryStore;
pub use postgres::{PgReviewImageRepository, PgReviewRepository};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// The single-ACTIVE-review-per-product index rejected the write.
    #[error("an active review already exists for this product")]
    Duplicate,
    #[error("row not found")]
    NotFound,
    #[error("query failed: {0}")]
    Query(String),
}

/// Result of a review update together with the image changes it applied.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatedReview {
    pub review: Review,
    pub images: Vec<ReviewImage>,
    pub new_images: Vec<ReviewImage>,
    pub deleted_image_ids: Vec<i64>,
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Stores a new review and its images (ordered 1..n) in one transaction.
    async fn insert(
        &self,
        review: Review,
        image_urls: &[String],
    ) -> Result<(Review, Vec<ReviewImage>), StoreError>;

    /// Saves the editable columns and applies image changes in one transaction.
    /// Only images belonging to the review are deleted; new ones are appended
    /// after the current maximum order.
    async fn update(
        &self,
        review: &Review,
        changes: &ImageChanges,
    ) -> Result<UpdatedReview, StoreError>;

    async fn update_status(&self, id: i64, status: ReviewStatus) -> Result<Review, StoreError>;

    /// Marks the review DELETED and drops its images.
    async fn soft_delete(&self, id: i64) -> Result<Review, StoreError>;

    /// Any status.
    async fn fetch(&self, id: i64) -> Result<Option<Review>, StoreError>;

    async fn exists_active(&self, user_id: i64, product_id: i64) -> Result<bool, StoreError>;

    /// ACTIVE reviews matching the filter, newest first, with the total match count.
    async fn fetch_page(
        &self,
        filter: &ReviewFilter,
        page: PageRequest,
    ) -> Result<(Vec<Review>, i64), StoreError>;

    async fn rating_aggregate(&self, product_id: i64) -> Result<RatingAggregate, StoreError>;

    /// Count of ACTIVE reviews per level of the characteristic. Levels without
    /// reviews are absent.
    async fn distribution(
        &self,
        product_id: i64,
        characteristic: Characteristic,
    ) -> Result<Vec<(String, i64)>, StoreError>;

    async fn average_rating(
        &self,
        filter: &CharacteristicFilter,
    ) -> Result<Option<f64>, StoreError>;
}

#[async_trait]
pub trait ReviewImageRepository: Send + Sync {
    async fn fetch(&self, image_id: i64) -> Result<Option<ReviewImage>, StoreError>;

    /// Ordered by image_order.
    async fn fetch_by_review(&self, review_id: i64) -> Result<Vec<ReviewImage>, StoreError>;

    async fn fetch_by_reviews(&self, review_ids: &[i64]) -> Result<Vec<ReviewImage>, StoreError>;

    async fn count_by_review(&self, review_id: i64) -> Result<i64, StoreError>;

    async fn delete(&self, image_id: i64) -> Result<(), StoreError>;
}
