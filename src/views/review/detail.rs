use super::Image;
use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detail {
    pub id: i64,
    pub product_id: i64,
    pub user_id: i64,
    pub title: Option<String>,
    pub rating: i32,
    pub content: Option<String>,
    pub size_fit: models::SizeFit,
    pub cushion: models::Cushion,
    pub stability: models::Stability,
    pub images: Vec<Image>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Detail {
    pub fn new(review: models::Review, images: Vec<models::ReviewImage>) -> Self {
        Self {
            id: review.id,
            product_id: review.product_id,
            user_id: review.user_id,
            title: review.title,
            rating: review.rating,
            content: review.content,
            size_fit: review.size_fit,
            cushion: review.cushion,
            stability: review.stability,
            images: images.into_iter().map(Into::into).collect(),
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

/// Review after an update, with the image changes that were applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Updated {
    #[serde(flatten)]
    pub review: Detail,
    pub new_image_urls: Vec<String>,
    pub deleted_image_ids: Vec<i64>,
    pub total_image_count: usize,
}

impl From<crate::repository::UpdatedReview> for Updated {
    fn from(updated: crate::repository::UpdatedReview) -> Self {
        let new_image_urls = updated
            .new_images
            .into_iter()
            .map(|image| image.image_url)
            .collect();
        let total_image_count = updated.images.len();

        Self {
            review: Detail::new(updated.review, updated.images),
            new_image_urls,
            deleted_image_ids: updated.deleted_image_ids,
            total_image_count,
        }
    }
}
