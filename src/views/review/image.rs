use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub id: i64,
    pub review_id: i64,
    pub image_url: String,
    pub image_order: i32,
    pub created_at: DateTime<Utc>,
}

impl From<models::ReviewImage> for Image {
    fn from(image: models::ReviewImage) -> Self {
        Self {
            id: image.id,
            review_id: image.review_id,
            image_url: image.image_url,
            image_order: image.image_order,
            created_at: image.created_at,
        }
    }
}
