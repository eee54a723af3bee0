use super::Detail;
use crate::models;
use serde::Serialize;

/// Moderation view: the detail plus its status, whatever the status is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Admin {
    #[serde(flatten)]
    pub review: Detail,
    pub status: models::ReviewStatus,
}

impl Admin {
    pub fn new(review: models::Review, images: Vec<models::ReviewImage>) -> Self {
        let status = review.status;
        Self {
            review: Detail::new(review, images),
            status,
        }
    }
}

/// Outcome of a status change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusChange {
    pub id: i64,
    pub status: models::ReviewStatus,
}

impl From<&models::Review> for StatusChange {
    fn from(review: &models::Review) -> Self {
        Self {
            id: review.id,
            status: review.status,
        }
    }
}
