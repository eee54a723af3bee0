use super::Image;
use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const SUMMARY_CONTENT_LENGTH: usize = 100;

/// Listing entry. Content is cut to `SUMMARY_CONTENT_LENGTH` characters when
/// built with `truncate_content`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub rating: i32,
    pub size_fit: models::SizeFit,
    pub cushion: models::Cushion,
    pub stability: models::Stability,
    pub images: Vec<Image>,
    pub created_at: DateTime<Utc>,
}

fn truncate(content: String) -> String {
    if content.chars().count() <= SUMMARY_CONTENT_LENGTH {
        return content;
    }

    let mut short: String = content.chars().take(SUMMARY_CONTENT_LENGTH).collect();
    short.push_str("...");
    short
}

impl Summary {
    pub fn new(
        review: models::Review,
        images: Vec<models::ReviewImage>,
        truncate_content: bool,
    ) -> Self {
        let content = if truncate_content {
            review.content.map(truncate)
        } else {
            review.content
        };

        Self {
            id: review.id,
            user_id: review.user_id,
            product_id: review.product_id,
            title: review.title,
            content,
            rating: review.rating,
            size_fit: review.size_fit,
            cushion: review.cushion,
            stability: review.stability,
            images: images.into_iter().map(Into::into).collect(),
            created_at: review.created_at,
        }
    }
}
