use crate::errors::ReviewError;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const MAX_IMAGES: usize = 5;
pub const MAX_IMAGE_URL_LENGTH: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ReviewImage {
    pub id: i64,
    pub review_id: i64,
    pub image_url: String,
    pub image_order: i32, // 1-based position inside the review
    pub created_at: DateTime<Utc>,
}

impl ReviewImage {
    /// Accepts absolute http(s) URLs and paths rooted at `/`.
    pub fn validate_url(url: &str) -> Result<(), ReviewError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ReviewError::InvalidImageUrl("empty url".to_string()));
        }
        if url.chars().count() > MAX_IMAGE_URL_LENGTH {
            return Err(ReviewError::InvalidImageUrl(format!(
                "longer than {} characters",
                MAX_IMAGE_URL_LENGTH
            )));
        }
        if !(url.starts_with("http://") || url.starts_with("https://") || url.starts_with('/')) {
            return Err(ReviewError::InvalidImageUrl(url.to_string()));
        }
        Ok(())
    }
}

/// Image edits applied together with a review update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageChanges {
    pub delete_ids: Vec<i64>,
    pub new_urls: Vec<String>,
}

impl ImageChanges {
    pub fn is_empty(&self) -> bool {
        self.delete_ids.is_empty() && self.new_urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_rules() {
        assert!(ReviewImage::validate_url("https://cdn.example.com/a.jpg").is_ok());
        assert!(ReviewImage::validate_url("/uploads/a.jpg").is_ok());
        assert!(ReviewImage::validate_url("ftp://example.com/a.jpg").is_err());
        assert!(ReviewImage::validate_url("   ").is_err());

        let long = format!("https://{}", "a".repeat(MAX_IMAGE_URL_LENGTH));
        assert!(matches!(
            ReviewImage::validate_url(&long),
            Err(ReviewError::InvalidImageUrl(_))
        ));
    }
}
