use crate::errors::ReviewError;
use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct AddReview {
    #[validate(minimum = 1)]
    pub product_id: i64,
    #[validate(max_length = 100)]
    pub title: Option<String>,
    #[validate(minimum = 1)]
    #[validate(maximum = 5)]
    pub rating: i32,
    #[validate(max_length = 1000)]
    pub content: Option<String>,
    pub size_fit: models::SizeFit,
    pub cushion: models::Cushion,
    pub stability: models::Stability,
    #[serde(default)]
    #[validate(max_items = 5)]
    pub image_urls: Vec<String>,
}

impl AddReview {
    pub fn into_review(self, user_id: i64) -> Result<(models::Review, Vec<String>), ReviewError> {
        let review = models::Review::new(
            user_id,
            self.product_id,
            self.title,
            self.rating,
            self.content,
            self.size_fit,
            self.cushion,
            self.stability,
        )?;

        let image_urls = self
            .image_urls
            .into_iter()
            .map(|url| url.trim().to_string())
            .collect();

        Ok((review, image_urls))
    }
}
