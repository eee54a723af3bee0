use crate::errors::ReviewError;
use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

/// Partial update; absent fields keep their value.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct UserEditReview {
    #[validate(max_length = 100)]
    pub title: Option<String>,
    #[validate(minimum = 1)]
    #[validate(maximum = 5)]
    pub rating: Option<i32>,
    #[validate(max_length = 1000)]
    pub content: Option<String>,
    pub size_fit: Option<models::SizeFit>,
    pub cushion: Option<models::Cushion>,
    pub stability: Option<models::Stability>,
    #[serde(default)]
    #[validate(max_items = 5)]
    pub image_urls: Vec<String>, // appended after the existing images
    #[serde(default)]
    pub delete_image_ids: Vec<i64>,
}

impl UserEditReview {
    pub fn update(&self, review: &mut models::Review) -> Result<(), ReviewError> {
        if let Some(title) = &self.title {
            review.update_title(title.clone())?;
        }
        if let Some(rating) = self.rating {
            review.update_rating(rating)?;
        }
        if let Some(content) = &self.content {
            review.update_content(content.clone())?;
        }
        if let Some(size_fit) = self.size_fit {
            review.update_size_fit(size_fit);
        }
        if let Some(cushion) = self.cushion {
            review.update_cushion(cushion);
        }
        if let Some(stability) = self.stability {
            review.update_stability(stability);
        }

        Ok(())
    }

    pub fn image_changes(&self) -> models::ImageChanges {
        let mut delete_ids = self.delete_image_ids.clone();
        delete_ids.sort_unstable();
        delete_ids.dedup();

        models::ImageChanges {
            delete_ids,
            new_urls: self
                .image_urls
                .iter()
                .map(|url| url.trim().to_string())
                .collect(),
        }
    }
}
