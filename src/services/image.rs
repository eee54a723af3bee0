use crate::errors::ReviewError;
use crate::models::{Review, User};
use crate::repository::{ReviewImageRepository, ReviewRepository};
use crate::views;
use std::sync::Arc;

pub struct ReviewImageService {
    reviews: Arc<dyn ReviewRepository>,
    images: Arc<dyn ReviewImageRepository>,
}

impl ReviewImageService {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        images: Arc<dyn ReviewImageRepository>,
    ) -> Self {
        Self { reviews, images }
    }

    async fn fetch_active(&self, review_id: i64) -> Result<Review, ReviewError> {
        self.reviews
            .fetch(review_id)
            .await?
            .filter(Review::is_active)
            .ok_or(ReviewError::NotFound)
    }

    pub async fn list(&self, review_id: i64) -> Result<Vec<views::review::Image>, ReviewError> {
        self.fetch_active(review_id).await?;
        Ok(self
            .images
            .fetch_by_review(review_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub async fn delete(&self, actor: &User, review_id: i64, image_id: i64) -> Result<(), ReviewError> {
        let review = self.fetch_active(review_id).await?;
        if !actor.can_manage(review.user_id) {
            return Err(ReviewError::AccessDenied);
        }

        match self.images.fetch(image_id).await? {
            Some(image) if image.review_id == review_id => {}
            _ => return Err(ReviewError::ImageNotFound),
        }
        self.images.delete(image_id).await?;
        tracing::info!(review_id, image_id, actor = actor.id, "review image deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cushion, SizeFit, Stability};
    use crate::services::testing::{admin, store, user};

    #[tokio::test]
    async fn delete_checks_owner_and_parent() {
        let store = store();
        let review = Review::new(
            1,
            10,
            None,
            4,
            None,
            SizeFit::Big,
            Cushion::Firm,
            Stability::Normal,
        )
        .unwrap();
        let urls = vec!["/a.png".to_string(), "/b.png".to_string()];
        let (review, images) = store.insert(review, &urls).await.unwrap();
        let service = ReviewImageService::new(store.clone(), store);

        assert_eq!(service.list(review.id).await.unwrap().len(), 2);
        assert!(matches!(
            service.delete(&user(2), review.id, images[0].id).await,
            Err(ReviewError::AccessDenied)
        ));
        assert!(matches!(
            service.delete(&user(1), review.id, 999).await,
            Err(ReviewError::ImageNotFound)
        ));

        service.delete(&user(1), review.id, images[0].id).await.unwrap();
        service.delete(&admin(), review.id, images[1].id).await.unwrap();
        assert!(service.list(review.id).await.unwrap().is_empty());
        assert!(matches!(service.list(42).await, Err(ReviewError::NotFound)));
    }
}
