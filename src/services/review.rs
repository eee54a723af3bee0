//! Review lifecycle: creation guards, partial updates, status transitions and
//! the listings built on top of the repository.

use crate::connectors::PurchaseServiceConnector;
use crate::errors::ReviewError;
use crate::forms;
use crate::models::{
    Page, PageRequest, Review, ReviewFilter, ReviewImage, ReviewStatus, User, MAX_IMAGES,
};
use crate::repository::{ReviewImageRepository, ReviewRepository};
use crate::views;
use std::collections::HashMap;
use std::sync::Arc;

pub type Result<T> = std::result::Result<T, ReviewError>;

pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    images: Arc<dyn ReviewImageRepository>,
    purchases: Arc<dyn PurchaseServiceConnector>,
}

fn check_rating_range(filter: &ReviewFilter) -> Result<()> {
    match (filter.min_rating, filter.max_rating) {
        (Some(min), Some(max)) if min > max => Err(ReviewError::InvalidInput(format!(
            "min_rating {} is greater than max_rating {}",
            min, max
        ))),
        _ => Ok(()),
    }
}

fn validate_image_urls(urls: &[String]) -> Result<()> {
    if urls.len() > MAX_IMAGES {
        return Err(ReviewError::TooManyImages);
    }
    urls.iter().try_for_each(|url| ReviewImage::validate_url(url))
}

fn require_admin(actor: &User) -> Result<()> {
    if !actor.is_admin() {
        return Err(ReviewError::AccessDenied);
    }
    Ok(())
}

impl ReviewService {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        images: Arc<dyn ReviewImageRepository>,
        purchases: Arc<dyn PurchaseServiceConnector>,
    ) -> Self {
        Self {
            reviews,
            images,
            purchases,
        }
    }

    async fn fetch_active(&self, id: i64) -> Result<Review> {
        self.reviews
            .fetch(id)
            .await?
            .filter(Review::is_active)
            .ok_or(ReviewError::NotFound)
    }

    async fn fetch_any(&self, id: i64) -> Result<Review> {
        self.reviews.fetch(id).await?.ok_or(ReviewError::NotFound)
    }

    async fn verify_purchase(&self, user_id: i64, product_id: i64) -> Result<()> {
        match self.purchases.has_purchased(user_id, product_id).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                tracing::warn!(user_id, product_id, "review attempt for a product that was not purchased");
                Err(ReviewError::PurchaseRequired)
            }
            Err(err) => {
                tracing::error!(user_id, product_id, "purchase verification failed: {}", err);
                Err(ReviewError::PurchaseVerificationUnavailable)
            }
        }
    }

    /// Creates a review of `user_id`. The actor must be that user or an admin.
    pub async fn create(
        &self,
        actor: &User,
        user_id: i64,
        form: forms::review::Add,
    ) -> Result<views::review::Detail> {
        if !actor.can_manage(user_id) {
            return Err(ReviewError::AccessDenied);
        }
        let (review, image_urls) = form.into_review(user_id)?;
        validate_image_urls(&image_urls)?;
        if self.reviews.exists_active(user_id, review.product_id).await? {
            return Err(ReviewError::AlreadyExists);
        }
        self.verify_purchase(user_id, review.product_id).await?;

        let (review, images) = self.reviews.insert(review, &image_urls).await?;
        tracing::info!(
            review_id = review.id,
            user_id,
            product_id = review.product_id,
            "review created"
        );

        Ok(views::review::Detail::new(review, images))
    }

    pub async fn get(&self, id: i64) -> Result<views::review::Detail> {
        let review = self.fetch_active(id).await?;
        let images = self.images.fetch_by_review(id).await?;
        Ok(views::review::Detail::new(review, images))
    }

    pub async fn admin_get(&self, actor: &User, id: i64) -> Result<views::review::Admin> {
        require_admin(actor)?;
        let review = self.fetch_any(id).await?;
        let images = self.images.fetch_by_review(id).await?;
        Ok(views::review::Admin::new(review, images))
    }

    pub async fn update(
        &self,
        actor: &User,
        id: i64,
        form: forms::review::UserEdit,
    ) -> Result<views::review::Updated> {
        let mut review = self.fetch_active(id).await?;
        if !actor.can_manage(review.user_id) {
            return Err(ReviewError::AccessDenied);
        }

        let changes = form.image_changes();
        validate_image_urls(&changes.new_urls)?;

        let current = self.images.fetch_by_review(id).await?;
        if let Some(foreign) = changes
            .delete_ids
            .iter()
            .find(|image_id| !current.iter().any(|image| image.id == **image_id))
        {
            tracing::info!(review_id = id, image_id = foreign, "image does not belong to review");
            return Err(ReviewError::ImageNotFound);
        }
        if current.len() - changes.delete_ids.len() + changes.new_urls.len() > MAX_IMAGES {
            return Err(ReviewError::TooManyImages);
        }

        form.update(&mut review)?;
        let updated = self.reviews.update(&review, &changes).await?;
        tracing::info!(
            review_id = id,
            added = updated.new_images.len(),
            deleted = updated.deleted_image_ids.len(),
            "review updated"
        );

        Ok(updated.into())
    }

    /// Soft delete; the row stays with status DELETED.
    pub async fn delete(&self, actor: &User, id: i64) -> Result<()> {
        let mut review = self.fetch_any(id).await?;
        if review.is_deleted() {
            return Err(ReviewError::NotFound);
        }
        if !actor.can_manage(review.user_id) {
            return Err(ReviewError::AccessDenied);
        }

        review.delete()?;
        self.reviews.soft_delete(id).await?;
        tracing::info!(review_id = id, actor = actor.id, "review deleted");
        Ok(())
    }

    /// Owner-initiated hide.
    pub async fn deactivate(&self, actor: &User, id: i64) -> Result<views::review::StatusChange> {
        let mut review = self.fetch_active(id).await?;
        if !actor.can_manage(review.user_id) {
            return Err(ReviewError::AccessDenied);
        }

        review.hide()?;
        let review = self.reviews.update_status(id, review.status).await?;
        Ok((&review).into())
    }

    pub async fn hide(&self, actor: &User, id: i64) -> Result<views::review::StatusChange> {
        require_admin(actor)?;
        let mut review = self.fetch_any(id).await?;

        review.hide()?;
        let review = self.reviews.update_status(id, review.status).await?;
        tracing::info!(review_id = id, admin = actor.id, "review hidden");
        Ok((&review).into())
    }

    /// HIDDEN back to ACTIVE, unless the author wrote another active review
    /// of the product meanwhile.
    pub async fn restore(&self, actor: &User, id: i64) -> Result<views::review::StatusChange> {
        require_admin(actor)?;
        let mut review = self.fetch_any(id).await?;

        review.restore()?;
        if self
            .reviews
            .exists_active(review.user_id, review.product_id)
            .await?
        {
            return Err(ReviewError::AlreadyExists);
        }
        let review = self
            .reviews
            .update_status(id, ReviewStatus::Active)
            .await?;
        tracing::info!(review_id = id, admin = actor.id, "review restored");
        Ok((&review).into())
    }

    async fn page_of_summaries(
        &self,
        filter: &ReviewFilter,
        page: PageRequest,
        truncate_content: bool,
    ) -> Result<Page<views::review::Summary>> {
        check_rating_range(filter)?;

        let (reviews, total) = self.reviews.fetch_page(filter, page).await?;
        let ids: Vec<i64> = reviews.iter().map(|review| review.id).collect();
        let mut images: HashMap<i64, Vec<ReviewImage>> = HashMap::new();
        for image in self.images.fetch_by_reviews(&ids).await? {
            images.entry(image.review_id).or_default().push(image);
        }

        Ok(Page::new(reviews, page, total).map(|review| {
            let review_images = images.remove(&review.id).unwrap_or_default();
            views::review::Summary::new(review, review_images, truncate_content)
        }))
    }

    pub async fn list_by_product(
        &self,
        product_id: i64,
        filter: ReviewFilter,
        page: PageRequest,
        summary: bool,
    ) -> Result<Page<views::review::Summary>> {
        let filter = ReviewFilter {
            product_id: Some(product_id),
            ..filter
        };
        self.page_of_summaries(&filter, page, summary).await
    }

    pub async fn list_by_user(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<Page<views::review::Summary>> {
        self.page_of_summaries(&ReviewFilter::by_user(user_id), page, false)
            .await
    }

    pub async fn search(
        &self,
        filter: ReviewFilter,
        page: PageRequest,
    ) -> Result<Page<views::review::Summary>> {
        if filter.product_id.is_none() {
            return Err(ReviewError::InvalidInput(
                "product_id is required".to_string(),
            ));
        }
        self.page_of_summaries(&filter, page, false).await
    }
}
