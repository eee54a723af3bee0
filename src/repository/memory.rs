use super::{ReviewImageRepository, ReviewRepository, StoreError, UpdatedReview};
use crate::models::{
    Characteristic, CharacteristicFilter, ImageChanges, PageRequest, RatingAggregate, Review,
    ReviewFilter, ReviewImage, ReviewStatus,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct State {
    reviews: BTreeMap<i64, Review>,
    images: BTreeMap<i64, ReviewImage>,
    last_review_id: i64,
    last_image_id: i64,
}

impl State {
    fn has_other_active(&self, review: &Review) -> bool {
        self.reviews.values().any(|other| {
            other.id != review.id
                && other.is_active()
                && other.user_id == review.user_id
                && other.product_id == review.product_id
        })
    }

    fn push_image(&mut self, review_id: i64, image_url: &str, image_order: i32) -> ReviewImage {
        self.last_image_id += 1;
        let image = ReviewImage {
            id: self.last_image_id,
            review_id,
            image_url: image_url.to_string(),
            image_order,
            created_at: Utc::now(),
        };
        self.images.insert(image.id, image.clone());
        image
    }

    fn images_of(&self, review_id: i64) -> Vec<ReviewImage> {
        let mut images: Vec<ReviewImage> = self
            .images
            .values()
            .filter(|image| image.review_id == review_id)
            .cloned()
            .collect();
        images.sort_by_key(|image| (image.image_order, image.id));
        images
    }

    fn active_of_product(&self, product_id: i64) -> impl Iterator<Item = &Review> {
        self.reviews
            .values()
            .filter(move |review| review.is_active() && review.product_id == product_id)
    }
}

fn matches_filter(review: &Review, filter: &ReviewFilter) -> bool {
    let keyword = filter.keyword().map(str::to_lowercase);
    let contains = |text: &Option<String>, keyword: &str| {
        text.as_deref()
            .map_or(false, |text| text.to_lowercase().contains(keyword))
    };

    review.is_active()
        && filter.product_id.map_or(true, |id| review.product_id == id)
        && filter.user_id.map_or(true, |id| review.user_id == id)
        && filter.min_rating.map_or(true, |min| review.rating >= min)
        && filter.max_rating.map_or(true, |max| review.rating <= max)
        && filter.size_fit.map_or(true, |level| review.size_fit == level)
        && filter.cushion.map_or(true, |level| review.cushion == level)
        && filter.stability.map_or(true, |level| review.stability == level)
        && keyword.as_deref().map_or(true, |keyword| {
            contains(&review.title, keyword) || contains(&review.content, keyword)
        })
}

/// Review and image store kept in process memory.
///
/// Mirrors the PostgreSQL store, including the unique index on ACTIVE
/// reviews, and backs the unit and HTTP tests.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Query("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn insert(
        &self,
        mut review: Review,
        image_urls: &[String],
    ) -> Result<(Review, Vec<ReviewImage>), StoreError> {
        let mut state = self.state()?;
        if review.is_active() && state.has_other_active(&review) {
            return Err(StoreError::Duplicate);
        }

        state.last_review_id += 1;
        review.id = state.last_review_id;
        state.reviews.insert(review.id, review.clone());

        let images = image_urls
            .iter()
            .zip(1..)
            .map(|(url, order)| state.push_image(review.id, url, order))
            .collect();

        Ok((review, images))
    }

    async fn update(
        &self,
        review: &Review,
        changes: &ImageChanges,
    ) -> Result<UpdatedReview, StoreError> {
        let mut state = self.state()?;
        let mut stored = state
            .reviews
            .get(&review.id)
            .cloned()
            .ok_or(StoreError::NotFound)?;

        stored.title = review.title.clone();
        stored.content = review.content.clone();
        stored.rating = review.rating;
        stored.size_fit = review.size_fit;
        stored.cushion = review.cushion;
        stored.stability = review.stability;
        stored.updated_at = Utc::now();

        let deleted_image_ids: Vec<i64> = changes
            .delete_ids
            .iter()
            .copied()
            .filter(|id| {
                state
                    .images
                    .get(id)
                    .map_or(false, |image| image.review_id == review.id)
            })
            .collect();
        for id in &deleted_image_ids {
            state.images.remove(id);
        }

        let max_order = state
            .images_of(review.id)
            .iter()
            .map(|image| image.image_order)
            .max()
            .unwrap_or(0);
        let new_images = changes
            .new_urls
            .iter()
            .zip(max_order + 1..)
            .map(|(url, order)| state.push_image(review.id, url, order))
            .collect();

        state.reviews.insert(stored.id, stored.clone());
        let images = state.images_of(stored.id);

        Ok(UpdatedReview {
            review: stored,
            images,
            new_images,
            deleted_image_ids,
        })
    }

    async fn update_status(&self, id: i64, status: ReviewStatus) -> Result<Review, StoreError> {
        let mut state = self.state()?;
        let mut review = state.reviews.get(&id).cloned().ok_or(StoreError::NotFound)?;
        review.status = status;
        if review.is_active() && state.has_other_active(&review) {
            return Err(StoreError::Duplicate);
        }

        review.updated_at = Utc::now();
        state.reviews.insert(id, review.clone());
        Ok(review)
    }

    async fn soft_delete(&self, id: i64) -> Result<Review, StoreError> {
        let mut state = self.state()?;
        let review = state.reviews.get_mut(&id).ok_or(StoreError::NotFound)?;
        review.status = ReviewStatus::Deleted;
        review.updated_at = Utc::now();
        let review = review.clone();

        state.images.retain(|_, image| image.review_id != id);
        Ok(review)
    }

    async fn fetch(&self, id: i64) -> Result<Option<Review>, StoreError> {
        Ok(self.state()?.reviews.get(&id).cloned())
    }

    async fn exists_active(&self, user_id: i64, product_id: i64) -> Result<bool, StoreError> {
        Ok(self.state()?.reviews.values().any(|review| {
            review.is_active() && review.user_id == user_id && review.product_id == product_id
        }))
    }

    async fn fetch_page(
        &self,
        filter: &ReviewFilter,
        page: PageRequest,
    ) -> Result<(Vec<Review>, i64), StoreError> {
        let state = self.state()?;
        let mut matching: Vec<&Review> = state
            .reviews
            .values()
            .filter(|review| matches_filter(review, filter))
            .collect();
        matching.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        let total = matching.len() as i64;
        let content = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.size as usize)
            .cloned()
            .collect();

        Ok((content, total))
    }

    async fn rating_aggregate(&self, product_id: i64) -> Result<RatingAggregate, StoreError> {
        let state = self.state()?;
        let mut aggregate = RatingAggregate::default();
        let mut sum = 0i64;

        for review in state.active_of_product(product_id) {
            aggregate.total += 1;
            sum += review.rating as i64;
            match review.rating {
                1 => aggregate.one_star += 1,
                2 => aggregate.two_star += 1,
                3 => aggregate.three_star += 1,
                4 => aggregate.four_star += 1,
                5 => aggregate.five_star += 1,
                _ => {}
            }
        }
        if aggregate.total > 0 {
            aggregate.average = Some(sum as f64 / aggregate.total as f64);
        }

        Ok(aggregate)
    }

    async fn distribution(
        &self,
        product_id: i64,
        characteristic: Characteristic,
    ) -> Result<Vec<(String, i64)>, StoreError> {
        let state = self.state()?;
        let mut counts: BTreeMap<&'static str, i64> = BTreeMap::new();
        for review in state.active_of_product(product_id) {
            *counts.entry(review.level_of(characteristic)).or_default() += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(level, count)| (level.to_string(), count))
            .collect())
    }

    async fn average_rating(
        &self,
        filter: &CharacteristicFilter,
    ) -> Result<Option<f64>, StoreError> {
        let state = self.state()?;
        let ratings: Vec<i32> = state
            .reviews
            .values()
            .filter(|review| review.is_active() && review.matches(filter))
            .map(|review| review.rating)
            .collect();

        if ratings.is_empty() {
            return Ok(None);
        }
        let sum: i64 = ratings.iter().map(|rating| *rating as i64).sum();
        Ok(Some(sum as f64 / ratings.len() as f64))
    }
}

#[async_trait]
impl ReviewImageRepository for InMemoryStore {
    async fn fetch(&self, image_id: i64) -> Result<Option<ReviewImage>, StoreError> {
        Ok(self.state()?.images.get(&image_id).cloned())
    }

    async fn fetch_by_review(&self, review_id: i64) -> Result<Vec<ReviewImage>, StoreError> {
        Ok(self.state()?.images_of(review_id))
    }

    async fn fetch_by_reviews(&self, review_ids: &[i64]) -> Result<Vec<ReviewImage>, StoreError> {
        let state = self.state()?;
        let mut images: Vec<ReviewImage> = state
            .images
            .values()
            .filter(|image| review_ids.contains(&image.review_id))
            .cloned()
            .collect();
        images.sort_by_key(|image| (image.review_id, image.image_order, image.id));
        Ok(images)
    }

    async fn count_by_review(&self, review_id: i64) -> Result<i64, StoreError> {
        Ok(self.state()?.images_of(review_id).len() as i64)
    }

    async fn delete(&self, image_id: i64) -> Result<(), StoreError> {
        self.state()?
            .images
            .remove(&image_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
