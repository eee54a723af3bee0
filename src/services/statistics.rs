use crate::errors::ReviewError;
use crate::models::{
    round_rating, Characteristic, CharacteristicFilter, PageRequest, ReviewFilter, SizeFit,
    MAX_RATING, MIN_RATING,
};
use crate::repository::{ReviewImageRepository, ReviewRepository};
use crate::views;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

pub const RECENT_REVIEWS: i64 = 3;

/// Read-only aggregates over ACTIVE reviews.
pub struct StatisticsService {
    reviews: Arc<dyn ReviewRepository>,
    images: Arc<dyn ReviewImageRepository>,
}

impl StatisticsService {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        images: Arc<dyn ReviewImageRepository>,
    ) -> Self {
        Self { reviews, images }
    }

    /// Mean rating rounded to one decimal, 0.0 without reviews.
    pub async fn average_rating(&self, product_id: i64) -> Result<f64, ReviewError> {
        let aggregate = self.reviews.rating_aggregate(product_id).await?;
        Ok(aggregate.average.map(round_rating).unwrap_or(0.0))
    }

    pub async fn review_count(&self, product_id: i64) -> Result<i64, ReviewError> {
        Ok(self.reviews.rating_aggregate(product_id).await?.total)
    }

    pub async fn rating(&self, product_id: i64) -> Result<views::review::AverageRating, ReviewError> {
        let aggregate = self.reviews.rating_aggregate(product_id).await?;
        Ok(views::review::AverageRating {
            product_id,
            average_rating: aggregate.average.map(round_rating).unwrap_or(0.0),
            review_count: aggregate.total,
        })
    }

    /// Zero-filled distribution over every level of the scale.
    async fn levels(
        &self,
        product_id: i64,
        characteristic: Characteristic,
    ) -> Result<BTreeMap<String, i64>, ReviewError> {
        let counts: HashMap<String, i64> = self
            .reviews
            .distribution(product_id, characteristic)
            .await?
            .into_iter()
            .collect();

        Ok(characteristic
            .levels()
            .into_iter()
            .map(|level| (level.to_string(), counts.get(level).copied().unwrap_or(0)))
            .collect())
    }

    pub async fn product_statistics(
        &self,
        product_id: i64,
    ) -> Result<views::review::ProductStatistics, ReviewError> {
        let aggregate = self.reviews.rating_aggregate(product_id).await?;
        let rating_distribution = (MIN_RATING..=MAX_RATING)
            .map(|rating| (rating, aggregate.count_for(rating)))
            .collect();

        Ok(views::review::ProductStatistics {
            product_id,
            average_rating: aggregate.average.map(round_rating).unwrap_or(0.0),
            total_reviews: aggregate.total,
            rating_distribution,
            size_fit_distribution: self.levels(product_id, Characteristic::SizeFit).await?,
            cushion_distribution: self.levels(product_id, Characteristic::Cushion).await?,
            stability_distribution: self.levels(product_id, Characteristic::Stability).await?,
        })
    }

    /// Most chosen size fit; on a tie the smaller fit wins.
    pub async fn most_common_size_fit(&self, product_id: i64) -> Result<Option<SizeFit>, ReviewError> {
        let counts = self.levels(product_id, Characteristic::SizeFit).await?;
        let mut best: Option<(SizeFit, i64)> = None;
        for fit in SizeFit::ALL {
            let count = counts.get(fit.as_str()).copied().unwrap_or(0);
            if count > best.map_or(0, |(_, top)| top) {
                best = Some((fit, count));
            }
        }

        Ok(best.map(|(fit, _)| fit))
    }

    pub async fn product_summary(
        &self,
        product_id: i64,
    ) -> Result<views::review::ProductSummary, ReviewError> {
        let aggregate = self.reviews.rating_aggregate(product_id).await?;
        let (recent, _) = self
            .reviews
            .fetch_page(
                &ReviewFilter::by_product(product_id),
                PageRequest::new(Some(0), Some(RECENT_REVIEWS)),
            )
            .await?;

        let ids: Vec<i64> = recent.iter().map(|review| review.id).collect();
        let mut images: HashMap<i64, Vec<_>> = HashMap::new();
        for image in self.images.fetch_by_reviews(&ids).await? {
            images.entry(image.review_id).or_default().push(image);
        }
        let recent_reviews = recent
            .into_iter()
            .map(|review| {
                let review_images = images.remove(&review.id).unwrap_or_default();
                views::review::Summary::new(review, review_images, true)
            })
            .collect();

        Ok(views::review::ProductSummary {
            product_id,
            total_reviews: aggregate.total,
            average_rating: aggregate.average.map(round_rating).unwrap_or(0.0),
            rating_distribution: (&aggregate).into(),
            most_common_size_fit: self.most_common_size_fit(product_id).await?,
            recent_reviews,
        })
    }

    /// Average rating across products of reviews sharing the given levels.
    pub async fn average_rating_by_characteristic(
        &self,
        filter: CharacteristicFilter,
    ) -> Result<views::review::CharacteristicRating, ReviewError> {
        let average = self.reviews.average_rating(&filter).await?;
        Ok(views::review::CharacteristicRating {
            filter,
            average_rating: average.map(round_rating).unwrap_or(0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cushion, Review, Stability};
    use crate::repository::InMemoryStore;

    async fn seed(store: &InMemoryStore, user_id: i64, product_id: i64, rating: i32, fit: SizeFit) {
        let review = Review::new(
            user_id,
            product_id,
            None,
            rating,
            Some(format!("Review {user_id}")),
            fit,
            Cushion::Soft,
            Stability::Stable,
        )
        .unwrap();
        store.insert(review, &[]).await.unwrap();
    }

    fn service(store: Arc<InMemoryStore>) -> StatisticsService {
        StatisticsService::new(store.clone(), store)
    }

    #[tokio::test]
    async fn empty_product_is_zero_filled() {
        let service = service(Arc::new(InMemoryStore::new()));

        assert_eq!(service.average_rating(10).await.unwrap(), 0.0);
        assert_eq!(service.review_count(10).await.unwrap(), 0);

        let stats = service.product_statistics(10).await.unwrap();
        assert_eq!(stats.rating_distribution.len(), 5);
        assert!(stats.rating_distribution.values().all(|count| *count == 0));
        assert_eq!(stats.size_fit_distribution.len(), 5);
        assert_eq!(stats.cushion_distribution["VERY_FIRM"], 0);

        let summary = service.product_summary(10).await.unwrap();
        assert_eq!(summary.most_common_size_fit, None);
        assert!(summary.recent_reviews.is_empty());
    }

    #[tokio::test]
    async fn averages_and_counts_match_active_reviews() {
        let store = Arc::new(InMemoryStore::new());
        seed(&store, 1, 10, 5, SizeFit::Perfect).await;
        seed(&store, 2, 10, 4, SizeFit::Perfect).await;
        seed(&store, 3, 10, 4, SizeFit::Small).await;
        seed(&store, 4, 11, 1, SizeFit::Big).await;
        let service = service(store);

        assert_eq!(service.average_rating(10).await.unwrap(), 4.3);
        assert_eq!(service.review_count(10).await.unwrap(), 3);

        let stats = service.product_statistics(10).await.unwrap();
        assert_eq!(stats.rating_distribution[&4], 2);
        assert_eq!(stats.rating_distribution[&1], 0);
        assert_eq!(stats.size_fit_distribution["PERFECT"], 2);
        assert_eq!(stats.size_fit_distribution["SMALL"], 1);
        assert_eq!(stats.stability_distribution["STABLE"], 3);

        let rating = service.rating(11).await.unwrap();
        assert_eq!(rating.average_rating, 1.0);
        assert_eq!(rating.review_count, 1);
    }

    #[tokio::test]
    async fn summary_picks_smaller_fit_on_tie() {
        let store = Arc::new(InMemoryStore::new());
        seed(&store, 1, 10, 5, SizeFit::Big).await;
        seed(&store, 2, 10, 3, SizeFit::Small).await;
        seed(&store, 3, 10, 4, SizeFit::Big).await;
        seed(&store, 4, 10, 4, SizeFit::Small).await;
        let service = service(store);

        let summary = service.product_summary(10).await.unwrap();
        assert_eq!(summary.most_common_size_fit, Some(SizeFit::Small));
        assert_eq!(summary.total_reviews, 4);
        assert_eq!(summary.rating_distribution.four_star, 2);
        assert_eq!(summary.recent_reviews.len(), RECENT_REVIEWS as usize);
        assert_eq!(summary.recent_reviews[0].user_id, 4);
    }

    #[tokio::test]
    async fn characteristic_average_spans_products() {
        let store = Arc::new(InMemoryStore::new());
        seed(&store, 1, 10, 5, SizeFit::Perfect).await;
        seed(&store, 2, 11, 2, SizeFit::Perfect).await;
        seed(&store, 3, 12, 1, SizeFit::Big).await;
        let service = service(store);

        let filter = CharacteristicFilter {
            size_fit: Some(SizeFit::Perfect),
            ..Default::default()
        };
        let rating = service.average_rating_by_characteristic(filter).await.unwrap();
        assert_eq!(rating.average_rating, 3.5);
        assert_eq!(rating.filter, filter);
    }
}
