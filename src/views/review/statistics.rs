use super::Summary;
use crate::models;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RatingDistribution {
    pub five_star: i64,
    pub four_star: i64,
    pub three_star: i64,
    pub two_star: i64,
    pub one_star: i64,
}

impl From<&models::RatingAggregate> for RatingDistribution {
    fn from(aggregate: &models::RatingAggregate) -> Self {
        Self {
            five_star: aggregate.five_star,
            four_star: aggregate.four_star,
            three_star: aggregate.three_star,
            two_star: aggregate.two_star,
            one_star: aggregate.one_star,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductStatistics {
    pub product_id: i64,
    pub average_rating: f64,
    pub total_reviews: i64,
    /// Every rating 1..=5 is present.
    pub rating_distribution: BTreeMap<i32, i64>,
    /// Every level of the scale is present.
    pub size_fit_distribution: BTreeMap<String, i64>,
    pub cushion_distribution: BTreeMap<String, i64>,
    pub stability_distribution: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub product_id: i64,
    pub total_reviews: i64,
    pub average_rating: f64,
    pub rating_distribution: RatingDistribution,
    pub most_common_size_fit: Option<models::SizeFit>,
    pub recent_reviews: Vec<Summary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageRating {
    pub product_id: i64,
    pub average_rating: f64,
    pub review_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacteristicRating {
    #[serde(flatten)]
    pub filter: models::CharacteristicFilter,
    pub average_rating: f64,
}
