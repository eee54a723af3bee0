use serde::Serialize;

/// Per-product rating aggregate, computed by the store in one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, sqlx::FromRow)]
pub struct RatingAggregate {
    pub total: i64,
    pub average: Option<f64>,
    pub one_star: i64,
    pub two_star: i64,
    pub three_star: i64,
    pub four_star: i64,
    pub five_star: i64,
}

impl RatingAggregate {
    pub fn count_for(&self, rating: i32) -> i64 {
        match rating {
            1 => self.one_star,
            2 => self.two_star,
            3 => self.three_star,
            4 => self.four_star,
            5 => self.five_star,
            _ => 0,
        }
    }
}

/// Rounds to one decimal place, the precision ratings are shown with.
pub fn round_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
