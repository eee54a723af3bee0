mod admin;
mod detail;
mod image;
mod statistics;
mod summary;

pub use admin::{Admin, StatusChange};
pub use detail::{Detail, Updated};
pub use image::Image;
pub use statistics::{
    AverageRating, CharacteristicRating, ProductStatistics, ProductSummary, RatingDistribution,
};
pub use summary::{Summary, SUMMARY_CONTENT_LENGTH};
