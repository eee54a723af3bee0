mod image;
mod review;
mod statistics;

pub use image::ReviewImageService;
pub use review::ReviewService;
pub use statistics::StatisticsService;
