mod characteristic;
mod filter;
mod page;
mod review;
mod review_image;
mod statistics;
mod user;

pub use characteristic::*;
pub use filter::*;
pub use page::*;
pub use review::*;
pub use review_image::*;
pub use statistics::*;
pub use user::*;
