use crate::models::{Cushion, PageRequest, ReviewFilter, SizeFit, Stability};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl PageQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }
}

/// Query string of the product review listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub min_rating: Option<i32>,
    pub max_rating: Option<i32>,
    pub size_fit: Option<SizeFit>,
    pub cushion: Option<Cushion>,
    pub stability: Option<Stability>,
    #[serde(default)]
    pub summary: bool,
}

impl ListQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }

    pub fn filter(&self, product_id: i64) -> ReviewFilter {
        ReviewFilter {
            product_id: Some(product_id),
            min_rating: self.min_rating,
            max_rating: self.max_rating,
            size_fit: self.size_fit,
            cushion: self.cushion,
            stability: self.stability,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub product_id: i64,
    pub keyword: Option<String>,
    pub min_rating: Option<i32>,
    pub max_rating: Option<i32>,
    pub size_fit: Option<SizeFit>,
    pub cushion: Option<Cushion>,
    pub stability: Option<Stability>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl SearchQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }

    pub fn filter(&self) -> ReviewFilter {
        ReviewFilter {
            product_id: Some(self.product_id),
            keyword: self.keyword.clone(),
            min_rating: self.min_rating,
            max_rating: self.max_rating,
            size_fit: self.size_fit,
            cushion: self.cushion,
            stability: self.stability,
            ..Default::default()
        }
    }
}
