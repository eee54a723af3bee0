use crate::models::{Cushion, SizeFit, Stability};

/// Criteria for listing ACTIVE reviews. Unset fields do not restrict.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewFilter {
    pub product_id: Option<i64>,
    pub user_id: Option<i64>,
    pub min_rating: Option<i32>,
    pub max_rating: Option<i32>,
    pub keyword: Option<String>,
    pub size_fit: Option<SizeFit>,
    pub cushion: Option<Cushion>,
    pub stability: Option<Stability>,
}

impl ReviewFilter {
    pub fn by_product(product_id: i64) -> Self {
        Self {
            product_id: Some(product_id),
            ..Default::default()
        }
    }

    pub fn by_user(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
            ..Default::default()
        }
    }

    /// Keyword with surrounding whitespace removed, None when blank.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
    }
}
