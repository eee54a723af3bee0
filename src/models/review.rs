use crate::errors::ReviewError;
use crate::models::{Characteristic, CharacteristicFilter, Cushion, SizeFit, Stability};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;
pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_CONTENT_LENGTH: usize = 1000;

/// Visibility state of a review.
///
/// ACTIVE <-> HIDDEN, and ACTIVE | HIDDEN -> DELETED. DELETED is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    Active,
    Hidden,
    Deleted,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Active => "ACTIVE",
            ReviewStatus::Hidden => "HIDDEN",
            ReviewStatus::Deleted => "DELETED",
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, ReviewStatus::Active)
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = super::ParseLevelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ACTIVE" => Ok(ReviewStatus::Active),
            "HIDDEN" => Ok(ReviewStatus::Hidden),
            "DELETED" => Ok(ReviewStatus::Deleted),
            other => Err(super::ParseLevelError {
                scale: "ReviewStatus",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ReviewStatus {
    type Error = super::ParseLevelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub title: Option<String>,
    pub rating: i32,
    pub content: Option<String>,
    #[sqlx(try_from = "String")]
    pub size_fit: SizeFit,
    #[sqlx(try_from = "String")]
    pub cushion: Cushion,
    #[sqlx(try_from = "String")]
    pub stability: Stability,
    #[sqlx(try_from = "String")]
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Builds a new ACTIVE review. The id is assigned on insert.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: i64,
        product_id: i64,
        title: Option<String>,
        rating: i32,
        content: Option<String>,
        size_fit: SizeFit,
        cushion: Cushion,
        stability: Stability,
    ) -> Result<Self, ReviewError> {
        Self::validate_rating(rating)?;
        Self::validate_title(title.as_deref())?;
        Self::validate_content(content.as_deref())?;

        let now = Utc::now();
        Ok(Self {
            id: 0,
            user_id,
            product_id,
            title,
            rating,
            content,
            size_fit,
            cushion,
            stability,
            status: ReviewStatus::Active,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn validate_rating(rating: i32) -> Result<(), ReviewError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ReviewError::InvalidRating);
        }
        Ok(())
    }

    pub fn validate_title(title: Option<&str>) -> Result<(), ReviewError> {
        match title {
            Some(title) if title.chars().count() > MAX_TITLE_LENGTH => {
                Err(ReviewError::TitleTooLong)
            }
            _ => Ok(()),
        }
    }

    pub fn validate_content(content: Option<&str>) -> Result<(), ReviewError> {
        match content {
            Some(content) if content.chars().count() > MAX_CONTENT_LENGTH => {
                Err(ReviewError::ContentTooLong)
            }
            _ => Ok(()),
        }
    }

    pub fn update_title(&mut self, title: String) -> Result<(), ReviewError> {
        Self::validate_title(Some(&title))?;
        self.title = Some(title);
        Ok(())
    }

    pub fn update_content(&mut self, content: String) -> Result<(), ReviewError> {
        Self::validate_content(Some(&content))?;
        self.content = Some(content);
        Ok(())
    }

    pub fn update_rating(&mut self, rating: i32) -> Result<(), ReviewError> {
        Self::validate_rating(rating)?;
        self.rating = rating;
        Ok(())
    }

    pub fn update_size_fit(&mut self, size_fit: SizeFit) {
        self.size_fit = size_fit;
    }

    pub fn update_cushion(&mut self, cushion: Cushion) {
        self.cushion = cushion;
    }

    pub fn update_stability(&mut self, stability: Stability) {
        self.stability = stability;
    }

    pub fn delete(&mut self) -> Result<(), ReviewError> {
        self.transition(ReviewStatus::Deleted)
    }

    pub fn hide(&mut self) -> Result<(), ReviewError> {
        self.transition(ReviewStatus::Hidden)
    }

    pub fn restore(&mut self) -> Result<(), ReviewError> {
        self.transition(ReviewStatus::Active)
    }

    fn transition(&mut self, to: ReviewStatus) -> Result<(), ReviewError> {
        let allowed = matches!(
            (self.status, to),
            (ReviewStatus::Active, ReviewStatus::Hidden)
                | (ReviewStatus::Active, ReviewStatus::Deleted)
                | (ReviewStatus::Hidden, ReviewStatus::Active)
                | (ReviewStatus::Hidden, ReviewStatus::Deleted)
        );
        if !allowed {
            return Err(ReviewError::InvalidStatusTransition {
                from: self.status,
                to,
            });
        }

        self.status = to;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == ReviewStatus::Active
    }

    pub fn is_hidden(&self) -> bool {
        self.status == ReviewStatus::Hidden
    }

    pub fn is_deleted(&self) -> bool {
        self.status == ReviewStatus::Deleted
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }

    /// Stored name of the review's level on the given scale.
    pub fn level_of(&self, characteristic: Characteristic) -> &'static str {
        match characteristic {
            Characteristic::SizeFit => self.size_fit.as_str(),
            Characteristic::Cushion => self.cushion.as_str(),
            Characteristic::Stability => self.stability.as_str(),
        }
    }

    pub fn matches(&self, filter: &CharacteristicFilter) -> bool {
        filter.size_fit.map_or(true, |size_fit| size_fit == self.size_fit)
            && filter.cushion.map_or(true, |cushion| cushion == self.cushion)
            && filter.stability.map_or(true, |stability| stability == self.stability)
    }
}
