use crate::helpers::JsonResponse;
use crate::repository::StoreError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};

/// Business errors raised by the review services.
///
/// Every variant renders as the common `{success, message, data}` envelope
/// with the status code below.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("Review not found")]
    NotFound,
    #[error("Review image not found")]
    ImageNotFound,
    #[error("You have no permission for this review")]
    AccessDenied,
    #[error("Authentication required")]
    Unauthorized,
    #[error("A review for this product already exists")]
    AlreadyExists,
    #[error("Rating must be between {min} and {max}", min = crate::models::MIN_RATING, max = crate::models::MAX_RATING)]
    InvalidRating,
    #[error("Review title must not exceed {} characters", crate::models::MAX_TITLE_LENGTH)]
    TitleTooLong,
    #[error("Review content must not exceed {} characters", crate::models::MAX_CONTENT_LENGTH)]
    ContentTooLong,
    #[error("Invalid image url: {0}")]
    InvalidImageUrl(String),
    #[error("A review can hold at most {} images", crate::models::MAX_IMAGES)]
    TooManyImages,
    #[error("{0}")]
    InvalidInput(String),
    #[error("Review cannot change status from {from} to {to}")]
    InvalidStatusTransition {
        from: crate::models::ReviewStatus,
        to: crate::models::ReviewStatus,
    },
    #[error("Only purchased products can be reviewed")]
    PurchaseRequired,
    #[error("Purchase history is unavailable, try again later")]
    PurchaseVerificationUnavailable,
    #[error("Internal server error")]
    Internal(String),
}

impl From<StoreError> for ReviewError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => Self::AlreadyExists,
            StoreError::NotFound => Self::NotFound,
            StoreError::Query(msg) => Self::Internal(msg),
        }
    }
}

impl ResponseError for ReviewError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound | Self::ImageNotFound => StatusCode::NOT_FOUND,
            Self::AccessDenied | Self::PurchaseRequired => StatusCode::FORBIDDEN,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::InvalidRating
            | Self::TitleTooLong
            | Self::ContentTooLong
            | Self::InvalidImageUrl(_)
            | Self::TooManyImages
            | Self::InvalidInput(_)
            | Self::InvalidStatusTransition { .. } => StatusCode::BAD_REQUEST,
            Self::PurchaseVerificationUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(JsonResponse::<()> {
            success: false,
            message: self.to_string(),
            data: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReviewStatus;
    use actix_web::body::to_bytes;

    #[test]
    fn status_codes() {
        assert_eq!(ReviewError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ReviewError::AccessDenied.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ReviewError::AlreadyExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(ReviewError::InvalidRating.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ReviewError::PurchaseVerificationUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn messages() {
        assert_eq!(
            ReviewError::InvalidRating.to_string(),
            "Rating must be between 1 and 5"
        );
        assert_eq!(
            ReviewError::InvalidStatusTransition {
                from: ReviewStatus::Deleted,
                to: ReviewStatus::Active,
            }
            .to_string(),
            "Review cannot change status from DELETED to ACTIVE"
        );
        // internal details never reach the client
        assert_eq!(
            ReviewError::Internal("relation \"review\" does not exist".into()).to_string(),
            "Internal server error"
        );
    }

    #[test]
    fn store_errors() {
        assert!(matches!(
            ReviewError::from(StoreError::Duplicate),
            ReviewError::AlreadyExists
        ));
        assert!(matches!(
            ReviewError::from(StoreError::Query("boom".into())),
            ReviewError::Internal(msg) if msg == "boom"
        ));
    }

    #[actix_web::test]
    async fn renders_envelope() {
        let response = ReviewError::AlreadyExists.error_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "A review for this product already exists");
        assert!(json["data"].is_null());
    }
}
