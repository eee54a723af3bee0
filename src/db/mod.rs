pub mod review;
pub mod review_image;

use crate::repository::StoreError;

const UNIQUE_VIOLATION: &str = "23505";

/// Logs a failed query and maps it onto the repository error.
pub(crate) fn store_error(context: &str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            tracing::info!("{}: unique constraint violated", context);
            return StoreError::Duplicate;
        }
    }

    tracing::error!("{}: {:?}", context, err);
    StoreError::Query(format!("{}: {}", context, err))
}
