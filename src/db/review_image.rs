use crate::db::store_error;
use crate::models::ReviewImage;
use crate::repository::StoreError;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch(pool: &PgPool, id: i64) -> Result<Option<ReviewImage>, StoreError> {
    let query_span = tracing::info_span!("Fetch review image by id", image_id = id);
    sqlx::query_as::<_, ReviewImage>(
        "SELECT id, review_id, image_url, image_order, created_at FROM review_image WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| store_error("Failed to fetch review image", err))
}

pub async fn fetch_by_review(pool: &PgPool, review_id: i64) -> Result<Vec<ReviewImage>, StoreError> {
    let query_span = tracing::info_span!("Fetch images of review", review_id = review_id);
    sqlx::query_as::<_, ReviewImage>(
        r#"
        SELECT id, review_id, image_url, image_order, created_at
        FROM review_image
        WHERE review_id = $1
        ORDER BY image_order, id
        "#,
    )
    .bind(review_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| store_error("Failed to fetch review images", err))
}

pub async fn fetch_by_reviews(
    pool: &PgPool,
    review_ids: &[i64],
) -> Result<Vec<ReviewImage>, StoreError> {
    if review_ids.is_empty() {
        return Ok(vec![]);
    }

    let query_span = tracing::info_span!("Fetch images of reviews", count = review_ids.len());
    sqlx::query_as::<_, ReviewImage>(
        r#"
        SELECT id, review_id, image_url, image_order, created_at
        FROM review_image
        WHERE review_id = ANY($1)
        ORDER BY review_id, image_order, id
        "#,
    )
    .bind(review_ids)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| store_error("Failed to fetch review images", err))
}

pub async fn count_by_review(pool: &PgPool, review_id: i64) -> Result<i64, StoreError> {
    let query_span = tracing::info_span!("Count images of review", review_id = review_id);
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM review_image WHERE review_id = $1")
        .bind(review_id)
        .fetch_one(pool)
        .instrument(query_span)
        .await
        .map_err(|err| store_error("Failed to count review images", err))
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<(), StoreError> {
    let query_span = tracing::info_span!("Delete review image", image_id = id);
    let result = sqlx::query("DELETE FROM review_image WHERE id = $1")
        .bind(id)
        .execute(pool)
        .instrument(query_span)
        .await
        .map_err(|err| store_error("Failed to delete review image", err))?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}
