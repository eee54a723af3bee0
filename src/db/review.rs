use crate::db::store_error;
use crate::models::{
    Characteristic, CharacteristicFilter, ImageChanges, PageRequest, RatingAggregate, Review,
    ReviewFilter, ReviewImage, ReviewStatus,
};
use crate::repository::{StoreError, UpdatedReview};
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::Instrument;

const REVIEW_COLUMNS: &str = "id, user_id, product_id, title, rating, content, size_fit, \
     cushion, stability, status, created_at, updated_at";

const IMAGE_COLUMNS: &str = "id, review_id, image_url, image_order, created_at";

/// Escapes LIKE wildcards so the keyword matches literally.
fn like_pattern(keyword: &str) -> String {
    let escaped = keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &ReviewFilter) {
    query.push(" WHERE status = ");
    query.push_bind(ReviewStatus::Active.as_str());

    if let Some(product_id) = filter.product_id {
        query.push(" AND product_id = ").push_bind(product_id);
    }
    if let Some(user_id) = filter.user_id {
        query.push(" AND user_id = ").push_bind(user_id);
    }
    if let Some(min_rating) = filter.min_rating {
        query.push(" AND rating >= ").push_bind(min_rating);
    }
    if let Some(max_rating) = filter.max_rating {
        query.push(" AND rating <= ").push_bind(max_rating);
    }
    if let Some(size_fit) = filter.size_fit {
        query.push(" AND size_fit = ").push_bind(size_fit.as_str());
    }
    if let Some(cushion) = filter.cushion {
        query.push(" AND cushion = ").push_bind(cushion.as_str());
    }
    if let Some(stability) = filter.stability {
        query.push(" AND stability = ").push_bind(stability.as_str());
    }
    if let Some(keyword) = filter.keyword() {
        let pattern = like_pattern(keyword);
        query
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR content ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

async fn insert_images(
    tx: &mut Transaction<'_, Postgres>,
    review_id: i64,
    urls: &[String],
    first_order: i32,
) -> Result<Vec<ReviewImage>, StoreError> {
    let mut images = Vec::with_capacity(urls.len());
    for (url, order) in urls.iter().zip(first_order..) {
        let image = sqlx::query_as::<_, ReviewImage>(&format!(
            "INSERT INTO review_image (review_id, image_url, image_order, created_at) \
             VALUES ($1, $2, $3, NOW()) RETURNING {IMAGE_COLUMNS}"
        ))
        .bind(review_id)
        .bind(url)
        .bind(order)
        .fetch_one(&mut **tx)
        .await
        .map_err(|err| store_error("Failed to insert review image", err))?;
        images.push(image);
    }

    Ok(images)
}

pub async fn insert(
    pool: &PgPool,
    review: &Review,
    image_urls: &[String],
) -> Result<(Review, Vec<ReviewImage>), StoreError> {
    let query_span = tracing::info_span!("Saving new review into the database");
    async move {
        let mut tx = pool
            .begin()
            .await
            .map_err(|err| store_error("Failed to start transaction", err))?;

        let saved = sqlx::query_as::<_, Review>(&format!(
            r#"
            INSERT INTO review (user_id, product_id, title, rating, content, size_fit, cushion,
                stability, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9,
                NOW(), NOW())
            RETURNING {REVIEW_COLUMNS}
            "#
        ))
        .bind(review.user_id)
        .bind(review.product_id)
        .bind(&review.title)
        .bind(review.rating)
        .bind(&review.content)
        .bind(review.size_fit.as_str())
        .bind(review.cushion.as_str())
        .bind(review.stability.as_str())
        .bind(review.status.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| store_error("Failed to insert review", err))?;

        let images = insert_images(&mut tx, saved.id, image_urls, 1).await?;

        tx.commit()
            .await
            .map_err(|err| store_error("Failed to commit transaction", err))?;

        tracing::info!("New review {} has been saved to database", saved.id);
        Ok((saved, images))
    }
    .instrument(query_span)
    .await
}

pub async fn update(
    pool: &PgPool,
    review: &Review,
    changes: &ImageChanges,
) -> Result<UpdatedReview, StoreError> {
    let query_span = tracing::info_span!("Updating review", review_id = review.id);
    async move {
        let mut tx = pool
            .begin()
            .await
            .map_err(|err| store_error("Failed to start transaction", err))?;

        let saved = sqlx::query_as::<_, Review>(&format!(
            r#"
            UPDATE review
            SET title = $2, rating = $3, content = $4, size_fit = $5, cushion = $6,
                stability = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {REVIEW_COLUMNS}
            "#
        ))
        .bind(review.id)
        .bind(&review.title)
        .bind(review.rating)
        .bind(&review.content)
        .bind(review.size_fit.as_str())
        .bind(review.cushion.as_str())
        .bind(review.stability.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|err| store_error("Failed to update review", err))?
        .ok_or(StoreError::NotFound)?;

        let deleted_image_ids: Vec<i64> = if changes.delete_ids.is_empty() {
            vec![]
        } else {
            sqlx::query_scalar::<_, i64>(
                "DELETE FROM review_image WHERE review_id = $1 AND id = ANY($2) RETURNING id",
            )
            .bind(saved.id)
            .bind(&changes.delete_ids)
            .fetch_all(&mut *tx)
            .await
            .map_err(|err| store_error("Failed to delete review images", err))?
        };

        let max_order = sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(MAX(image_order), 0) FROM review_image WHERE review_id = $1",
        )
        .bind(saved.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| store_error("Failed to read image order", err))?;

        let new_images = insert_images(&mut tx, saved.id, &changes.new_urls, max_order + 1).await?;

        let images = sqlx::query_as::<_, ReviewImage>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM review_image WHERE review_id = $1 ORDER BY image_order, id"
        ))
        .bind(saved.id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|err| store_error("Failed to fetch review images", err))?;

        tx.commit()
            .await
            .map_err(|err| store_error("Failed to commit transaction", err))?;

        Ok(UpdatedReview {
            review: saved,
            images,
            new_images,
            deleted_image_ids,
        })
    }
    .instrument(query_span)
    .await
}

pub async fn update_status(
    pool: &PgPool,
    id: i64,
    status: ReviewStatus,
) -> Result<Review, StoreError> {
    let query_span = tracing::info_span!("Changing review status", review_id = id, status = %status);
    sqlx::query_as::<_, Review>(&format!(
        "UPDATE review SET status = $2, updated_at = NOW() \
         WHERE id = $1 RETURNING {REVIEW_COLUMNS}"
    ))
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| store_error("Failed to change review status", err))?
    .ok_or(StoreError::NotFound)
}

pub async fn soft_delete(pool: &PgPool, id: i64) -> Result<Review, StoreError> {
    let query_span = tracing::info_span!("Soft deleting review", review_id = id);
    async move {
        let mut tx = pool
            .begin()
            .await
            .map_err(|err| store_error("Failed to start transaction", err))?;

        let review = sqlx::query_as::<_, Review>(&format!(
            "UPDATE review SET status = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(id)
        .bind(ReviewStatus::Deleted.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|err| store_error("Failed to delete review", err))?
        .ok_or(StoreError::NotFound)?;

        sqlx::query("DELETE FROM review_image WHERE review_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|err| store_error("Failed to delete review images", err))?;

        tx.commit()
            .await
            .map_err(|err| store_error("Failed to commit transaction", err))?;

        Ok(review)
    }
    .instrument(query_span)
    .await
}

pub async fn fetch(pool: &PgPool, id: i64) -> Result<Option<Review>, StoreError> {
    let query_span = tracing::info_span!("Fetch review by id", review_id = id);
    sqlx::query_as::<_, Review>(&format!("SELECT {REVIEW_COLUMNS} FROM review WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| store_error("Failed to fetch review", err))
}

pub async fn exists_active(
    pool: &PgPool,
    user_id: i64,
    product_id: i64,
) -> Result<bool, StoreError> {
    let query_span = tracing::info_span!("Search for existing review.");
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM review WHERE user_id = $1 AND product_id = $2 AND status = $3)",
    )
    .bind(user_id)
    .bind(product_id)
    .bind(ReviewStatus::Active.as_str())
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| store_error("Failed to check existing review", err))
}

pub async fn fetch_page(
    pool: &PgPool,
    filter: &ReviewFilter,
    page: PageRequest,
) -> Result<(Vec<Review>, i64), StoreError> {
    let query_span = tracing::info_span!("Fetch page of reviews", page = page.page, size = page.size);
    async move {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM review");
        push_filter(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(pool)
            .await
            .map_err(|err| store_error("Failed to count reviews", err))?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {REVIEW_COLUMNS} FROM review"));
        push_filter(&mut select, filter);
        select
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(page.size)
            .push(" OFFSET ")
            .push_bind(page.offset());
        let reviews = select
            .build_query_as::<Review>()
            .fetch_all(pool)
            .await
            .map_err(|err| store_error("Failed to fetch reviews", err))?;

        Ok((reviews, total))
    }
    .instrument(query_span)
    .await
}

pub async fn rating_aggregate(pool: &PgPool, product_id: i64) -> Result<RatingAggregate, StoreError> {
    let query_span = tracing::info_span!("Aggregate product ratings", product_id = product_id);
    sqlx::query_as::<_, RatingAggregate>(
        r#"
        SELECT COUNT(*) AS total,
            AVG(rating)::float8 AS average,
            COUNT(*) FILTER (WHERE rating = 1) AS one_star,
            COUNT(*) FILTER (WHERE rating = 2) AS two_star,
            COUNT(*) FILTER (WHERE rating = 3) AS three_star,
            COUNT(*) FILTER (WHERE rating = 4) AS four_star,
            COUNT(*) FILTER (WHERE rating = 5) AS five_star
        FROM review
        WHERE product_id = $1 AND status = $2
        "#,
    )
    .bind(product_id)
    .bind(ReviewStatus::Active.as_str())
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| store_error("Failed to aggregate ratings", err))
}

pub async fn distribution(
    pool: &PgPool,
    product_id: i64,
    characteristic: Characteristic,
) -> Result<Vec<(String, i64)>, StoreError> {
    let column = characteristic.column();
    let query_span =
        tracing::info_span!("Characteristic distribution", product_id = product_id, column = column);
    sqlx::query_as::<_, (String, i64)>(&format!(
        "SELECT {column}, COUNT(*) FROM review WHERE product_id = $1 AND status = $2 \
         GROUP BY {column} ORDER BY {column}"
    ))
    .bind(product_id)
    .bind(ReviewStatus::Active.as_str())
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| store_error("Failed to fetch characteristic distribution", err))
}

pub async fn average_rating(
    pool: &PgPool,
    filter: &CharacteristicFilter,
) -> Result<Option<f64>, StoreError> {
    let query_span = tracing::info_span!("Average rating by characteristic");
    let mut query = QueryBuilder::<Postgres>::new("SELECT AVG(rating)::float8 FROM review WHERE status = ");
    query.push_bind(ReviewStatus::Active.as_str());
    if let Some(size_fit) = filter.size_fit {
        query.push(" AND size_fit = ").push_bind(size_fit.as_str());
    }
    if let Some(cushion) = filter.cushion {
        query.push(" AND cushion = ").push_bind(cushion.as_str());
    }
    if let Some(stability) = filter.stability {
        query.push(" AND stability = ").push_bind(stability.as_str());
    }

    query
        .build_query_scalar::<Option<f64>>()
        .fetch_one(pool)
        .instrument(query_span)
        .await
        .map_err(|err| store_error("Failed to average ratings", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
        assert_eq!(like_pattern("mesh"), "%mesh%");
    }

    #[test]
    fn filter_sql_binds_every_criterion() {
        let filter = ReviewFilter {
            product_id: Some(1),
            min_rating: Some(2),
            keyword: Some("mesh".to_string()),
            ..Default::default()
        };
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM review");
        push_filter(&mut query, &filter);

        assert_eq!(
            query.sql(),
            "SELECT COUNT(*) FROM review WHERE status = $1 AND product_id = $2 \
             AND rating >= $3 AND (title ILIKE $4 OR content ILIKE $5)"
        );
    }
}
