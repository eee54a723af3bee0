mod common;

use shoe_review::configuration::get_configuration;
use shoe_review::models::{
    Characteristic, CharacteristicFilter, Cushion, ImageChanges, PageRequest, Review,
    ReviewFilter, ReviewStatus, SizeFit, Stability,
};
use shoe_review::repository::{
    PgReviewImageRepository, PgReviewRepository, ReviewImageRepository, ReviewRepository,
    StoreError,
};

struct Stores {
    reviews: PgReviewRepository,
    images: PgReviewImageRepository,
}

async fn stores() -> Option<Stores> {
    let mut configuration = match get_configuration() {
        Ok(configuration) => configuration,
        Err(err) => {
            eprintln!("Skipping tests: no configuration: {}", err);
            return None;
        }
    };
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();
    let pool = common::configure_database(&configuration.database).await?;

    Some(Stores {
        reviews: PgReviewRepository::new(pool.clone()),
        images: PgReviewImageRepository::new(pool),
    })
}

fn review(user_id: i64, product_id: i64, rating: i32, size_fit: SizeFit) -> Review {
    Review::new(
        user_id,
        product_id,
        Some("Daily trainer".to_string()),
        rating,
        Some("Holds up after 300 km".to_string()),
        size_fit,
        Cushion::Normal,
        Stability::Stable,
    )
    .unwrap()
}

#[tokio::test]
async fn insert_orders_images_and_rejects_duplicates() {
    let Some(stores) = stores().await else {
        return;
    };
    let urls = vec!["/1.jpg".to_string(), "https://cdn.example.com/2.jpg".to_string()];

    let (saved, images) = stores
        .reviews
        .insert(review(1, 10, 5, SizeFit::Perfect), &urls)
        .await
        .unwrap();
    assert!(saved.id > 0);
    assert_eq!(
        images.iter().map(|image| image.image_order).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert_eq!(stores.images.count_by_review(saved.id).await.unwrap(), 2);
    assert!(stores.reviews.exists_active(1, 10).await.unwrap());

    let duplicate = stores
        .reviews
        .insert(review(1, 10, 3, SizeFit::Big), &[])
        .await;
    assert_eq!(duplicate.unwrap_err(), StoreError::Duplicate);
}

#[tokio::test]
async fn update_appends_after_last_image() {
    let Some(stores) = stores().await else {
        return;
    };
    let urls = vec!["/1.jpg".to_string(), "/2.jpg".to_string()];
    let (mut saved, images) = stores
        .reviews
        .insert(review(1, 10, 5, SizeFit::Perfect), &urls)
        .await
        .unwrap();

    saved.update_rating(2).unwrap();
    let changes = ImageChanges {
        delete_ids: vec![images[0].id],
        new_urls: vec!["/3.jpg".to_string()],
    };
    let updated = stores.reviews.update(&saved, &changes).await.unwrap();

    assert_eq!(updated.review.rating, 2);
    assert_eq!(updated.deleted_image_ids, vec![images[0].id]);
    assert_eq!(updated.new_images[0].image_order, 3);
    assert_eq!(
        updated
            .images
            .iter()
            .map(|image| image.image_url.as_str())
            .collect::<Vec<_>>(),
        vec!["/2.jpg", "/3.jpg"]
    );
}

#[tokio::test]
async fn soft_delete_keeps_row_and_drops_images() {
    let Some(stores) = stores().await else {
        return;
    };
    let (saved, _) = stores
        .reviews
        .insert(review(1, 10, 5, SizeFit::Perfect), &["/1.jpg".to_string()])
        .await
        .unwrap();

    let deleted = stores.reviews.soft_delete(saved.id).await.unwrap();
    assert_eq!(deleted.status, ReviewStatus::Deleted);
    assert_eq!(
        ReviewRepository::fetch(&stores.reviews, saved.id)
            .await
            .unwrap()
            .unwrap()
            .status,
        ReviewStatus::Deleted
    );
    assert!(stores.images.fetch_by_review(saved.id).await.unwrap().is_empty());
    assert!(!stores.reviews.exists_active(1, 10).await.unwrap());

    // the partial index only covers active rows
    stores
        .reviews
        .insert(review(1, 10, 4, SizeFit::Big), &[])
        .await
        .unwrap();
    assert_eq!(
        stores.reviews.soft_delete(9999).await.unwrap_err(),
        StoreError::NotFound
    );
}

#[tokio::test]
async fn restoring_over_an_active_review_is_a_duplicate() {
    let Some(stores) = stores().await else {
        return;
    };
    let (first, _) = stores
        .reviews
        .insert(review(1, 10, 5, SizeFit::Perfect), &[])
        .await
        .unwrap();
    stores
        .reviews
        .update_status(first.id, ReviewStatus::Hidden)
        .await
        .unwrap();
    stores
        .reviews
        .insert(review(1, 10, 3, SizeFit::Small), &[])
        .await
        .unwrap();

    let restored = stores
        .reviews
        .update_status(first.id, ReviewStatus::Active)
        .await;
    assert_eq!(restored.unwrap_err(), StoreError::Duplicate);
}

#[tokio::test]
async fn filters_pages_and_aggregates() {
    let Some(stores) = stores().await else {
        return;
    };
    for (user_id, rating, fit) in [
        (1, 5, SizeFit::Perfect),
        (2, 4, SizeFit::Perfect),
        (3, 2, SizeFit::Small),
    ] {
        stores
            .reviews
            .insert(review(user_id, 10, rating, fit), &[])
            .await
            .unwrap();
    }
    let mut other = review(4, 11, 1, SizeFit::Perfect);
    other.update_title("100% narrow_fit".to_string()).unwrap();
    stores.reviews.insert(other, &[]).await.unwrap();

    let filter = ReviewFilter {
        min_rating: Some(4),
        ..ReviewFilter::by_product(10)
    };
    let (page, total) = stores
        .reviews
        .fetch_page(&filter, PageRequest::new(Some(0), Some(1)))
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].user_id, 2);

    let keyword = ReviewFilter {
        keyword: Some("100%".to_string()),
        ..ReviewFilter::by_product(11)
    };
    let (_, total) = stores
        .reviews
        .fetch_page(&keyword, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(total, 1);

    let aggregate = stores.reviews.rating_aggregate(10).await.unwrap();
    assert_eq!(aggregate.total, 3);
    assert_eq!(aggregate.count_for(4), 1);
    assert!((aggregate.average.unwrap() - 11.0 / 3.0).abs() < 1e-9);

    let distribution = stores
        .reviews
        .distribution(10, Characteristic::SizeFit)
        .await
        .unwrap();
    assert!(distribution.contains(&("PERFECT".to_string(), 2)));

    let perfect = CharacteristicFilter {
        size_fit: Some(SizeFit::Perfect),
        ..Default::default()
    };
    let average = stores.reviews.average_rating(&perfect).await.unwrap();
    assert!((average.unwrap() - 10.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn image_repository_operations() {
    let Some(stores) = stores().await else {
        return;
    };
    let (first, images) = stores
        .reviews
        .insert(review(1, 10, 5, SizeFit::Perfect), &["/a.jpg".to_string()])
        .await
        .unwrap();
    let (second, _) = stores
        .reviews
        .insert(review(2, 10, 4, SizeFit::Perfect), &["/b.jpg".to_string()])
        .await
        .unwrap();

    let both = stores
        .images
        .fetch_by_reviews(&[first.id, second.id])
        .await
        .unwrap();
    assert_eq!(both.len(), 2);
    assert!(stores.images.fetch_by_reviews(&[]).await.unwrap().is_empty());

    stores.images.delete(images[0].id).await.unwrap();
    assert!(ReviewImageRepository::fetch(&stores.images, images[0].id)
        .await
        .unwrap()
        .is_none());
    assert_eq!(
        stores.images.delete(images[0].id).await.unwrap_err(),
        StoreError::NotFound
    );
}
