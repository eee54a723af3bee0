mod common;

use common::review_body;
use serde_json::json;

async fn seed(app: &common::TestApp) {
    let reviews = [
        (1, 5, "PERFECT", "SOFT"),
        (2, 4, "PERFECT", "NORMAL"),
        (3, 4, "SMALL", "SOFT"),
        (4, 2, "BIG", "FIRM"),
    ];
    for (user_id, rating, size_fit, cushion) in reviews {
        let mut body = review_body(10, rating);
        body["size_fit"] = json!(size_fit);
        body["cushion"] = json!(cushion);
        app.create_review(user_id, &body).await;
    }
}

#[tokio::test]
async fn rating_matches_active_reviews() {
    let app = common::spawn_app().await;
    seed(&app).await;

    let (status, json) = app.get_json("/api/products/10/reviews/rating").await;
    assert_eq!(status, 200);
    assert_eq!(json["data"]["average_rating"], 3.8);
    assert_eq!(json["data"]["review_count"], 4);
}

#[tokio::test]
async fn statistics_are_zero_filled() {
    let app = common::spawn_app().await;
    seed(&app).await;

    let (_, json) = app.get_json("/api/products/10/reviews/statistics").await;
    let data = &json["data"];
    assert_eq!(data["total_reviews"], 4);
    assert_eq!(data["rating_distribution"]["4"], 2);
    assert_eq!(data["rating_distribution"]["1"], 0);
    assert_eq!(data["size_fit_distribution"]["PERFECT"], 2);
    assert_eq!(data["size_fit_distribution"]["VERY_BIG"], 0);
    assert_eq!(data["cushion_distribution"]["SOFT"], 2);
    assert_eq!(data["stability_distribution"]["STABLE"], 4);

    let (_, json) = app.get_json("/api/products/77/reviews/statistics").await;
    assert_eq!(json["data"]["average_rating"], 0.0);
    assert_eq!(json["data"]["size_fit_distribution"].as_object().unwrap().len(), 5);
}

#[tokio::test]
async fn summary_reports_common_fit_and_recent_reviews() {
    let app = common::spawn_app().await;
    seed(&app).await;

    let (status, json) = app.get_json("/api/products/10/reviews/summary").await;
    assert_eq!(status, 200);
    let data = &json["data"];
    assert_eq!(data["most_common_size_fit"], "PERFECT");
    assert_eq!(data["rating_distribution"]["four_star"], 2);
    assert_eq!(data["recent_reviews"].as_array().unwrap().len(), 3);
    assert_eq!(data["recent_reviews"][0]["user_id"], 4);

    let (_, json) = app.get_json("/api/products/77/reviews/summary").await;
    assert!(json["data"]["most_common_size_fit"].is_null());
}

#[tokio::test]
async fn average_rating_by_characteristic() {
    let app = common::spawn_app().await;
    seed(&app).await;

    let (status, json) = app.get_json("/api/reviews/ratings?cushion=SOFT").await;
    assert_eq!(status, 200);
    assert_eq!(json["data"]["cushion"], "SOFT");
    assert_eq!(json["data"]["average_rating"], 4.5);

    let (status, _) = app.get_json("/api/reviews/ratings?cushion=SQUISHY").await;
    assert_eq!(status, 400);
}
