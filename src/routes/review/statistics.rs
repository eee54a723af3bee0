use crate::helpers::JsonResponse;
use crate::models::CharacteristicFilter;
use crate::services::StatisticsService;
use actix_web::{get, web, Responder, Result};

#[tracing::instrument(name = "Product review summary.", skip(service))]
#[get("/summary")]
pub async fn summary_handler(
    path: web::Path<(i64,)>,
    service: web::Data<StatisticsService>,
) -> Result<impl Responder> {
    let summary = service.product_summary(path.0).await?;
    Ok(JsonResponse::build().set_item(summary).ok("OK"))
}

#[tracing::instrument(name = "Product review statistics.", skip(service))]
#[get("/statistics")]
pub async fn statistics_handler(
    path: web::Path<(i64,)>,
    service: web::Data<StatisticsService>,
) -> Result<impl Responder> {
    let statistics = service.product_statistics(path.0).await?;
    Ok(JsonResponse::build().set_item(statistics).ok("OK"))
}

#[tracing::instrument(name = "Product average rating.", skip(service))]
#[get("/rating")]
pub async fn rating_handler(
    path: web::Path<(i64,)>,
    service: web::Data<StatisticsService>,
) -> Result<impl Responder> {
    let rating = service.rating(path.0).await?;
    Ok(JsonResponse::build().set_item(rating).ok("OK"))
}

#[tracing::instrument(name = "Average rating by characteristic.", skip(service))]
#[get("/ratings")]
pub async fn characteristic_rating_handler(
    query: web::Query<CharacteristicFilter>,
    service: web::Data<StatisticsService>,
) -> Result<impl Responder> {
    let rating = service
        .average_rating_by_characteristic(query.into_inner())
        .await?;
    Ok(JsonResponse::build().set_item(rating).ok("OK"))
}
