use crate::helpers::JsonResponse;
use crate::services::ReviewService;
use actix_web::{get, web, Responder, Result};

#[tracing::instrument(name = "Get review.", skip(service))]
#[get("/{id}")]
pub async fn get_handler(
    path: web::Path<(i64,)>,
    service: web::Data<ReviewService>,
) -> Result<impl Responder> {
    let review = service.get(path.0).await?;
    Ok(JsonResponse::build().set_item(review).ok("OK"))
}
