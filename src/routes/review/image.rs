use super::authenticated;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::ReviewImageService;
use actix_web::{delete, get, web, Responder, Result};
use std::sync::Arc;

#[tracing::instrument(name = "List review images.", skip(service))]
#[get("/{id}/images")]
pub async fn list_images_handler(
    path: web::Path<(i64,)>,
    service: web::Data<ReviewImageService>,
) -> Result<impl Responder> {
    let images = service.list(path.0).await?;
    Ok(JsonResponse::build().set_item(images).ok("OK"))
}

#[tracing::instrument(name = "Delete review image.", skip(service))]
#[delete("/{id}/images/{image_id}")]
pub async fn delete_image_handler(
    path: web::Path<(i64, i64)>,
    user: Option<web::ReqData<Arc<models::User>>>,
    service: web::Data<ReviewImageService>,
) -> Result<impl Responder> {
    let user = authenticated(user)?;
    let (review_id, image_id) = path.into_inner();
    service.delete(&user, review_id, image_id).await?;
    Ok(JsonResponse::<()>::build().ok("Image deleted"))
}
