use super::authenticated;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::ReviewService;
use actix_web::{delete, web, Responder, Result};
use std::sync::Arc;

#[tracing::instrument(name = "Delete review.", skip(service))]
#[delete("/{id}")]
pub async fn delete_handler(
    path: web::Path<(i64,)>,
    user: Option<web::ReqData<Arc<models::User>>>,
    service: web::Data<ReviewService>,
) -> Result<impl Responder> {
    let user = authenticated(user)?;
    service.delete(&user, path.0).await?;
    Ok(JsonResponse::<()>::build().ok("Review deleted"))
}
