use super::authenticated;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::ReviewService;
use actix_web::{get, patch, web, Responder, Result};
use std::sync::Arc;

#[tracing::instrument(name = "Admin get review.", skip(service))]
#[get("/{id}")]
pub async fn admin_get_handler(
    path: web::Path<(i64,)>,
    user: Option<web::ReqData<Arc<models::User>>>,
    service: web::Data<ReviewService>,
) -> Result<impl Responder> {
    let user = authenticated(user)?;
    let review = service.admin_get(&user, path.0).await?;
    Ok(JsonResponse::build().set_item(review).ok("OK"))
}

#[tracing::instrument(name = "Admin hide review.", skip(service))]
#[patch("/{id}/hide")]
pub async fn admin_hide_handler(
    path: web::Path<(i64,)>,
    user: Option<web::ReqData<Arc<models::User>>>,
    service: web::Data<ReviewService>,
) -> Result<impl Responder> {
    let user = authenticated(user)?;
    let change = service.hide(&user, path.0).await?;
    Ok(JsonResponse::build().set_item(change).ok("Review hidden"))
}

#[tracing::instrument(name = "Admin restore review.", skip(service))]
#[patch("/{id}/restore")]
pub async fn admin_restore_handler(
    path: web::Path<(i64,)>,
    user: Option<web::ReqData<Arc<models::User>>>,
    service: web::Data<ReviewService>,
) -> Result<impl Responder> {
    let user = authenticated(user)?;
    let change = service.restore(&user, path.0).await?;
    Ok(JsonResponse::build().set_item(change).ok("Review restored"))
}
