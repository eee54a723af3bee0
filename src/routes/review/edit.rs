use super::authenticated;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::ReviewService;
use crate::views;
use actix_web::{patch, put, web, Responder, Result};
use serde_valid::Validate;
use std::sync::Arc;

#[tracing::instrument(name = "Edit review.", skip(service))]
#[put("/{id}")]
pub async fn edit_handler(
    path: web::Path<(i64,)>,
    user: Option<web::ReqData<Arc<models::User>>>,
    form: web::Json<forms::review::UserEdit>,
    service: web::Data<ReviewService>,
) -> Result<impl Responder> {
    let user = authenticated(user)?;
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<views::review::Updated>::build().form_error(errors.to_string()));
    }

    let review = service.update(&user, path.0, form.into_inner()).await?;
    Ok(JsonResponse::build().set_item(review).ok("Review updated"))
}

#[tracing::instrument(name = "Deactivate review.", skip(service))]
#[patch("/{id}/deactivate")]
pub async fn deactivate_handler(
    path: web::Path<(i64,)>,
    user: Option<web::ReqData<Arc<models::User>>>,
    service: web::Data<ReviewService>,
) -> Result<impl Responder> {
    let user = authenticated(user)?;
    let change = service.deactivate(&user, path.0).await?;
    Ok(JsonResponse::build().set_item(change).ok("Review deactivated"))
}
