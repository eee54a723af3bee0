use super::authenticated;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::ReviewService;
use crate::views;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use std::sync::Arc;

#[tracing::instrument(name = "Add review.", skip(service))]
#[post("")]
pub async fn add_handler(
    user: Option<web::ReqData<Arc<models::User>>>,
    form: web::Json<forms::review::Add>,
    service: web::Data<ReviewService>,
) -> Result<impl Responder> {
    let user = authenticated(user)?;
    create(&user, user.id, form, &service).await
}

#[tracing::instrument(name = "Add review on behalf of a user.", skip(service))]
#[post("")]
pub async fn user_add_handler(
    path: web::Path<(i64,)>,
    user: Option<web::ReqData<Arc<models::User>>>,
    form: web::Json<forms::review::Add>,
    service: web::Data<ReviewService>,
) -> Result<impl Responder> {
    let user = authenticated(user)?;
    create(&user, path.0, form, &service).await
}

async fn create(
    actor: &models::User,
    user_id: i64,
    form: web::Json<forms::review::Add>,
    service: &ReviewService,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<views::review::Detail>::build().form_error(errors.to_string()));
    }

    let review = service.create(actor, user_id, form.into_inner()).await?;
    Ok(JsonResponse::build().set_item(review).created("Review created"))
}
