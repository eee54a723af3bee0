use crate::forms;
use crate::helpers::JsonResponse;
use crate::services::ReviewService;
use actix_web::{get, web, Responder, Result};

#[tracing::instrument(name = "List product reviews.", skip(service))]
#[get("")]
pub async fn product_list_handler(
    path: web::Path<(i64,)>,
    query: web::Query<forms::review::ListQuery>,
    service: web::Data<ReviewService>,
) -> Result<impl Responder> {
    let product_id = path.0;
    let page = service
        .list_by_product(
            product_id,
            query.filter(product_id),
            query.page_request(),
            query.summary,
        )
        .await?;

    Ok(JsonResponse::build().set_item(page).ok("OK"))
}

#[tracing::instrument(name = "List user reviews.", skip(service))]
#[get("")]
pub async fn user_list_handler(
    path: web::Path<(i64,)>,
    query: web::Query<forms::review::PageQuery>,
    service: web::Data<ReviewService>,
) -> Result<impl Responder> {
    let page = service.list_by_user(path.0, query.page_request()).await?;
    Ok(JsonResponse::build().set_item(page).ok("OK"))
}

#[tracing::instrument(name = "Search reviews.", skip(service))]
#[get("/search")]
pub async fn search_handler(
    query: web::Query<forms::review::SearchQuery>,
    service: web::Data<ReviewService>,
) -> Result<impl Responder> {
    let page = service.search(query.filter(), query.page_request()).await?;
    Ok(JsonResponse::build().set_item(page).ok("OK"))
}
