use crate::configuration::Settings;
use crate::connectors::{self, PurchaseServiceConnector};
use crate::helpers::JsonResponse;
use crate::middleware;
use crate::repository::{
    PgReviewImageRepository, PgReviewRepository, ReviewImageRepository, ReviewRepository,
};
use crate::routes;
use crate::services::{ReviewImageService, ReviewService, StatisticsService};
use actix_cors::Cors;
use actix_web::{dev::Server, error, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let reviews: Arc<dyn ReviewRepository> = Arc::new(PgReviewRepository::new(pg_pool.clone()));
    let images: Arc<dyn ReviewImageRepository> = Arc::new(PgReviewImageRepository::new(pg_pool));
    let purchases = connectors::init_purchase_service(&settings.connectors).map_err(|err| {
        tracing::error!("Failed to initialize purchase service connector: {}", err);
        std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
    })?;

    serve(listener, reviews, images, purchases, settings)
}

/// Starts the HTTP server on top of already built repositories.
pub fn serve(
    listener: TcpListener,
    reviews: Arc<dyn ReviewRepository>,
    images: Arc<dyn ReviewImageRepository>,
    purchases: Arc<dyn PurchaseServiceConnector>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let settings = web::Data::new(settings);
    let review_service = web::Data::new(ReviewService::new(
        reviews.clone(),
        images.clone(),
        purchases,
    ));
    let statistics_service = web::Data::new(StatisticsService::new(reviews.clone(), images.clone()));
    let image_service = web::Data::new(ReviewImageService::new(reviews, images));

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg = match &err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "Invalid JSON body (line {}, column {}): {}",
                err.line(),
                err.column(),
                err
            ),
            _ => err.to_string(),
        };
        JsonResponse::<()>::build().bad_request(msg)
    });
    let path_config = web::PathConfig::default()
        .error_handler(|err, _req| JsonResponse::<()>::build().bad_request(err.to_string()));
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| JsonResponse::<()>::build().bad_request(err.to_string()));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::authentication::Manager::new())
            .wrap(Cors::permissive())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/reviews")
                            .service(routes::review::add_handler)
                            .service(routes::review::search_handler)
                            .service(routes::review::characteristic_rating_handler)
                            .service(routes::review::get_handler)
                            .service(routes::review::edit_handler)
                            .service(routes::review::delete_handler)
                            .service(routes::review::deactivate_handler)
                            .service(routes::review::list_images_handler)
                            .service(routes::review::delete_image_handler),
                    )
                    .service(
                        web::scope("/users/{user_id}/reviews")
                            .service(routes::review::user_add_handler)
                            .service(routes::review::user_list_handler),
                    )
                    .service(
                        web::scope("/products/{product_id}/reviews")
                            .service(routes::review::product_list_handler)
                            .service(routes::review::summary_handler)
                            .service(routes::review::statistics_handler)
                            .service(routes::review::rating_handler),
                    )
                    .service(
                        web::scope("/admin/reviews")
                            .service(routes::review::admin_get_handler)
                            .service(routes::review::admin_hide_handler)
                            .service(routes::review::admin_restore_handler),
                    ),
            )
            .app_data(json_config.clone())
            .app_data(path_config.clone())
            .app_data(query_config.clone())
            .app_data(review_service.clone())
            .app_data(statistics_service.clone())
            .app_data(image_service.clone())
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
