use shoe_review::configuration::get_configuration;
use shoe_review::startup::run;
use shoe_review::telemetry::{get_subscriber, init_subscriber};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use std::io::{Error, ErrorKind};
use std::net::TcpListener;
use std::time::Duration;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("shoe-review".into(), "info".into());
    init_subscriber(subscriber).map_err(|err| Error::new(ErrorKind::Other, err.to_string()))?;

    let settings = get_configuration().map_err(|err| {
        Error::new(
            ErrorKind::InvalidInput,
            format!("Failed to read configuration: {}", err),
        )
    })?;

    tracing::info!(
        db_host = %settings.database.host,
        db_port = settings.database.port,
        db_name = %settings.database.database_name,
        "Connecting to PostgreSQL"
    );

    let connect_options = PgConnectOptions::new()
        .host(&settings.database.host)
        .port(settings.database.port)
        .username(&settings.database.username)
        .password(&settings.database.password)
        .database(&settings.database.database_name)
        .ssl_mode(PgSslMode::Disable);

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(connect_options)
        .await
        .map_err(|err| {
            tracing::error!("Failed to connect to database: {}", err);
            Error::new(ErrorKind::ConnectionRefused, err.to_string())
        })?;

    let address = format!("{}:{}", settings.app_host, settings.app_port);
    tracing::info!("Start server at {:?}", &address);
    let listener = TcpListener::bind(&address)?;

    run(listener, pg_pool, settings).await?.await
}
