#![allow(dead_code)]

use serde_json::Value;
use shoe_review::configuration::{AuthSettings, DatabaseSettings, Settings};
use shoe_review::connectors::{
    ConnectorConfig, ConnectorError, PurchaseServiceConnector, PurchasedItem, PurchasedItems,
};
use shoe_review::middleware::authentication::jwt::{self, JwtClaims};
use shoe_review::repository::InMemoryStore;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::sync::Arc;

pub const JWT_SECRET: &str = "integration-test-secret";
/// The stub purchase history holds every product except this one.
pub const NOT_PURCHASED_PRODUCT: i64 = 999;

pub struct StubPurchases;

#[async_trait::async_trait]
impl PurchaseServiceConnector for StubPurchases {
    async fn purchased_items(&self, _user_id: i64) -> Result<PurchasedItems, ConnectorError> {
        Ok(PurchasedItems {
            items: (1..=20)
                .map(|product_id| PurchasedItem {
                    product_id,
                    order_id: None,
                    product_name: None,
                })
                .collect(),
        })
    }

    async fn has_purchased(&self, _user_id: i64, product_id: i64) -> Result<bool, ConnectorError> {
        Ok(product_id != NOT_PURCHASED_PRODUCT)
    }
}

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
    pub client: reqwest::Client,
}

pub fn settings() -> Settings {
    Settings {
        database: DatabaseSettings {
            username: "postgres".to_string(),
            password: "postgres".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            database_name: "unused".to_string(),
        },
        app_port: 0,
        app_host: "127.0.0.1".to_string(),
        auth: AuthSettings {
            jwt_secret: JWT_SECRET.to_string(),
        },
        connectors: ConnectorConfig::default(),
    }
}

/// Runs the server on a random port, backed by the in-memory store.
pub async fn spawn_app() -> TestApp {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let store = Arc::new(InMemoryStore::new());
    let server = shoe_review::startup::serve(
        listener,
        store.clone(),
        store.clone(),
        Arc::new(StubPurchases),
        settings(),
    )
    .expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
        client: reqwest::Client::new(),
    }
}

pub fn token(user_id: i64, role: &str) -> String {
    let claims = JwtClaims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::minutes(30)).timestamp(),
    };
    jwt::sign(&claims, JWT_SECRET.as_bytes()).expect("Failed to sign token")
}

pub fn user_token(user_id: i64) -> String {
    token(user_id, "user")
}

pub fn admin_token() -> String {
    token(1, "admin")
}

pub fn review_body(product_id: i64, rating: i32) -> Value {
    serde_json::json!({
        "product_id": product_id,
        "title": "Comfortable runner",
        "rating": rating,
        "content": "Great for long distances.",
        "size_fit": "PERFECT",
        "cushion": "SOFT",
        "stability": "STABLE",
    })
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Creates a review as `user_id` and returns the `data` of the envelope.
    pub async fn create_review(&self, user_id: i64, body: &Value) -> Value {
        let response = self
            .client
            .post(self.url("/api/reviews"))
            .bearer_auth(user_token(user_id))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(201, response.status().as_u16());

        let json: Value = response.json().await.expect("Response should be JSON");
        json["data"].clone()
    }

    pub async fn get_json(&self, path: &str) -> (u16, Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request.");
        let status = response.status().as_u16();
        (status, response.json().await.expect("Response should be JSON"))
    }
}

/// Throwaway database for the PostgreSQL tests, `None` when the server is unreachable.
pub async fn configure_database(config: &DatabaseSettings) -> Option<PgPool> {
    let mut connection = match PgConnection::connect(&config.connection_string_without_db()).await {
        Ok(connection) => connection,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await
        .expect("Failed to create database");

    let connection_pool = PgPool::connect(&config.connection_string())
        .await
        .expect("Failed to connect to database pool");

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate database");

    Some(connection_pool)
}
