mod common;

#[tokio::test]
async fn health_check_works() {
    let app = common::spawn_app().await;

    let response = app
        .client
        .get(app.url("/health_check"))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn invalid_token_is_rejected() {
    let app = common::spawn_app().await;

    let response = app
        .client
        .get(app.url("/health_check"))
        .bearer_auth("not.a.token")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(401, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid or expired token");
}
