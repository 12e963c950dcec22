mod common;

use common::TestApp;
use service_core::genai::mock::MockTextProvider;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn(MockTextProvider::new(true)).await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "chat-service");
    assert_eq!(body["provider"], "ok");
}

#[tokio::test]
async fn fresh_session_is_idle() {
    let app = TestApp::spawn(MockTextProvider::new(true)).await;

    let session = app.get_session().await;
    assert_eq!(session["state"], "idle");
    assert_eq!(session["transcript"], serde_json::json!([]));
    assert!(session.get("source").is_none());
}
