mod common;

use common::{test_config, TestApp};
use service_core::genai::mock::MockTextProvider;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn(MockTextProvider::new(true)).await;

    let (status, body) = app.get_json("/health").await;

    assert!(status.is_success());
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "knowledge-service");
}

#[tokio::test]
async fn seeded_workspace_lists_sample_projects() {
    let mut config = test_config("http://127.0.0.1:9/raw");
    config.seed_projects = true;
    let app = TestApp::spawn_with(config, MockTextProvider::new(true)).await;

    let (_, body) = app.get_json("/projects").await;

    let names: Vec<&str> = body["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Q4 Launch Project", "API v3 Design"]);
    assert_eq!(body["active_project_id"], body["projects"][0]["id"]);
}
