mod common;

use common::{artifacts_json, notes, test_config, TestApp};
use reqwest::{multipart, StatusCode};
use serde_json::json;
use service_core::genai::mock::MockTextProvider;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn text_document_is_processed_into_artifacts() {
    let app = TestApp::spawn(MockTextProvider::new(true).with_json(artifacts_json("API"))).await;
    let project = app.create_project("API v3 Design").await;

    let response = app
        .post_json(
            &format!("/projects/{}/documents/text", project),
            json!({ "name": "review.md", "text": notes() }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let document: serde_json::Value = response.json().await.unwrap();
    assert_eq!(document["name"], "review.md");
    assert_eq!(document["kind"], "text");
    assert_eq!(document["processed"], true);
    assert_eq!(document["artifacts"]["actionItems"][0]["assignee"], "Unassigned");
    assert_eq!(document["artifacts"]["actionItems"][0]["dueDate"], "N/A");

    let requests = app.provider.requests();
    assert_eq!(requests[0].params.model.as_deref(), Some("gemini-2.5-flash"));
}

#[tokio::test]
async fn documents_are_listed_newest_first_and_artifacts_combined_in_order() {
    let provider = MockTextProvider::new(true)
        .with_json(artifacts_json("first"))
        .with_json(artifacts_json("second"));
    let app = TestApp::spawn(provider).await;
    let project = app.create_project("Launch").await;

    for name in ["one.md", "two.md"] {
        app.post_json(
            &format!("/projects/{}/documents/text", project),
            json!({ "name": name, "text": notes() }),
        )
        .await;
    }

    let (_, view) = app.get_json(&format!("/projects/{}", project)).await;
    let names: Vec<&str> = view["documents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["two.md", "one.md"]);

    let (_, combined) = app.get_json(&format!("/projects/{}/artifacts", project)).await;
    assert_eq!(combined["processed_documents"], 2);
    assert_eq!(
        combined["artifacts"]["glossary"],
        json!([
            {"term": "first", "definition": "A term from the notes"},
            {"term": "second", "definition": "A term from the notes"}
        ])
    );

    let (status, tab) = app
        .get_json(&format!("/projects/{}/artifacts/action-items", project))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tab["label"], "Action Items");
    assert_eq!(tab["count"], 2);

    let (_, timeline) = app
        .get_json(&format!("/projects/{}/artifacts/timeline", project))
        .await;
    let kinds: Vec<&str> = timeline["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["meeting", "upload", "meeting", "upload"]);
}

#[tokio::test]
async fn unknown_tab_is_not_found() {
    let app = TestApp::spawn(MockTextProvider::new(true)).await;
    let project = app.create_project("Launch").await;

    let (status, _) = app
        .get_json(&format!("/projects/{}/artifacts/people", project))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn failed_processing_removes_the_document() {
    let app = TestApp::spawn(MockTextProvider::new(true).with_text("not json at all")).await;
    let project = app.create_project("Launch").await;

    let response = app
        .post_json(
            &format!("/projects/{}/documents/text", project),
            json!({ "text": notes() }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "An error occurred while processing the document. Please try again."
    );

    let (_, view) = app.get_json(&format!("/projects/{}", project)).await;
    assert_eq!(view["documents"], json!([]));
    let (_, combined) = app.get_json(&format!("/projects/{}/artifacts", project)).await;
    assert_eq!(combined["processed_documents"], 0);
}

#[tokio::test]
async fn image_upload_becomes_image_document() {
    let app = TestApp::spawn(MockTextProvider::new(true).with_json(artifacts_json("diagram"))).await;
    let project = app.create_project("Launch").await;

    let form = multipart::Form::new().part(
        "file",
        multipart::Part::bytes(vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A])
            .file_name("architecture.png")
            .mime_str("image/png")
            .unwrap(),
    );
    let response = app
        .client
        .post(format!("{}/projects/{}/documents/upload", app.address, project))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let document: serde_json::Value = response.json().await.unwrap();
    assert_eq!(document["kind"], "image");
    assert_eq!(document["name"], "architecture.png");
}

#[tokio::test]
async fn text_upload_larger_than_two_megabytes_is_accepted() {
    let app = TestApp::spawn(MockTextProvider::new(true).with_json(artifacts_json("bulk"))).await;
    let project = app.create_project("Launch").await;

    let contents = vec![b'a'; 3 * 1024 * 1024];
    let form = multipart::Form::new().part(
        "file",
        multipart::Part::bytes(contents)
            .file_name("minutes.txt")
            .mime_str("text/plain")
            .unwrap(),
    );
    let response = app
        .client
        .post(format!("{}/projects/{}/documents/upload", app.address, project))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let document: serde_json::Value = response.json().await.unwrap();
    assert_eq!(document["kind"], "text");
    assert_eq!(document["processed"], true);
}

#[tokio::test]
async fn text_upload_below_minimum_is_rejected() {
    let app = TestApp::spawn(MockTextProvider::new(true)).await;
    let project = app.create_project("Launch").await;

    let form = multipart::Form::new().part(
        "file",
        multipart::Part::bytes(b"tiny".to_vec())
            .file_name("tiny.txt")
            .mime_str("text/plain")
            .unwrap(),
    );
    let response = app
        .client
        .post(format!("{}/projects/{}/documents/upload", app.address, project))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn url_document_is_fetched_through_the_relay() {
    let relay = MockServer::start().await;
    let page = format!(
        "<html><body><header>Docs</header><main>{}</main></body></html>",
        "Version three of the API introduces cursor pagination. ".repeat(3)
    );
    Mock::given(method("GET"))
        .and(query_param("url", "https://docs.example.com/api/v3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&relay)
        .await;

    let app = TestApp::spawn_with(
        test_config(&format!("{}/raw", relay.uri())),
        MockTextProvider::new(true).with_json(artifacts_json("cursor")),
    )
    .await;
    let project = app.create_project("API").await;

    let response = app
        .post_json(
            &format!("/projects/{}/documents/url", project),
            json!({ "url": "https://docs.example.com/api/v3" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let document: serde_json::Value = response.json().await.unwrap();
    assert_eq!(document["kind"], "url");
    assert_eq!(document["description"], "docs.example.com");
}
