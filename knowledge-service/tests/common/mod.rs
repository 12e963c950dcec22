use knowledge_service::config::{GoogleConfig, KnowledgeConfig, RelayConfig};
use knowledge_service::startup::Application;
use service_core::config::Config as CoreConfig;
use service_core::genai::mock::MockTextProvider;
use std::sync::Arc;
use std::time::Duration;

pub struct TestApp {
    pub address: String,
    pub provider: Arc<MockTextProvider>,
    pub client: reqwest::Client,
}

pub fn test_config(relay_base_url: &str) -> KnowledgeConfig {
    KnowledgeConfig {
        common: CoreConfig { port: 0 },
        google: GoogleConfig {
            api_key: "test-key".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
        },
        extraction_model: "gemini-2.5-flash".to_string(),
        relay: RelayConfig {
            base_url: relay_base_url.to_string(),
            timeout: Duration::from_secs(5),
        },
        request_timeout: Duration::from_secs(5),
        seed_projects: false,
    }
}

impl TestApp {
    pub async fn spawn(provider: MockTextProvider) -> Self {
        Self::spawn_with(test_config("http://127.0.0.1:9/raw"), provider).await
    }

    pub async fn spawn_with(config: KnowledgeConfig, provider: MockTextProvider) -> Self {
        let provider = Arc::new(provider);
        let app = Application::build_with_provider(config, provider.clone())
            .await
            .expect("Failed to build test application");

        let port = app.port();
        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::new();
        let address = format!("http://127.0.0.1:{}", port);
        for _ in 0..50 {
            if client.get(format!("{}/health", address)).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        TestApp {
            address,
            provider,
            client,
        }
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, serde_json::Value) {
        let response = self
            .client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request");
        let status = response.status();
        (status, response.json().await.expect("Failed to parse JSON"))
    }

    /// Create a project and return its id.
    pub async fn create_project(&self, name: &str) -> String {
        let body: serde_json::Value = self
            .post_json("/projects", serde_json::json!({ "name": name }))
            .await
            .json()
            .await
            .expect("Failed to parse JSON");
        body["id"].as_str().expect("Missing project id").to_string()
    }
}

pub fn artifacts_json(term: &str) -> serde_json::Value {
    serde_json::json!({
        "decisions": [{"decision": format!("Adopt {}", term), "date": "2024-10-01", "context": "Design review"}],
        "actionItems": [{"task": "Write migration guide", "assignee": "", "dueDate": ""}],
        "timelineEvents": [{"date": "2024-10-01", "event": "Design review", "type": "meeting"}],
        "people": [{"name": "Sam", "expertise": ["APIs"], "mentionedIn": 3}],
        "glossary": [{"term": term, "definition": "A term from the notes"}],
        "qaPairs": [{"question": "What changed?", "answer": "The API."}],
        "references": [{"url": "https://example.com/spec", "description": "API reference"}]
    })
}

pub fn notes() -> String {
    "Design review notes: the team agreed to version the public API and publish a migration guide."
        .to_string()
}
