use chat_service::config::{ChatConfig, GoogleConfig, ModelConfig, RelayConfig};
use chat_service::session::ChatFailurePolicy;
use chat_service::startup::Application;
use service_core::config::Config as CoreConfig;
use service_core::genai::mock::MockTextProvider;
use std::sync::Arc;
use std::time::Duration;

pub struct TestApp {
    pub address: String,
    pub provider: Arc<MockTextProvider>,
    pub client: reqwest::Client,
}

pub fn test_config(relay_base_url: &str) -> ChatConfig {
    ChatConfig {
        common: CoreConfig { port: 0 },
        google: GoogleConfig {
            api_key: "test-key".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
        },
        models: ModelConfig {
            analysis_model: "gemini-2.5-flash".to_string(),
            chat_model: "gemini-2.5-pro".to_string(),
        },
        relay: RelayConfig {
            base_url: relay_base_url.to_string(),
            timeout: Duration::from_secs(5),
        },
        request_timeout: Duration::from_secs(5),
        failure_policy: ChatFailurePolicy::KeepQuestion,
    }
}

impl TestApp {
    pub async fn spawn(provider: MockTextProvider) -> Self {
        Self::spawn_with(test_config("http://127.0.0.1:9/raw"), provider).await
    }

    pub async fn spawn_with(config: ChatConfig, provider: MockTextProvider) -> Self {
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

    pub async fn get_session(&self) -> serde_json::Value {
        self.client
            .get(format!("{}/session", self.address))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse JSON")
    }
}

pub fn sample_text() -> String {
    "Ferris the crab is the unofficial mascot of the Rust programming language community.".to_string()
}
