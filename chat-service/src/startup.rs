use crate::config::ChatConfig;
use crate::handlers;
use crate::services::Analyst;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use service_core::acquisition::RelayFetcher;
use service_core::error::AppError;
use service_core::genai::gemini::{GeminiConfig, GeminiTextProvider};
use service_core::genai::TextProvider;
use service_core::middleware::request_id_middleware;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub analyst: Arc<Analyst>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Build against the Gemini API configured in `config`.
    pub async fn build(config: ChatConfig) -> Result<Self, AppError> {
        let mut gemini = GeminiConfig::new(&config.google.api_key, &config.models.analysis_model);
        gemini.api_base = config.google.api_base.clone();
        gemini.timeout = config.request_timeout;

        let provider = GeminiTextProvider::new(gemini).map_err(|e| {
            tracing::error!("Failed to initialize Gemini provider: {}", e);
            AppError::ConfigError(anyhow::anyhow!(e))
        })?;

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    pub async fn build_with_provider(
        config: ChatConfig,
        provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        let fetcher = RelayFetcher::new(&config.relay.base_url, config.relay.timeout).map_err(|e| {
            tracing::error!("Failed to initialize relay client: {}", e);
            AppError::ConfigError(anyhow::anyhow!(e))
        })?;

        let analyst = Analyst::new(
            provider,
            fetcher,
            config.models.clone(),
            config.request_timeout,
            config.failure_policy,
        );

        let state = AppState {
            analyst: Arc::new(analyst),
        };

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route(
                "/session",
                get(handlers::get_session).delete(handlers::reset_session),
            )
            .route("/session/text", post(handlers::analyze_text))
            .route("/session/url", post(handlers::analyze_url))
            .route("/session/file", post(handlers::analyze_file))
            .route("/session/questions", post(handlers::ask_question))
            .layer(DefaultBodyLimit::max(handlers::session::MAX_BODY_BYTES))
            .layer(middleware::from_fn(request_id_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
