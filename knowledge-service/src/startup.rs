use crate::config::KnowledgeConfig;
use crate::handlers;
use crate::services::{DocumentProcessor, Workspace};
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
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub workspace: Arc<RwLock<Workspace>>,
    pub processor: Arc<DocumentProcessor>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: KnowledgeConfig) -> Result<Self, AppError> {
        let mut gemini = GeminiConfig::new(&config.google.api_key, &config.extraction_model);
        gemini.api_base = config.google.api_base.clone();
        gemini.timeout = config.request_timeout;

        let provider = GeminiTextProvider::new(gemini).map_err(|e| {
            tracing::error!("Failed to initialize Gemini provider: {}", e);
            AppError::ConfigError(anyhow::anyhow!(e))
        })?;

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    pub async fn build_with_provider(
        config: KnowledgeConfig,
        provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        let fetcher = RelayFetcher::new(&config.relay.base_url, config.relay.timeout).map_err(|e| {
            tracing::error!("Failed to initialize relay client: {}", e);
            AppError::ConfigError(anyhow::anyhow!(e))
        })?;

        let workspace = if config.seed_projects {
            Workspace::with_sample_projects()
        } else {
            Workspace::new()
        };
        let workspace = Arc::new(RwLock::new(workspace));

        let processor = DocumentProcessor::new(
            workspace.clone(),
            provider,
            fetcher,
            &config.extraction_model,
            config.request_timeout,
        );

        let state = AppState {
            workspace,
            processor: Arc::new(processor),
        };

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route(
                "/projects",
                get(handlers::list_projects).post(handlers::create_project),
            )
            .route(
                "/projects/active",
                get(handlers::get_active_project).put(handlers::select_project),
            )
            .route("/projects/:id", get(handlers::get_project))
            .route(
                "/projects/:id/documents/text",
                post(handlers::add_text_document),
            )
            .route("/projects/:id/documents/url", post(handlers::add_url_document))
            .route(
                "/projects/:id/documents/upload",
                post(handlers::upload_document),
            )
            .route("/projects/:id/artifacts", get(handlers::get_artifacts))
            .route(
                "/projects/:id/artifacts/:tab",
                get(handlers::get_artifact_tab),
            )
            .layer(DefaultBodyLimit::max(handlers::documents::MAX_BODY_BYTES))
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
