//! Async driver around [`AnalysisSession`].
//!
//! The session lock is only held while taking a ticket or applying a result,
//! never while a provider call or a page fetch is outstanding.

use crate::config::ModelConfig;
use crate::models::{Analysis, ChatReply};
use crate::session::{AnalysisSession, AskOutcome, ChatFailurePolicy, PendingCall, SessionError};
use service_core::acquisition::{self, RelayFetcher, Source};
use service_core::genai::{TextProvider, generate_structured};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};

pub struct Analyst {
    session: Mutex<AnalysisSession>,
    provider: Arc<dyn TextProvider>,
    fetcher: RelayFetcher,
    models: ModelConfig,
    request_timeout: Duration,
}

impl Analyst {
    pub fn new(
        provider: Arc<dyn TextProvider>,
        fetcher: RelayFetcher,
        models: ModelConfig,
        request_timeout: Duration,
        policy: ChatFailurePolicy,
    ) -> Self {
        Self {
            session: Mutex::new(AnalysisSession::new(policy)),
            provider,
            fetcher,
            models,
            request_timeout,
        }
    }

    /// Lock the session for reading a consistent view.
    pub async fn session(&self) -> MutexGuard<'_, AnalysisSession> {
        self.session.lock().await
    }

    pub async fn analyze_text(&self, text: &str) -> Result<Analysis, SessionError> {
        let source = acquisition::from_pasted_text(text)?;
        self.analyze(source).await
    }

    pub async fn analyze_file(&self, file_name: &str, bytes: &[u8]) -> Result<Analysis, SessionError> {
        let source = acquisition::from_file_bytes(file_name, bytes)?;
        self.analyze(source).await
    }

    /// Fetch the page first; a failed fetch leaves the session untouched.
    pub async fn analyze_url(&self, url: &str) -> Result<Analysis, SessionError> {
        let source = acquisition::from_url(&self.fetcher, url).await?;
        self.analyze(source).await
    }

    pub async fn analyze(&self, source: Source) -> Result<Analysis, SessionError> {
        let PendingCall {
            ticket,
            mut request,
        } = self.session.lock().await.begin_analysis(source)?;
        request.params.model = Some(self.models.analysis_model.clone());

        tracing::debug!(
            generation = ticket.generation(),
            model = %self.models.analysis_model,
            "Requesting analysis"
        );
        let result =
            generate_structured::<Analysis>(self.provider.as_ref(), &request, self.request_timeout)
                .await;

        self.session.lock().await.complete_analysis(ticket, result)
    }

    pub async fn ask(&self, question: &str) -> Result<AskOutcome, SessionError> {
        let PendingCall {
            ticket,
            mut request,
        } = self.session.lock().await.prepare_ask(question)?;
        request.params.model = Some(self.models.chat_model.clone());

        tracing::debug!(
            generation = ticket.generation(),
            model = %self.models.chat_model,
            turns = request.contents.len(),
            "Requesting answer"
        );
        let result =
            generate_structured::<ChatReply>(self.provider.as_ref(), &request, self.request_timeout)
                .await;

        self.session.lock().await.complete_ask(ticket, result)
    }

    pub async fn reset(&self) {
        self.session.lock().await.reset();
    }

    pub async fn provider_health(&self) -> bool {
        self.provider.health_check().await.is_ok()
    }
}
