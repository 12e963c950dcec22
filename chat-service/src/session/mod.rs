//! The analysis session state machine.
//!
//! `Idle -> Ingesting -> Analyzed -> Chatting`, with `reset` returning to
//! `Idle` from anywhere. The machine performs no I/O: each external call is
//! split into a `begin`/`prepare` step that hands out a [`Ticket`] plus the
//! request to send, and a `complete` step that offers the result back. A
//! ticket whose generation is no longer current is refused, so a response
//! that arrives after a reset or a newer ingestion never mutates the session.

pub mod prompts;

use crate::models::{Analysis, ChatReply, Turn};
use serde::Serialize;
use service_core::acquisition::{AcquisitionError, Source};
use service_core::error::ErrorKind;
use service_core::genai::{GenerationError, GenerationRequest, Role};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const ASK_APOLOGY: &str =
    "Sorry, I encountered an error processing that request. Please try asking in a different way.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Ingesting,
    Analyzed,
    Chatting,
}

/// What happens to the user's question when answering it fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChatFailurePolicy {
    /// The question stays in the transcript with no answer after it.
    #[default]
    KeepQuestion,
    /// The unanswered question is removed again.
    DropQuestion,
}

impl FromStr for ChatFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keep" => Ok(ChatFailurePolicy::KeepQuestion),
            "drop" => Ok(ChatFailurePolicy::DropQuestion),
            _ => Err(format!("Invalid chat failure policy: {}", s)),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error("{0}")]
    Validation(String),

    #[error("Nothing has been analyzed yet (session is {0:?})")]
    NotReady(SessionState),

    #[error("Another request is still in progress")]
    Busy,

    #[error("{0}")]
    Network(String),

    #[error("Could not analyze the content. The format might be too complex or not accessible.")]
    Schema(String),

    #[error("The request did not complete within {} seconds", .0.as_secs())]
    Timeout(Duration),

    #[error("The session was reset or replaced while the request was in flight")]
    Superseded,
}

impl SessionError {
    /// `None` for precondition failures that are not one of the three reported kinds.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            SessionError::Validation(_) => Some(ErrorKind::Validation),
            SessionError::Network(_) | SessionError::Timeout(_) => Some(ErrorKind::Network),
            SessionError::Schema(_) => Some(ErrorKind::Schema),
            SessionError::NotReady(_) | SessionError::Busy | SessionError::Superseded => None,
        }
    }
}

impl From<GenerationError> for SessionError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Timeout(limit) => SessionError::Timeout(limit),
            other => match other.kind() {
                ErrorKind::Schema => SessionError::Schema(other.to_string()),
                _ => SessionError::Network(format!(
                    "The analysis service could not be reached: {}",
                    other
                )),
            },
        }
    }
}

/// Acquisition failures keep their kind; they never touch the session.
impl From<AcquisitionError> for SessionError {
    fn from(err: AcquisitionError) -> Self {
        match err.kind() {
            ErrorKind::Network => SessionError::Network(err.to_string()),
            _ => SessionError::Validation(err.to_string()),
        }
    }
}

/// Error overlay shown alongside whatever state the session returned to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionFailure {
    pub kind: Option<ErrorKind>,
    pub message: String,
}

impl From<&SessionError> for SessionFailure {
    fn from(err: &SessionError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallKind {
    Analysis,
    Ask,
}

/// Proof that a call was issued for a particular generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    kind: CallKind,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A call the driver must issue on the session's behalf.
#[derive(Debug)]
pub struct PendingCall {
    pub ticket: Ticket,
    pub request: GenerationRequest,
}

/// Result of offering an ask response back to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum AskOutcome {
    Answered(ChatReply),
    /// The call failed; the apology is for display only and is not stored.
    Apologized { apology: String, error: SessionError },
}

#[derive(Debug)]
pub struct AnalysisSession {
    state: SessionState,
    source: Option<Source>,
    analysis: Option<Analysis>,
    suggestions: Vec<String>,
    transcript: Vec<Turn>,
    last_error: Option<SessionFailure>,
    generation: u64,
    in_flight: Option<Ticket>,
    policy: ChatFailurePolicy,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new(ChatFailurePolicy::default())
    }
}

impl AnalysisSession {
    pub fn new(policy: ChatFailurePolicy) -> Self {
        Self {
            state: SessionState::Idle,
            source: None,
            analysis: None,
            suggestions: Vec::new(),
            transcript: Vec::new(),
            last_error: None,
            generation: 0,
            in_flight: None,
            policy,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn last_error(&self) -> Option<&SessionFailure> {
        self.last_error.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    fn issue(&mut self, kind: CallKind) -> Ticket {
        let ticket = Ticket {
            generation: self.generation,
            kind,
        };
        self.in_flight = Some(ticket);
        ticket
    }

    /// Check the ticket against the current generation and release the in-flight slot.
    fn redeem(&mut self, ticket: Ticket, kind: CallKind) -> Result<(), SessionError> {
        if ticket.generation != self.generation || ticket.kind != kind || self.in_flight != Some(ticket)
        {
            tracing::warn!(
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                "Dropping stale response"
            );
            return Err(SessionError::Superseded);
        }
        self.in_flight = None;
        Ok(())
    }

    /// Start analyzing `source`, replacing everything the session held.
    ///
    /// A source below its minimum length is rejected without touching the
    /// session. Any call still in flight is superseded.
    pub fn begin_analysis(&mut self, source: Source) -> Result<PendingCall, SessionError> {
        source
            .check_minimum()
            .map_err(|e| SessionError::Validation(e.to_string()))?;

        self.generation += 1;
        self.analysis = None;
        self.suggestions.clear();
        self.transcript.clear();
        self.last_error = None;

        let request = prompts::analysis_request(&source);
        tracing::info!(
            generation = self.generation,
            source = %source.description(),
            chars = source.len(),
            "Analysis started"
        );
        self.source = Some(source);
        self.state = SessionState::Ingesting;

        Ok(PendingCall {
            ticket: self.issue(CallKind::Analysis),
            request,
        })
    }

    /// Apply the analysis result. On failure the session falls back to
    /// `Idle` with the source kept and the error recorded.
    pub fn complete_analysis(
        &mut self,
        ticket: Ticket,
        result: Result<Analysis, GenerationError>,
    ) -> Result<Analysis, SessionError> {
        self.redeem(ticket, CallKind::Analysis)?;

        match result {
            Ok(analysis) => {
                self.suggestions = analysis.suggested_questions.clone();
                self.analysis = Some(analysis.clone());
                self.state = SessionState::Analyzed;
                tracing::info!(
                    generation = self.generation,
                    questions = self.suggestions.len(),
                    "Analysis completed"
                );
                Ok(analysis)
            }
            Err(e) => {
                tracing::warn!(generation = self.generation, error = %e, "Analysis failed");
                let err = SessionError::from(e);
                self.last_error = Some(SessionFailure::from(&err));
                self.state = SessionState::Idle;
                Err(err)
            }
        }
    }

    /// Record the question and build the chat request for it.
    pub fn prepare_ask(&mut self, question: &str) -> Result<PendingCall, SessionError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(SessionError::Validation("Please enter a question.".to_string()));
        }

        let source = match (self.state, self.source.as_ref()) {
            (SessionState::Analyzed | SessionState::Chatting, Some(source)) => source,
            _ => return Err(SessionError::NotReady(self.state)),
        };
        if self.in_flight.is_some() {
            return Err(SessionError::Busy);
        }

        self.transcript.push(Turn::user(question));
        let request = prompts::chat_request(source, &self.transcript);

        self.suggestions.clear();
        self.last_error = None;
        self.state = SessionState::Chatting;
        tracing::info!(
            generation = self.generation,
            turns = self.transcript.len(),
            "Question asked"
        );

        Ok(PendingCall {
            ticket: self.issue(CallKind::Ask),
            request,
        })
    }

    /// Apply the chat result. A failure is absorbed: the session stays
    /// `Chatting` and the caller gets an apology to show.
    pub fn complete_ask(
        &mut self,
        ticket: Ticket,
        result: Result<ChatReply, GenerationError>,
    ) -> Result<AskOutcome, SessionError> {
        self.redeem(ticket, CallKind::Ask)?;

        match result {
            Ok(reply) => {
                self.transcript.push(Turn::model(&reply.answer));
                self.suggestions = reply.follow_up_questions.clone();
                Ok(AskOutcome::Answered(reply))
            }
            Err(e) => {
                tracing::warn!(generation = self.generation, error = %e, "Question failed");
                let err = SessionError::from(e);
                if self.policy == ChatFailurePolicy::DropQuestion
                    && self.transcript.last().map(|t| t.role) == Some(Role::User)
                {
                    self.transcript.pop();
                }
                self.last_error = Some(SessionFailure::from(&err));
                Ok(AskOutcome::Apologized {
                    apology: ASK_APOLOGY.to_string(),
                    error: err,
                })
            }
        }
    }

    /// Discard everything and return to `Idle`. Calls still in flight are superseded.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = SessionState::Idle;
        self.source = None;
        self.analysis = None;
        self.suggestions.clear();
        self.transcript.clear();
        self.last_error = None;
        self.in_flight = None;
        tracing::info!(generation = self.generation, "Session reset");
    }
}
