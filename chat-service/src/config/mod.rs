use crate::session::ChatFailurePolicy;
use service_core::acquisition::DEFAULT_RELAY_BASE_URL;
use service_core::config::{self as core_config, get_env, get_env_u64, is_production};
use service_core::error::AppError;
use service_core::genai::gemini::GEMINI_API_BASE;
use std::time::Duration;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_RELAY_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub relay: RelayConfig,
    /// Upper bound for a single generative-language call.
    pub request_timeout: Duration,
    pub failure_policy: ChatFailurePolicy,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model for the summary + suggested questions call.
    pub analysis_model: String,
    /// Model for follow-up questions.
    pub chat_model: String,
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ChatConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = is_production();

        let failure_policy = get_env("CHAT_FAILURE_POLICY", Some("keep"), is_prod)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        Ok(ChatConfig {
            common,
            google: GoogleConfig {
                api_key: get_env("GOOGLE_API_KEY", None, is_prod)?,
                api_base: get_env("GEMINI_API_BASE", Some(GEMINI_API_BASE), is_prod)?,
            },
            models: ModelConfig {
                analysis_model: get_env("GENAI_ANALYSIS_MODEL", Some("gemini-2.5-flash"), is_prod)?,
                chat_model: get_env("GENAI_CHAT_MODEL", Some("gemini-2.5-pro"), is_prod)?,
            },
            relay: RelayConfig {
                base_url: get_env("RELAY_BASE_URL", Some(DEFAULT_RELAY_BASE_URL), is_prod)?,
                timeout: Duration::from_secs(get_env_u64(
                    "RELAY_TIMEOUT_SECS",
                    DEFAULT_RELAY_TIMEOUT_SECS,
                    is_prod,
                )?),
            },
            request_timeout: Duration::from_secs(get_env_u64(
                "GENAI_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
                is_prod,
            )?),
            failure_policy,
        })
    }
}
