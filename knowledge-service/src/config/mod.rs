use service_core::acquisition::DEFAULT_RELAY_BASE_URL;
use service_core::config::{self as core_config, get_env, get_env_u64, is_production};
use service_core::error::AppError;
use service_core::genai::gemini::GEMINI_API_BASE;
use std::time::Duration;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_RELAY_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct KnowledgeConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    /// Model that turns one document into its artifacts.
    pub extraction_model: String,
    pub relay: RelayConfig,
    pub request_timeout: Duration,
    /// Start with the two sample projects instead of an empty workspace.
    pub seed_projects: bool,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl KnowledgeConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = is_production();

        Ok(KnowledgeConfig {
            common,
            google: GoogleConfig {
                api_key: get_env("GOOGLE_API_KEY", None, is_prod)?,
                api_base: get_env("GEMINI_API_BASE", Some(GEMINI_API_BASE), is_prod)?,
            },
            extraction_model: get_env("GENAI_EXTRACTION_MODEL", Some("gemini-2.5-flash"), is_prod)?,
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
            seed_projects: parse_seed_flag(&get_env(
                "KNOWLEDGE_SEED_PROJECTS",
                Some("true"),
                is_prod,
            )?)?,
        })
    }
}

fn parse_seed_flag(raw: &str) -> Result<bool, AppError> {
    raw.trim().to_lowercase().parse::<bool>().map_err(|_| {
        AppError::ConfigError(anyhow::anyhow!(
            "Invalid KNOWLEDGE_SEED_PROJECTS value '{}': expected true or false",
            raw
        ))
    })
}
