use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Gemini REST endpoint root.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone)]
pub struct TextgenConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: Secret<String>,
    pub api_base: String,
    /// Upper bound on one upstream round trip; `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model serving both endpoints (e.g., gemini-2.0-flash)
    pub text_model: String,
}

#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    pub otlp_endpoint: Option<String>,
}

impl TextgenConfig {
    /// Load configuration from `.env`, the optional `configuration` file and
    /// the process environment.
    pub fn load() -> Result<Self, AppError> {
        Self::load_with_api_key(None)
    }

    /// Like [`TextgenConfig::load`], but an explicit key wins over
    /// `GOOGLE_API_KEY`.
    pub fn load_with_api_key(api_key: Option<String>) -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(TextgenConfig {
            common: common_config,
            google: GoogleConfig {
                api_key: resolve_api_key(api_key, env::var("GOOGLE_API_KEY").ok())?,
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE), is_prod)?,
                request_timeout_secs: env::var("GENAI_REQUEST_TIMEOUT_SECS")
                    .ok()
                    .map(|raw| parse_timeout(&raw))
                    .transpose()?,
            },
            models: ModelConfig {
                text_model: get_env("GENAI_TEXT_MODEL", Some(DEFAULT_TEXT_MODEL), is_prod)?,
            },
            observability: ObservabilityConfig {
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            },
        })
    }
}

/// Pick the credential: explicit argument first, then the environment value.
/// Blank values count as missing.
pub fn resolve_api_key(
    explicit: Option<String>,
    from_env: Option<String>,
) -> Result<Secret<String>, AppError> {
    explicit
        .filter(|key| !key.trim().is_empty())
        .or_else(|| from_env.filter(|key| !key.trim().is_empty()))
        .map(Secret::new)
        .ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!(
                "Google API key is required (pass --api-key or set GOOGLE_API_KEY)"
            ))
        })
}

fn parse_timeout(raw: &str) -> Result<u64, AppError> {
    raw.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!(
            "GENAI_REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{}': {}",
            raw,
            e
        ))
    })
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
