// src/config/mod.rs
// All tunables come from the environment (.env supported); the API key is
// validated separately at startup because its absence is fatal.

use anyhow::Result;
use once_cell::sync::Lazy;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct ChatConfig {
    // ── Server Configuration
    pub host: String,
    pub port: u16,

    // ── Gemini Configuration
    pub gemini_model: String,
    pub gemini_timeout_secs: u64,

    // ── Generation Parameters
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
    pub top_k: u32,

    // ── Logging Configuration
    pub log_level: String,
}

/// Parse an env var, falling back to the default when missing or unparsable.
/// Values may carry trailing comments and whitespace.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

impl ChatConfig {
    pub fn from_env() -> Self {
        // Load from .env file first if it exists; a missing file is fine.
        let _ = dotenvy::dotenv();

        Self {
            host: env_var_or("ROLECHAT_HOST", "0.0.0.0".to_string()),
            port: env_var_or("ROLECHAT_PORT", 3000),
            gemini_model: env_var_or("GEMINI_MODEL", "gemini-1.5-flash".to_string()),
            gemini_timeout_secs: env_var_or("GEMINI_TIMEOUT_SECS", 120),
            temperature: env_var_or("GEMINI_TEMPERATURE", 0.7),
            max_output_tokens: env_var_or("GEMINI_MAX_OUTPUT_TOKENS", 2048),
            top_p: env_var_or("GEMINI_TOP_P", 1.0),
            top_k: env_var_or("GEMINI_TOP_K", 32),
            log_level: env_var_or("ROLECHAT_LOG_LEVEL", "info".to_string()),
        }
    }

    /// Server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The one required secret. Read once at startup; absence is a fatal
/// configuration error and the caller must halt before serving anything.
pub fn require_api_key() -> Result<String> {
    match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => anyhow::bail!("GEMINI_API_KEY not set"),
    }
}

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<ChatConfig> = Lazy::new(ChatConfig::from_env);
