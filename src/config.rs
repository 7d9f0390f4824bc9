use std::env;
use std::str::FromStr;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 3000;
const MONGO_URI: &str = "mongodb://localhost:27017/travel-planner";
const CORS_ORIGIN: &str = "http://localhost:5173";
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_MODEL: &str = "gemini-2.5-flash";
const QLOO_BASE_URL: &str = "https://api.qloo.com/v1";
const DEFAULT_BUDGET: u64 = 2500;
const FALLBACK_DESTINATION_ID: &str = "swiss-alps";
const RECOMMENDATION_COUNT: usize = 6;

/// Reads `key` and parses it, falling back to `default` when the variable
/// is missing or unparseable.
pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_secret(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

fn env_flag(key: &str) -> bool {
    matches!(
        env::var(key).map(|s| s.trim().to_ascii_lowercase()).as_deref(),
        Ok("1" | "true" | "yes" | "on")
    )
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct QlooConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo_uri: String,
    pub cors_origin: String,
    pub gemini: GeminiConfig,
    pub qloo: QlooConfig,
    pub default_budget: u64,
    pub fallback_destination_id: String,
    pub recommendation_count: usize,
    pub seed_on_start: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            mongo_uri: MONGO_URI.to_string(),
            cors_origin: CORS_ORIGIN.to_string(),
            gemini: GeminiConfig {
                api_key: None,
                base_url: GEMINI_BASE_URL.to_string(),
                model: GEMINI_MODEL.to_string(),
            },
            qloo: QlooConfig {
                api_key: None,
                base_url: QLOO_BASE_URL.to_string(),
            },
            default_budget: DEFAULT_BUDGET,
            fallback_destination_id: FALLBACK_DESTINATION_ID.to_string(),
            recommendation_count: RECOMMENDATION_COUNT,
            seed_on_start: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env_string("HOST", &defaults.host),
            port: env_or("PORT", defaults.port),
            mongo_uri: env_string("MONGO_URI", &defaults.mongo_uri),
            cors_origin: env_string("CORS_ORIGIN", &defaults.cors_origin),
            gemini: GeminiConfig {
                api_key: env_secret("GEMINI_API_KEY"),
                base_url: env_string("GEMINI_BASE_URL", &defaults.gemini.base_url),
                model: env_string("GEMINI_MODEL", &defaults.gemini.model),
            },
            qloo: QlooConfig {
                api_key: env_secret("QLOO_API_KEY"),
                base_url: env_string("QLOO_BASE_URL", &defaults.qloo.base_url),
            },
            default_budget: env_or("DEFAULT_BUDGET", defaults.default_budget),
            fallback_destination_id: env_string(
                "FALLBACK_DESTINATION_ID",
                &defaults.fallback_destination_id,
            ),
            recommendation_count: env_or("RECOMMENDATION_COUNT", defaults.recommendation_count),
            seed_on_start: env_flag("SEED_ON_START"),
        }
    }
}
