use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub llm: LlmConfig,
    pub batch: BatchConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `OAE_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("OAE_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            llm: LlmConfig::from_env_profiled(p),
            batch: BatchConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  llm:         provider={}, model={}, key={}",
            self.llm.provider,
            self.llm.gemini_model,
            if self.llm.is_configured() { "set" } else { "(none)" }
        );
        tracing::info!(
            "  batch:       standard={}, output_dir={}",
            self.batch
                .standard_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(placeholder)".to_string()),
            self.batch.output_dir.display()
        );
    }

    /// Return a redacted view safe for printing (no secrets).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "llm": {
                "provider": self.llm.provider,
                "model": self.llm.gemini_model,
                "temperature": self.llm.temperature,
                "max_tokens": self.llm.max_tokens,
                "configured": self.llm.is_configured(),
            },
            "batch": {
                "standard_path": self.batch.standard_path,
                "output_dir": self.batch.output_dir,
            },
        })
    }
}

// ── LLM (Gemini) ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Only "gemini" is wired up.
    pub provider: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl LlmConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            provider: profiled_env_or(p, "LLM_PROVIDER", "gemini"),
            gemini_api_key: profiled_env_opt(p, "GEMINI_API_KEY")
                .or_else(|| profiled_env_opt(p, "API_KEY"))
                .filter(|k| k != "undefined"),
            gemini_model: profiled_env_or(p, "GEMINI_MODEL", "gemini-3-pro-preview"),
            gemini_base_url: profiled_env_opt(p, "GEMINI_BASE_URL"),
            temperature: profiled_env_or(p, "LLM_TEMPERATURE", "0")
                .parse()
                .unwrap_or(0.0),
            max_tokens: profiled_env_u32(p, "LLM_MAX_TOKENS", 8192),
        }
    }

    /// `google` is accepted as an alias.
    pub fn uses_gemini(&self) -> bool {
        matches!(self.provider.as_str(), "gemini" | "google")
    }

    pub fn is_configured(&self) -> bool {
        self.uses_gemini() && self.gemini_api_key.is_some()
    }
}

// ── Batch ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Reference standard document; the built-in placeholder is used when unset.
    pub standard_path: Option<PathBuf>,
    pub output_dir: PathBuf,
}

impl BatchConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            standard_path: profiled_env_opt(p, "OAE_STANDARD_PATH").map(PathBuf::from),
            output_dir: PathBuf::from(profiled_env_or(p, "OAE_OUTPUT_DIR", "out")),
        }
    }
}
