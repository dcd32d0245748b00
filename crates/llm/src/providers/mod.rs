pub mod gemini;

use oae_core::config::LlmConfig;

use crate::provider::{LlmError, LlmProvider};

/// Create the appropriate LLM provider based on config.
pub fn create_provider(llm_config: &LlmConfig) -> Result<Box<dyn LlmProvider>, LlmError> {
    if !llm_config.uses_gemini() {
        return Err(LlmError::NotConfigured(format!(
            "unknown LLM provider: '{}'",
            llm_config.provider
        )));
    }

    let api_key = llm_config
        .gemini_api_key
        .as_ref()
        .ok_or_else(|| LlmError::NotConfigured("GEMINI_API_KEY (or API_KEY) not set".into()))?;
    let mut provider =
        gemini::GeminiProvider::new(api_key.clone(), llm_config.gemini_model.clone());
    if let Some(base_url) = &llm_config.gemini_base_url {
        provider = provider.with_base_url(base_url.clone());
    }
    Ok(Box::new(provider))
}
