use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatMessage;

use h2o_core::AiSettings;

/// One chat-style completion round-trip: a fixed system instruction plus a
/// single user turn. No retry, no rate-limit handling, no timeout beyond
/// the client default.
pub async fn generate(
    settings: &AiSettings,
    system: &str,
    user_msg: &str,
) -> Result<String, String> {
    let llm = LLMBuilder::new()
        .backend(LLMBackend::OpenAI)
        .api_key(&settings.api_key)
        .model(&settings.chat_model)
        .system(system)
        .build()
        .map_err(|e| format!("build LLM: {e}"))?;

    let messages = vec![ChatMessage::user().content(user_msg).build()];

    let response = llm.chat(&messages).await.map_err(|e| format!("chat: {e}"))?;

    match response.text() {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err("model returned empty text".to_string()),
        None => Err("model returned no text".to_string()),
    }
}
