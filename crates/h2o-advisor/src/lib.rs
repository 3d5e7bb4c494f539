pub mod engine;
mod prompt;
pub mod translate;
pub mod visual;

use h2o_core::{AiSettings, WaterProfile};

/// Generate water conservation tips for one validated submission. A single
/// completion round-trip; failures are logged here and returned to the
/// caller, which decides what the user sees.
pub async fn get_tips(
    profile: &WaterProfile,
    climate_summary: &str,
    settings: &AiSettings,
) -> Result<String, String> {
    let system = prompt::system_prompt();
    let user_msg = prompt::user_message(profile, climate_summary);

    eprintln!(
        "[h2o-advisor] requesting tips via {} for {}",
        settings.chat_model, profile.city
    );

    match engine::generate(settings, &system, &user_msg).await {
        Ok(text) => {
            eprintln!("[h2o-advisor] received {} chars of tips", text.len());
            Ok(text)
        }
        Err(e) => {
            eprintln!("[h2o-advisor] tips generation error: {e}");
            Err(e)
        }
    }
}
