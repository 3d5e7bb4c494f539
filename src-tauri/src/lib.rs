use std::sync::Arc;

use tauri::{path::BaseDirectory, Manager};

use h2o_advisor::translate::{Translator, LANGUAGES};
use h2o_core::labels::LabelSet;
use h2o_core::{AiSettings, ClimateTable, WaterProfile, CITIES, CITY_PLACEHOLDER};

/// Managed state wrapping the environment-derived API settings.
struct SettingsState(Arc<AiSettings>);

/// Managed state wrapping the climate table loaded at startup.
struct ClimateState(Arc<ClimateTable>);

/// Managed state owning the translation helper and its month-name cache.
struct TranslatorState(Arc<Translator>);

/// Generic message shown when an external call fails; the detail stays in
/// the log.
const RETRY_MESSAGE: &str =
    "Something went wrong while generating a response. Please try again.";

#[tauri::command]
fn list_cities() -> Vec<String> {
    std::iter::once(CITY_PLACEHOLDER)
        .chain(CITIES)
        .map(|c| c.to_string())
        .collect()
}

#[tauri::command]
fn list_languages() -> Vec<String> {
    LANGUAGES.iter().map(|l| l.to_string()).collect()
}

#[tauri::command]
async fn get_labels(
    language: String,
    settings: tauri::State<'_, SettingsState>,
    translator: tauri::State<'_, TranslatorState>,
) -> Result<LabelSet, String> {
    Ok(translator.0.labels(&settings.0, &language).await)
}

#[tauri::command]
async fn month_names(
    language: String,
    settings: tauri::State<'_, SettingsState>,
    translator: tauri::State<'_, TranslatorState>,
) -> Result<Vec<String>, String> {
    Ok(translator.0.month_names(&settings.0, &language).await)
}

#[tauri::command]
async fn generate_tips(
    profile: WaterProfile,
    language: String,
    settings: tauri::State<'_, SettingsState>,
    climate: tauri::State<'_, ClimateState>,
    translator: tauri::State<'_, TranslatorState>,
) -> Result<String, String> {
    // Invalid submissions are rejected before any external call is made.
    profile.validate()?;

    let climate_summary = climate.0.summary(profile.year, profile.month);
    let tips = h2o_advisor::get_tips(&profile, &climate_summary, &settings.0)
        .await
        .map_err(|_| RETRY_MESSAGE.to_string())?;

    // Falls back to the untranslated tips if the translation call fails.
    Ok(translator.0.translate_text(&settings.0, &tips, &language).await)
}

#[tauri::command]
async fn generate_visual(
    prompt: String,
    settings: tauri::State<'_, SettingsState>,
) -> Result<String, String> {
    let path = h2o_advisor::visual::generate_visual(&settings.0, &prompt)
        .await
        .map_err(|e| {
            eprintln!("[h2optimize] visual generation error: {e}");
            RETRY_MESSAGE.to_string()
        })?;
    Ok(path.to_string_lossy().into_owned())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let _ = dotenvy::dotenv();

    // A missing credential is fatal here, before any window opens.
    let settings = match AiSettings::from_env() {
        Ok(s) => Arc::new(s),
        Err(e) => {
            eprintln!("[h2optimize] configuration error: {e}");
            std::process::exit(1);
        }
    };

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(SettingsState(settings))
        .manage(TranslatorState(Arc::new(Translator::new())))
        .setup(|app| {
            let path = app
                .path()
                .resolve("resources/sc_avgtemp.csv", BaseDirectory::Resource)?;
            let table = ClimateTable::load(&path)?;
            if table.is_empty() {
                eprintln!("[h2optimize] climate table is empty, lookups will report no data");
            }
            app.manage(ClimateState(Arc::new(table)));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            list_cities,
            list_languages,
            get_labels,
            month_names,
            generate_tips,
            generate_visual,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
