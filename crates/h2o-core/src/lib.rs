pub mod labels;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// --- Months and cities ---

pub const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Map an English month name to its 1-based number.
pub fn month_from_name(name: &str) -> Option<u32> {
    let name = name.trim();
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|i| i as u32 + 1)
}

/// English name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|i| MONTHS.get(i as usize))
        .copied()
}

/// Santa Clara County cities offered by the form.
pub const CITIES: [&str; 15] = [
    "Campbell", "Cupertino", "Gilroy", "Los Altos", "Los Altos Hills",
    "Los Gatos", "Milpitas", "Monte Sereno", "Morgan Hill", "Mountain View",
    "Palo Alto", "San Jose", "Santa Clara", "Saratoga", "Sunnyvale",
];

/// Sentinel the city selector shows before a choice is made.
pub const CITY_PLACEHOLDER: &str = "Choose a city";

/// Earliest year the form accepts.
pub const BASELINE_YEAR: i32 = 2024;

// --- Climate table ---

#[derive(Debug, Clone, PartialEq)]
pub struct ClimateRecord {
    pub year: i32,
    pub month: u32,
    pub avg_temp: f64,
}

/// Monthly average temperatures. Loaded once at startup, immutable after.
#[derive(Debug, Clone, Default)]
pub struct ClimateTable {
    records: Vec<ClimateRecord>,
}

impl ClimateTable {
    /// Parse the fixed-schema CSV (`Month,Year,Avg Temp`, month as an
    /// English name). The first line is a header and is skipped.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let mut records = Vec::new();
        for (idx, line) in raw.lines().enumerate().skip(1) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let cols: Vec<&str> = line.split(',').collect();
            if cols.len() != 3 {
                return Err(format!(
                    "line {}: expected 3 columns, got {}",
                    idx + 1,
                    cols.len()
                ));
            }
            let month = month_from_name(cols[0])
                .ok_or_else(|| format!("line {}: unknown month {:?}", idx + 1, cols[0]))?;
            let year = cols[1]
                .trim()
                .parse::<i32>()
                .map_err(|e| format!("line {}: bad year: {e}", idx + 1))?;
            let avg_temp = cols[2]
                .trim()
                .parse::<f64>()
                .map_err(|e| format!("line {}: bad temperature: {e}", idx + 1))?;
            records.push(ClimateRecord { year, month, avg_temp });
        }
        Ok(Self { records })
    }

    /// Read and parse a climate CSV from disk.
    pub fn load(path: &Path) -> Result<Self, String> {
        let raw =
            fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
        Self::parse(&raw)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find the row for the requested month: an exact year match if one
    /// exists, otherwise the earliest year recorded for that month. The
    /// fallback is earliest, not nearest-by-distance.
    pub fn closest_month_year(&self, year: i32, month: u32) -> Result<&ClimateRecord, String> {
        if let Some(exact) = self
            .records
            .iter()
            .find(|r| r.month == month && r.year == year)
        {
            return Ok(exact);
        }
        self.records
            .iter()
            .filter(|r| r.month == month)
            .min_by_key(|r| r.year)
            .ok_or_else(|| format!("no climate rows for month {month}"))
    }

    /// Climate sentence embedded in the tips prompt. A month with no rows
    /// renders the fixed "not available" sentence instead of failing the
    /// submission.
    pub fn summary(&self, year: i32, month: u32) -> String {
        match self.closest_month_year(year, month) {
            Ok(row) => format!(
                "Average Temperature for {}-{:02}: {}",
                row.year, row.month, row.avg_temp
            ),
            Err(_) => "Climate data for the selected month and year is not available.".to_string(),
        }
    }
}

// --- User submission ---

/// One form submission. Lives only for the duration of a request and is
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterProfile {
    pub city: String,
    pub household_size: u32,
    #[serde(default)]
    pub appliances: String,
    #[serde(default)]
    pub water_features: String,
    #[serde(default)]
    pub showering_usage: String,
    #[serde(default)]
    pub car_wash_frequency: String,
    pub year: i32,
    pub month: u32,
}

impl WaterProfile {
    /// Reject submissions that must not reach the external API.
    pub fn validate(&self) -> Result<(), String> {
        if self.city == CITY_PLACEHOLDER || !CITIES.contains(&self.city.as_str()) {
            return Err("Please select a valid city to continue.".to_string());
        }
        if self.household_size == 0 {
            return Err("Household size must be at least 1.".to_string());
        }
        if !(1..=12).contains(&self.month) {
            return Err("Month must be between 1 and 12.".to_string());
        }
        if self.year < BASELINE_YEAR {
            return Err(format!("Year must be {BASELINE_YEAR} or later."));
        }
        Ok(())
    }
}

// --- Image cache ---

/// Resolve the image cache directory (~/.h2optimize/images).
pub fn images_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".h2optimize")
        .join("images")
}

/// Derive a cache filename from a visualizer prompt: only alphanumerics
/// and spaces survive, then the first three words are joined with
/// underscores. A prompt with no alphanumeric characters degenerates to a
/// bare ".png".
pub fn filename_from_prompt(prompt: &str) -> String {
    let cleaned: String = prompt
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect();
    let words: Vec<&str> = cleaned.split_whitespace().take(3).collect();
    format!("{}.png", words.join("_"))
}

// --- AI settings ---

/// Credential and model choices for the hosted generative API. Read from
/// the environment once at startup, immutable afterwards.
#[derive(Debug, Clone)]
pub struct AiSettings {
    pub api_key: String,
    pub chat_model: String,
    pub image_model: String,
    pub image_size: String,
}

impl AiSettings {
    /// Build settings from the environment. A missing or empty API key is
    /// a configuration error the caller should treat as fatal.
    pub fn from_env() -> Result<Self, String> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            "OPENAI_API_KEY is not set; add it to the environment or a .env file".to_string()
        })?;
        if api_key.trim().is_empty() {
            return Err("OPENAI_API_KEY is set but empty".to_string());
        }
        Ok(Self {
            api_key,
            chat_model: env_or("H2O_CHAT_MODEL", "gpt-3.5-turbo"),
            image_model: env_or("H2O_IMAGE_MODEL", "dall-e-2"),
            image_size: env_or("H2O_IMAGE_SIZE", "1024x1024"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(i32, u32, f64)]) -> ClimateTable {
        ClimateTable {
            records: rows
                .iter()
                .map(|&(year, month, avg_temp)| ClimateRecord { year, month, avg_temp })
                .collect(),
        }
    }

    #[test]
    fn exact_lookup_returns_matching_row() {
        let t = table(&[(2020, 1, 51.0), (2021, 1, 52.5), (2021, 2, 54.0)]);
        let row = t.closest_month_year(2021, 1).unwrap();
        assert_eq!(row.year, 2021);
        assert_eq!(row.avg_temp, 52.5);
    }

    #[test]
    fn missing_year_falls_back_to_earliest() {
        // January rows for 2020 and 2023: requesting 2024 must answer 2020
        // (earliest), not 2023 (nearest).
        let t = table(&[(2020, 1, 51.0), (2023, 1, 53.0)]);
        let row = t.closest_month_year(2024, 1).unwrap();
        assert_eq!(row.year, 2020);
    }

    #[test]
    fn fallback_ignores_distance() {
        let t = table(&[(2020, 6, 68.0), (2023, 6, 70.0)]);
        // 2022 is closer to 2023, but the rule is earliest.
        assert_eq!(t.closest_month_year(2022, 6).unwrap().year, 2020);
    }

    #[test]
    fn missing_month_is_an_error() {
        let t = table(&[(2020, 1, 51.0)]);
        let err = t.closest_month_year(2024, 7).unwrap_err();
        assert!(err.contains("month 7"), "unexpected error: {err}");
    }

    #[test]
    fn summary_formats_hit_and_miss() {
        let t = table(&[(2020, 1, 51.3)]);
        assert_eq!(t.summary(2020, 1), "Average Temperature for 2020-01: 51.3");
        assert_eq!(
            t.summary(2024, 7),
            "Climate data for the selected month and year is not available."
        );
    }

    #[test]
    fn parse_skips_header_and_maps_month_names() {
        let csv = "Month,Year,Avg Temp\nJanuary,2020,51.3\nFebruary,2020,54.0\n";
        let t = ClimateTable::parse(csv).unwrap();
        assert_eq!(t.records.len(), 2);
        assert_eq!(
            t.records[0],
            ClimateRecord { year: 2020, month: 1, avg_temp: 51.3 }
        );
        assert_eq!(t.records[1].month, 2);
    }

    #[test]
    fn parse_rejects_malformed_rows() {
        assert!(ClimateTable::parse("Month,Year,Avg Temp\nJanuary,2020\n").is_err());
        assert!(ClimateTable::parse("Month,Year,Avg Temp\nSmarch,2020,51.3\n").is_err());
        assert!(ClimateTable::parse("Month,Year,Avg Temp\nJanuary,soon,51.3\n").is_err());
    }

    #[test]
    fn month_name_round_trip() {
        assert_eq!(month_from_name("January"), Some(1));
        assert_eq!(month_from_name(" december "), Some(12));
        assert_eq!(month_from_name("Smarch"), None);
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn filename_strips_punctuation_and_joins() {
        assert_eq!(
            filename_from_prompt("Save water, save life!"),
            "Save_water_save.png"
        );
        assert_eq!(filename_from_prompt("drip irrigation"), "drip_irrigation.png");
    }

    #[test]
    fn filename_with_only_punctuation_is_bare_extension() {
        assert_eq!(filename_from_prompt("?!...;"), ".png");
        assert_eq!(filename_from_prompt(""), ".png");
    }

    #[test]
    fn filename_drops_non_space_whitespace() {
        // Tabs and newlines are removed outright, not treated as separators.
        assert_eq!(
            filename_from_prompt("rain\nbarrel setup"),
            "rainbarrel_setup.png"
        );
    }

    #[test]
    fn placeholder_city_fails_validation() {
        let profile = WaterProfile {
            city: CITY_PLACEHOLDER.to_string(),
            household_size: 3,
            appliances: String::new(),
            water_features: String::new(),
            showering_usage: String::new(),
            car_wash_frequency: String::new(),
            year: 2024,
            month: 6,
        };
        assert_eq!(
            profile.validate().unwrap_err(),
            "Please select a valid city to continue."
        );
    }

    #[test]
    fn valid_profile_passes_and_bad_fields_fail() {
        let mut profile = WaterProfile {
            city: "San Jose".to_string(),
            household_size: 2,
            appliances: "dishwasher".to_string(),
            water_features: "garden".to_string(),
            showering_usage: "daily showers".to_string(),
            car_wash_frequency: "monthly".to_string(),
            year: 2024,
            month: 6,
        };
        assert!(profile.validate().is_ok());

        profile.month = 13;
        assert!(profile.validate().is_err());
        profile.month = 6;

        profile.household_size = 0;
        assert!(profile.validate().is_err());
        profile.household_size = 2;

        profile.year = 2023;
        assert!(profile.validate().is_err());
        profile.year = 2024;

        profile.city = "Sacramento".to_string();
        assert!(profile.validate().is_err());
    }
}
