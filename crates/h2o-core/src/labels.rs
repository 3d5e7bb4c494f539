//! Form label set — single source of truth for the UI strings the
//! translation helper operates on.

use serde::{Deserialize, Serialize};

/// Number of positional parts a translated label block must contain.
pub const LABEL_COUNT: usize = 12;

/// The fixed collection of UI strings subject to translation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabelSet {
    pub header: String,
    pub welcome: String,
    pub location_note: String,
    pub city_label: String,
    pub household_size_label: String,
    pub appliances_label: String,
    pub water_features_label: String,
    pub showering_usage_label: String,
    pub car_wash_label: String,
    pub year_label: String,
    pub month_label: String,
    pub submit_label: String,
}

impl LabelSet {
    /// Canonical English labels, also the fallback when translation fails.
    pub fn default_english() -> Self {
        Self {
            header: "Water Conservation Tips Generator".to_string(),
            welcome: "Welcome to H2Optimize, the AI-powered platform designed to transform \
                      your water habits. By analyzing your household's unique water usage, \
                      from appliance use to daily activities, we provide personalized tips \
                      to help you conserve water effectively. Start conserving today and \
                      make every drop count for a sustainable future!"
                .to_string(),
            location_note: "This application was created for Santa Clara County locations."
                .to_string(),
            city_label: "Select the city you are located in:".to_string(),
            household_size_label: "How many people are in the household?".to_string(),
            appliances_label:
                "Appliance usage (e.g., washing machine, dishwasher, water softener, etc.)"
                    .to_string(),
            water_features_label:
                "Water features (e.g., garden, hot tub, swimming pool, etc.)".to_string(),
            showering_usage_label: "Describe showering, bathtub, and toilet usage".to_string(),
            car_wash_label: "How many times do you wash your car?".to_string(),
            year_label: "Enter the year (e.g., 2024):".to_string(),
            month_label: "Enter the month (1-12):".to_string(),
            submit_label: "Submit".to_string(),
        }
    }

    /// Label texts in the fixed order used for positional translation.
    pub fn to_lines(&self) -> Vec<&str> {
        vec![
            &self.header,
            &self.welcome,
            &self.location_note,
            &self.city_label,
            &self.household_size_label,
            &self.appliances_label,
            &self.water_features_label,
            &self.showering_usage_label,
            &self.car_wash_label,
            &self.year_label,
            &self.month_label,
            &self.submit_label,
        ]
    }

    /// Re-assemble a label set from translated parts, in `to_lines` order.
    /// Extra trailing parts are ignored; too few parts is a mismatch and
    /// returns None so the caller can fall back to English.
    pub fn from_lines(parts: &[&str]) -> Option<Self> {
        if parts.len() < LABEL_COUNT {
            return None;
        }
        let part = |i: usize| parts[i].trim().to_string();
        Some(Self {
            header: part(0),
            welcome: part(1),
            location_note: part(2),
            city_label: part(3),
            household_size_label: part(4),
            appliances_label: part(5),
            water_features_label: part(6),
            showering_usage_label: part(7),
            car_wash_label: part(8),
            year_label: part(9),
            month_label: part(10),
            submit_label: part(11),
        })
    }
}

impl Default for LabelSet {
    fn default() -> Self {
        Self::default_english()
    }
}
