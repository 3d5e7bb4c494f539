use h2o_core::WaterProfile;

/// Fixed persona and output-format instruction for the tips engine.
pub fn system_prompt() -> String {
    "Imagine you are an expert water conservationist. Provide and list 10 personalized \
     water conservation tips based on the user inputs and climate data. The response \
     should be in a numbered bullet-point format suitable for practical home water \
     management and sustainability planning."
        .to_string()
}

/// Render one submission, plus the climate lookup sentence, as the user turn.
pub fn user_message(profile: &WaterProfile, climate_summary: &str) -> String {
    format!(
        "Location: {}\n\
         Household size: {}\n\
         Appliances: {}\n\
         Water features: {}\n\
         Climate Data: {}\n\
         Showering/bathroom usage: {}\n\
         Car wash frequency: {}",
        profile.city,
        profile.household_size,
        profile.appliances,
        profile.water_features,
        climate_summary,
        profile.showering_usage,
        profile.car_wash_frequency,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> WaterProfile {
        WaterProfile {
            city: "Palo Alto".to_string(),
            household_size: 4,
            appliances: "washing machine, dishwasher".to_string(),
            water_features: "garden, hot tub".to_string(),
            showering_usage: "two showers a day".to_string(),
            car_wash_frequency: "twice a month".to_string(),
            year: 2024,
            month: 7,
        }
    }

    #[test]
    fn user_message_embeds_every_field_in_order() {
        let msg = user_message(&profile(), "Average Temperature for 2020-07: 72.1");

        let expected = [
            "Location: Palo Alto",
            "Household size: 4",
            "Appliances: washing machine, dishwasher",
            "Water features: garden, hot tub",
            "Climate Data: Average Temperature for 2020-07: 72.1",
            "Showering/bathroom usage: two showers a day",
            "Car wash frequency: twice a month",
        ];
        let mut cursor = 0;
        for line in expected {
            let pos = msg[cursor..]
                .find(line)
                .unwrap_or_else(|| panic!("missing or out of order: {line}"));
            cursor += pos + line.len();
        }
    }

    #[test]
    fn system_prompt_asks_for_ten_numbered_tips() {
        let system = system_prompt();
        assert!(system.contains("10"));
        assert!(system.contains("numbered"));
    }
}
