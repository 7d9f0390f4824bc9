use serde::{Deserialize, Serialize};

use crate::models::numeric::deserialize_optional_rounded_u32;

pub const DEFAULT_TRIP_DAYS: u32 = 5;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct InterestPreferences {
    #[serde(default)]
    pub cultural: Vec<String>,
    #[serde(default)]
    pub food: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub atmosphere: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TravelStyle {
    Budget,
    #[default]
    MidRange,
    Luxury,
}

/// Structured reading of a free-text travel wish.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserInterests {
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub preferences: InterestPreferences,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub travel_style: TravelStyle,
    #[serde(
        deserialize_with = "deserialize_optional_rounded_u32",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<u32>,
}

impl UserInterests {
    /// Reading used when the language model is unavailable: the whole
    /// message is the interest and its longer words are the keywords.
    pub fn from_message(message: &str) -> Self {
        Self {
            interests: vec![message.to_string()],
            preferences: InterestPreferences::default(),
            keywords: message
                .split_whitespace()
                .filter(|word| word.chars().count() > 3)
                .map(str::to_string)
                .collect(),
            travel_style: TravelStyle::MidRange,
            duration: Some(DEFAULT_TRIP_DAYS),
        }
    }

    pub fn trip_days(&self) -> u32 {
        match self.duration {
            Some(days) if days > 0 => days,
            _ => DEFAULT_TRIP_DAYS,
        }
    }

    /// Interests, cultural and food preferences, then keywords, blanks removed.
    pub fn search_terms(&self) -> Vec<String> {
        self.interests
            .iter()
            .chain(self.preferences.cultural.iter())
            .chain(self.preferences.food.iter())
            .chain(self.keywords.iter())
            .filter(|term| !term.trim().is_empty())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_message_keeps_long_words() {
        let interests = UserInterests::from_message("I love  ramen and old temples");
        assert_eq!(interests.interests, vec!["I love  ramen and old temples"]);
        assert_eq!(interests.keywords, vec!["love", "ramen", "temples"]);
        assert_eq!(interests.travel_style, TravelStyle::MidRange);
        assert_eq!(interests.trip_days(), 5);
    }

    #[test]
    fn test_reads_model_output() {
        let interests: UserInterests = serde_json::from_value(json!({
            "interests": ["BTS", "ramen"],
            "preferences": {"cultural": ["K-pop"], "food": ["ramen"]},
            "keywords": ["music"],
            "travelStyle": "luxury",
            "duration": "7"
        }))
        .unwrap();
        assert_eq!(interests.travel_style, TravelStyle::Luxury);
        assert_eq!(interests.trip_days(), 7);
        assert!(interests.preferences.atmosphere.is_empty());
        assert_eq!(
            interests.search_terms(),
            vec!["BTS", "ramen", "K-pop", "ramen", "music"]
        );
    }

    #[test]
    fn test_unparseable_duration_defaults() {
        let interests: UserInterests = serde_json::from_value(json!({
            "interests": ["hiking"],
            "duration": "number of days (default 5)"
        }))
        .unwrap();
        assert_eq!(interests.duration, None);
        assert_eq!(interests.trip_days(), 5);
    }
}
