//! Client for the Gemini `generateContent` endpoint.
//!
//! Three prompts are sent: interest extraction, itinerary generation and
//! destination suggestions. The model answers in JSON, sometimes wrapped in
//! markdown fences, which are stripped before parsing. Interest extraction
//! and suggestions degrade to local fallbacks; itinerary generation does not.

use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use regex::Regex;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::error::Error;
use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use crate::config::GeminiConfig;
use crate::models::{
    destination::Destination, interests::UserInterests, recommendations::Recommendations,
    travel_plan::TravelPlan,
};

const REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAP_CENTER: (f64, f64) = (35.6762, 139.6503);

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug)]
pub enum GeminiError {
    MissingApiKey,
    HttpError(reqwest::Error),
    ResponseError(String),
    ParseError(String),
}

impl fmt::Display for GeminiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeminiError::MissingApiKey => write!(f, "GEMINI_API_KEY not set"),
            GeminiError::HttpError(err) => write!(f, "HTTP error: {}", err),
            GeminiError::ResponseError(msg) => write!(f, "Response error: {}", msg),
            GeminiError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl Error for GeminiError {}

impl From<reqwest::Error> for GeminiError {
    fn from(err: reqwest::Error) -> Self {
        GeminiError::HttpError(err)
    }
}

impl From<serde_json::Error> for GeminiError {
    fn from(err: serde_json::Error) -> Self {
        GeminiError::ParseError(err.to_string())
    }
}

fn code_fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"```json\n?|```").expect("fence pattern is valid"))
}

/// Remove every markdown code fence from a model answer.
pub fn strip_code_fences(text: &str) -> String {
    code_fence().replace_all(text, "").trim().to_string()
}

fn parse_model_json<T: DeserializeOwned>(text: &str) -> Result<T, GeminiError> {
    Ok(serde_json::from_str(&strip_code_fences(text))?)
}

pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn interests_prompt(message: &str) -> String {
    format!(
        r#"Read this travel wish and extract structured preferences.

User Message: "{message}"

Answer with a single JSON object of this shape:
{{
  "interests": ["..."],
  "preferences": {{
    "cultural": ["..."],
    "food": ["..."],
    "activities": ["..."],
    "atmosphere": ["..."]
  }},
  "keywords": ["..."],
  "travelStyle": "budget|mid-range|luxury",
  "duration": 5
}}

"duration" is the number of days, 5 when the message does not say.
Example: "I love BTS, Studio Ghibli, and ramen" gives interests ["BTS", "Studio Ghibli", "ramen"], cultural ["K-pop", "anime"], food ["Japanese cuisine", "ramen"].
Answer with JSON only."#
    )
}

pub fn itinerary_prompt(
    interests: &UserInterests,
    recommendations: &Recommendations,
    budget: u64,
    start_date: NaiveDate,
) -> String {
    let interests_json = serde_json::to_string(interests).unwrap_or_else(|_| "{}".to_string());
    let recommendations_json =
        serde_json::to_string(recommendations).unwrap_or_else(|_| "{}".to_string());
    let days = interests.trip_days();
    let start = start_date.format("%Y-%m-%d");

    format!(
        r#"Plan a day-by-day trip from the traveller's interests and the taste-aligned recommendations below.

User Interests: {interests_json}
Budget: ${budget}
Recommendations: {recommendations_json}

Answer with a single JSON object of this shape:
{{
  "id": "unique-trip-id",
  "destination": "City, Country",
  "duration": {days},
  "mapCenter": {{"lat": 0.0, "lng": 0.0}},
  "preferences": ["..."],
  "costBreakdown": {{
    "accommodation": 0, "food": 0, "transport": 0, "activities": 0, "total": 0
  }},
  "itinerary": [
    {{
      "day": 1,
      "date": "YYYY-MM-DD",
      "totalCost": 0,
      "activities": [
        {{
          "id": "activity-id",
          "time": "HH:MM AM/PM",
          "title": "...",
          "description": "...",
          "location": "...",
          "coordinates": {{"lat": 0.0, "lng": 0.0}},
          "cost": 0,
          "type": "attraction|restaurant|transport|accommodation",
          "rating": 5
        }}
      ]
    }}
  ]
}}

Rules:
- Real cities and real coordinates.
- The total stays within the budget.
- 6 to 8 activities per day across morning, afternoon and evening.
- Refer to the traveller's preferences in the descriptions.
- Day 1 is {start}.
- Answer with JSON only."#
    )
}

pub fn suggestions_prompt(message: &str) -> String {
    format!(
        r#"Suggest 3 to 5 real destinations for this travel wish: "{message}"

Answer with a JSON array of objects of this shape:
[
  {{
    "id": "slug-id",
    "name": "City Name",
    "country": "Country",
    "description": "...",
    "image": "https://images.pexels.com/photos/XXXX.jpg",
    "highlights": ["..."],
    "estimatedCost": 0,
    "duration": "5-7 days",
    "coordinates": {{"lat": 0.0, "lng": 0.0}},
    "matchScore": 80
  }}
]

matchScore is between 70 and 95. Answer with JSON only."#
    )
}

/// Fill the fields the rest of the app relies on when the model left them out.
pub fn normalize_plan(mut value: Value, default_days: u32, now_millis: i64) -> Result<Value, GeminiError> {
    let plan = value
        .as_object_mut()
        .ok_or_else(|| GeminiError::ParseError("travel plan is not a JSON object".to_string()))?;

    let has_id = plan
        .get("id")
        .and_then(Value::as_str)
        .map(|id| !id.trim().is_empty())
        .unwrap_or(false);
    if !has_id {
        plan.insert("id".to_string(), json!(format!("trip-{}", now_millis)));
    }

    if plan.get("mapCenter").map_or(true, Value::is_null) {
        let (lat, lng) = DEFAULT_MAP_CENTER;
        plan.insert("mapCenter".to_string(), json!({ "lat": lat, "lng": lng }));
    }

    if plan.get("duration").map_or(true, Value::is_null) {
        plan.insert("duration".to_string(), json!(default_days));
    }

    Ok(value)
}

#[derive(Clone, Debug)]
pub struct GeminiService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GeminiService {
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        if config.api_key.is_none() {
            log::warn!("GEMINI_API_KEY missing; interest parsing will use the local fallback");
        }

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Parse a travel wish into structured interests. Never fails: any
    /// problem yields [`UserInterests::from_message`].
    pub async fn parse_user_interests(&self, message: &str) -> UserInterests {
        match self.try_parse_user_interests(message).await {
            Ok(interests) => interests,
            Err(err) => {
                log::warn!("Error parsing user interests, using fallback: {}", err);
                UserInterests::from_message(message)
            }
        }
    }

    async fn try_parse_user_interests(&self, message: &str) -> Result<UserInterests, GeminiError> {
        let text = self.generate_content(&interests_prompt(message)).await?;
        parse_model_json(&text)
    }

    pub async fn generate_itinerary(
        &self,
        interests: &UserInterests,
        recommendations: &Recommendations,
        budget: u64,
    ) -> Result<TravelPlan, GeminiError> {
        let now = Utc::now();
        let tomorrow = now.date_naive() + ChronoDuration::days(1);
        let prompt = itinerary_prompt(interests, recommendations, budget, tomorrow);

        let text = self.generate_content(&prompt).await?;
        let raw: Value = parse_model_json(&text)?;
        let normalized = normalize_plan(raw, interests.trip_days(), now.timestamp_millis())?;
        let plan: TravelPlan = serde_json::from_value(normalized)?;

        log::info!(
            "Generated travel plan '{}' for {} ({} days, {} activities, ${} in activities)",
            plan.id,
            plan.destination,
            plan.duration,
            plan.activity_count(),
            plan.activities_cost()
        );
        Ok(plan)
    }

    /// Destination ideas for a free-text wish; empty on any failure.
    pub async fn travel_suggestions(&self, message: &str) -> Vec<Destination> {
        let result: Result<Vec<Destination>, GeminiError> = async {
            let text = self.generate_content(&suggestions_prompt(message)).await?;
            parse_model_json(&text)
        }
        .await;

        match result {
            Ok(mut destinations) => {
                for destination in destinations.iter_mut().filter(|d| d.id.is_empty()) {
                    destination.id = slugify(&destination.name);
                }
                destinations
            }
            Err(err) => {
                log::warn!("Error getting travel suggestions: {}", err);
                Vec::new()
            }
        }
    }

    async fn generate_content(&self, prompt: &str) -> Result<String, GeminiError> {
        let api_key = self.api_key.as_ref().ok_or(GeminiError::MissingApiKey)?;
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GeminiError::ResponseError(format!(
                "generateContent failed with status {}: {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::ResponseError(format!("Failed to parse response: {}", e)))?;

        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GeminiError::ResponseError("model returned no text".to_string()));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n[1, 2]\n```\n"), "[1, 2]");
        assert_eq!(strip_code_fences("  {\"plain\": true} "), "{\"plain\": true}");
    }

    #[test]
    fn test_parse_model_json_reads_fenced_interests() {
        let text = "```json\n{\"interests\": [\"surfing\"], \"travelStyle\": \"budget\"}\n```";
        let interests: UserInterests = parse_model_json(text).unwrap();
        assert_eq!(interests.interests, vec!["surfing"]);
    }

    #[test]
    fn test_normalize_plan_fills_missing_fields() {
        let raw = json!({"destination": "Seoul, South Korea", "itinerary": []});
        let value = normalize_plan(raw, 4, 1_700_000_000_000).unwrap();
        assert_eq!(value["id"], "trip-1700000000000");
        assert_eq!(value["mapCenter"]["lat"], 35.6762);
        assert_eq!(value["mapCenter"]["lng"], 139.6503);
        assert_eq!(value["duration"], 4);
    }

    #[test]
    fn test_normalize_plan_keeps_model_values() {
        let raw = json!({
            "id": "seoul-kpop",
            "destination": "Seoul, South Korea",
            "duration": 3,
            "mapCenter": {"lat": 37.5665, "lng": 126.978}
        });
        let value = normalize_plan(raw, 5, 0).unwrap();
        assert_eq!(value["id"], "seoul-kpop");
        assert_eq!(value["mapCenter"]["lat"], 37.5665);
        assert_eq!(value["duration"], 3);
    }

    #[test]
    fn test_normalize_plan_rejects_non_objects() {
        assert!(matches!(
            normalize_plan(json!([1, 2]), 5, 0),
            Err(GeminiError::ParseError(_))
        ));
    }

    #[test]
    fn test_itinerary_prompt_carries_inputs() {
        let mut interests = UserInterests::from_message("street food and jazz");
        interests.duration = Some(4);
        let start = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let prompt = itinerary_prompt(&interests, &Recommendations::default(), 1800, start);

        assert!(prompt.contains("Budget: $1800"));
        assert!(prompt.contains("\"duration\": 4"));
        assert!(prompt.contains("Day 1 is 2025-03-02"));
        assert!(prompt.contains("street food and jazz"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Chiang Mai, Thailand"), "chiang-mai-thailand");
        assert_eq!(slugify("  Reykjavík "), "reykjavík");
    }

    #[actix_rt::test]
    async fn test_missing_key_uses_fallbacks() {
        let service = GeminiService::new(&GeminiConfig {
            api_key: None,
            base_url: "http://127.0.0.1:9".to_string(),
            model: "gemini-2.5-flash".to_string(),
        })
        .unwrap();

        let interests = service.parse_user_interests("quiet mountain villages").await;
        assert_eq!(interests, UserInterests::from_message("quiet mountain villages"));
        assert!(service.travel_suggestions("anything").await.is_empty());
        assert!(matches!(
            service
                .generate_itinerary(&interests, &Recommendations::default(), 2500)
                .await,
            Err(GeminiError::MissingApiKey)
        ));
    }
}
