use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::time::Duration;

use crate::config::QlooConfig;
use crate::models::interests::UserInterests;
use crate::models::recommendations::{RecommendedEntity, Recommendations};

const REQUEST_TIMEOUT_SECS: u64 = 15;
const MAX_POSITIVE_TERMS: usize = 5;

#[derive(Debug, Serialize)]
pub struct RecommendationRequest {
    #[serde(rename = "type")]
    pub category: String,
    pub input: TasteInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoFilter>,
    pub limit: u32,
}

#[derive(Debug, Serialize)]
pub struct TasteInput {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GeoFilter {
    pub country: String,
}

#[derive(Debug, Serialize)]
struct VenueSearchRequest<'a> {
    query: &'a str,
    location: &'a str,
    limit: u32,
}

#[derive(Debug, Deserialize)]
struct ResultsResponse {
    #[serde(default)]
    results: Option<Vec<RecommendedEntity>>,
}

#[derive(Debug)]
pub enum QlooError {
    MissingApiKey,
    HttpError(reqwest::Error),
    ResponseError(String),
}

impl fmt::Display for QlooError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QlooError::MissingApiKey => write!(f, "QLOO_API_KEY not set"),
            QlooError::HttpError(err) => write!(f, "HTTP error: {}", err),
            QlooError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl Error for QlooError {}

impl From<reqwest::Error> for QlooError {
    fn from(err: reqwest::Error) -> Self {
        QlooError::HttpError(err)
    }
}

fn first_terms<'a>(groups: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    groups
        .into_iter()
        .filter(|term| !term.trim().is_empty())
        .take(MAX_POSITIVE_TERMS)
        .cloned()
        .collect()
}

fn mentions(values: &[String], needle: &str) -> bool {
    values.iter().any(|value| value.to_lowercase().contains(needle))
}

/// Rule-based recommendations used when the taste API is not configured.
pub fn fallback_recommendations(interests: &UserInterests) -> Recommendations {
    let listed = &interests.interests;
    let cultural = &interests.preferences.cultural;
    let food = &interests.preferences.food;

    let mut destinations = Vec::new();
    let mut restaurants = Vec::new();

    if mentions(listed, "bts") || mentions(cultural, "k-pop") {
        destinations.push(RecommendedEntity::city(
            "seoul-korea",
            "Seoul",
            "South Korea",
            "K-pop capital and cultural hub",
        ));
    }

    if mentions(listed, "ghibli") || mentions(cultural, "anime") {
        destinations.push(RecommendedEntity::city(
            "tokyo-japan",
            "Tokyo",
            "Japan",
            "Anime and manga paradise",
        ));
    }

    if mentions(food, "ramen") || mentions(listed, "ramen") {
        restaurants.push(RecommendedEntity::restaurant(
            "ramen-spots",
            "Authentic Ramen Houses",
            "Japanese",
        ));
    }

    if destinations.is_empty() {
        destinations = vec![
            RecommendedEntity::city(
                "paris-france",
                "Paris",
                "France",
                "Cultural capital with world-class museums and cuisine",
            ),
            RecommendedEntity::city(
                "tokyo-japan",
                "Tokyo",
                "Japan",
                "Perfect blend of traditional and modern culture",
            ),
        ];
    }

    Recommendations {
        destinations,
        restaurants,
        attractions: Vec::new(),
        experiences: Vec::new(),
    }
}

#[derive(Clone, Debug)]
pub struct QlooService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl QlooService {
    pub fn new(config: &QlooConfig) -> Result<Self, QlooError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Destination, dining and entertainment recommendations for the
    /// interests. A failing category is left empty; without an API key the
    /// rule-based fallback is returned.
    pub async fn get_recommendations(&self, interests: &UserInterests) -> Recommendations {
        if !self.is_configured() {
            log::warn!("Qloo API key not found, using fallback recommendations");
            return fallback_recommendations(interests);
        }

        let terms = interests.search_terms();

        let travel = RecommendationRequest {
            category: "travel".to_string(),
            input: TasteInput {
                positive: first_terms(&terms),
                negative: Vec::new(),
            },
            geo: Some(GeoFilter {
                country: "global".to_string(),
            }),
            limit: 10,
        };
        let dining = RecommendationRequest {
            category: "dining".to_string(),
            input: TasteInput {
                positive: first_terms(interests.preferences.food.iter().chain(terms.iter())),
                negative: Vec::new(),
            },
            geo: None,
            limit: 15,
        };
        let entertainment = RecommendationRequest {
            category: "entertainment".to_string(),
            input: TasteInput {
                positive: first_terms(interests.preferences.cultural.iter().chain(terms.iter())),
                negative: Vec::new(),
            },
            geo: None,
            limit: 10,
        };

        let (destinations, restaurants, attractions) = futures::join!(
            self.recommend(&travel),
            self.recommend(&dining),
            self.recommend(&entertainment)
        );

        Recommendations {
            destinations: self.or_empty(&travel.category, destinations),
            restaurants: self.or_empty(&dining.category, restaurants),
            attractions: self.or_empty(&entertainment.category, attractions),
            experiences: Vec::new(),
        }
    }

    /// Free-text venue search; empty when unconfigured or on failure.
    pub async fn search_venues(&self, query: &str, location: &str) -> Vec<RecommendedEntity> {
        if !self.is_configured() {
            return Vec::new();
        }

        let request = VenueSearchRequest {
            query,
            location,
            limit: 10,
        };
        match self.post_for_results("search", &request).await {
            Ok(results) => results,
            Err(err) => {
                log::error!("Error searching Qloo venues: {}", err);
                Vec::new()
            }
        }
    }

    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RecommendedEntity>, QlooError> {
        self.post_for_results("recommendations", request).await
    }

    fn or_empty(
        &self,
        category: &str,
        result: Result<Vec<RecommendedEntity>, QlooError>,
    ) -> Vec<RecommendedEntity> {
        match result {
            Ok(results) => results,
            Err(err) => {
                log::warn!("Qloo {} recommendations failed: {}", category, err);
                Vec::new()
            }
        }
    }

    async fn post_for_results<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Vec<RecommendedEntity>, QlooError> {
        let api_key = self.api_key.as_ref().ok_or(QlooError::MissingApiKey)?;
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QlooError::ResponseError(format!(
                "request to /{} failed with status {}",
                path, status
            )));
        }

        let parsed: ResultsResponse = response
            .json()
            .await
            .map_err(|e| QlooError::ResponseError(format!("Failed to parse response: {}", e)))?;
        Ok(parsed.results.unwrap_or_default())
    }
}
