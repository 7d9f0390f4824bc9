use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A loosely typed recommendation entity. Fields the provider returns
/// beyond the known ones are kept as-is in `extra`.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RecommendedEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl RecommendedEntity {
    pub fn city(id: &str, name: &str, country: &str, description: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            name: name.to_string(),
            country: Some(country.to_string()),
            description: Some(description.to_string()),
            entity_type: Some("city".to_string()),
            ..Default::default()
        }
    }

    pub fn restaurant(id: &str, name: &str, cuisine: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            name: name.to_string(),
            entity_type: Some("restaurant".to_string()),
            cuisine: Some(cuisine.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Recommendations {
    #[serde(default)]
    pub destinations: Vec<RecommendedEntity>,
    #[serde(default)]
    pub restaurants: Vec<RecommendedEntity>,
    #[serde(default)]
    pub attractions: Vec<RecommendedEntity>,
    #[serde(default)]
    pub experiences: Vec<RecommendedEntity>,
}
