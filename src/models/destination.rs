use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::numeric::deserialize_lenient_f64;
use crate::models::object_id::{
    deserialize_optional_object_id, serialize_optional_object_id_as_hex,
};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Trip length as stored on a destination card: the seed data uses a day
/// count while suggested destinations carry a label such as "5-7 days".
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum TripLength {
    Days(f64),
    Label(String),
}

impl Default for TripLength {
    fn default() -> Self {
        TripLength::Days(5.0)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    #[serde(
        rename = "_id",
        serialize_with = "serialize_optional_object_id_as_hex",
        deserialize_with = "deserialize_optional_object_id",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub object_id: Option<ObjectId>,
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub estimated_cost: f64,
    #[serde(default)]
    pub duration: TripLength,
    pub coordinates: Coordinates,
    #[serde(deserialize_with = "deserialize_lenient_f64", default)]
    pub match_score: f64,
}

impl Destination {
    /// Slug used to pair a destination with its stored travel plan.
    /// Records written without a slug fall back to their Mongo id.
    pub fn key(&self) -> String {
        if !self.id.is_empty() {
            return self.id.clone();
        }
        self.object_id
            .map(|oid| oid.to_hex())
            .unwrap_or_default()
    }
}
