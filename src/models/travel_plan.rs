use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::destination::Coordinates;
use crate::models::object_id::{
    deserialize_optional_object_id, serialize_optional_object_id_as_hex,
};
use crate::models::numeric::{
    deserialize_lenient_f64, deserialize_optional_lenient_f64, deserialize_rounded_u32,
};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Attraction,
    Restaurant,
    Transport,
    Accommodation,
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Activity {
    #[serde(default)]
    pub id: String,
    pub time: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(deserialize_with = "deserialize_lenient_f64", default)]
    pub cost: f64,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    #[serde(
        deserialize_with = "deserialize_optional_lenient_f64",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    #[serde(deserialize_with = "deserialize_rounded_u32")]
    pub day: u32,
    pub date: String,
    #[serde(deserialize_with = "deserialize_lenient_f64", default)]
    pub total_cost: f64,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct CostBreakdown {
    #[serde(deserialize_with = "deserialize_lenient_f64", default)]
    pub accommodation: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64", default)]
    pub food: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64", default)]
    pub transport: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64", default)]
    pub activities: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64", default)]
    pub total: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TravelPlan {
    #[serde(
        rename = "_id",
        serialize_with = "serialize_optional_object_id_as_hex",
        deserialize_with = "deserialize_optional_object_id",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub object_id: Option<ObjectId>,
    pub id: String,
    pub destination: String,
    #[serde(deserialize_with = "deserialize_rounded_u32")]
    pub duration: u32,
    pub map_center: Coordinates,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub cost_breakdown: CostBreakdown,
    #[serde(default)]
    pub itinerary: Vec<DayPlan>,
}

impl TravelPlan {
    pub fn activity_count(&self) -> usize {
        self.itinerary.iter().map(|day| day.activities.len()).sum()
    }

    /// Sum of every activity cost across the itinerary.
    pub fn activities_cost(&self) -> f64 {
        self.itinerary
            .iter()
            .flat_map(|day| day.activities.iter())
            .map(|activity| activity.cost)
            .sum()
    }
}
