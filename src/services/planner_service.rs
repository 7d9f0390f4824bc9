use serde::Serialize;

use crate::db::TravelStore;
use crate::models::{
    interests::UserInterests, recommendations::Recommendations, travel_plan::TravelPlan,
};
use crate::services::gemini_service::{GeminiError, GeminiService};
use crate::services::qloo_service::QlooService;

#[derive(Debug, Serialize, Clone)]
pub struct PlannedTrip {
    pub interests: UserInterests,
    pub recommendations: Recommendations,
    pub plan: TravelPlan,
}

/// Free text in, itinerary out: interests, then taste recommendations, then
/// generation. Each stage runs once, in order.
#[derive(Clone, Debug)]
pub struct TripPlanner {
    gemini: GeminiService,
    qloo: QlooService,
}

impl TripPlanner {
    pub fn new(gemini: GeminiService, qloo: QlooService) -> Self {
        Self { gemini, qloo }
    }

    pub async fn plan(
        &self,
        message: &str,
        budget: u64,
        store: &dyn TravelStore,
    ) -> Result<PlannedTrip, GeminiError> {
        let interests = self.gemini.parse_user_interests(message).await;
        log::info!(
            "Parsed {} interests and {} keywords",
            interests.interests.len(),
            interests.keywords.len()
        );

        let recommendations = self.qloo.get_recommendations(&interests).await;
        log::info!(
            "Got {} destination, {} restaurant and {} attraction recommendations",
            recommendations.destinations.len(),
            recommendations.restaurants.len(),
            recommendations.attractions.len()
        );

        let plan = self
            .gemini
            .generate_itinerary(&interests, &recommendations, budget)
            .await?;

        // The trip is still returned when it could not be stored
        if let Err(err) = store.save_travel_plan(&plan).await {
            log::error!("Failed to store generated plan '{}': {}", plan.id, err);
        }

        Ok(PlannedTrip {
            interests,
            recommendations,
            plan,
        })
    }
}
