use crate::db::store::TravelStore;
use crate::error::StoreError;
use crate::models::{destination::Destination, travel_plan::TravelPlan};

const DESTINATIONS_JSON: &str = include_str!("../../seed/destinations.json");
const TRAVEL_PLANS_JSON: &str = include_str!("../../seed/travel_plans.json");

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub destinations: usize,
    pub travel_plans: usize,
}

pub fn seed_destinations() -> Result<Vec<Destination>, StoreError> {
    Ok(serde_json::from_str(DESTINATIONS_JSON)?)
}

pub fn seed_travel_plans() -> Result<Vec<TravelPlan>, StoreError> {
    Ok(serde_json::from_str(TRAVEL_PLANS_JSON)?)
}

/// Fill an empty destination collection and add any bundled plan whose id
/// is not stored yet. Existing records are never overwritten.
pub async fn seed_if_empty(store: &dyn TravelStore) -> Result<SeedReport, StoreError> {
    let mut report = SeedReport::default();

    if store.count_destinations().await? == 0 {
        let destinations = seed_destinations()?;
        store.insert_destinations(&destinations).await?;
        report.destinations = destinations.len();
    }

    for plan in seed_travel_plans()? {
        if store.find_travel_plan(&plan.id).await?.is_none() {
            store.save_travel_plan(&plan).await?;
            report.travel_plans += 1;
        }
    }

    log::info!(
        "Seeded {} destinations and {} travel plans",
        report.destinations,
        report.travel_plans
    );
    Ok(report)
}
