use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{destination::Destination, travel_plan::TravelPlan};

/// Persistence seam for destination cards and travel plans.
#[async_trait]
pub trait TravelStore: Send + Sync {
    async fn list_destinations(&self) -> Result<Vec<Destination>, StoreError>;

    async fn count_destinations(&self) -> Result<u64, StoreError>;

    async fn insert_destinations(&self, destinations: &[Destination]) -> Result<(), StoreError>;

    /// Plans are keyed by their `id` field, which for stored plans is the
    /// slug of the destination they belong to.
    async fn find_travel_plan(&self, id: &str) -> Result<Option<TravelPlan>, StoreError>;

    /// Insert or replace the plan with the same `id`.
    async fn save_travel_plan(&self, plan: &TravelPlan) -> Result<(), StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
