#![allow(dead_code)]

use actix_web::{web, App};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use globetrotter_api::{
    app::AppState,
    config::AppConfig,
    db::{
        seed::{seed_destinations, seed_travel_plans},
        TravelStore,
    },
    error::StoreError,
    models::{destination::Destination, travel_plan::TravelPlan},
    routes,
};

/// Store kept in memory, pre-filled with the bundled seed data.
#[derive(Default)]
pub struct InMemoryTravelStore {
    destinations: Mutex<Vec<Destination>>,
    plans: Mutex<HashMap<String, TravelPlan>>,
    failing: AtomicBool,
}

impl InMemoryTravelStore {
    pub fn seeded() -> Self {
        let store = Self::default();
        *store.destinations.lock().unwrap() = seed_destinations().unwrap();
        *store.plans.lock().unwrap() = seed_travel_plans()
            .unwrap()
            .into_iter()
            .map(|plan| (plan.id.clone(), plan))
            .collect();
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn plan(&self, id: &str) -> Option<TravelPlan> {
        self.plans.lock().unwrap().get(id).cloned()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            let err = serde_json::from_str::<()>("store offline").unwrap_err();
            return Err(StoreError::Seed(err));
        }
        Ok(())
    }
}

#[async_trait]
impl TravelStore for InMemoryTravelStore {
    async fn list_destinations(&self) -> Result<Vec<Destination>, StoreError> {
        self.check()?;
        Ok(self.destinations.lock().unwrap().clone())
    }

    async fn count_destinations(&self) -> Result<u64, StoreError> {
        self.check()?;
        Ok(self.destinations.lock().unwrap().len() as u64)
    }

    async fn insert_destinations(&self, destinations: &[Destination]) -> Result<(), StoreError> {
        self.check()?;
        self.destinations
            .lock()
            .unwrap()
            .extend(destinations.iter().cloned());
        Ok(())
    }

    async fn find_travel_plan(&self, id: &str) -> Result<Option<TravelPlan>, StoreError> {
        self.check()?;
        Ok(self.plan(id))
    }

    async fn save_travel_plan(&self, plan: &TravelPlan) -> Result<(), StoreError> {
        self.check()?;
        self.plans
            .lock()
            .unwrap()
            .insert(plan.id.clone(), plan.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }
}

pub struct TestApp {
    pub store: Arc<InMemoryTravelStore>,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self::with_store(config, InMemoryTravelStore::seeded())
    }

    pub fn with_store(config: AppConfig, store: InMemoryTravelStore) -> Self {
        let store = Arc::new(store);
        let state = AppState::new(config, store.clone()).unwrap();
        Self { store, state }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .configure(routes::configure)
    }
}

/// Config pointing both AI providers at a mock server.
pub fn mocked_config(base_url: &str, gemini_key: Option<&str>, qloo_key: Option<&str>) -> AppConfig {
    let mut config = AppConfig::default();
    config.gemini.base_url = base_url.to_string();
    config.gemini.api_key = gemini_key.map(str::to_string);
    config.qloo.base_url = base_url.to_string();
    config.qloo.api_key = qloo_key.map(str::to_string);
    config
}

/// A `generateContent` response whose only candidate says `text`.
pub fn gemini_reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            {
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }
        ]
    })
}

pub fn generated_plan_json() -> serde_json::Value {
    serde_json::json!({
        "destination": "Seoul, South Korea",
        "duration": 2,
        "preferences": ["K-pop", "ramen"],
        "costBreakdown": {
            "accommodation": 800, "food": 250, "transport": 90,
            "activities": 160, "total": 1300
        },
        "itinerary": [
            {
                "day": 1, "date": "2025-05-01", "totalCost": 95,
                "activities": [
                    {"id": "s-1", "time": "10:00 AM", "title": "HYBE Insight",
                     "description": "Museum of the label behind BTS", "location": "Yongsan",
                     "coordinates": {"lat": 37.5245, "lng": 126.9646},
                     "cost": 25, "type": "attraction", "rating": 4.5},
                    {"id": "s-2", "time": "1:00 PM", "title": "Ramen street",
                     "description": "Korean ramyeon tasting", "location": "Hongdae",
                     "cost": 70, "type": "restaurant"}
                ]
            },
            {
                "day": 2, "date": "2025-05-02", "totalCost": 65,
                "activities": [
                    {"id": "s-3", "time": "7:00 PM", "title": "K-pop dance class",
                     "description": "Learn a choreography", "location": "Gangnam",
                     "cost": 65, "type": "attraction", "rating": 5}
                ]
            }
        ]
    })
}
