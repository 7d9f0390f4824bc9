use actix_cors::Cors;
use actix_web::http::header;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::TravelStore;
use crate::services::{
    conversation_service::ConversationService,
    destination_scoring::DestinationScorer,
    gemini_service::{GeminiError, GeminiService},
    planner_service::TripPlanner,
    qloo_service::{QlooError, QlooService},
};

/// Shared handler state, cloned into every actix worker.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn TravelStore>,
    pub scorer: DestinationScorer,
    pub conversation: ConversationService,
    pub gemini: GeminiService,
    pub qloo: QlooService,
    pub planner: TripPlanner,
}

#[derive(thiserror::Error, Debug)]
pub enum StartupError {
    #[error("Gemini client: {0}")]
    Gemini(#[from] GeminiError),

    #[error("Qloo client: {0}")]
    Qloo(#[from] QlooError),
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn TravelStore>) -> Result<Self, StartupError> {
        let scorer = DestinationScorer::new();
        let gemini = GeminiService::new(&config.gemini)?;
        let qloo = QlooService::new(&config.qloo)?;

        Ok(Self {
            conversation: ConversationService::new(&config, scorer.clone()),
            planner: TripPlanner::new(gemini.clone(), qloo.clone()),
            scorer,
            gemini,
            qloo,
            store,
            config,
        })
    }
}

pub fn cors(config: &AppConfig) -> Cors {
    Cors::default()
        .allowed_origin(&config.cors_origin)
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .supports_credentials()
        .max_age(3600)
}
