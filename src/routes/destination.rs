use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::app::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendedQuery {
    wish: Option<String>,
    budget: Option<u64>,
    count: Option<usize>,
}

/*
    /destination
*/
pub async fn get_all(state: web::Data<AppState>) -> impl Responder {
    match state.store.list_destinations().await {
        Ok(destinations) => HttpResponse::Ok().json(destinations),
        Err(err) => {
            log::error!("Error fetching destinations: {}", err);
            HttpResponse::InternalServerError().json(json!({ "message": "Internal server error" }))
        }
    }
}

/*
    /api/destinations/recommended?wish=&budget=&count=
*/
pub async fn recommended(
    state: web::Data<AppState>,
    params: web::Query<RecommendedQuery>,
) -> impl Responder {
    let params = params.into_inner();
    let wish = params.wish.unwrap_or_default();
    let budget = params.budget.unwrap_or(state.config.default_budget);
    let count = params.count.unwrap_or(state.config.recommendation_count);

    match state.store.list_destinations().await {
        Ok(catalogue) => {
            let scored = state.scorer.recommend(&wish, budget as f64, count, catalogue);
            HttpResponse::Ok().json(scored)
        }
        Err(err) => {
            log::error!("Error fetching destinations: {}", err);
            HttpResponse::InternalServerError().json(json!({ "message": "Internal server error" }))
        }
    }
}
