use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub message: String,
    pub budget: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct VenueQuery {
    pub query: Option<String>,
    pub location: Option<String>,
}

fn required_message(message: &str) -> ApiResult<&str> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput("message is required".to_string()));
    }
    Ok(trimmed)
}

/*
    /api/plan
*/
pub async fn plan_trip(
    state: web::Data<AppState>,
    input: web::Json<PlanRequest>,
) -> ApiResult<HttpResponse> {
    let request = input.into_inner();
    let message = required_message(&request.message)?;
    let budget = request.budget.unwrap_or(state.config.default_budget);

    let trip = state
        .planner
        .plan(message, budget, state.store.as_ref())
        .await
        .map_err(ApiError::Generation)?;
    Ok(HttpResponse::Ok().json(trip))
}

/*
    /api/interests
*/
pub async fn parse_interests(
    state: web::Data<AppState>,
    input: web::Json<MessageRequest>,
) -> ApiResult<HttpResponse> {
    let request = input.into_inner();
    let message = required_message(&request.message)?;
    let interests = state.gemini.parse_user_interests(message).await;
    Ok(HttpResponse::Ok().json(interests))
}

/*
    /api/suggestions
*/
pub async fn suggestions(
    state: web::Data<AppState>,
    input: web::Json<MessageRequest>,
) -> ApiResult<HttpResponse> {
    let request = input.into_inner();
    let message = required_message(&request.message)?;
    let destinations = state.gemini.travel_suggestions(message).await;
    Ok(HttpResponse::Ok().json(destinations))
}

/*
    /api/venues/search?query=&location=
*/
pub async fn search_venues(
    state: web::Data<AppState>,
    params: web::Query<VenueQuery>,
) -> ApiResult<HttpResponse> {
    let params = params.into_inner();
    let query = params.query.unwrap_or_default();
    if query.trim().is_empty() {
        return Err(ApiError::InvalidInput("query is required".to_string()));
    }

    let venues = state
        .qloo
        .search_venues(query.trim(), params.location.as_deref().unwrap_or(""))
        .await;
    Ok(HttpResponse::Ok().json(venues))
}
