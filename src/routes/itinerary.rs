use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::app::AppState;

/*
    /itinerary/{destination_id}
*/
pub async fn get_by_destination(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> impl Responder {
    let destination_id = path.into_inner();
    let destination_id = destination_id.trim();
    if destination_id.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "destinationId is required" }));
    }

    log::debug!("Fetching itinerary for destination '{}'", destination_id);

    match state.store.find_travel_plan(destination_id).await {
        Ok(Some(plan)) => HttpResponse::Ok().json(plan),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "Itinerary not found" })),
        Err(err) => {
            log::error!("Error fetching itinerary: {}", err);
            HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
        }
    }
}
