use actix_web::web;

pub mod chat;
pub mod destination;
pub mod health;
pub mod itinerary;
pub mod planner;

/// Registers every endpoint. The two root paths are the ones the
/// front end has always called; everything newer lives under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .route("/destination", web::get().to(destination::get_all))
        .route(
            "/itinerary/{destination_id}",
            web::get().to(itinerary::get_by_destination),
        )
        .service(
            web::scope("/api")
                .route(
                    "/destinations/recommended",
                    web::get().to(destination::recommended),
                )
                .service(
                    web::scope("/chat")
                        .route("", web::post().to(chat::send_message))
                        .route("/select", web::post().to(chat::select_destination)),
                )
                .route("/plan", web::post().to(planner::plan_trip))
                .route("/interests", web::post().to(planner::parse_interests))
                .route("/suggestions", web::post().to(planner::suggestions))
                .route("/venues/search", web::get().to(planner::search_venues)),
        );
}
