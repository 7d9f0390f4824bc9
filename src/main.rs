use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use globetrotter_api::{
    app::{cors, AppState},
    config::AppConfig,
    db::{self, mongo::MongoTravelStore, TravelStore},
    routes,
};

fn invalid_setup(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let config = AppConfig::from_env();

    let client = db::mongo::create_mongo_client(&config.mongo_uri)
        .await
        .map_err(invalid_setup)?;
    let store: Arc<dyn TravelStore> = Arc::new(MongoTravelStore::new(&client));

    if config.seed_on_start {
        if let Err(err) = db::seed::seed_if_empty(store.as_ref()).await {
            log::error!("Seeding failed: {}", err);
        }
    }

    let state = AppState::new(config.clone(), store).map_err(invalid_setup)?;

    log::info!("Server is running on http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(&state.config))
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
