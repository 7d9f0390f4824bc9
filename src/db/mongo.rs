use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection, Database,
};
use std::sync::Arc;
use std::time::Duration;

use crate::db::store::TravelStore;
use crate::error::StoreError;
use crate::models::{destination::Destination, travel_plan::TravelPlan};

const DEFAULT_DATABASE: &str = "travel-planner";
const DESTINATIONS: &str = "destinations";
const TRAVEL_PLANS: &str = "travelplans";

pub async fn create_mongo_client(uri: &str) -> Result<Arc<Client>, mongodb::error::Error> {
    log::info!("Connecting to MongoDB");

    let mut client_options = ClientOptions::parse(uri).await?;

    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client = Client::with_options(client_options)?;

    // A failed ping is not fatal: the driver reconnects lazily
    let database = client
        .default_database()
        .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
    match database.run_command(doc! {"ping": 1}).await {
        Ok(_) => log::info!("Connected to MongoDB database '{}'", database.name()),
        Err(e) => {
            log::warn!("Connected to MongoDB but ping test failed: {}", e);
            log::warn!("The API may still work, but some functionality might be impaired");
        }
    }

    Ok(Arc::new(client))
}

#[derive(Clone, Debug)]
pub struct MongoTravelStore {
    database: Database,
}

impl MongoTravelStore {
    /// Uses the database named in the connection string, or `travel-planner`.
    pub fn new(client: &Client) -> Self {
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
        Self { database }
    }

    fn destinations(&self) -> Collection<Destination> {
        self.database.collection(DESTINATIONS)
    }

    fn travel_plans(&self) -> Collection<TravelPlan> {
        self.database.collection(TRAVEL_PLANS)
    }
}

#[async_trait]
impl TravelStore for MongoTravelStore {
    async fn list_destinations(&self) -> Result<Vec<Destination>, StoreError> {
        let cursor = self.destinations().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count_destinations(&self) -> Result<u64, StoreError> {
        Ok(self.destinations().count_documents(doc! {}).await?)
    }

    async fn insert_destinations(&self, destinations: &[Destination]) -> Result<(), StoreError> {
        if destinations.is_empty() {
            return Ok(());
        }
        self.destinations().insert_many(destinations).await?;
        Ok(())
    }

    async fn find_travel_plan(&self, id: &str) -> Result<Option<TravelPlan>, StoreError> {
        Ok(self.travel_plans().find_one(doc! { "id": id }).await?)
    }

    async fn save_travel_plan(&self, plan: &TravelPlan) -> Result<(), StoreError> {
        // `_id` is immutable, so the replacement never carries one
        let mut replacement = plan.clone();
        replacement.object_id = None;

        self.travel_plans()
            .replace_one(doc! { "id": plan.id.as_str() }, &replacement)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! {"ping": 1}).await?;
        Ok(())
    }
}
