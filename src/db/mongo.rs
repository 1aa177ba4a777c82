use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, Database, IndexModel};

use crate::models::destination::Destination;
use crate::models::itinerary::Itinerary;
use crate::models::user::UserTraveler;

const DATABASE_NAME: &str = "travelasia_db";

/// The database is unreachable; the app is serving in demo mode.
#[derive(Debug, Clone, Copy)]
pub struct DbUnavailable;

impl fmt::Display for DbUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "database unavailable (demo mode)")
    }
}

impl std::error::Error for DbUnavailable {}

/// Access point for the three collections. Holds no client at all when the
/// startup connection failed, so every accessor goes through the single
/// demo-mode check in `database()`.
#[derive(Clone)]
pub struct Store {
    client: Option<Arc<Client>>,
}

impl Store {
    /// Connect to MongoDB, verifying the connection with a ping. A failed
    /// parse, connect, or ping yields a demo-mode store instead of an error.
    pub async fn connect(uri: &str) -> Self {
        log::info!("Connecting to MongoDB...");

        let mut client_options = match ClientOptions::parse(uri).await {
            Ok(options) => options,
            Err(err) => {
                log::error!("Failed to parse MongoDB URI: {}", err);
                return Self::demo();
            }
        };

        client_options.connect_timeout = Some(Duration::from_secs(10));
        client_options.server_selection_timeout = Some(Duration::from_secs(10));
        client_options.max_pool_size = Some(10);
        client_options.min_pool_size = Some(1);

        let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
        client_options.server_api = Some(server_api);

        let client = match Client::with_options(client_options) {
            Ok(client) => client,
            Err(err) => {
                log::error!("Failed to create MongoDB client: {}", err);
                return Self::demo();
            }
        };

        match client
            .database(DATABASE_NAME)
            .run_command(doc! { "ping": 1 })
            .await
        {
            Ok(_) => {
                log::info!("Connected to MongoDB and verified with ping");
                Self {
                    client: Some(Arc::new(client)),
                }
            }
            Err(err) => {
                log::error!("MongoDB ping failed: {}", err);
                log::warn!("Running in demo mode; nothing will be persisted");
                Self::demo()
            }
        }
    }

    /// A store with no backing database. Reads serve empty data, writes are
    /// rejected with a demo-mode warning.
    pub fn demo() -> Self {
        Self { client: None }
    }

    pub fn is_demo(&self) -> bool {
        self.client.is_none()
    }

    fn database(&self) -> Result<Database, DbUnavailable> {
        match &self.client {
            Some(client) => Ok(client.database(DATABASE_NAME)),
            None => Err(DbUnavailable),
        }
    }

    pub fn users(&self) -> Result<Collection<UserTraveler>, DbUnavailable> {
        Ok(self.database()?.collection("users"))
    }

    pub fn destinations(&self) -> Result<Collection<Destination>, DbUnavailable> {
        Ok(self.database()?.collection("destinations"))
    }

    pub fn itineraries(&self) -> Result<Collection<Itinerary>, DbUnavailable> {
        Ok(self.database()?.collection("itineraries"))
    }

    /// Create the indexes the app relies on: unique user email, plus lookup
    /// indexes on itinerary owner and creation time. Safe to run on every
    /// startup; a failure is logged and the app continues.
    pub async fn ensure_indexes(&self) {
        let users = match self.users() {
            Ok(collection) => collection,
            Err(_) => return,
        };

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        if let Err(err) = users.create_index(email_index).await {
            log::error!("Failed to create unique email index: {}", err);
        }

        let itineraries = match self.itineraries() {
            Ok(collection) => collection,
            Err(_) => return,
        };

        let owner_index = IndexModel::builder().keys(doc! { "user_id": 1 }).build();
        if let Err(err) = itineraries.create_index(owner_index).await {
            log::error!("Failed to create itinerary owner index: {}", err);
        }

        let created_index = IndexModel::builder().keys(doc! { "created_at": -1 }).build();
        if let Err(err) = itineraries.create_index(created_index).await {
            log::error!("Failed to create itinerary created_at index: {}", err);
        }
    }
}
