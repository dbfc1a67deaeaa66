//! Persistence adapters and the start-up choice between them.

pub mod database;
pub mod mock;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::domain::repositories::{OfferRepository, RoomRepository, UserRepository};
use database::MongoStore;
use mock::JsonFileStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Mongo { url: String, database: String },
    MockFile { path: PathBuf },
}

impl StoreKind {
    pub fn label(&self) -> &'static str {
        match self {
            StoreKind::Mongo { .. } => "mongodb",
            StoreKind::MockFile { .. } => "mock",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // the URL may carry credentials
            StoreKind::Mongo { database, .. } => write!(f, "mongodb (database {})", database),
            StoreKind::MockFile { path } => write!(f, "mock file store at {}", path.display()),
        }
    }
}

/// One handle per entity, all backed by the same store.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub rooms: Arc<dyn RoomRepository>,
    pub offers: Arc<dyn OfferRepository>,
}

impl Repositories {
    fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository + RoomRepository + OfferRepository + 'static,
    {
        Self {
            users: store.clone(),
            rooms: store.clone(),
            offers: store,
        }
    }
}

pub async fn open_store(kind: &StoreKind) -> Result<Repositories> {
    info!("Opening {}", kind);
    match kind {
        StoreKind::Mongo { url, database } => {
            let store = MongoStore::connect(url, database).await?;
            database::ensure_indexes(store.database()).await?;
            Ok(Repositories::from_store(Arc::new(store)))
        }
        StoreKind::MockFile { path } => {
            let store = JsonFileStore::open(path).await?;
            Ok(Repositories::from_store(Arc::new(store)))
        }
    }
}
