mod error;
mod traits;

#[cfg(feature = "sea-orm")]
pub mod database;
pub mod filesystem;

use std::sync::Arc;

use tracing::info;

pub use error::StorageError;
pub use filesystem::LocalDocumentStore;
pub use traits::ChallengeStore;

use crate::config::{StoreBackend, StoreConfig};

/// Open the backend selected by `config`.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn ChallengeStore>, StorageError> {
    match config.backend {
        StoreBackend::Local => {
            let store = LocalDocumentStore::new(config.path.clone()).await?;
            info!(path = %config.path.display(), "Using local document store");
            Ok(Arc::new(store))
        }
        StoreBackend::Database => open_database(config).await,
    }
}

#[cfg(feature = "sea-orm")]
async fn open_database(config: &StoreConfig) -> Result<Arc<dyn ChallengeStore>, StorageError> {
    let db = crate::database::init_db(&config.database).await?;
    if config.seed {
        crate::database::seed_catalog(&db).await?;
    }
    info!("Using database store");
    Ok(Arc::new(database::DatabaseStore::new(db)))
}

#[cfg(not(feature = "sea-orm"))]
async fn open_database(_config: &StoreConfig) -> Result<Arc<dyn ChallengeStore>, StorageError> {
    Err(StorageError::Unsupported(
        "the database backend requires the `sea-orm` feature".into(),
    ))
}
