use std::time::Duration;

use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    TransactionTrait,
};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::document::Document;
use crate::entity::provider;
use crate::storage::database::insert_document;

/// Connect and make sure the `provider`, `deployment` and `challenge`
/// tables exist.
pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.clone());

    opt.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("common::entity::*")
        .sync(&db)
        .await?;

    Ok(db)
}

/// Seed the default catalog and sample challenges into an empty database.
///
/// Does nothing once any provider exists, so operator edits survive restarts.
pub async fn seed_catalog(db: &DatabaseConnection) -> Result<bool, DbErr> {
    if provider::Entity::find().count(db).await? > 0 {
        return Ok(false);
    }

    let document = Document::default_catalog();
    let txn = db.begin().await?;
    insert_document(&txn, &document).await?;
    txn.commit().await?;

    info!(
        providers = document.providers.len(),
        deployments = document.deployments.len(),
        challenges = document.challenges.len(),
        "Seeded default catalog"
    );
    Ok(true)
}
