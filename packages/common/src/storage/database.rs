use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use tracing::{debug, info};

use super::error::StorageError;
use super::traits::ChallengeStore;
use crate::catalog::{Deployment, Provider};
use crate::challenge::{Challenge, StoredChallenge};
use crate::document::Document;
use crate::entity::{challenge, deployment, provider};

/// Relational store: one table per collection, with foreign keys from
/// `challenge` to `provider` and `deployment`.
#[derive(Clone)]
pub struct DatabaseStore {
    db: DatabaseConnection,
}

impl DatabaseStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn stored_challenges(&self) -> Result<Vec<StoredChallenge>, DbErr> {
        let models = challenge::Entity::find()
            .order_by_asc(challenge::Column::CreatedAt)
            .order_by_asc(challenge::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(StoredChallenge::from).collect())
    }
}

impl From<provider::Model> for Provider {
    fn from(m: provider::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            color: m.color,
        }
    }
}

impl From<deployment::Model> for Deployment {
    fn from(m: deployment::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

impl From<challenge::Model> for StoredChallenge {
    fn from(m: challenge::Model) -> Self {
        Self {
            id: m.id,
            provider_id: m.provider_id,
            deployment_id: m.deployment_id,
            is_done: m.is_done,
            created_at: m.created_at,
            video_url: m.video_url,
        }
    }
}

/// Insert every row of `document`, keeping list order in `position`.
pub(crate) async fn insert_document<C: ConnectionTrait>(
    conn: &C,
    document: &Document,
) -> Result<(), DbErr> {
    for (position, p) in document.providers.iter().enumerate() {
        let model = provider::ActiveModel {
            id: Set(p.id.clone()),
            name: Set(p.name.clone()),
            color: Set(p.color.clone()),
            position: Set(position as i32),
            ..Default::default()
        };
        provider::Entity::insert(model)
            .exec_without_returning(conn)
            .await?;
    }

    for (position, d) in document.deployments.iter().enumerate() {
        let model = deployment::ActiveModel {
            id: Set(d.id.clone()),
            name: Set(d.name.clone()),
            position: Set(position as i32),
            ..Default::default()
        };
        deployment::Entity::insert(model)
            .exec_without_returning(conn)
            .await?;
    }

    for c in &document.challenges {
        challenge::Entity::insert(challenge_row(c))
            .exec_without_returning(conn)
            .await?;
    }

    Ok(())
}

fn challenge_row(c: &StoredChallenge) -> challenge::ActiveModel {
    challenge::ActiveModel {
        id: Set(c.id.clone()),
        provider_id: Set(c.provider_id.clone()),
        deployment_id: Set(c.deployment_id.clone()),
        is_done: Set(c.is_done),
        video_url: Set(c.video_url.clone()),
        created_at: Set(c.created_at),
        ..Default::default()
    }
}

#[async_trait]
impl ChallengeStore for DatabaseStore {
    fn backend(&self) -> &'static str {
        "database"
    }

    async fn list_providers(&self) -> Result<Vec<Provider>, StorageError> {
        let models = provider::Entity::find()
            .order_by_asc(provider::Column::Position)
            .order_by_asc(provider::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Provider::from).collect())
    }

    async fn list_deployments(&self) -> Result<Vec<Deployment>, StorageError> {
        let models = deployment::Entity::find()
            .order_by_asc(deployment::Column::Position)
            .order_by_asc(deployment::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Deployment::from).collect())
    }

    async fn list_challenges(&self) -> Result<Vec<Challenge>, StorageError> {
        let providers = self.list_providers().await?;
        let deployments = self.list_deployments().await?;
        let challenges = self.stored_challenges().await?;

        Ok(challenges
            .iter()
            .map(|c| c.resolve(&providers, &deployments))
            .collect())
    }

    async fn create_challenge(
        &self,
        provider_id: &str,
        deployment_id: &str,
    ) -> Result<Option<Challenge>, StorageError> {
        let Some(provider) = provider::Entity::find_by_id(provider_id.to_string())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        let Some(deployment) = deployment::Entity::find_by_id(deployment_id.to_string())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let stored = StoredChallenge::new(provider_id, deployment_id);
        challenge::Entity::insert(challenge_row(&stored))
            .exec_without_returning(&self.db)
            .await?;

        debug!(challenge_id = %stored.id, provider_id, deployment_id, "Challenge inserted");
        Ok(Some(stored.resolve(
            &[Provider::from(provider)],
            &[Deployment::from(deployment)],
        )))
    }

    async fn set_challenge_done(
        &self,
        challenge_id: &str,
        done: bool,
    ) -> Result<bool, StorageError> {
        let result = challenge::Entity::update_many()
            .col_expr(
                challenge::Column::IsDone,
                sea_orm::sea_query::Expr::value(done),
            )
            .filter(challenge::Column::Id.eq(challenge_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn export_document(&self) -> Result<Document, StorageError> {
        Ok(Document {
            providers: self.list_providers().await?,
            deployments: self.list_deployments().await?,
            challenges: self.stored_challenges().await?,
        })
    }

    async fn import_document(&self, document: Document) -> Result<(), StorageError> {
        document.validate()?;
        document.validate_references()?;

        let txn = self.db.begin().await?;
        challenge::Entity::delete_many().exec(&txn).await?;
        deployment::Entity::delete_many().exec(&txn).await?;
        provider::Entity::delete_many().exec(&txn).await?;
        insert_document(&txn, &document).await?;
        txn.commit().await?;

        info!(
            providers = document.providers.len(),
            deployments = document.deployments.len(),
            challenges = document.challenges.len(),
            "Imported game document"
        );
        Ok(())
    }
}
