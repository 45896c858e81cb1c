use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "challenge")]
pub struct Model {
    /// UUIDv7 for attempts created by the game; imported documents may carry
    /// any unique string.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub provider_id: String,
    #[sea_orm(belongs_to, from = "provider_id", to = "id")]
    pub provider: HasOne<super::provider::Entity>,

    pub deployment_id: String,
    #[sea_orm(belongs_to, from = "deployment_id", to = "id")]
    pub deployment: HasOne<super::deployment::Entity>,

    pub is_done: bool,
    pub video_url: Option<String>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
