use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "provider")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,
    pub color: String, // "#RRGGBB"

    /// Wheel order; lists are returned sorted by it.
    #[sea_orm(default_value = 0)]
    pub position: i32,

    #[sea_orm(has_many)]
    pub challenges: HasMany<super::challenge::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
