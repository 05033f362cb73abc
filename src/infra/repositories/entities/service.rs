//! Provider-owned service database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Service;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub provider_id: Uuid,
    pub service_type_id: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Service {
    fn from(model: Model) -> Self {
        Service {
            id: model.id,
            title: model.title,
            description: model.description,
            price: model.price,
            provider_id: model.provider_id,
            service_type_id: model.service_type_id,
            created_at: model.created_at,
        }
    }
}
