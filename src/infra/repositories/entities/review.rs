//! Review database entity.

use sea_orm::entity::prelude::*;

use crate::domain::{Rating, Review};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// One review per booking, enforced by a unique index
    #[sea_orm(unique)]
    pub booking_id: Uuid,
    pub author_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Review {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let rating = Rating::try_from(model.rating)
            .map_err(|e| AppError::internal(format!("Stored review {}: {}", model.id, e)))?;

        Ok(Review {
            id: model.id,
            booking_id: model.booking_id,
            author_id: model.author_id,
            rating,
            comment: model.comment,
            created_at: model.created_at,
        })
    }
}
