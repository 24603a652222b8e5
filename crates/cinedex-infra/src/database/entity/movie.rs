//! Movie entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub title: String,
    pub release_year: i32,
    #[sea_orm(column_type = "String(StringLen::N(500))", nullable)]
    pub poster_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for cinedex_core::domain::Movie {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            release_year: model.release_year,
            poster_url: model.poster_url,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<cinedex_core::domain::Movie> for ActiveModel {
    fn from(movie: cinedex_core::domain::Movie) -> Self {
        Self {
            id: Set(movie.id),
            title: Set(movie.title),
            release_year: Set(movie.release_year),
            poster_url: Set(movie.poster_url),
            created_at: Set(movie.created_at.into()),
            updated_at: Set(movie.updated_at.into()),
        }
    }
}
