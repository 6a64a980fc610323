use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub year: Option<i32>,
    pub image_url: Option<String>,
    pub description: String,
    pub rating: Option<String>,
    pub review: Option<String>,
    pub imdb_rating: Option<String>,
    pub rotten_rating: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
