//! Actors and directors share one table; the role is carried by the join
//! table a row is linked through.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "actor")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub age: i16,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Relative path under `actors/`.
    pub image: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_director::Entity")]
    MovieDirector,
    #[sea_orm(has_many = "super::movie_actor::Entity")]
    MovieActor,
}

/// Movies this person directed.
pub struct DirectedMovies;

impl Linked for DirectedMovies {
    type FromEntity = Entity;
    type ToEntity = super::movie::Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![
            super::movie_director::Relation::Actor.def().rev(),
            super::movie_director::Relation::Movie.def(),
        ]
    }
}

/// Movies this person appears in.
pub struct StarredMovies;

impl Linked for StarredMovies {
    type FromEntity = Entity;
    type ToEntity = super::movie::Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![
            super::movie_actor::Relation::Actor.def().rev(),
            super::movie_actor::Relation::Movie.def(),
        ]
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
