use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use super::{Catalog, check_input, fetch, fetch_referenced, remove};
use crate::{
    entities::{movie, movie_shot},
    error::CatalogResult,
    models::NewMovieShot,
};

const ENTITY: &str = "movie shot";

impl Catalog {
    pub async fn add_shot(&self, input: NewMovieShot) -> CatalogResult<movie_shot::Model> {
        check_input(ENTITY, &input)?;
        fetch_referenced::<movie::Entity, _>(&self.db, ENTITY, "movie", input.movie_id).await?;

        let created = movie_shot::ActiveModel {
            title: Set(input.title),
            description: Set(input.description),
            image: Set(input.image),
            movie_id: Set(input.movie_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::debug!(id = created.id, movie_id = created.movie_id, "added movie shot");
        Ok(created)
    }

    pub async fn shot(&self, id: i32) -> CatalogResult<movie_shot::Model> {
        fetch::<movie_shot::Entity, _>(&self.db, ENTITY, id).await
    }

    /// Stills of a movie; empty for a movie that no longer exists.
    pub async fn shots_of(&self, movie_id: i32) -> CatalogResult<Vec<movie_shot::Model>> {
        Ok(movie_shot::Entity::find()
            .filter(movie_shot::Column::MovieId.eq(movie_id))
            .order_by_asc(movie_shot::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn update_shot(
        &self,
        id: i32,
        input: NewMovieShot,
    ) -> CatalogResult<movie_shot::Model> {
        check_input(ENTITY, &input)?;
        let existing = self.shot(id).await?;
        if existing.movie_id != input.movie_id {
            fetch_referenced::<movie::Entity, _>(&self.db, ENTITY, "movie", input.movie_id)
                .await?;
        }

        let mut model: movie_shot::ActiveModel = existing.into();

        model.title = Set(input.title);
        model.description = Set(input.description);
        model.image = Set(input.image);
        model.movie_id = Set(input.movie_id);

        Ok(model.update(&self.db).await?)
    }

    pub async fn delete_shot(&self, id: i32) -> CatalogResult<()> {
        remove::<movie_shot::Entity, _>(&self.db, ENTITY, id).await
    }
}
