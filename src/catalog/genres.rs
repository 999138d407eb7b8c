use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use super::{Catalog, check_input, fetch, remove};
use crate::{
    entities::genre,
    error::{CatalogError, CatalogResult},
    models::NewGenre,
};

const ENTITY: &str = "genre";

impl Catalog {
    pub async fn create_genre(&self, input: NewGenre) -> CatalogResult<genre::Model> {
        check_input(ENTITY, &input)?;
        let url = input.url.clone();

        let model = genre::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            url: Set(input.url),
            ..Default::default()
        };
        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| CatalogError::from_unique(e, ENTITY, "url", &url))?;

        tracing::debug!(id = created.id, url = %created.url, "created genre");
        Ok(created)
    }

    pub async fn genre(&self, id: i32) -> CatalogResult<genre::Model> {
        fetch::<genre::Entity, _>(&self.db, ENTITY, id).await
    }

    pub async fn genre_by_url(&self, url: &str) -> CatalogResult<genre::Model> {
        genre::Entity::find()
            .filter(genre::Column::Url.eq(url))
            .one(&self.db)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, url))
    }

    pub async fn genres(&self) -> CatalogResult<Vec<genre::Model>> {
        Ok(genre::Entity::find().order_by_asc(genre::Column::Name).all(&self.db).await?)
    }

    pub async fn update_genre(&self, id: i32, input: NewGenre) -> CatalogResult<genre::Model> {
        check_input(ENTITY, &input)?;
        let url = input.url.clone();

        let mut model: genre::ActiveModel = self.genre(id).await?.into();
        model.name = Set(input.name);
        model.description = Set(input.description);
        model.url = Set(input.url);

        model.update(&self.db).await.map_err(|e| CatalogError::from_unique(e, ENTITY, "url", &url))
    }

    /// Removes the genre from every movie that carried it.
    pub async fn delete_genre(&self, id: i32) -> CatalogResult<()> {
        remove::<genre::Entity, _>(&self.db, ENTITY, id).await
    }
}
