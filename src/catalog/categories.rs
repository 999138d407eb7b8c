use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use super::{Catalog, check_input, fetch, remove};
use crate::{
    entities::category,
    error::{CatalogError, CatalogResult},
    models::NewCategory,
};

const ENTITY: &str = "category";

impl Catalog {
    pub async fn create_category(&self, input: NewCategory) -> CatalogResult<category::Model> {
        check_input(ENTITY, &input)?;
        let url = input.url.clone();

        let model = category::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            url: Set(input.url),
            ..Default::default()
        };
        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| CatalogError::from_unique(e, ENTITY, "url", &url))?;

        tracing::debug!(id = created.id, url = %created.url, "created category");
        Ok(created)
    }

    pub async fn category(&self, id: i32) -> CatalogResult<category::Model> {
        fetch::<category::Entity, _>(&self.db, ENTITY, id).await
    }

    pub async fn category_by_url(&self, url: &str) -> CatalogResult<category::Model> {
        category::Entity::find()
            .filter(category::Column::Url.eq(url))
            .one(&self.db)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, url))
    }

    pub async fn categories(&self) -> CatalogResult<Vec<category::Model>> {
        Ok(category::Entity::find().order_by_asc(category::Column::Name).all(&self.db).await?)
    }

    pub async fn update_category(
        &self,
        id: i32,
        input: NewCategory,
    ) -> CatalogResult<category::Model> {
        check_input(ENTITY, &input)?;
        let url = input.url.clone();

        let mut model: category::ActiveModel = self.category(id).await?.into();
        model.name = Set(input.name);
        model.description = Set(input.description);
        model.url = Set(input.url);

        model.update(&self.db).await.map_err(|e| CatalogError::from_unique(e, ENTITY, "url", &url))
    }

    /// Movies in the category keep existing with their category cleared.
    pub async fn delete_category(&self, id: i32) -> CatalogResult<()> {
        remove::<category::Entity, _>(&self.db, ENTITY, id).await
    }
}
