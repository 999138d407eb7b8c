use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use super::{Catalog, check_input, fetch, remove};
use crate::{entities::actor, error::CatalogResult, models::NewActor};

const ENTITY: &str = "actor";

impl Catalog {
    pub async fn create_actor(&self, input: NewActor) -> CatalogResult<actor::Model> {
        check_input(ENTITY, &input)?;

        let created = actor::ActiveModel {
            name: Set(input.name),
            age: Set(input.age),
            description: Set(input.description),
            image: Set(input.image),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::debug!(id = created.id, name = %created.name, "created actor");
        Ok(created)
    }

    pub async fn actor(&self, id: i32) -> CatalogResult<actor::Model> {
        fetch::<actor::Entity, _>(&self.db, ENTITY, id).await
    }

    /// Everyone whose name contains `needle`, or everyone when it is empty.
    pub async fn actors(&self, needle: &str) -> CatalogResult<Vec<actor::Model>> {
        let mut query = actor::Entity::find();
        let needle = needle.trim();
        if !needle.is_empty() {
            query = query.filter(actor::Column::Name.contains(needle));
        }
        Ok(query.order_by_asc(actor::Column::Name).all(&self.db).await?)
    }

    pub async fn update_actor(&self, id: i32, input: NewActor) -> CatalogResult<actor::Model> {
        check_input(ENTITY, &input)?;

        let mut model: actor::ActiveModel = self.actor(id).await?.into();
        model.name = Set(input.name);
        model.age = Set(input.age);
        model.description = Set(input.description);
        model.image = Set(input.image);

        Ok(model.update(&self.db).await?)
    }

    /// Drops the person from every cast and director list as well.
    pub async fn delete_actor(&self, id: i32) -> CatalogResult<()> {
        remove::<actor::Entity, _>(&self.db, ENTITY, id).await
    }
}
