use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::{Catalog, check_input, fetch, fetch_referenced, remove};
use crate::{
    entities::{movie, rating, rating_star},
    error::{CatalogError, CatalogResult},
    models::{MovieScore, NewRating, StarValue},
};

const STAR: &str = "rating star";
const RATING: &str = "rating";

fn star_value(value: i16) -> CatalogResult<StarValue> {
    StarValue::from_value(value).ok_or_else(|| {
        CatalogError::validation(
            STAR,
            format!("value {value} is outside {}..={}", StarValue::MIN, StarValue::MAX),
        )
    })
}

impl Catalog {
    pub async fn create_rating_star(&self, value: i16) -> CatalogResult<rating_star::Model> {
        let value = star_value(value)?;

        rating_star::ActiveModel { value: Set(value.get()), ..Default::default() }
            .insert(&self.db)
            .await
            .map_err(|e| CatalogError::from_unique(e, STAR, "value", value.get()))
    }

    /// Makes sure one star exists for every value from 1 to 5.
    pub async fn seed_rating_stars(&self) -> CatalogResult<Vec<rating_star::Model>> {
        let existing: Vec<i16> =
            self.rating_stars().await?.into_iter().map(|star| star.value).collect();

        for value in StarValue::all().filter(|v| !existing.contains(&v.get())) {
            self.create_rating_star(value.get()).await?;
            tracing::debug!(value = value.get(), "seeded rating star");
        }

        self.rating_stars().await
    }

    pub async fn rating_stars(&self) -> CatalogResult<Vec<rating_star::Model>> {
        Ok(rating_star::Entity::find()
            .order_by_asc(rating_star::Column::Value)
            .all(&self.db)
            .await?)
    }

    pub async fn rating_star_by_id(&self, id: i32) -> CatalogResult<rating_star::Model> {
        fetch::<rating_star::Entity, _>(&self.db, STAR, id).await
    }

    /// Changes a star's value; ratings given with it follow the new value.
    pub async fn update_rating_star(
        &self,
        id: i32,
        value: i16,
    ) -> CatalogResult<rating_star::Model> {
        let value = star_value(value)?;

        let mut model: rating_star::ActiveModel = self.rating_star_by_id(id).await?.into();
        model.value = Set(value.get());
        model
            .update(&self.db)
            .await
            .map_err(|e| CatalogError::from_unique(e, STAR, "value", value.get()))
    }

    pub async fn rating_star(&self, value: StarValue) -> CatalogResult<rating_star::Model> {
        rating_star::Entity::find()
            .filter(rating_star::Column::Value.eq(value.get()))
            .one(&self.db)
            .await?
            .ok_or_else(|| CatalogError::not_found(STAR, value.get()))
    }

    /// Removes the star and every rating given with it.
    pub async fn delete_rating_star(&self, id: i32) -> CatalogResult<()> {
        remove::<rating_star::Entity, _>(&self.db, STAR, id).await
    }

    pub async fn rate_movie(&self, input: NewRating) -> CatalogResult<rating::Model> {
        check_input(RATING, &input)?;
        fetch_referenced::<rating_star::Entity, _>(&self.db, RATING, STAR, input.star_id).await?;
        fetch_referenced::<movie::Entity, _>(&self.db, RATING, "movie", input.movie_id).await?;

        let created = rating::ActiveModel {
            ip: Set(input.ip),
            star_id: Set(input.star_id),
            movie_id: Set(input.movie_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::debug!(id = created.id, movie_id = created.movie_id, "rated movie");
        Ok(created)
    }

    pub async fn rating(&self, id: i32) -> CatalogResult<rating::Model> {
        fetch::<rating::Entity, _>(&self.db, RATING, id).await
    }

    /// Every rating in the catalogue, oldest first.
    pub async fn ratings(&self) -> CatalogResult<Vec<rating::Model>> {
        Ok(rating::Entity::find().order_by_asc(rating::Column::Id).all(&self.db).await?)
    }

    pub async fn update_rating(&self, id: i32, input: NewRating) -> CatalogResult<rating::Model> {
        check_input(RATING, &input)?;

        let txn = self.db.begin().await?;
        let existing = fetch::<rating::Entity, _>(&txn, RATING, id).await?;
        fetch_referenced::<rating_star::Entity, _>(&txn, RATING, STAR, input.star_id).await?;
        fetch_referenced::<movie::Entity, _>(&txn, RATING, "movie", input.movie_id).await?;

        let mut model: rating::ActiveModel = existing.into();
        model.ip = Set(input.ip);
        model.star_id = Set(input.star_id);
        model.movie_id = Set(input.movie_id);
        let updated = model.update(&txn).await?;
        txn.commit().await?;

        Ok(updated)
    }

    pub async fn ratings_of(&self, movie_id: i32) -> CatalogResult<Vec<rating::Model>> {
        Ok(rating::Entity::find()
            .filter(rating::Column::MovieId.eq(movie_id))
            .order_by_asc(rating::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn movie_score(&self, movie_id: i32) -> CatalogResult<MovieScore> {
        let rows = rating::Entity::find()
            .filter(rating::Column::MovieId.eq(movie_id))
            .find_also_related(rating_star::Entity)
            .all(&self.db)
            .await?;

        let values: Vec<i16> =
            rows.into_iter().filter_map(|(_, star)| star.map(|s| s.value)).collect();
        Ok(MovieScore::from_values(&values))
    }

    /// `"{star} - {movie title}"`.
    pub async fn rating_label(&self, id: i32) -> CatalogResult<String> {
        let rating = self.rating(id).await?;
        let star = fetch::<rating_star::Entity, _>(&self.db, STAR, rating.star_id).await?;
        let movie = self.movie(rating.movie_id).await?;
        Ok(format!("{star} - {movie}"))
    }

    pub async fn delete_rating(&self, id: i32) -> CatalogResult<()> {
        remove::<rating::Entity, _>(&self.db, RATING, id).await
    }
}
