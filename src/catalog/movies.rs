use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

use super::{Catalog, check_input, dedup_ids, ensure_all_exist, fetch, fetch_referenced, remove};
use crate::{
    entities::{actor, category, genre, movie, movie_actor, movie_director, movie_genre},
    error::{CatalogError, CatalogResult},
    models::{MovieFilter, NewMovie},
};

const ENTITY: &str = "movie";

/// Association lists split off a `NewMovie`; written after the movie row.
struct Links {
    directors: Vec<i32>,
    actors: Vec<i32>,
    genres: Vec<i32>,
}

impl Links {
    async fn write<C: ConnectionTrait>(&self, conn: &C, movie_id: i32) -> CatalogResult<()> {
        replace_directors(conn, movie_id, &self.directors).await?;
        replace_cast(conn, movie_id, &self.actors).await?;
        replace_genres(conn, movie_id, &self.genres).await
    }
}

fn assign(mut model: movie::ActiveModel, input: NewMovie) -> (movie::ActiveModel, Links) {
    model.title = Set(input.title);
    model.tagline = Set(input.tagline);
    model.description = Set(input.description);
    model.poster = Set(input.poster);
    model.year = Set(input.year);
    model.country = Set(input.country);
    model.world_premiere = Set(input.world_premiere.to_string());
    model.budget = Set(input.budget);
    model.fees_in_usa = Set(input.fees_in_usa);
    model.fees_in_world = Set(input.fees_in_world);
    model.category_id = Set(input.category_id);
    model.url = Set(input.url);
    model.draft = Set(input.draft);

    let links = Links { directors: input.directors, actors: input.actors, genres: input.genres };
    (model, links)
}

impl Catalog {
    /// Inserts the movie and its director, cast and genre links in one
    /// transaction.
    pub async fn create_movie(&self, input: NewMovie) -> CatalogResult<movie::Model> {
        check_input(ENTITY, &input)?;
        let url = input.url.clone();

        let txn = self.db.begin().await?;
        if let Some(category_id) = input.category_id {
            fetch_referenced::<category::Entity, _>(&txn, ENTITY, "category", category_id).await?;
        }

        let (model, links) = assign(<movie::ActiveModel as Default>::default(), input);
        let created = model
            .insert(&txn)
            .await
            .map_err(|e| CatalogError::from_unique(e, ENTITY, "url", &url))?;
        links.write(&txn, created.id).await?;
        txn.commit().await?;

        tracing::debug!(
            id = created.id,
            url = %created.url,
            draft = created.draft,
            "created movie"
        );
        Ok(created)
    }

    pub async fn movie(&self, id: i32) -> CatalogResult<movie::Model> {
        fetch::<movie::Entity, _>(&self.db, ENTITY, id).await
    }

    pub async fn movie_by_url(&self, url: &str) -> CatalogResult<movie::Model> {
        movie::Entity::find()
            .filter(movie::Column::Url.eq(url))
            .one(&self.db)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, url))
    }

    /// Newest first, then by title.
    pub async fn list_movies(&self, filter: &MovieFilter) -> CatalogResult<Vec<movie::Model>> {
        let mut query = movie::Entity::find();
        if !filter.include_drafts {
            query = query.filter(movie::Column::Draft.eq(false));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(movie::Column::CategoryId.eq(category_id));
        }
        if let Some(year) = filter.year {
            query = query.filter(movie::Column::Year.eq(year));
        }
        if let Some(genre_id) = filter.genre_id {
            query = query
                .join(JoinType::InnerJoin, movie::Relation::MovieGenre.def())
                .filter(movie_genre::Column::GenreId.eq(genre_id));
        }

        Ok(query
            .order_by_desc(movie::Column::Year)
            .order_by_asc(movie::Column::Title)
            .all(&self.db)
            .await?)
    }

    /// Replaces every editable column and all three association lists.
    pub async fn update_movie(&self, id: i32, input: NewMovie) -> CatalogResult<movie::Model> {
        check_input(ENTITY, &input)?;
        let url = input.url.clone();

        let txn = self.db.begin().await?;
        let existing = fetch::<movie::Entity, _>(&txn, ENTITY, id).await?;
        if let Some(category_id) = input.category_id {
            fetch_referenced::<category::Entity, _>(&txn, ENTITY, "category", category_id).await?;
        }

        let (model, links) = assign(existing.into(), input);
        let updated = model
            .update(&txn)
            .await
            .map_err(|e| CatalogError::from_unique(e, ENTITY, "url", &url))?;
        links.write(&txn, updated.id).await?;
        txn.commit().await?;

        Ok(updated)
    }

    pub async fn set_movie_draft(&self, id: i32, draft: bool) -> CatalogResult<movie::Model> {
        let txn = self.db.begin().await?;
        let existing = fetch::<movie::Entity, _>(&txn, ENTITY, id).await?;
        let mut model: movie::ActiveModel = existing.into();
        model.draft = Set(draft);
        let updated = model.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Removes the movie with its stills, ratings, reviews and links.
    pub async fn delete_movie(&self, id: i32) -> CatalogResult<()> {
        remove::<movie::Entity, _>(&self.db, ENTITY, id).await
    }

    pub async fn movie_category(&self, movie_id: i32) -> CatalogResult<Option<category::Model>> {
        let movie = self.movie(movie_id).await?;
        Ok(movie.find_related(category::Entity).one(&self.db).await?)
    }

    pub async fn set_directors(&self, movie_id: i32, actor_ids: &[i32]) -> CatalogResult<()> {
        let txn = self.db.begin().await?;
        fetch::<movie::Entity, _>(&txn, ENTITY, movie_id).await?;
        replace_directors(&txn, movie_id, actor_ids).await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn set_cast(&self, movie_id: i32, actor_ids: &[i32]) -> CatalogResult<()> {
        let txn = self.db.begin().await?;
        fetch::<movie::Entity, _>(&txn, ENTITY, movie_id).await?;
        replace_cast(&txn, movie_id, actor_ids).await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn set_genres(&self, movie_id: i32, genre_ids: &[i32]) -> CatalogResult<()> {
        let txn = self.db.begin().await?;
        fetch::<movie::Entity, _>(&txn, ENTITY, movie_id).await?;
        replace_genres(&txn, movie_id, genre_ids).await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn directors_of(&self, movie_id: i32) -> CatalogResult<Vec<actor::Model>> {
        let movie = self.movie(movie_id).await?;
        Ok(movie
            .find_linked(movie::Directors)
            .order_by_asc(actor::Column::Name)
            .all(&self.db)
            .await?)
    }

    pub async fn cast_of(&self, movie_id: i32) -> CatalogResult<Vec<actor::Model>> {
        let movie = self.movie(movie_id).await?;
        Ok(movie.find_linked(movie::Cast).order_by_asc(actor::Column::Name).all(&self.db).await?)
    }

    pub async fn genres_of(&self, movie_id: i32) -> CatalogResult<Vec<genre::Model>> {
        let movie = self.movie(movie_id).await?;
        Ok(movie
            .find_related(genre::Entity)
            .order_by_asc(genre::Column::Name)
            .all(&self.db)
            .await?)
    }

    pub async fn movies_in_genre(&self, genre_id: i32) -> CatalogResult<Vec<movie::Model>> {
        let genre = self.genre(genre_id).await?;
        Ok(genre
            .find_related(movie::Entity)
            .order_by_asc(movie::Column::Title)
            .all(&self.db)
            .await?)
    }

    pub async fn movies_directed_by(&self, actor_id: i32) -> CatalogResult<Vec<movie::Model>> {
        let person = self.actor(actor_id).await?;
        Ok(person
            .find_linked(actor::DirectedMovies)
            .order_by_asc(movie::Column::Title)
            .all(&self.db)
            .await?)
    }

    pub async fn movies_starring(&self, actor_id: i32) -> CatalogResult<Vec<movie::Model>> {
        let person = self.actor(actor_id).await?;
        Ok(person
            .find_linked(actor::StarredMovies)
            .order_by_asc(movie::Column::Title)
            .all(&self.db)
            .await?)
    }
}

async fn replace_directors<C: ConnectionTrait>(
    conn: &C,
    movie_id: i32,
    actor_ids: &[i32],
) -> CatalogResult<()> {
    let actor_ids = dedup_ids(actor_ids);
    ensure_all_exist::<actor::Entity, _>(conn, actor::Column::Id, ENTITY, "actor", &actor_ids)
        .await?;

    movie_director::Entity::delete_many()
        .filter(movie_director::Column::MovieId.eq(movie_id))
        .exec(conn)
        .await?;
    if actor_ids.is_empty() {
        return Ok(());
    }

    let rows = actor_ids.into_iter().map(|actor_id| movie_director::ActiveModel {
        movie_id: Set(movie_id),
        actor_id: Set(actor_id),
    });
    movie_director::Entity::insert_many(rows).exec_without_returning(conn).await?;
    Ok(())
}

async fn replace_cast<C: ConnectionTrait>(
    conn: &C,
    movie_id: i32,
    actor_ids: &[i32],
) -> CatalogResult<()> {
    let actor_ids = dedup_ids(actor_ids);
    ensure_all_exist::<actor::Entity, _>(conn, actor::Column::Id, ENTITY, "actor", &actor_ids)
        .await?;

    movie_actor::Entity::delete_many()
        .filter(movie_actor::Column::MovieId.eq(movie_id))
        .exec(conn)
        .await?;
    if actor_ids.is_empty() {
        return Ok(());
    }

    let rows = actor_ids.into_iter().map(|actor_id| movie_actor::ActiveModel {
        movie_id: Set(movie_id),
        actor_id: Set(actor_id),
    });
    movie_actor::Entity::insert_many(rows).exec_without_returning(conn).await?;
    Ok(())
}

async fn replace_genres<C: ConnectionTrait>(
    conn: &C,
    movie_id: i32,
    genre_ids: &[i32],
) -> CatalogResult<()> {
    let genre_ids = dedup_ids(genre_ids);
    ensure_all_exist::<genre::Entity, _>(conn, genre::Column::Id, ENTITY, "genre", &genre_ids)
        .await?;

    movie_genre::Entity::delete_many()
        .filter(movie_genre::Column::MovieId.eq(movie_id))
        .exec(conn)
        .await?;
    if genre_ids.is_empty() {
        return Ok(());
    }

    let rows = genre_ids.into_iter().map(|genre_id| movie_genre::ActiveModel {
        movie_id: Set(movie_id),
        genre_id: Set(genre_id),
    });
    movie_genre::Entity::insert_many(rows).exec_without_returning(conn).await?;
    Ok(())
}
