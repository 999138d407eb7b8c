use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::{Catalog, check_input, fetch, fetch_referenced, remove};
use crate::{
    entities::{movie, review},
    error::{CatalogError, CatalogResult},
    models::{NewReview, ReviewNode, build_review_thread},
};

const ENTITY: &str = "review";

impl Catalog {
    /// Adds a top-level review, or a reply when `parent_id` is set. A reply
    /// must be about the same movie as its parent.
    pub async fn add_review(&self, input: NewReview) -> CatalogResult<review::Model> {
        check_input(ENTITY, &input)?;
        fetch_referenced::<movie::Entity, _>(&self.db, ENTITY, "movie", input.movie_id).await?;
        if let Some(parent_id) = input.parent_id {
            check_parent(&self.db, parent_id, input.movie_id).await?;
        }

        let created = review::ActiveModel {
            email: Set(input.email),
            name: Set(input.name),
            text: Set(input.text),
            parent_id: Set(input.parent_id),
            movie_id: Set(input.movie_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::debug!(
            id = created.id,
            movie_id = created.movie_id,
            parent_id = ?created.parent_id,
            "added review"
        );
        Ok(created)
    }

    pub async fn review(&self, id: i32) -> CatalogResult<review::Model> {
        fetch::<review::Entity, _>(&self.db, ENTITY, id).await
    }

    /// Every review in the catalogue, oldest first.
    pub async fn reviews(&self) -> CatalogResult<Vec<review::Model>> {
        Ok(review::Entity::find().order_by_asc(review::Column::Id).all(&self.db).await?)
    }

    pub async fn replies_to(&self, review_id: i32) -> CatalogResult<Vec<review::Model>> {
        Ok(review::Entity::find()
            .filter(review::Column::ParentId.eq(review_id))
            .order_by_asc(review::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn review_thread(&self, movie_id: i32) -> CatalogResult<Vec<ReviewNode>> {
        let reviews = review::Entity::find()
            .filter(review::Column::MovieId.eq(movie_id))
            .all(&self.db)
            .await?;
        Ok(build_review_thread(reviews))
    }

    /// Edits a review in place. It may be re-parented within its movie but
    /// never under itself or one of its own replies.
    pub async fn update_review(&self, id: i32, input: NewReview) -> CatalogResult<review::Model> {
        check_input(ENTITY, &input)?;

        let txn = self.db.begin().await?;
        let existing = fetch::<review::Entity, _>(&txn, ENTITY, id).await?;
        if existing.movie_id != input.movie_id {
            return Err(CatalogError::validation(ENTITY, "a review cannot move to another movie"));
        }
        if let Some(parent_id) = input.parent_id.filter(|p| existing.parent_id != Some(*p)) {
            check_parent(&txn, parent_id, input.movie_id).await?;
            check_not_descendant(&txn, id, parent_id).await?;
        }

        let mut model: review::ActiveModel = existing.into();
        model.email = Set(input.email);
        model.name = Set(input.name);
        model.text = Set(input.text);
        model.parent_id = Set(input.parent_id);
        let updated = model.update(&txn).await?;
        txn.commit().await?;

        Ok(updated)
    }

    /// Deletes the review together with its whole reply tree.
    pub async fn delete_review(&self, id: i32) -> CatalogResult<()> {
        remove::<review::Entity, _>(&self.db, ENTITY, id).await
    }

    /// `"{name} - {movie title}"`.
    pub async fn review_label(&self, id: i32) -> CatalogResult<String> {
        let review = self.review(id).await?;
        let movie = self.movie(review.movie_id).await?;
        Ok(format!("{} - {}", review.name, movie))
    }
}

async fn check_parent<C: ConnectionTrait>(
    conn: &C,
    parent_id: i32,
    movie_id: i32,
) -> CatalogResult<()> {
    let parent =
        fetch_referenced::<review::Entity, _>(conn, ENTITY, "parent review", parent_id).await?;
    if parent.movie_id != movie_id {
        return Err(CatalogError::validation(
            ENTITY,
            format!("parent review {parent_id} belongs to another movie"),
        ));
    }
    Ok(())
}

async fn check_not_descendant<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    new_parent: i32,
) -> CatalogResult<()> {
    let mut cursor = Some(new_parent);
    while let Some(current) = cursor {
        if current == id {
            return Err(CatalogError::validation(
                ENTITY,
                "a review cannot reply to itself or its replies",
            ));
        }
        cursor = fetch::<review::Entity, _>(conn, ENTITY, current).await?.parent_id;
    }
    Ok(())
}
