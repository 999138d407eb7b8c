//! Create/read/update/delete over the catalogue tables.
//!
//! Cascades and the category set-null rule are declared on the foreign keys,
//! so deletes here are single statements and the database removes or
//! detaches dependents itself.

mod actors;
mod categories;
mod genres;
mod movies;
mod ratings;
mod reviews;
mod shots;

use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PrimaryKeyTrait, QueryFilter,
    QuerySelect,
};
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};

#[derive(Clone)]
pub struct Catalog {
    db: DatabaseConnection,
}

impl Catalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn check_input<T: Validate>(entity: &'static str, input: &T) -> CatalogResult<()> {
    input.validate().map_err(|e| CatalogError::validation(entity, e.to_string()))
}

/// Loads a row by primary key or reports `NotFound`.
async fn fetch<E, C>(conn: &C, entity: &'static str, id: i32) -> CatalogResult<E::Model>
where
    E: EntityTrait,
    C: ConnectionTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    E::find_by_id(id).one(conn).await?.ok_or_else(|| CatalogError::not_found(entity, id))
}

/// Like [`fetch`], but a missing row is a dangling reference from `entity`.
async fn fetch_referenced<E, C>(
    conn: &C,
    entity: &'static str,
    target: &'static str,
    id: i32,
) -> CatalogResult<E::Model>
where
    E: EntityTrait,
    C: ConnectionTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    E::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(CatalogError::ReferentialIntegrity { entity, target, id })
}

/// Checks that every id in `ids` names a row of `E`, whose integer key
/// column is `id_column`.
async fn ensure_all_exist<E, C>(
    conn: &C,
    id_column: E::Column,
    entity: &'static str,
    target: &'static str,
    ids: &[i32],
) -> CatalogResult<()>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(());
    }
    let found: Vec<i32> = E::find()
        .select_only()
        .column(id_column)
        .filter(id_column.is_in(ids.iter().copied()))
        .into_tuple()
        .all(conn)
        .await?;
    match ids.iter().find(|id| !found.contains(id)) {
        Some(&id) => Err(CatalogError::ReferentialIntegrity { entity, target, id }),
        None => Ok(()),
    }
}

/// Deletes a row by primary key; `NotFound` if nothing matched.
async fn remove<E, C>(conn: &C, entity: &'static str, id: i32) -> CatalogResult<()>
where
    E: EntityTrait,
    C: ConnectionTrait,
    i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    let result = E::delete_by_id(id).exec(conn).await?;
    if result.rows_affected == 0 {
        return Err(CatalogError::not_found(entity, id));
    }
    tracing::debug!(entity, id, "deleted");
    Ok(())
}

fn dedup_ids(ids: &[i32]) -> Vec<i32> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}
