mod common;

use assert_matches::assert_matches;
use movie_catalog::{CatalogError, models::NewMovieShot};

use common::*;

#[tokio::test]
async fn duplicate_slugs_are_rejected_per_table() {
    let catalog = catalog().await;

    category(&catalog, "Drama", "drama").await;
    let err = catalog.create_category(new_category("Drama again", "drama")).await.unwrap_err();
    assert_matches!(
        err,
        CatalogError::UniquenessViolation { entity: "category", field: "url", ref value }
            if value == "drama"
    );

    // Slugs are unique per table, not across tables.
    genre(&catalog, "Drama", "drama").await;
    let err = catalog.create_genre(new_genre("Drama", "drama")).await.unwrap_err();
    assert_matches!(err, CatalogError::UniquenessViolation { entity: "genre", .. });

    movie(&catalog, "X", "x").await;
    let err = catalog.create_movie(new_movie("Another X", "x")).await.unwrap_err();
    assert_matches!(err, CatalogError::UniquenessViolation { entity: "movie", .. });
}

#[tokio::test]
async fn update_keeps_slugs_unique() {
    let catalog = catalog().await;
    category(&catalog, "Drama", "drama").await;
    let comedy = category(&catalog, "Comedy", "comedy").await;

    let err =
        catalog.update_category(comedy.id, new_category("Comedy", "drama")).await.unwrap_err();
    assert_matches!(err, CatalogError::UniquenessViolation { .. });

    let renamed =
        catalog.update_category(comedy.id, new_category("Comedies", "comedies")).await.unwrap();
    assert_eq!(renamed.url, "comedies");
    assert_eq!(catalog.category_by_url("comedies").await.unwrap().name, "Comedies");
}

#[tokio::test]
async fn invalid_fields_fail_validation() {
    let catalog = catalog().await;

    let err = catalog.create_category(new_category("Bad", "not a slug")).await.unwrap_err();
    assert_matches!(err, CatalogError::Validation { entity: "category", .. });

    let mut input = new_movie("Broke", "broke");
    input.budget = -5;
    let err = catalog.create_movie(input).await.unwrap_err();
    assert_matches!(err, CatalogError::Validation { entity: "movie", .. });

    let mut input = new_movie("", "untitled");
    input.poster = "/abs/poster.jpg".to_string();
    assert_matches!(catalog.create_movie(input).await, Err(CatalogError::Validation { .. }));

    let err = catalog.create_rating_star(6).await.unwrap_err();
    assert_matches!(err, CatalogError::Validation { entity: "rating star", .. });
}

#[tokio::test]
async fn lookups_report_not_found() {
    let catalog = catalog().await;

    assert_matches!(catalog.movie(42).await, Err(CatalogError::NotFound { entity: "movie", .. }));
    assert_matches!(catalog.movie_by_url("missing").await, Err(CatalogError::NotFound { .. }));
    assert_matches!(catalog.genre_by_url("missing").await, Err(CatalogError::NotFound { .. }));
    assert_matches!(catalog.delete_actor(7).await, Err(CatalogError::NotFound { .. }));
    assert_matches!(
        catalog.update_category(3, new_category("A", "a")).await,
        Err(CatalogError::NotFound { .. })
    );
}

#[tokio::test]
async fn references_must_exist() {
    let catalog = catalog().await;

    let mut input = new_movie("Orphan", "orphan");
    input.category_id = Some(99);
    let err = catalog.create_movie(input).await.unwrap_err();
    assert_matches!(
        err,
        CatalogError::ReferentialIntegrity { entity: "movie", target: "category", id: 99 }
    );

    let mut input = new_movie("Cast", "cast");
    input.actors = vec![5];
    assert_matches!(
        catalog.create_movie(input).await,
        Err(CatalogError::ReferentialIntegrity { target: "actor", id: 5, .. })
    );
    // The failed transaction left nothing behind.
    assert_matches!(catalog.movie_by_url("cast").await, Err(CatalogError::NotFound { .. }));

    let shot = NewMovieShot {
        title: "Still".to_string(),
        description: "A still".to_string(),
        image: "movie_shots/still.jpg".to_string(),
        movie_id: 1,
    };
    assert_matches!(
        catalog.add_shot(shot).await,
        Err(CatalogError::ReferentialIntegrity { entity: "movie shot", target: "movie", id: 1 })
    );
}
