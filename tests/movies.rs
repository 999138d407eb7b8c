mod common;

use assert_matches::assert_matches;
use movie_catalog::{CatalogError, models::MovieFilter};

use common::*;

#[tokio::test]
async fn movie_defaults_and_premiere_round_trip() {
    let catalog = catalog().await;
    let mut input = new_movie("X", "x");
    input.world_premiere = jiff::civil::date(1999, 3, 31);

    let movie = catalog.create_movie(input).await.unwrap();

    assert_eq!(movie.tagline, "");
    assert_eq!(movie.year, 2024);
    assert_eq!(movie.budget, 0);
    assert!(!movie.draft);
    assert_eq!(movie.world_premiere, "1999-03-31");
    assert_eq!(movie.premiere_date(), Some(jiff::civil::date(1999, 3, 31)));
    assert_eq!(movie.to_string(), "X");
}

#[tokio::test]
async fn directors_and_cast_are_separate_roles() {
    let catalog = catalog().await;
    let both = catalog.create_actor(new_actor("Both Roles")).await.unwrap();
    let lead = catalog.create_actor(new_actor("Lead")).await.unwrap();
    let drama = genre(&catalog, "Drama", "drama").await;
    let crime = genre(&catalog, "Crime", "crime").await;

    let mut input = new_movie("X", "x");
    input.directors = vec![both.id];
    input.actors = vec![both.id, lead.id, lead.id];
    input.genres = vec![drama.id, crime.id];
    let movie = catalog.create_movie(input).await.unwrap();

    let directors: Vec<String> =
        catalog.directors_of(movie.id).await.unwrap().into_iter().map(|a| a.name).collect();
    assert_eq!(directors, vec!["Both Roles"]);

    let cast: Vec<String> =
        catalog.cast_of(movie.id).await.unwrap().into_iter().map(|a| a.name).collect();
    assert_eq!(cast, vec!["Both Roles", "Lead"]);

    let genres: Vec<String> =
        catalog.genres_of(movie.id).await.unwrap().into_iter().map(|g| g.url).collect();
    assert_eq!(genres, vec!["crime", "drama"]);

    assert_eq!(catalog.movies_directed_by(both.id).await.unwrap().len(), 1);
    assert!(catalog.movies_directed_by(lead.id).await.unwrap().is_empty());
    assert_eq!(catalog.movies_starring(lead.id).await.unwrap()[0].id, movie.id);

    catalog.set_cast(movie.id, &[lead.id]).await.unwrap();
    assert_eq!(catalog.cast_of(movie.id).await.unwrap().len(), 1);

    assert_matches!(
        catalog.set_genres(movie.id, &[drama.id, 404]).await,
        Err(CatalogError::ReferentialIntegrity { target: "genre", id: 404, .. })
    );
    // The rejected replacement did not wipe the existing genres.
    assert_eq!(catalog.genres_of(movie.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn listings_hide_drafts_and_filter() {
    let catalog = catalog().await;
    let drama = category(&catalog, "Drama", "drama").await;
    let noir = genre(&catalog, "Noir", "noir").await;

    let mut input = new_movie("Published", "published");
    input.category_id = Some(drama.id);
    input.genres = vec![noir.id];
    input.year = 1950;
    let published = catalog.create_movie(input).await.unwrap();

    let mut input = new_movie("Draft", "draft");
    input.draft = true;
    input.category_id = Some(drama.id);
    let draft = catalog.create_movie(input).await.unwrap();

    movie(&catalog, "Elsewhere", "elsewhere").await;

    let public = catalog.list_movies(&MovieFilter::default()).await.unwrap();
    assert_eq!(public.len(), 2);
    assert!(public.iter().all(|m| !m.draft));

    let everything = MovieFilter { include_drafts: true, ..Default::default() };
    assert_eq!(catalog.list_movies(&everything).await.unwrap().len(), 3);

    let in_drama = MovieFilter { category_id: Some(drama.id), ..Default::default() };
    let ids: Vec<i32> =
        catalog.list_movies(&in_drama).await.unwrap().iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![published.id]);

    let by_genre = MovieFilter { genre_id: Some(noir.id), year: Some(1950), ..Default::default() };
    assert_eq!(catalog.list_movies(&by_genre).await.unwrap()[0].id, published.id);

    catalog.set_movie_draft(draft.id, false).await.unwrap();
    assert_eq!(catalog.list_movies(&in_drama).await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_replaces_fields_and_links() {
    let catalog = catalog().await;
    let drama = genre(&catalog, "Drama", "drama").await;
    let lead = catalog.create_actor(new_actor("Lead")).await.unwrap();

    let mut input = new_movie("X", "x");
    input.genres = vec![drama.id];
    input.actors = vec![lead.id];
    let movie = catalog.create_movie(input).await.unwrap();

    let mut input = new_movie("X: Director's Cut", "x-directors-cut");
    input.tagline = "Longer".to_string();
    input.fees_in_world = 120;
    let updated = catalog.update_movie(movie.id, input).await.unwrap();

    assert_eq!(updated.id, movie.id);
    assert_eq!(updated.tagline, "Longer");
    assert_eq!(updated.fees_in_world, 120);
    assert_eq!(catalog.movie_by_url("x-directors-cut").await.unwrap().id, movie.id);
    assert!(catalog.genres_of(movie.id).await.unwrap().is_empty());
    assert!(catalog.cast_of(movie.id).await.unwrap().is_empty());
}
