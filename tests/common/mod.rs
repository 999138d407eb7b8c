#![allow(dead_code)]

use movie_catalog::{
    Catalog, Config, db,
    entities::{category, genre, movie},
    models::{ImageKind, NewActor, NewCategory, NewGenre, NewMovie},
};

pub async fn catalog() -> Catalog {
    let db = db::connect_and_migrate(&Config::in_memory()).await.expect("in-memory database");
    Catalog::new(db)
}

pub fn new_category(name: &str, url: &str) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        description: format!("{name} movies"),
        url: url.to_string(),
    }
}

pub fn new_genre(name: &str, url: &str) -> NewGenre {
    NewGenre { name: name.to_string(), description: format!("{name} films"), url: url.to_string() }
}

pub fn new_actor(name: &str) -> NewActor {
    NewActor {
        name: name.to_string(),
        age: 40,
        description: format!("About {name}"),
        image: ImageKind::ActorPhoto
            .upload_path(&format!("{}.jpg", name.to_lowercase().replace(' ', "_"))),
    }
}

pub fn new_movie(title: &str, url: &str) -> NewMovie {
    let poster = ImageKind::Poster.upload_path(&format!("{url}.jpg"));
    NewMovie::new(title, format!("About {title}"), poster, url)
}

pub async fn category(catalog: &Catalog, name: &str, url: &str) -> category::Model {
    catalog.create_category(new_category(name, url)).await.expect("category")
}

pub async fn genre(catalog: &Catalog, name: &str, url: &str) -> genre::Model {
    catalog.create_genre(new_genre(name, url)).await.expect("genre")
}

pub async fn movie(catalog: &Catalog, title: &str, url: &str) -> movie::Model {
    catalog.create_movie(new_movie(title, url)).await.expect("movie")
}
