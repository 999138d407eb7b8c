use anyhow::Context;
use movie_catalog::{
    Catalog, Config, db,
    models::{ImageKind, MovieFilter},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movie_catalog=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    for kind in ImageKind::ALL {
        let dir = config.media_path(kind.upload_dir());
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating upload directory {}", dir.display()))?;
    }

    let db = db::connect_and_migrate(&config).await.context("opening catalogue database")?;
    let catalog = Catalog::new(db);

    if config.seed_rating_stars {
        let stars = catalog.seed_rating_stars().await?;
        tracing::info!(count = stars.len(), "rating stars ready");
    }

    let categories = catalog.categories().await?.len();
    let genres = catalog.genres().await?.len();
    let published = catalog.list_movies(&MovieFilter::default()).await?.len();
    let all = catalog
        .list_movies(&MovieFilter { include_drafts: true, ..Default::default() })
        .await?
        .len();

    tracing::info!(
        database = %config.database_url,
        media_root = %config.media_root.display(),
        categories,
        genres,
        movies = all,
        published,
        "catalogue ready"
    );

    Ok(())
}
