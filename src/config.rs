use std::path::{Path, PathBuf};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub media_root: PathBuf,
    pub seed_rating_stars: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://movie_catalog.db?mode=rwc".to_string());

        let max_connections: u32 = match std::env::var("DB_MAX_CONNECTIONS") {
            Ok(s) => s.parse().context("DB_MAX_CONNECTIONS")?,
            Err(_) => 5,
        };

        let media_root =
            std::env::var("MEDIA_ROOT").map(PathBuf::from).unwrap_or_else(|_| "media".into());

        let seed_rating_stars = std::env::var("SEED_RATING_STARS")
            .ok()
            .map(|s| !matches!(s.trim(), "0" | "false" | "no"))
            .unwrap_or(true);

        Ok(Self { database_url, max_connections, media_root, seed_rating_stars })
    }

    /// Single-connection in-memory SQLite; each connection would otherwise
    /// see its own empty database.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            media_root: "media".into(),
            seed_rating_stars: false,
        }
    }

    /// Resolves a stored image path against the media root.
    pub fn media_path(&self, relative: &str) -> PathBuf {
        self.media_root.join(Path::new(relative))
    }
}
