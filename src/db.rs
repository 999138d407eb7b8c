use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement,
};
use sea_orm_migration::MigratorTrait;

use crate::{config::Config, error::CatalogResult};

const SQLITE_PRAGMAS: [&str; 3] =
    ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL", "PRAGMA cache_size=-64000"];

/// Opens the pool and brings the schema up to date. Called once at process
/// start; there is no other schema registration.
pub async fn connect_and_migrate(config: &Config) -> CatalogResult<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options.max_connections(config.max_connections).sqlx_logging(false);

    let db = Database::connect(options).await?;

    if db.get_database_backend() == DbBackend::Sqlite && !config.database_url.contains(":memory:")
    {
        for pragma in SQLITE_PRAGMAS {
            db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string()))
                .await?;
        }
    }

    migration::Migrator::up(&db, None).await?;
    tracing::debug!(url = %config.database_url, "schema migrated");
    Ok(db)
}
