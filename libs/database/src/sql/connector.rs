use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr,
};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::SqlConfig;
use crate::common::{RetryConfig, retry, retry_with_backoff};

/// Connect with the default pool settings
///
/// ```ignore
/// let db = database::sql::connect("sqlite::memory:").await?;
/// ```
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    connect_from_config(SqlConfig::new(database_url)).await
}

pub async fn connect_from_config(config: SqlConfig) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(config.into_connect_options()).await
}

/// Connect with hand-built options.
///
/// On SQLite, foreign key enforcement is switched on so reminder and
/// join-table cascades behave the same as on PostgreSQL.
pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;

    if db.get_database_backend() == DatabaseBackend::Sqlite {
        db.execute_unprepared("PRAGMA foreign_keys = ON").await?;
    }

    info!(
        backend = ?db.get_database_backend(),
        "Successfully connected to database"
    );

    Ok(db)
}

/// Connect from config, retrying transient failures during startup.
///
/// ```ignore
/// let config = SqlConfig::from_env()?;
/// let db = connect_from_config_with_retry(config, Some(RetryConfig::new().with_max_retries(5))).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: SqlConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let options = config.into_connect_options();

    match retry_config {
        Some(policy) => retry_with_backoff(|| connect_with_options(options.clone()), policy).await,
        None => retry(|| connect_with_options(options.clone())).await,
    }
}

/// Apply all pending migrations of `M`
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!("Running {} database migrations...", app_name);
    M::up(db, None).await?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Statement;

    #[tokio::test]
    async fn test_connect_sqlite_memory_enables_foreign_keys() {
        let config = SqlConfig::new("sqlite::memory:").with_pool_size(1, 1);
        let db = connect_from_config(config).await.unwrap();

        let row = db
            .query_one_raw(Statement::from_string(
                DatabaseBackend::Sqlite,
                "PRAGMA foreign_keys",
            ))
            .await
            .unwrap()
            .unwrap();
        let enabled: i32 = row.try_get_by_index(0).unwrap();
        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn test_connect_with_retry_gives_up_on_bad_url() {
        let config = SqlConfig::new("notadb://nowhere");
        let policy = RetryConfig::new()
            .with_max_retries(1)
            .with_initial_delay(1)
            .without_jitter();
        assert!(
            connect_from_config_with_retry(config, Some(policy))
                .await
                .is_err()
        );
    }
}
