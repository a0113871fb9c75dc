use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

use super::DatabaseConfig;

/// Open the connection pool described by `config`.
///
/// The returned handle is cheap to clone and shared by every repository.
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Connecting to item database...");

    let opts = ConnectOptions::new(&config.url)
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.connect_timeout)
        .idle_timeout(config.idle_timeout)
        .sqlx_logging(true)
        .to_owned();

    let conn = Database::connect(opts).await?;
    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Item database connected"
    );

    Ok(conn)
}
