use crate::setting::{Pool, SettingsError};

use super::setting::get_settings;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Could not load settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Error while connecting to the database: {0}")]
    Database(#[from] DbErr),
}

pub async fn open_database() -> Result<DatabaseConnection, DatabaseError> {
    let settings = get_settings()?;
    connect(&settings.db, &settings.pool).await
}

pub async fn connect(url: &str, pool: &Pool) -> Result<DatabaseConnection, DatabaseError> {
    tracing::trace! {%url, "Connecting to database"};
    let mut opt = ConnectOptions::new(url.to_owned());
    opt.max_connections(pool.max_connections)
        .min_connections(pool.min_connections)
        .connect_timeout(pool.connect_timeout())
        .acquire_timeout(pool.acquire_timeout())
        .sqlx_logging(pool.sqlx_logging);
    if let Some(timeout) = pool.idle_timeout() {
        opt.idle_timeout(timeout);
    }
    if let Some(lifetime) = pool.max_lifetime() {
        opt.max_lifetime(lifetime);
    }
    Database::connect(opt)
        .await
        .map_err(DatabaseError::Database)
}
