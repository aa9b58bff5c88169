use base::{database::connect, setting::Pool};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

/// A fresh, migrated in-memory database. The pool holds a single connection
/// that never expires, as every sqlite memory connection is its own database.
pub async fn database() -> DatabaseConnection {
    let pool = Pool {
        max_connections: 1,
        min_connections: 1,
        idle_timeout: 0,
        max_lifetime: 0,
        sqlx_logging: false,
        ..Pool::default()
    };
    let db = connect("sqlite::memory:", &pool).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
}
