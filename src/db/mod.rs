pub mod queries;

use sqlx::migrate::MigrateError;
use sqlx::sqlite::SqlitePool;

pub use queries::categories::Category;
pub use queries::questions::Question;

use sqlx::Error;

pub async fn establish_connection(path: &str) -> Result<SqlitePool, Error> {
    SqlitePool::connect(format!("sqlite:{}", path).as_str()).await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
