use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::env;

/// Creates a database connection from the `DATABASE_URL` environment variable
///
/// A `.env` file in the working directory is loaded first if present.
pub async fn create_connection() -> Result<DatabaseConnection, DbErr> {
    dotenvy::dotenv().ok();
    let url = env::var("DATABASE_URL")
        .map_err(|_| DbErr::Custom("DATABASE_URL must be set".to_owned()))?;

    connect(&url).await
}

/// Creates a database connection to an explicit URL
pub async fn connect(url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(url);
    options.sqlx_logging_level(log::LevelFilter::Debug);

    log::info!("Connecting to database");
    Database::connect(options).await
}
