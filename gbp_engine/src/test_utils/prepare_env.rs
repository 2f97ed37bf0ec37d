use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};

use crate::SqliteDatabase;

/// Creates a fresh, migrated database at `url` and initialises logging.
pub async fn prepare_test_env(url: &str) -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
    create_database(url).await;
    let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error creating connection to database");
    db.run_migrations().await.expect("Error running DB migrations");
    db
}

/// As [`prepare_test_env`], and also inserts the seed cards and cryptocurrencies.
pub async fn prepare_seeded_env(url: &str) -> SqliteDatabase {
    let db = prepare_test_env(url).await;
    db.seed().await.expect("Error seeding the database");
    db
}

pub fn random_db_path() -> String {
    let dir = std::env::temp_dir();
    format!("sqlite://{}/gbp_test_store_{}.db", dir.display(), rand::random::<u64>())
}

pub async fn create_database(url: &str) {
    if Sqlite::database_exists(url).await.unwrap_or(false) {
        if let Err(e) = Sqlite::drop_database(url).await {
            warn!("🚀️ Error dropping database {url}: {e:?}");
        }
    }
    Sqlite::create_database(url).await.expect("Error creating database");
    info!("🚀️ Created Sqlite database {url}");
}

/// Closes the connection pool and deletes the database file.
pub async fn drop_test_db(db: SqliteDatabase) {
    db.close().await;
    if let Err(e) = Sqlite::drop_database(db.url()).await {
        warn!("🚀️ Error dropping database {}: {e:?}", db.url());
    }
}
