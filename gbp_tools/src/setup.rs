use std::path::Path;

use anyhow::Result;
use gbp_engine::SqliteDatabase;
use gbp_server::config::ServerConfig;
use sqlx::migrate::Migrator;

use crate::MigrateParams;

/// Setup commands work locally on the database at `GBP_DATABASE_URL`.
pub async fn migrate_db(config: &ServerConfig, params: MigrateParams) {
    async fn migrate_embedded(url: &str) -> Result<()> {
        let db = SqliteDatabase::create_and_connect(url, 1).await?;
        println!("Running embedded migrations");
        db.run_migrations().await?;
        db.close().await;
        Ok(())
    }

    async fn migrate_custom(url: &str, path: &str) -> Result<()> {
        let db = SqliteDatabase::create_and_connect(url, 1).await?;
        println!("Running migrations at: {path}");
        let migrator = Migrator::new(Path::new(path)).await?;
        migrator.run(db.pool()).await?;
        db.close().await;
        Ok(())
    }

    let url = config.database_url.as_str();
    let result = match &params.path {
        Some(path) => migrate_custom(url, path).await,
        None => migrate_embedded(url).await,
    };

    match result {
        Ok(_) => println!("Migrations complete"),
        Err(e) => println!("Error running migrations: {e}"),
    }
}

pub async fn seed_db(config: &ServerConfig) {
    async fn seed(url: &str) -> Result<gbp_engine::SeedResult> {
        let db = SqliteDatabase::new_with_url(url, 1).await?;
        let result = db.seed().await?;
        db.close().await;
        Ok(result)
    }
    match seed(&config.database_url).await {
        Ok(r) if r.cryptocurrencies == 0 && r.cards == 0 => {
            println!("The database already holds cards and cryptocurrencies. Nothing was added.")
        },
        Ok(r) => println!("Added {} cryptocurrencies and {} cards", r.cryptocurrencies, r.cards),
        Err(e) => println!("Error seeding the database: {e}"),
    }
}
