use chrono::Utc;
use log::{debug, trace};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::{
    db_types::{normalize_symbol, Cryptocurrency, CryptocurrencyUpdate, NewCryptocurrency},
    traits::StoreError,
};

pub async fn fetch_by_symbol(symbol: &str, conn: &mut SqliteConnection) -> Result<Option<Cryptocurrency>, sqlx::Error> {
    let crypto = sqlx::query_as("SELECT * FROM cryptocurrencies WHERE symbol = $1")
        .bind(normalize_symbol(symbol))
        .fetch_optional(conn)
        .await?;
    Ok(crypto)
}

pub async fn fetch_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Cryptocurrency>, sqlx::Error> {
    let crypto = sqlx::query_as("SELECT * FROM cryptocurrencies WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(crypto)
}

/// Fetches cryptocurrencies ordered by symbol. Inactive ones are skipped when `active_only` is set.
pub async fn fetch_all(active_only: bool, conn: &mut SqliteConnection) -> Result<Vec<Cryptocurrency>, sqlx::Error> {
    let sql = if active_only {
        "SELECT * FROM cryptocurrencies WHERE is_active = 1 ORDER BY symbol"
    } else {
        "SELECT * FROM cryptocurrencies ORDER BY symbol"
    };
    let cryptos = sqlx::query_as(sql).fetch_all(conn).await?;
    Ok(cryptos)
}

/// Sets the price for the symbol in a single statement. Returns `None` if the symbol does not exist.
pub async fn set_price(
    symbol: &str,
    usd_price: f64,
    conn: &mut SqliteConnection,
) -> Result<Option<Cryptocurrency>, sqlx::Error> {
    let crypto: Option<Cryptocurrency> =
        sqlx::query_as("UPDATE cryptocurrencies SET usd_price = $1, last_updated = $2 WHERE symbol = $3 RETURNING *")
            .bind(usd_price)
            .bind(Utc::now())
            .bind(normalize_symbol(symbol))
            .fetch_optional(conn)
            .await?;
    if let Some(c) = &crypto {
        trace!("🗃️ {} price set to ${}", c.symbol, c.usd_price);
    }
    Ok(crypto)
}

pub async fn insert(crypto: NewCryptocurrency, conn: &mut SqliteConnection) -> Result<Cryptocurrency, StoreError> {
    let symbol = normalize_symbol(&crypto.symbol);
    let result = sqlx::query_as(
        r#"
            INSERT INTO cryptocurrencies (symbol, name, usd_price, wallet_address, is_active, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *;
        "#,
    )
    .bind(&symbol)
    .bind(crypto.name)
    .bind(crypto.usd_price)
    .bind(crypto.wallet_address)
    .bind(crypto.is_active)
    .bind(Utc::now())
    .fetch_one(conn)
    .await;
    match result {
        Ok(crypto) => {
            debug!("🗃️ Cryptocurrency {symbol} inserted");
            Ok(crypto)
        },
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(StoreError::AlreadyExists(symbol)),
        Err(e) => Err(e.into()),
    }
}

/// Applies the fields that are set in `update`. Returns `None` if there is no cryptocurrency with the given id.
pub async fn update(
    id: i64,
    update: CryptocurrencyUpdate,
    conn: &mut SqliteConnection,
) -> Result<Option<Cryptocurrency>, sqlx::Error> {
    if update.is_empty() {
        return fetch_by_id(id, conn).await;
    }
    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE cryptocurrencies SET ");
    let mut set_clause = builder.separated(", ");
    if let Some(name) = update.name {
        set_clause.push("name = ").push_bind_unseparated(name);
    }
    if let Some(price) = update.usd_price {
        set_clause.push("usd_price = ").push_bind_unseparated(price);
        set_clause.push("last_updated = ").push_bind_unseparated(Utc::now());
    }
    if let Some(address) = update.wallet_address {
        set_clause.push("wallet_address = ").push_bind_unseparated(address);
    }
    if let Some(active) = update.is_active {
        set_clause.push("is_active = ").push_bind_unseparated(active);
    }
    builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");
    let crypto = builder.build_query_as::<Cryptocurrency>().fetch_optional(conn).await?;
    Ok(crypto)
}

pub async fn count(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cryptocurrencies").fetch_one(conn).await?;
    Ok(count)
}
