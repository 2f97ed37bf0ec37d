use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{Card, NewCard};

pub async fn fetch_all(conn: &mut SqliteConnection) -> Result<Vec<Card>, sqlx::Error> {
    let cards = sqlx::query_as("SELECT * FROM cards ORDER BY base_price_usd, id").fetch_all(conn).await?;
    Ok(cards)
}

pub async fn fetch_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Card>, sqlx::Error> {
    let card = sqlx::query_as("SELECT * FROM cards WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(card)
}

pub async fn insert(card: NewCard, conn: &mut SqliteConnection) -> Result<Card, sqlx::Error> {
    let card: Card = sqlx::query_as(
        r#"
            INSERT INTO cards (name, description, base_price_usd, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(card.name)
    .bind(card.description)
    .bind(card.base_price_usd)
    .bind(card.image_url)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Card '{}' inserted with id {}", card.name, card.id);
    Ok(card)
}

/// Returns `None` if the card does not exist.
pub async fn set_base_price(
    id: i64,
    base_price_usd: f64,
    conn: &mut SqliteConnection,
) -> Result<Option<Card>, sqlx::Error> {
    let card = sqlx::query_as("UPDATE cards SET base_price_usd = $1 WHERE id = $2 RETURNING *")
        .bind(base_price_usd)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(card)
}

pub async fn count(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cards").fetch_one(conn).await?;
    Ok(count)
}
