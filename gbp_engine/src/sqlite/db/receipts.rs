use chrono::Utc;
use sqlx::SqliteConnection;

use crate::db_types::{NewReceipt, Receipt};

/// Inserts the receipt and returns its id. This is not atomic on its own; the order flow calls it inside the same
/// transaction as the order insert.
pub async fn insert(receipt: NewReceipt, conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let size = receipt.data.len() as i64;
    let (id,): (i64,) = sqlx::query_as(
        r#"
            INSERT INTO receipts (file_name, mime_type, size, data, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id;
        "#,
    )
    .bind(receipt.file_name)
    .bind(receipt.mime_type)
    .bind(size)
    .bind(receipt.data)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;
    Ok(id)
}

pub async fn fetch_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Receipt>, sqlx::Error> {
    let receipt = sqlx::query_as("SELECT * FROM receipts WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(receipt)
}
