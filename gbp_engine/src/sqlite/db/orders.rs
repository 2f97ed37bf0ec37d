use chrono::Utc;
use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{NewOrder, Order, OrderStatusType};

/// Inserts a new `pending` order using the given connection. This is not atomic. Embed the call inside a transaction
/// if it must succeed or fail together with other writes, and pass `&mut *tx` as the connection argument.
pub async fn insert_order(order: NewOrder, receipt_id: i64, conn: &mut SqliteConnection) -> Result<Order, sqlx::Error> {
    let now = Utc::now();
    let order: Order = sqlx::query_as(
        r#"
            INSERT INTO orders (
                card_id,
                full_name,
                email,
                account_number,
                gbp_id,
                crypto_symbol,
                crypto_amount,
                crypto_address,
                receipt_id,
                status,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *;
        "#,
    )
    .bind(order.card_id)
    .bind(order.full_name)
    .bind(order.email)
    .bind(order.account_number)
    .bind(order.gbp_id)
    .bind(order.crypto_symbol)
    .bind(order.crypto_amount)
    .bind(order.crypto_address)
    .bind(receipt_id)
    .bind(OrderStatusType::Pending)
    .bind(now)
    .bind(now)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Order #{} inserted for card {}", order.id, order.card_id);
    Ok(order)
}

pub async fn fetch_all(conn: &mut SqliteConnection) -> Result<Vec<Order>, sqlx::Error> {
    let orders = sqlx::query_as("SELECT * FROM orders ORDER BY created_at DESC, id DESC").fetch_all(conn).await?;
    Ok(orders)
}

pub async fn fetch_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(order)
}

/// Returns `None` if the order does not exist.
pub async fn set_status(
    id: i64,
    status: OrderStatusType,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as("UPDATE orders SET status = $1, updated_at = $2 WHERE id = $3 RETURNING *")
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(order)
}
