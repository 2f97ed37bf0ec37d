use chrono::Utc;
use sqlx::SqliteConnection;

use crate::db_types::{ChatMessage, NewChatMessage};

pub async fn insert(message: NewChatMessage, conn: &mut SqliteConnection) -> Result<ChatMessage, sqlx::Error> {
    let message = sqlx::query_as(
        r#"
            INSERT INTO chat_messages (browser_id, content, sender, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(message.browser_id)
    .bind(message.content)
    .bind(message.sender)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;
    Ok(message)
}

pub async fn fetch_for_browser(browser_id: &str, conn: &mut SqliteConnection) -> Result<Vec<ChatMessage>, sqlx::Error> {
    let messages = sqlx::query_as("SELECT * FROM chat_messages WHERE browser_id = $1 ORDER BY created_at, id")
        .bind(browser_id)
        .fetch_all(conn)
        .await?;
    Ok(messages)
}
