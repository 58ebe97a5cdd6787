use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    error::Result,
    models::{ContactMessage, MessageQuery, NewContactMessage},
};

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 200;

pub async fn create_message(pool: &PgPool, msg: &NewContactMessage) -> Result<ContactMessage> {
    let message = sqlx::query_as::<_, ContactMessage>(
        r#"
        INSERT INTO contact_messages (name, email, phone, subject, message, language_code)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&msg.name)
    .bind(&msg.email)
    .bind(&msg.phone)
    .bind(&msg.subject)
    .bind(&msg.message)
    .bind(&msg.language_code)
    .fetch_one(pool)
    .await?;

    Ok(message)
}

pub async fn list_messages(pool: &PgPool, params: &MessageQuery) -> Result<Vec<ContactMessage>> {
    let mut query: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT * FROM contact_messages WHERE 1=1");

    if let Some(unread) = params.unread {
        query.push(" AND is_read = ");
        query.push_bind(!unread);
    }

    let limit = params
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0).max(0);

    query.push(" ORDER BY created_at DESC, id DESC LIMIT ");
    query.push_bind(limit);
    query.push(" OFFSET ");
    query.push_bind(offset);

    let messages = query
        .build_query_as::<ContactMessage>()
        .fetch_all(pool)
        .await?;

    Ok(messages)
}

/// Returns `(total, unread)` message counts.
pub async fn count_messages(pool: &PgPool) -> Result<(i64, i64)> {
    let counts: (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COUNT(*) FILTER (WHERE NOT is_read) FROM contact_messages",
    )
    .fetch_one(pool)
    .await?;

    Ok(counts)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<ContactMessage>> {
    let message =
        sqlx::query_as::<_, ContactMessage>("SELECT * FROM contact_messages WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(message)
}

pub async fn set_read(pool: &PgPool, id: i32, is_read: bool) -> Result<Option<ContactMessage>> {
    let message = sqlx::query_as::<_, ContactMessage>(
        "UPDATE contact_messages SET is_read = $1 WHERE id = $2 RETURNING *",
    )
    .bind(is_read)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(message)
}

pub async fn delete_message(pool: &PgPool, id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
