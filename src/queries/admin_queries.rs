use sqlx::PgPool;

use crate::{error::Result, models::Admin};

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<Admin>> {
    let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(admin)
}

pub async fn create_admin(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
    email: Option<&str>,
) -> Result<Admin> {
    let admin = sqlx::query_as::<_, Admin>(
        r#"
        INSERT INTO admins (username, password, email, full_name)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(email)
    .bind("Administrator")
    .fetch_one(pool)
    .await?;

    Ok(admin)
}
