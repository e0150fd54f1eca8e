use crate::models::DbUser;
use chrono::Utc;
use coachbook_core::models::user::UserRole;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn create_user(pool: &Pool<Postgres>, email: &str, role: UserRole) -> Result<DbUser> {
    let now = Utc::now();

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (email, user_type, created_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (email)
        DO UPDATE SET user_type = $2
        RETURNING id, email, user_type, created_at
        "#,
    )
    .bind(email)
    .bind(role.as_str())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, email, user_type, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn list_users(pool: &Pool<Postgres>) -> Result<Vec<DbUser>> {
    let users = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, email, user_type, created_at
        FROM users
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}

pub async fn list_users_by_role(pool: &Pool<Postgres>, role: UserRole) -> Result<Vec<DbUser>> {
    let users = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, email, user_type, created_at
        FROM users
        WHERE user_type = $1
        ORDER BY id ASC
        "#,
    )
    .bind(role.as_str())
    .fetch_all(pool)
    .await?;

    Ok(users)
}
