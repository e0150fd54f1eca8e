use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            email VARCHAR(255) NOT NULL UNIQUE,
            user_type VARCHAR(16) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_user_type CHECK (user_type IN ('coach', 'student'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table; ids grow with insertion order
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id BIGSERIAL PRIMARY KEY,
            coach_id BIGINT NOT NULL REFERENCES users(id),
            student_id BIGINT NULL REFERENCES users(id),
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes; one slot per coach and time range
    for statement in [
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_appointments_coach_slot ON appointments(coach_id, start_time, end_time)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_start_time ON appointments(start_time)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_student_id ON appointments(student_id)",
        "CREATE INDEX IF NOT EXISTS idx_users_user_type ON users(user_type)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
