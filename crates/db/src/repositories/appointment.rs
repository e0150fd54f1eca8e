use crate::models::DbAppointment;
use chrono::Utc;
use coachbook_core::models::appointment::NewAppointment;
use coachbook_core::store::{AppointmentFilter, OrderBy, StudentFilter};
use eyre::Result;
use sqlx::{Pool, Postgres, QueryBuilder};

const APPOINTMENT_COLUMNS: &str = "id, coach_id, student_id, start_time, end_time, created_at";

/// Inserts every row inside one transaction; a failure leaves nothing behind.
pub async fn insert_appointments(
    pool: &Pool<Postgres>,
    rows: &[NewAppointment],
) -> Result<Vec<DbAppointment>> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;
    let mut inserted = Vec::with_capacity(rows.len());

    for row in rows {
        let appointment = sqlx::query_as::<_, DbAppointment>(
            r#"
            INSERT INTO appointments (coach_id, student_id, start_time, end_time, created_at)
            VALUES ($1, NULL, $2, $3, $4)
            RETURNING id, coach_id, student_id, start_time, end_time, created_at
            "#,
        )
        .bind(row.coach_id)
        .bind(row.start_time)
        .bind(row.end_time)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
        inserted.push(appointment);
    }

    tx.commit().await?;
    tracing::debug!("Inserted {} appointments", inserted.len());
    Ok(inserted)
}

pub async fn query_appointments(
    pool: &Pool<Postgres>,
    filter: &AppointmentFilter,
) -> Result<Vec<DbAppointment>> {
    let mut query = QueryBuilder::<Postgres>::new("SELECT ");
    query.push(APPOINTMENT_COLUMNS);
    query.push(" FROM appointments WHERE TRUE");

    if let Some(coach_id) = filter.coach_id {
        query.push(" AND coach_id = ").push_bind(coach_id);
    }
    match filter.student {
        StudentFilter::Any => {}
        StudentFilter::Unassigned => {
            query.push(" AND student_id IS NULL");
        }
        StudentFilter::Assigned => {
            query.push(" AND student_id IS NOT NULL");
        }
        StudentFilter::Is(student_id) => {
            query.push(" AND student_id = ").push_bind(student_id);
        }
    }
    if let Some(from) = filter.start_from {
        query.push(" AND start_time >= ").push_bind(from);
    }
    if let Some(before) = filter.start_before {
        query.push(" AND start_time < ").push_bind(before);
    }
    if let Some(slot) = filter.slot {
        query.push(" AND start_time = ").push_bind(slot.start);
        query.push(" AND end_time = ").push_bind(slot.end);
    }
    query.push(match filter.order_by {
        OrderBy::Insertion => " ORDER BY id ASC",
        OrderBy::StartTime => " ORDER BY start_time ASC, id ASC",
    });

    let appointments = query
        .build_query_as::<DbAppointment>()
        .fetch_all(pool)
        .await?;

    Ok(appointments)
}

/// Assigns the student only while the row is still open. The check and the
/// write are the same statement, so two concurrent claims cannot both land.
pub async fn claim_appointment(
    pool: &Pool<Postgres>,
    id: i64,
    student_id: i64,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET student_id = $2
        WHERE id = $1 AND student_id IS NULL
        RETURNING id, coach_id, student_id, start_time, end_time, created_at
        "#,
    )
    .bind(id)
    .bind(student_id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}
