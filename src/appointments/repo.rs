use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "appointment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Terminal statuses admit no further transition, reschedule included.
    pub fn is_terminal(self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub date_of_birth: Date,
    pub appointment_date: Date,
    pub time_slot: String,
    pub location: String,
    pub blood_type: String,
    pub notes: String,
    pub status: AppointmentStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Appointment joined with its donor, for admin listings.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentWithDonor {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub appointment: Appointment,
    pub donor_name: String,
    pub donor_email: String,
    pub donor_phone: String,
    pub donor_blood_type: String,
}

/// Per-status appointment counts for one user.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub scheduled: i64,
    pub completed: i64,
    pub cancelled: i64,
}

impl StatusCounts {
    pub fn total(&self) -> i64 {
        self.scheduled + self.completed + self.cancelled
    }
}

const COLUMNS: &str = "id, user_id, name, date_of_birth, appointment_date, time_slot, \
     location, blood_type, notes, status, created_at";

pub struct NewAppointment<'a> {
    pub user_id: Uuid,
    pub name: &'a str,
    pub date_of_birth: Date,
    pub appointment_date: Date,
    pub time_slot: &'a str,
    pub location: &'a str,
    pub blood_type: &'a str,
    pub notes: &'a str,
}

/// Insert a new scheduled appointment. The partial unique index on
/// (user_id, appointment_date, time_slot) for scheduled rows makes a
/// concurrent duplicate surface as a unique violation.
pub async fn create(db: &PgPool, new: NewAppointment<'_>) -> sqlx::Result<Appointment> {
    sqlx::query_as::<_, Appointment>(&format!(
        "INSERT INTO appointments \
           (user_id, name, date_of_birth, appointment_date, time_slot, location, \
            blood_type, notes, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'scheduled') \
         RETURNING {COLUMNS}"
    ))
    .bind(new.user_id)
    .bind(new.name)
    .bind(new.date_of_birth)
    .bind(new.appointment_date)
    .bind(new.time_slot)
    .bind(new.location)
    .bind(new.blood_type)
    .bind(new.notes)
    .fetch_one(db)
    .await
}

pub async fn active_slot_taken(
    db: &PgPool,
    user_id: Uuid,
    appointment_date: Date,
    time_slot: &str,
) -> sqlx::Result<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS ( \
           SELECT 1 FROM appointments \
           WHERE user_id = $1 AND appointment_date = $2 AND time_slot = $3 \
             AND status = 'scheduled')",
    )
    .bind(user_id)
    .bind(appointment_date)
    .bind(time_slot)
    .fetch_one(db)
    .await
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Appointment>> {
    sqlx::query_as::<_, Appointment>(&format!(
        "SELECT {COLUMNS} FROM appointments WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn list_all_with_donor(db: &PgPool) -> sqlx::Result<Vec<AppointmentWithDonor>> {
    sqlx::query_as::<_, AppointmentWithDonor>(
        "SELECT a.id, a.user_id, a.name, a.date_of_birth, a.appointment_date, \
                a.time_slot, a.location, a.blood_type, a.notes, a.status, a.created_at, \
                u.name AS donor_name, u.email AS donor_email, \
                u.phone AS donor_phone, u.blood_type AS donor_blood_type \
         FROM appointments a JOIN users u ON u.id = a.user_id \
         ORDER BY a.appointment_date ASC",
    )
    .fetch_all(db)
    .await
}

pub async fn recent_all_with_donor(db: &PgPool) -> sqlx::Result<Vec<AppointmentWithDonor>> {
    sqlx::query_as::<_, AppointmentWithDonor>(
        "SELECT a.id, a.user_id, a.name, a.date_of_birth, a.appointment_date, \
                a.time_slot, a.location, a.blood_type, a.notes, a.status, a.created_at, \
                u.name AS donor_name, u.email AS donor_email, \
                u.phone AS donor_phone, u.blood_type AS donor_blood_type \
         FROM appointments a JOIN users u ON u.id = a.user_id \
         ORDER BY a.created_at DESC",
    )
    .fetch_all(db)
    .await
}

pub async fn set_status(
    db: &PgPool,
    id: Uuid,
    status: AppointmentStatus,
) -> sqlx::Result<Appointment> {
    sqlx::query_as::<_, Appointment>(&format!(
        "UPDATE appointments SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(status)
    .fetch_one(db)
    .await
}

/// Merge-patch over date and slot only; all other fields are fixed at booking.
pub async fn reschedule(
    db: &PgPool,
    id: Uuid,
    appointment_date: Option<Date>,
    time_slot: Option<&str>,
) -> sqlx::Result<Appointment> {
    sqlx::query_as::<_, Appointment>(&format!(
        "UPDATE appointments SET \
           appointment_date = COALESCE($2, appointment_date), \
           time_slot = COALESCE($3, time_slot) \
         WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(appointment_date)
    .bind(time_slot)
    .fetch_one(db)
    .await
}

pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_all(db: &PgPool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM appointments")
        .fetch_one(db)
        .await
}

pub async fn status_counts_for_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<StatusCounts> {
    sqlx::query_as::<_, StatusCounts>(
        "SELECT COUNT(*) FILTER (WHERE status = 'scheduled') AS scheduled, \
                COUNT(*) FILTER (WHERE status = 'completed') AS completed, \
                COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled \
         FROM appointments WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(db)
    .await
}

pub async fn recent_for_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<Appointment>> {
    sqlx::query_as::<_, Appointment>(&format!(
        "SELECT {COLUMNS} FROM appointments WHERE user_id = $1 \
         ORDER BY appointment_date DESC"
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Next scheduled appointment today or later, soonest first.
pub async fn upcoming_for_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Option<Appointment>> {
    sqlx::query_as::<_, Appointment>(&format!(
        "SELECT {COLUMNS} FROM appointments \
         WHERE user_id = $1 AND status = 'scheduled' AND appointment_date >= CURRENT_DATE \
         ORDER BY appointment_date ASC LIMIT 1"
    ))
    .bind(user_id)
    .fetch_optional(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses_block_transitions() {
        assert!(!AppointmentStatus::Scheduled.is_terminal());
        assert!(AppointmentStatus::Completed.is_terminal());
        assert!(AppointmentStatus::Cancelled.is_terminal());
    }

    #[test]
    fn status_counts_total() {
        let counts = StatusCounts {
            scheduled: 2,
            completed: 3,
            cancelled: 1,
        };
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::Scheduled).unwrap(),
            "\"scheduled\""
        );
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }
}
