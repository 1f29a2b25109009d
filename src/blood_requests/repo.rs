use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    /// Only pending requests may be accepted or rejected.
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Accepted | RequestStatus::Rejected)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BloodRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub patient_name: String,
    pub blood_type: String,
    pub units_needed: i32,
    pub urgency_level: String,
    pub hospital_name: String,
    pub contact_number: String,
    pub status: RequestStatus,
    pub additional_notes: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Blood request joined with its requester, for admin listings.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BloodRequestWithRequester {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub request: BloodRequest,
    pub requester_name: String,
    pub requester_email: String,
    pub requester_phone: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub pending: i64,
    pub accepted: i64,
    pub rejected: i64,
}

impl StatusCounts {
    pub fn total(&self) -> i64 {
        self.pending + self.accepted + self.rejected
    }
}

const COLUMNS: &str = "id, user_id, patient_name, blood_type, units_needed, urgency_level, \
     hospital_name, contact_number, status, additional_notes, created_at";

pub struct NewBloodRequest<'a> {
    pub user_id: Uuid,
    pub patient_name: &'a str,
    pub blood_type: &'a str,
    pub units_needed: i32,
    pub urgency_level: &'a str,
    pub hospital_name: &'a str,
    pub contact_number: &'a str,
    pub additional_notes: &'a str,
}

pub async fn create(db: &PgPool, new: NewBloodRequest<'_>) -> sqlx::Result<BloodRequest> {
    sqlx::query_as::<_, BloodRequest>(&format!(
        "INSERT INTO blood_requests \
           (user_id, patient_name, blood_type, units_needed, urgency_level, \
            hospital_name, contact_number, status, additional_notes) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending', $8) \
         RETURNING {COLUMNS}"
    ))
    .bind(new.user_id)
    .bind(new.patient_name)
    .bind(new.blood_type)
    .bind(new.units_needed)
    .bind(new.urgency_level)
    .bind(new.hospital_name)
    .bind(new.contact_number)
    .bind(new.additional_notes)
    .fetch_one(db)
    .await
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<BloodRequest>> {
    sqlx::query_as::<_, BloodRequest>(&format!(
        "SELECT {COLUMNS} FROM blood_requests WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn list_all_with_requester(db: &PgPool) -> sqlx::Result<Vec<BloodRequestWithRequester>> {
    sqlx::query_as::<_, BloodRequestWithRequester>(
        "SELECT r.id, r.user_id, r.patient_name, r.blood_type, r.units_needed, \
                r.urgency_level, r.hospital_name, r.contact_number, r.status, \
                r.additional_notes, r.created_at, \
                u.name AS requester_name, u.email AS requester_email, \
                u.phone AS requester_phone \
         FROM blood_requests r JOIN users u ON u.id = r.user_id \
         ORDER BY r.created_at DESC",
    )
    .fetch_all(db)
    .await
}

pub async fn set_status(
    db: &PgPool,
    id: Uuid,
    status: RequestStatus,
) -> sqlx::Result<BloodRequest> {
    sqlx::query_as::<_, BloodRequest>(&format!(
        "UPDATE blood_requests SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(status)
    .fetch_one(db)
    .await
}

pub async fn count_all(db: &PgPool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blood_requests")
        .fetch_one(db)
        .await
}

pub async fn status_counts_for_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<StatusCounts> {
    sqlx::query_as::<_, StatusCounts>(
        "SELECT COUNT(*) FILTER (WHERE status = 'pending') AS pending, \
                COUNT(*) FILTER (WHERE status = 'accepted') AS accepted, \
                COUNT(*) FILTER (WHERE status = 'rejected') AS rejected \
         FROM blood_requests WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(db)
    .await
}

pub async fn recent_for_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<BloodRequest>> {
    sqlx::query_as::<_, BloodRequest>(&format!(
        "SELECT {COLUMNS} FROM blood_requests WHERE user_id = $1 \
         ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_is_transitionable() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Accepted.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
