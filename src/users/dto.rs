use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::appointments::repo::{Appointment, StatusCounts as AppointmentCounts};
use crate::auth::jwt::Claims;
use crate::blood_requests::repo::{BloodRequest, StatusCounts as BloodRequestCounts};
use crate::users::repo::{Role, User};

#[derive(Debug, Serialize)]
pub struct AuthCheckResponse {
    pub success: bool,
    pub authenticated: bool,
    pub user: ClaimsSummary,
}

/// The identity attached by the auth layer, echoed back to the client.
#[derive(Debug, Serialize)]
pub struct ClaimsSummary {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub name: String,
}

impl From<Claims> for ClaimsSummary {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
            name: claims.name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub blood_type: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub message: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleAppointmentRequest {
    pub name: Option<String>,
    pub appointment_date: Option<String>,
    pub time_slot: Option<String>,
    pub location: Option<String>,
    pub blood_type: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AppointmentCreatedResponse {
    pub success: bool,
    pub message: String,
    pub data: Appointment,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBloodRequestRequest {
    pub patient_name: Option<String>,
    pub blood_type: Option<String>,
    pub units_needed: Option<i32>,
    pub urgency_level: Option<String>,
    pub hospital_name: Option<String>,
    pub contact_number: Option<String>,
    pub additional_notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BloodRequestCreatedResponse {
    pub success: bool,
    pub message: String,
    pub data: BloodRequest,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub message: String,
    pub data: DashboardData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub user: User,
    pub stats: DashboardStats,
    pub upcoming_appointment: Option<Appointment>,
    pub recent_activity: RecentActivity,
    #[serde(with = "time::serde::rfc3339")]
    pub last_login: OffsetDateTime,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Completed appointments count as donations.
    pub total_donations: i64,
    pub total_appointments: i64,
    pub total_blood_requests: i64,
    pub appointments_by_status: AppointmentCounts,
    pub blood_requests_by_status: BloodRequestCounts,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub appointments: Vec<Appointment>,
    pub blood_requests: Vec<BloodRequest>,
}
