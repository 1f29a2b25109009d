use serde::{Deserialize, Serialize};

use crate::appointments::repo::{Appointment, AppointmentWithDonor};

#[derive(Debug, Serialize)]
pub struct AppointmentListResponse {
    pub success: bool,
    pub count: usize,
    pub appointments: Vec<AppointmentWithDonor>,
}

#[derive(Debug, Serialize)]
pub struct AppointmentActionResponse {
    pub success: bool,
    pub message: String,
    pub appointment: Appointment,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleRequest {
    pub appointment_date: Option<String>,
    pub time_slot: Option<String>,
}
