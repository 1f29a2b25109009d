use axum::{
    extract::{Path, State},
    Json,
};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::appointments::dto::{
    AppointmentActionResponse, AppointmentListResponse, RescheduleRequest,
};
use crate::appointments::repo::{self as repo, Appointment, AppointmentStatus};
use crate::auth::extractors::AdminUser;
use crate::error::AppError;
use crate::response::MessageResponse;
use crate::state::AppState;
use crate::validate::{non_blank, parse_date};

#[instrument(skip(state))]
pub async fn list_all(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<AppointmentListResponse>, AppError> {
    let appointments = repo::list_all_with_donor(&state.db).await?;
    Ok(Json(AppointmentListResponse {
        success: true,
        count: appointments.len(),
        appointments,
    }))
}

async fn load_scheduled(state: &AppState, id: Uuid) -> Result<Appointment, AppError> {
    let appointment = repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Appointment not found".into()))?;
    if appointment.status.is_terminal() {
        return Err(AppError::Conflict(format!(
            "Appointment is already {} and cannot be changed",
            appointment.status.as_str()
        )));
    }
    Ok(appointment)
}

#[instrument(skip(state))]
pub async fn cancel(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentActionResponse>, AppError> {
    load_scheduled(&state, id).await?;
    let appointment = repo::set_status(&state.db, id, AppointmentStatus::Cancelled).await?;
    info!(appointment_id = %id, admin = %claims.sub, "appointment cancelled");
    Ok(Json(AppointmentActionResponse {
        success: true,
        message: "Appointment cancelled successfully".into(),
        appointment,
    }))
}

#[instrument(skip(state))]
pub async fn complete(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentActionResponse>, AppError> {
    load_scheduled(&state, id).await?;
    let appointment = repo::set_status(&state.db, id, AppointmentStatus::Completed).await?;
    info!(appointment_id = %id, admin = %claims.sub, "appointment completed");
    Ok(Json(AppointmentActionResponse {
        success: true,
        message: "Appointment marked as completed".into(),
        appointment,
    }))
}

#[instrument(skip(state, payload))]
pub async fn reschedule(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RescheduleRequest>,
) -> Result<Json<AppointmentActionResponse>, AppError> {
    let appointment_date = non_blank(&payload.appointment_date)
        .map(|v| parse_date("appointmentDate", v))
        .transpose()?;
    let time_slot = non_blank(&payload.time_slot);
    if appointment_date.is_none() && time_slot.is_none() {
        return Err(AppError::Validation(
            "appointmentDate or timeSlot is required".into(),
        ));
    }
    if let Some(date) = appointment_date {
        if date < OffsetDateTime::now_utc().date() {
            return Err(AppError::Validation(
                "Appointment date cannot be in the past".into(),
            ));
        }
    }

    load_scheduled(&state, id).await?;
    let appointment = repo::reschedule(&state.db, id, appointment_date, time_slot)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict(
                "The donor already has an appointment scheduled for this date and time".into(),
            ),
            other => other,
        })?;

    info!(appointment_id = %id, admin = %claims.sub, "appointment rescheduled");
    Ok(Json(AppointmentActionResponse {
        success: true,
        message: "Appointment rescheduled successfully".into(),
        appointment,
    }))
}

#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !repo::delete(&state.db, id).await? {
        return Err(AppError::NotFound("Appointment not found".into()));
    }
    info!(appointment_id = %id, admin = %claims.sub, "appointment deleted");
    Ok(Json(MessageResponse::new("Appointment deleted successfully")))
}
