use axum::{extract::State, http::StatusCode, Json};
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::appointments::repo::{self as appointments, NewAppointment};
use crate::auth::extractors::DonorUser;
use crate::blood_requests::repo::{self as blood_requests, NewBloodRequest};
use crate::error::AppError;
use crate::state::AppState;
use crate::users::dto::{
    AppointmentCreatedResponse, AuthCheckResponse, BloodRequestCreatedResponse,
    CreateBloodRequestRequest, DashboardData, DashboardResponse, DashboardStats, ProfileResponse,
    RecentActivity, ScheduleAppointmentRequest, UpdateProfileRequest,
};
use crate::users::repo::{self as users, ProfilePatch};
use crate::validate::{is_valid_blood_type, non_blank, parse_date};

#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    DonorUser(claims): DonorUser,
) -> Result<Json<DashboardResponse>, AppError> {
    let user = users::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let appointment_counts = appointments::status_counts_for_user(&state.db, user.id).await?;
    let request_counts = blood_requests::status_counts_for_user(&state.db, user.id).await?;
    let recent_appointments = appointments::recent_for_user(&state.db, user.id).await?;
    let recent_blood_requests = blood_requests::recent_for_user(&state.db, user.id).await?;
    let upcoming_appointment = appointments::upcoming_for_user(&state.db, user.id).await?;

    let stats = DashboardStats {
        total_donations: appointment_counts.completed,
        total_appointments: appointment_counts.total(),
        total_blood_requests: request_counts.total(),
        appointments_by_status: appointment_counts,
        blood_requests_by_status: request_counts,
    };

    Ok(Json(DashboardResponse {
        success: true,
        message: "Dashboard data retrieved successfully".into(),
        data: DashboardData {
            user,
            stats,
            upcoming_appointment,
            recent_activity: RecentActivity {
                appointments: recent_appointments,
                blood_requests: recent_blood_requests,
            },
            last_login: OffsetDateTime::now_utc(),
        },
    }))
}

#[instrument(skip_all)]
pub async fn auth_check(DonorUser(claims): DonorUser) -> Json<AuthCheckResponse> {
    Json(AuthCheckResponse {
        success: true,
        authenticated: true,
        user: claims.into(),
    })
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    DonorUser(claims): DonorUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let date_of_birth = non_blank(&payload.date_of_birth)
        .map(|v| parse_date("dateOfBirth", v))
        .transpose()?;

    let patch = ProfilePatch {
        blood_type: non_blank(&payload.blood_type),
        phone: non_blank(&payload.phone),
        date_of_birth,
        gender: non_blank(&payload.gender),
        address: non_blank(&payload.address),
    };
    if patch.is_empty() {
        return Err(AppError::Validation(
            "At least one field (bloodType, phone, dateOfBirth, gender or address) \
             is required to update"
                .into(),
        ));
    }
    if let Some(bt) = patch.blood_type {
        if !is_valid_blood_type(bt) {
            return Err(AppError::Validation("Invalid blood type provided".into()));
        }
    }

    let user = users::update_profile(&state.db, claims.sub, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    info!(user_id = %user.id, "profile updated");
    Ok(Json(ProfileResponse {
        success: true,
        message: "Profile updated successfully".into(),
        user,
    }))
}

#[instrument(skip(state, payload))]
pub async fn schedule_appointment(
    State(state): State<AppState>,
    DonorUser(claims): DonorUser,
    Json(payload): Json<ScheduleAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentCreatedResponse>), AppError> {
    let (Some(name), Some(date), Some(time_slot), Some(location), Some(blood_type)) = (
        non_blank(&payload.name),
        non_blank(&payload.appointment_date),
        non_blank(&payload.time_slot),
        non_blank(&payload.location),
        non_blank(&payload.blood_type),
    ) else {
        return Err(AppError::Validation(
            "All required fields must be provided \
             (name, appointmentDate, timeSlot, location, bloodType)"
                .into(),
        ));
    };

    let appointment_date = parse_date("appointmentDate", date)?;
    if appointment_date < OffsetDateTime::now_utc().date() {
        return Err(AppError::Validation(
            "Appointment date cannot be in the past".into(),
        ));
    }
    if !is_valid_blood_type(blood_type) {
        return Err(AppError::Validation("Invalid blood type provided".into()));
    }

    let user = users::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let slot_conflict = || {
        AppError::Conflict(
            "You already have an appointment scheduled for this date and time".into(),
        )
    };
    if appointments::active_slot_taken(&state.db, user.id, appointment_date, time_slot).await? {
        return Err(slot_conflict());
    }

    let appointment = appointments::create(
        &state.db,
        NewAppointment {
            user_id: user.id,
            name,
            date_of_birth: user.date_of_birth,
            appointment_date,
            time_slot,
            location,
            blood_type,
            notes: non_blank(&payload.notes).unwrap_or_default(),
        },
    )
    .await
    .map_err(|e| match AppError::from(e) {
        // Two concurrent bookings can both pass the pre-check; the partial
        // unique index decides, and the loser gets the same 409.
        AppError::Conflict(_) => slot_conflict(),
        other => other,
    })?;

    info!(appointment_id = %appointment.id, user_id = %user.id, "appointment scheduled");
    Ok((
        StatusCode::CREATED,
        Json(AppointmentCreatedResponse {
            success: true,
            message: "Appointment scheduled successfully".into(),
            data: appointment,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn create_blood_request(
    State(state): State<AppState>,
    DonorUser(claims): DonorUser,
    Json(payload): Json<CreateBloodRequestRequest>,
) -> Result<(StatusCode, Json<BloodRequestCreatedResponse>), AppError> {
    let (
        Some(patient_name),
        Some(blood_type),
        Some(units_needed),
        Some(urgency_level),
        Some(hospital_name),
        Some(contact_number),
    ) = (
        non_blank(&payload.patient_name),
        non_blank(&payload.blood_type),
        payload.units_needed,
        non_blank(&payload.urgency_level),
        non_blank(&payload.hospital_name),
        non_blank(&payload.contact_number),
    )
    else {
        return Err(AppError::Validation(
            "All required fields must be provided (patientName, bloodType, \
             unitsNeeded, urgencyLevel, hospitalName, contactNumber)"
                .into(),
        ));
    };

    if units_needed <= 0 {
        return Err(AppError::Validation(
            "unitsNeeded must be a positive integer".into(),
        ));
    }

    let request = blood_requests::create(
        &state.db,
        NewBloodRequest {
            user_id: claims.sub,
            patient_name,
            blood_type,
            units_needed,
            urgency_level,
            hospital_name,
            contact_number,
            additional_notes: non_blank(&payload.additional_notes).unwrap_or("Urgently needed"),
        },
    )
    .await?;

    info!(request_id = %request.id, user_id = %claims.sub, "blood request created");
    Ok((
        StatusCode::CREATED,
        Json(BloodRequestCreatedResponse {
            success: true,
            message: "Blood request created successfully".into(),
            data: request,
        }),
    ))
}
