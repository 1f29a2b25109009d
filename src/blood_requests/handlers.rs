use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::AdminUser;
use crate::blood_requests::dto::{BloodRequestActionResponse, BloodRequestListResponse};
use crate::blood_requests::repo::{self as repo, RequestStatus};
use crate::error::AppError;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn list_all(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<BloodRequestListResponse>, AppError> {
    let blood_requests = repo::list_all_with_requester(&state.db).await?;
    Ok(Json(BloodRequestListResponse {
        success: true,
        count: blood_requests.len(),
        blood_requests,
    }))
}

/// pending -> accepted | rejected, both terminal. Re-deciding a decided
/// request is a conflict, not a silent overwrite.
async fn transition(
    state: &AppState,
    admin: Uuid,
    id: Uuid,
    status: RequestStatus,
) -> Result<BloodRequestActionResponse, AppError> {
    let request = repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blood request not found".into()))?;
    if request.status.is_terminal() {
        return Err(AppError::Conflict(format!(
            "Blood request has already been {}",
            request.status.as_str()
        )));
    }

    let updated = repo::set_status(&state.db, id, status).await?;
    let verdict = match status {
        RequestStatus::Accepted => "accepted successfully",
        _ => "rejected",
    };
    info!(request_id = %id, %admin, status = status.as_str(), "blood request decided");
    Ok(BloodRequestActionResponse {
        success: true,
        message: format!("Blood request for {} {verdict}", updated.patient_name),
        request: updated,
    })
}

#[instrument(skip(state))]
pub async fn accept(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<BloodRequestActionResponse>, AppError> {
    Ok(Json(
        transition(&state, claims.sub, id, RequestStatus::Accepted).await?,
    ))
}

#[instrument(skip(state))]
pub async fn reject(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<BloodRequestActionResponse>, AppError> {
    Ok(Json(
        transition(&state, claims.sub, id, RequestStatus::Rejected).await?,
    ))
}
