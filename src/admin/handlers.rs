use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::admin::dto::{
    AdminDashboardData, AdminDashboardResponse, AdminIdentity, AdminStats, RecentActivities,
    RoleChangeResponse, UserListResponse, UserResponse,
};
use crate::appointments::repo as appointments;
use crate::auth::extractors::AdminUser;
use crate::blood_requests::repo as blood_requests;
use crate::error::AppError;
use crate::inventory::repo as inventory;
use crate::response::MessageResponse;
use crate::state::AppState;
use crate::users::repo::{self as users, Role};

#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
) -> Result<Json<AdminDashboardResponse>, AppError> {
    let admin = users::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let total_users = users::count_all(&state.db).await?;
    let total_requests = blood_requests::count_all(&state.db).await?;
    let total_appointments = appointments::count_all(&state.db).await?;
    let low_stock_items = inventory::low_stock(&state.db).await?;

    let recent_users = users::list_all(&state.db).await?;
    let recent_requests = blood_requests::list_all_with_requester(&state.db).await?;
    let recent_appointments = appointments::recent_all_with_donor(&state.db).await?;

    Ok(Json(AdminDashboardResponse {
        success: true,
        data: AdminDashboardData {
            admin: AdminIdentity {
                id: admin.id,
                name: admin.name,
                email: admin.email,
            },
            stats: AdminStats {
                total_users,
                total_requests,
                total_appointments,
                low_stock_count: low_stock_items.len(),
                low_stock_items,
            },
            recent_activities: RecentActivities {
                users: recent_users,
                requests: recent_requests,
                appointments: recent_appointments,
            },
        },
    }))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<UserListResponse>, AppError> {
    let users = users::list_all(&state.db).await?;
    Ok(Json(UserListResponse {
        success: true,
        users,
    }))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let user = users::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

async fn change_role(
    state: &AppState,
    admin: Uuid,
    id: Uuid,
    role: Role,
    message: &str,
) -> Result<RoleChangeResponse, AppError> {
    let user = users::set_role(&state.db, id, role)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    // Outstanding tokens keep the old role until they expire or the user
    // logs in again.
    info!(user_id = %id, %admin, new_role = ?role, "role changed");
    Ok(RoleChangeResponse {
        success: true,
        message: message.into(),
        user: user.into(),
    })
}

#[instrument(skip(state))]
pub async fn promote(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RoleChangeResponse>, AppError> {
    Ok(Json(
        change_role(&state, claims.sub, id, Role::Admin, "User promoted to admin").await?,
    ))
}

#[instrument(skip(state))]
pub async fn demote(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RoleChangeResponse>, AppError> {
    Ok(Json(
        change_role(&state, claims.sub, id, Role::User, "User demoted to user").await?,
    ))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !users::delete(&state.db, id).await? {
        return Err(AppError::NotFound("User not found".into()));
    }
    info!(user_id = %id, admin = %claims.sub, "user deleted");
    Ok(Json(MessageResponse::new(format!(
        "User with id {id} deleted successfully"
    ))))
}
