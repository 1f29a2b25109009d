use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::AdminUser;
use crate::error::AppError;
use crate::inventory::dto::{
    CreateInventoryRequest, InventoryActionResponse, InventoryListResponse, LowStockResponse,
    UpdateInventoryRequest,
};
use crate::inventory::repo;
use crate::response::MessageResponse;
use crate::state::AppState;
use crate::validate::{is_valid_blood_type, non_blank, parse_date};

#[instrument(skip(state))]
pub async fn list_all(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<InventoryListResponse>, AppError> {
    let blood_inventory = repo::list_all(&state.db).await?;
    Ok(Json(InventoryListResponse {
        success: true,
        blood_inventory,
    }))
}

#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Json(payload): Json<CreateInventoryRequest>,
) -> Result<(StatusCode, Json<InventoryActionResponse>), AppError> {
    let (Some(blood_type), Some(units_available), Some(expiry_date), Some(location)) = (
        non_blank(&payload.blood_type),
        payload.units_available,
        non_blank(&payload.expiry_date),
        non_blank(&payload.location),
    ) else {
        return Err(AppError::Validation(
            "All fields (bloodType, unitsAvailable, expiryDate, location) are required".into(),
        ));
    };

    if !is_valid_blood_type(blood_type) {
        return Err(AppError::Validation("Invalid blood type provided".into()));
    }
    if units_available < 0 {
        return Err(AppError::Validation(
            "unitsAvailable cannot be negative".into(),
        ));
    }
    let expiry_date = parse_date("expiryDate", expiry_date)?;

    let inventory =
        repo::create(&state.db, blood_type, units_available, expiry_date, location).await?;

    info!(inventory_id = %inventory.id, admin = %claims.sub, "inventory entry added");
    Ok((
        StatusCode::CREATED,
        Json(InventoryActionResponse {
            success: true,
            message: "Blood inventory added successfully".into(),
            inventory,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInventoryRequest>,
) -> Result<Json<InventoryActionResponse>, AppError> {
    let blood_type = non_blank(&payload.blood_type);
    if let Some(bt) = blood_type {
        if !is_valid_blood_type(bt) {
            return Err(AppError::Validation("Invalid blood type provided".into()));
        }
    }
    if matches!(payload.units_available, Some(units) if units < 0) {
        return Err(AppError::Validation(
            "unitsAvailable cannot be negative".into(),
        ));
    }
    let expiry_date = non_blank(&payload.expiry_date)
        .map(|v| parse_date("expiryDate", v))
        .transpose()?;

    let inventory = repo::update(
        &state.db,
        id,
        blood_type,
        payload.units_available,
        expiry_date,
        non_blank(&payload.location),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Blood inventory not found".into()))?;

    info!(inventory_id = %id, admin = %claims.sub, "inventory entry updated");
    Ok(Json(InventoryActionResponse {
        success: true,
        message: "Blood inventory updated successfully".into(),
        inventory,
    }))
}

#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    AdminUser(claims): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !repo::delete(&state.db, id).await? {
        return Err(AppError::NotFound("Blood inventory not found".into()));
    }
    info!(inventory_id = %id, admin = %claims.sub, "inventory entry deleted");
    Ok(Json(MessageResponse::new(
        "Blood inventory deleted successfully",
    )))
}

#[instrument(skip(state))]
pub async fn low_stock(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<LowStockResponse>, AppError> {
    let low_stock_items = repo::low_stock(&state.db).await?;
    Ok(Json(LowStockResponse {
        success: true,
        low_stock_items,
    }))
}
