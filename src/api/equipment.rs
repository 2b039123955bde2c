//! Equipment catalog and lending endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        CreateEquipment, CreateEquipmentLoan, Equipment, EquipmentLoan, UpdateEquipment,
    },
};

use super::AuthenticatedUser;

/// List all equipment
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Equipment list", body = Vec<Equipment>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state.services.equipment.list().await?;
    Ok(Json(equipment))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(Json(equipment))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment)
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    claims.require_staff()?;
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let equipment = state.services.equipment.create(&data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update equipment
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    claims.require_staff()?;
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let equipment = state.services.equipment.update(id, &data).await?;
    Ok(Json(equipment))
}

/// Delete equipment
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 204, description = "Equipment deleted"),
        (status = 409, description = "Units out on loan")
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_staff()?;
    state.services.equipment.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Borrow a unit of equipment
#[utoipa::path(
    post,
    path = "/equipment/{id}/borrow",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = CreateEquipmentLoan,
    responses(
        (status = 201, description = "Unit borrowed", body = EquipmentLoan),
        (status = 404, description = "Equipment or user not found"),
        (status = 409, description = "No units available"),
        (status = 422, description = "Equipment not lendable")
    )
)]
pub async fn borrow_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(loan): Json<CreateEquipmentLoan>,
) -> AppResult<(StatusCode, Json<EquipmentLoan>)> {
    claims.require_staff()?;

    let created = state.services.equipment.borrow(id, &loan).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Return a borrowed unit
#[utoipa::path(
    post,
    path = "/equipment/loans/{id}/return",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Unit returned", body = EquipmentLoan),
        (status = 404, description = "Loan not found"),
        (status = 422, description = "Already returned")
    )
)]
pub async fn return_equipment_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipmentLoan>> {
    claims.require_staff()?;

    let loan = state.services.equipment.return_loan(id).await?;
    Ok(Json(loan))
}

/// Active equipment loans for a user
#[utoipa::path(
    get,
    path = "/users/{id}/equipment-loans",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User's active loans", body = Vec<EquipmentLoan>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_equipment_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(user_id): Path<i32>,
) -> AppResult<Json<Vec<EquipmentLoan>>> {
    if claims.user_id != user_id {
        claims.require_staff()?;
    }

    let loans = state.services.equipment.user_loans(user_id).await?;
    Ok(Json(loans))
}
