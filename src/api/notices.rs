//! Notice endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::notice::{CreateNotice, Notice, NoticeQuery, UpdateNotice},
};

use super::AuthenticatedUser;

/// List notices (public)
#[utoipa::path(
    get,
    path = "/notices",
    tag = "notices",
    params(NoticeQuery),
    responses(
        (status = 200, description = "Notice list", body = Vec<Notice>)
    )
)]
pub async fn list_notices(
    State(state): State<crate::AppState>,
    Query(query): Query<NoticeQuery>,
) -> AppResult<Json<Vec<Notice>>> {
    let notices = state.services.notices.list(&query).await?;
    Ok(Json(notices))
}

/// Get notice by ID (public)
#[utoipa::path(
    get,
    path = "/notices/{id}",
    tag = "notices",
    params(("id" = i32, Path, description = "Notice ID")),
    responses(
        (status = 200, description = "Notice details", body = Notice),
        (status = 404, description = "Notice not found")
    )
)]
pub async fn get_notice(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Notice>> {
    let notice = state.services.notices.get_by_id(id).await?;
    Ok(Json(notice))
}

/// Create a notice
#[utoipa::path(
    post,
    path = "/notices",
    tag = "notices",
    security(("bearer_auth" = [])),
    request_body = CreateNotice,
    responses(
        (status = 201, description = "Notice created", body = Notice),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_notice(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateNotice>,
) -> AppResult<(StatusCode, Json<Notice>)> {
    claims.require_staff()?;
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let notice = state.services.notices.create(&data, claims.user_id).await?;
    Ok((StatusCode::CREATED, Json(notice)))
}

/// Update a notice
#[utoipa::path(
    put,
    path = "/notices/{id}",
    tag = "notices",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notice ID")),
    request_body = UpdateNotice,
    responses(
        (status = 200, description = "Notice updated", body = Notice),
        (status = 404, description = "Notice not found")
    )
)]
pub async fn update_notice(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateNotice>,
) -> AppResult<Json<Notice>> {
    claims.require_staff()?;
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let notice = state.services.notices.update(id, &data).await?;
    Ok(Json(notice))
}

/// Delete a notice
#[utoipa::path(
    delete,
    path = "/notices/{id}",
    tag = "notices",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notice ID")),
    responses(
        (status = 204, description = "Notice deleted"),
        (status = 404, description = "Notice not found")
    )
)]
pub async fn delete_notice(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_staff()?;
    state.services.notices.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
