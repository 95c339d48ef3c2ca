// src/handlers/activity_logs.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState, models::logs::ActivityLog};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitQuery {
    /// Máximo de entradas no feed (padrão 50).
    pub limit: Option<i64>,
}

// GET /api/activity-logs
#[utoipa::path(
    get,
    path = "/api/activity-logs",
    tag = "Auditoria",
    params(LimitQuery),
    responses(
        (status = 200, description = "Feed global, mais recente primeiro", body = Vec<ActivityLog>)
    )
)]
pub async fn list_activity_logs(
    State(app_state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse, AppError> {
    let logs = app_state.recorder.list_all(query.limit).await?;
    Ok((StatusCode::OK, Json(logs)))
}

// GET /api/customers/{id}/activity-logs
#[utoipa::path(
    get,
    path = "/api/customers/{id}/activity-logs",
    tag = "Auditoria",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Trilha do cliente, mais recente primeiro", body = Vec<ActivityLog>),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn list_customer_activity(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let logs = app_state.recorder.list_for_customer(id).await?;
    Ok((StatusCode::OK, Json(logs)))
}
