// src/handlers/followups.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    models::customer::Customer,
    services::followup::FollowUpGroup,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FollowUpQuery {
    /// Janela em dias a partir de hoje (padrão 7).
    pub days: Option<i64>,
}

// GET /api/follow-ups
#[utoipa::path(
    get,
    path = "/api/follow-ups",
    tag = "Follow-ups",
    params(FollowUpQuery),
    responses(
        (status = 200, description = "Clientes com follow-up dentro da janela", body = Vec<Customer>)
    )
)]
pub async fn upcoming_follow_ups(
    State(app_state): State<AppState>,
    Query(query): Query<FollowUpQuery>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state
        .followup_service
        .upcoming(query.days.unwrap_or(7))
        .await?;
    Ok((StatusCode::OK, Json(customers)))
}

// GET /api/follow-ups/calendar
#[utoipa::path(
    get,
    path = "/api/follow-ups/calendar",
    tag = "Follow-ups",
    responses(
        (status = 200, description = "Grupos por dia, em ordem cronológica", body = Vec<FollowUpGroup>)
    )
)]
pub async fn follow_up_calendar(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let groups = app_state.followup_service.calendar().await?;
    Ok((StatusCode::OK, Json(groups)))
}
