// src/handlers/email_logs.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::logs::{EmailLog, EmailLogDraft},
};

// POST /api/customers/{id}/email-logs
#[utoipa::path(
    post,
    path = "/api/customers/{id}/email-logs",
    tag = "E-mails",
    request_body = EmailLogDraft,
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 201, description = "E-mail registrado, com entrada na auditoria", body = EmailLog),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn log_email(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EmailLogDraft>,
) -> Result<impl IntoResponse, AppError> {
    let log = app_state.customer_service.log_email(id, payload).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

// GET /api/customers/{id}/email-logs
#[utoipa::path(
    get,
    path = "/api/customers/{id}/email-logs",
    tag = "E-mails",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "E-mails do cliente, mais recente primeiro", body = Vec<EmailLog>),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn list_email_logs(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let logs = app_state.customer_service.email_logs(id).await?;
    Ok((StatusCode::OK, Json(logs)))
}

// DELETE /api/email-logs/{id}
#[utoipa::path(
    delete,
    path = "/api/email-logs/{id}",
    tag = "E-mails",
    params(("id" = Uuid, Path, description = "ID do registro")),
    responses(
        (status = 204, description = "Registro removido"),
        (status = 404, description = "Registro não encontrado")
    )
)]
pub async fn delete_email_log(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.customer_service.remove_email_log(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
