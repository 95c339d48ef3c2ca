// src/handlers/notes.rs

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
    models::note::{Note, NoteDraft},
};

// POST /api/customers/{id}/notes
#[utoipa::path(
    post,
    path = "/api/customers/{id}/notes",
    tag = "Notas",
    request_body = NoteDraft,
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 201, description = "Nota criada", body = Note),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn add_note(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NoteDraft>,
) -> Result<impl IntoResponse, AppError> {
    let note = app_state.customer_service.add_note(id, payload).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

// GET /api/customers/{id}/notes
#[utoipa::path(
    get,
    path = "/api/customers/{id}/notes",
    tag = "Notas",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Notas do cliente, mais recente primeiro", body = Vec<Note>),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn list_notes(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let notes = app_state.customer_service.notes(id).await?;
    Ok((StatusCode::OK, Json(notes)))
}

// PUT /api/notes/{id}
#[utoipa::path(
    put,
    path = "/api/notes/{id}",
    tag = "Notas",
    request_body = NoteDraft,
    params(("id" = Uuid, Path, description = "ID da nota")),
    responses(
        (status = 200, description = "Nota atualizada", body = Note),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Nota não encontrada")
    )
)]
pub async fn update_note(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NoteDraft>,
) -> Result<impl IntoResponse, AppError> {
    let note = app_state.customer_service.edit_note(id, payload).await?;
    Ok((StatusCode::OK, Json(note)))
}

// DELETE /api/notes/{id}
#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    tag = "Notas",
    params(("id" = Uuid, Path, description = "ID da nota")),
    responses(
        (status = 204, description = "Nota removida"),
        (status = 404, description = "Nota não encontrada")
    )
)]
pub async fn delete_note(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.customer_service.remove_note(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// PATCH /api/notes/{id}/toggle-key
#[utoipa::path(
    patch,
    path = "/api/notes/{id}/toggle-key",
    tag = "Notas",
    params(("id" = Uuid, Path, description = "ID da nota")),
    responses(
        (status = 200, description = "Flag de nota-chave invertida", body = Note),
        (status = 404, description = "Nota não encontrada")
    )
)]
pub async fn toggle_key_note(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let note = app_state.customer_service.toggle_key_note(id).await?;
    Ok((StatusCode::OK, Json(note)))
}
