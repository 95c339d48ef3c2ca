// src/handlers/customers.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::customer::{Customer, CustomerDraft},
    services::filter::CustomerFilter,
};

// POST /api/customers
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "Clientes",
    request_body = CustomerDraft,
    responses(
        (status = 201, description = "Cliente criado", body = Customer),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    Json(payload): Json<CustomerDraft>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state.customer_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

// GET /api/customers
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "Clientes",
    params(CustomerFilter),
    responses(
        (status = 200, description = "Lista de clientes (filtrada)", body = Vec<Customer>)
    )
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    Query(filter): Query<CustomerFilter>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state.customer_service.list(&filter).await?;
    Ok((StatusCode::OK, Json(customers)))
}

// GET /api/customers/{id}
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente encontrado", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state.customer_service.get(id).await?;
    Ok((StatusCode::OK, Json(customer)))
}

// PUT /api/customers/{id}
#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    tag = "Clientes",
    request_body = CustomerDraft,
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente atualizado", body = Customer),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CustomerDraft>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state.customer_service.update(id, payload).await?;
    Ok((StatusCode::OK, Json(customer)))
}

// DELETE /api/customers/{id}
#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente e registros vinculados removidos"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn delete_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.customer_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/customers/{id}/toggle-hot-lead
#[utoipa::path(
    post,
    path = "/api/customers/{id}/toggle-hot-lead",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Flag invertida, registrada na auditoria", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn toggle_hot_lead(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state.customer_service.toggle_hot_lead(id).await?;
    Ok((StatusCode::OK, Json(customer)))
}

// POST /api/customers/{id}/toggle-pinned
#[utoipa::path(
    post,
    path = "/api/customers/{id}/toggle-pinned",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Flag invertida, registrada na auditoria", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn toggle_pinned(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state.customer_service.toggle_pinned(id).await?;
    Ok((StatusCode::OK, Json(customer)))
}

// GET /api/customers/needs-attention
#[utoipa::path(
    get,
    path = "/api/customers/needs-attention",
    tag = "Clientes",
    responses(
        (status = 200, description = "Clientes marcados como hot lead ou fixados", body = Vec<Customer>)
    )
)]
pub async fn needs_attention(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state.followup_service.needing_attention().await?;
    Ok((StatusCode::OK, Json(customers)))
}
