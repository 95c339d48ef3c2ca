// src/handlers/transfer.rs
//
// Importação e exportação em massa. O corpo da importação é o CSV cru
// (text/csv), não multipart.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    common::error::AppError,
    config::AppState,
    services::{
        export::{export_csv, export_filename},
        filter::CustomerFilter,
        import::ImportReport,
    },
};

// GET /api/customers/export
#[utoipa::path(
    get,
    path = "/api/customers/export",
    tag = "Transferência",
    responses(
        (status = 200, description = "CSV com a carteira completa", content_type = "text/csv")
    )
)]
pub async fn export_customers(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state
        .customer_service
        .list(&CustomerFilter::default())
        .await?;
    let body = export_csv(&customers)?;
    let filename = export_filename(Utc::now().date_naive());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    ))
}

// POST /api/customers/import
#[utoipa::path(
    post,
    path = "/api/customers/import",
    tag = "Transferência",
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Resumo da importação", body = ImportReport),
        (status = 400, description = "CSV ilegível")
    )
)]
pub async fn import_customers(
    State(app_state): State<AppState>,
    body: String,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state.import_service.import_csv(body.as_bytes()).await?;
    Ok((StatusCode::OK, Json(report)))
}
