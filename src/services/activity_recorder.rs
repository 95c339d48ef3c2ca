// src/services/activity_recorder.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::RecordStore,
    models::logs::ActivityLog,
};

// O feed global corta em 50 entradas quando o chamador não pede um limite.
const DEFAULT_FEED_LIMIT: i64 = 50;

/// Trilha de auditoria append-only: cada mutação relevante (toggle de hot
/// lead, fixar/desafixar, e-mail registrado) vira uma entrada com timestamp
/// do servidor.
#[derive(Clone)]
pub struct ActivityRecorder {
    store: Arc<dyn RecordStore>,
}

impl ActivityRecorder {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Registra uma entrada. Gravar contra um cliente inexistente é erro de
    /// programação de quem chamou, mas ainda assim validamos aqui.
    pub async fn record(
        &self,
        customer_id: Uuid,
        action: &str,
        description: String,
    ) -> Result<ActivityLog, AppError> {
        if self.store.get_customer(customer_id).await.is_err() {
            return Err(AppError::field_error("customerId", "unknown_customer"));
        }

        let entry = ActivityLog {
            id: Uuid::new_v4(),
            customer_id,
            action: action.to_string(),
            description,
            timestamp: Utc::now(),
        };
        self.store.create_activity_log(entry).await
    }

    /// Feed global, mais recente primeiro. Limite negativo vale zero, para
    /// que os dois adaptadores respondam igual.
    pub async fn list_all(&self, limit: Option<i64>) -> Result<Vec<ActivityLog>, AppError> {
        self.store
            .activity_logs(Some(limit.unwrap_or(DEFAULT_FEED_LIMIT).max(0)))
            .await
    }

    /// Feed de um cliente, mais recente primeiro. 404 se o cliente não existe.
    pub async fn list_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<ActivityLog>, AppError> {
        self.store.get_customer(customer_id).await?;
        self.store.activity_logs_for_customer(customer_id).await
    }
}
