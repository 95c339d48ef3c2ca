// src/db/record_store.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        customer::Customer,
        logs::{ActivityLog, EmailLog},
        note::Note,
    },
};

/// Contrato único de persistência. Existem dois adaptadores: Postgres
/// (`PgStore`) e memória (`MemStore`, usado como degradação quando o banco
/// está indisponível e nos testes).
///
/// Invariante referencial: criar nota/e-mail/auditoria para um cliente que
/// não existe falha com `NotFound`; excluir um cliente apaga todos os filhos
/// de forma atômica do ponto de vista do chamador.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // --- Clientes ---

    async fn create_customer(&self, customer: Customer) -> Result<Customer, AppError>;

    /// Listagem completa, em ordem de inserção.
    async fn list_customers(&self) -> Result<Vec<Customer>, AppError>;

    async fn get_customer(&self, id: Uuid) -> Result<Customer, AppError>;

    /// Substituição completa do registro (o `updated_at` já vem renovado).
    async fn update_customer(&self, customer: Customer) -> Result<Customer, AppError>;

    async fn delete_customer(&self, id: Uuid) -> Result<(), AppError>;

    async fn toggle_hot_lead(&self, id: Uuid) -> Result<Customer, AppError>;

    async fn toggle_pinned(&self, id: Uuid) -> Result<Customer, AppError>;

    /// Clientes com follow-up dentro de [from, to], inclusivo nas duas
    /// pontas, ordenados pela data.
    async fn customers_with_upcoming_follow_ups(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Customer>, AppError>;

    /// Regra observada no produto: hot lead OU fixado. Nada de datas aqui.
    async fn customers_needing_attention(&self) -> Result<Vec<Customer>, AppError>;

    // --- Notas ---

    async fn create_note(&self, note: Note) -> Result<Note, AppError>;

    /// Mais recentes primeiro.
    async fn notes_for_customer(&self, customer_id: Uuid) -> Result<Vec<Note>, AppError>;

    async fn get_note(&self, id: Uuid) -> Result<Note, AppError>;

    async fn update_note(&self, note: Note) -> Result<Note, AppError>;

    async fn delete_note(&self, id: Uuid) -> Result<(), AppError>;

    async fn toggle_key_note(&self, id: Uuid) -> Result<Note, AppError>;

    // --- Registros de e-mail ---

    async fn create_email_log(&self, log: EmailLog) -> Result<EmailLog, AppError>;

    /// Mais recentes primeiro.
    async fn email_logs_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<EmailLog>, AppError>;

    async fn delete_email_log(&self, id: Uuid) -> Result<(), AppError>;

    // --- Auditoria (append-only) ---

    async fn create_activity_log(&self, log: ActivityLog) -> Result<ActivityLog, AppError>;

    /// Feed global, mais recentes primeiro, opcionalmente limitado.
    async fn activity_logs(&self, limit: Option<i64>) -> Result<Vec<ActivityLog>, AppError>;

    async fn activity_logs_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<ActivityLog>, AppError>;
}
