// src/services/customer_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::RecordStore,
    models::{
        customer::{Customer, CustomerDraft},
        logs::{EmailLog, EmailLogDraft},
        note::{Note, NoteDraft},
    },
    services::{
        ActivityRecorder,
        filter::{CustomerFilter, filter_customers},
    },
};

/// Serviço central: CRUD de clientes, notas e registros de e-mail, mais os
/// toggles de workflow. Mutações auditáveis passam pelo `ActivityRecorder`.
#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn RecordStore>,
    recorder: ActivityRecorder,
}

impl CustomerService {
    pub fn new(store: Arc<dyn RecordStore>, recorder: ActivityRecorder) -> Self {
        Self { store, recorder }
    }

    // --- Clientes ---

    pub async fn create(&self, draft: CustomerDraft) -> Result<Customer, AppError> {
        draft.validate()?;
        let customer = Customer::from_draft(Uuid::new_v4(), draft, Utc::now());
        self.store.create_customer(customer).await
    }

    pub async fn list(&self, filter: &CustomerFilter) -> Result<Vec<Customer>, AppError> {
        let customers = self.store.list_customers().await?;
        Ok(filter_customers(customers, filter))
    }

    pub async fn get(&self, id: Uuid) -> Result<Customer, AppError> {
        self.store.get_customer(id).await
    }

    pub async fn update(&self, id: Uuid, draft: CustomerDraft) -> Result<Customer, AppError> {
        draft.validate()?;
        let mut customer = self.store.get_customer(id).await?;
        customer.apply_draft(draft, Utc::now());
        self.store.update_customer(customer).await
    }

    /// Exclusão com cascata: notas, e-mails e auditoria vão junto.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.store.delete_customer(id).await
    }

    pub async fn toggle_hot_lead(&self, id: Uuid) -> Result<Customer, AppError> {
        let customer = self.store.toggle_hot_lead(id).await?;
        let (action, description) = if customer.is_hot_lead {
            ("Hot Lead Added", "Customer was marked as Hot Lead")
        } else {
            ("Hot Lead Removed", "Customer was removed from Hot Lead")
        };
        self.recorder.record(id, action, description.to_string()).await?;
        Ok(customer)
    }

    pub async fn toggle_pinned(&self, id: Uuid) -> Result<Customer, AppError> {
        let customer = self.store.toggle_pinned(id).await?;
        let (action, description) = if customer.is_pinned {
            ("Customer Pinned", "Customer was pinned")
        } else {
            ("Customer Unpinned", "Customer was unpinned")
        };
        self.recorder.record(id, action, description.to_string()).await?;
        Ok(customer)
    }

    // --- Notas ---

    pub async fn add_note(&self, customer_id: Uuid, draft: NoteDraft) -> Result<Note, AppError> {
        draft.validate()?;
        let note = Note::from_draft(Uuid::new_v4(), customer_id, draft, Utc::now());
        self.store.create_note(note).await
    }

    pub async fn notes(&self, customer_id: Uuid) -> Result<Vec<Note>, AppError> {
        self.store.get_customer(customer_id).await?;
        self.store.notes_for_customer(customer_id).await
    }

    pub async fn edit_note(&self, id: Uuid, draft: NoteDraft) -> Result<Note, AppError> {
        draft.validate()?;
        let mut note = self.store.get_note(id).await?;
        note.apply_draft(draft);
        self.store.update_note(note).await
    }

    pub async fn remove_note(&self, id: Uuid) -> Result<(), AppError> {
        self.store.delete_note(id).await
    }

    pub async fn toggle_key_note(&self, id: Uuid) -> Result<Note, AppError> {
        self.store.toggle_key_note(id).await
    }

    // --- Registros de e-mail ---

    pub async fn log_email(
        &self,
        customer_id: Uuid,
        draft: EmailLogDraft,
    ) -> Result<EmailLog, AppError> {
        draft.validate()?;
        let log = EmailLog::from_draft(Uuid::new_v4(), customer_id, draft, Utc::now());
        let log = self.store.create_email_log(log).await?;
        self.recorder
            .record(
                customer_id,
                "Email Logged",
                format!("Email \"{}\" was logged", log.subject),
            )
            .await?;
        Ok(log)
    }

    pub async fn email_logs(&self, customer_id: Uuid) -> Result<Vec<EmailLog>, AppError> {
        self.store.get_customer(customer_id).await?;
        self.store.email_logs_for_customer(customer_id).await
    }

    pub async fn remove_email_log(&self, id: Uuid) -> Result<(), AppError> {
        self.store.delete_email_log(id).await
    }
}
