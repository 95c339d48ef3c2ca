// src/db/mem_store.rs

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::record_store::RecordStore,
    models::{
        customer::Customer,
        logs::{ActivityLog, EmailLog},
        note::Note,
    },
};

// Coleções em ordem de inserção. Toda operação composta (cascata de
// exclusão, criação com checagem do pai) roda sob um único write lock,
// então o chamador nunca observa estado parcial.
#[derive(Default)]
struct MemData {
    customers: Vec<Customer>,
    notes: Vec<Note>,
    email_logs: Vec<EmailLog>,
    activity_logs: Vec<ActivityLog>,
}

/// Armazenamento em memória do processo. É o fallback quando o Postgres
/// está inacessível na subida, e o backend dos testes de integração.
#[derive(Default)]
pub struct MemStore {
    data: RwLock<MemData>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemStore {
    async fn create_customer(&self, customer: Customer) -> Result<Customer, AppError> {
        let mut data = self.data.write().await;
        data.customers.push(customer.clone());
        Ok(customer)
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        Ok(self.data.read().await.customers.clone())
    }

    async fn get_customer(&self, id: Uuid) -> Result<Customer, AppError> {
        self.data
            .read()
            .await
            .customers
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(AppError::NotFound("Cliente"))
    }

    async fn update_customer(&self, customer: Customer) -> Result<Customer, AppError> {
        let mut data = self.data.write().await;
        let slot = data
            .customers
            .iter_mut()
            .find(|c| c.id == customer.id)
            .ok_or(AppError::NotFound("Cliente"))?;
        *slot = customer.clone();
        Ok(customer)
    }

    async fn delete_customer(&self, id: Uuid) -> Result<(), AppError> {
        let mut data = self.data.write().await;
        let before = data.customers.len();
        data.customers.retain(|c| c.id != id);
        if data.customers.len() == before {
            return Err(AppError::NotFound("Cliente"));
        }
        // Cascata: nenhum filho órfão sobrevive.
        data.notes.retain(|n| n.customer_id != id);
        data.email_logs.retain(|e| e.customer_id != id);
        data.activity_logs.retain(|a| a.customer_id != id);
        Ok(())
    }

    async fn toggle_hot_lead(&self, id: Uuid) -> Result<Customer, AppError> {
        let mut data = self.data.write().await;
        let customer = data
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AppError::NotFound("Cliente"))?;
        customer.is_hot_lead = !customer.is_hot_lead;
        customer.updated_at = Utc::now();
        Ok(customer.clone())
    }

    async fn toggle_pinned(&self, id: Uuid) -> Result<Customer, AppError> {
        let mut data = self.data.write().await;
        let customer = data
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AppError::NotFound("Cliente"))?;
        customer.is_pinned = !customer.is_pinned;
        customer.updated_at = Utc::now();
        Ok(customer.clone())
    }

    async fn customers_with_upcoming_follow_ups(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Customer>, AppError> {
        let data = self.data.read().await;
        let mut hits: Vec<Customer> = data
            .customers
            .iter()
            .filter(|c| {
                c.next_follow_up_date
                    .is_some_and(|d| d >= from && d <= to)
            })
            .cloned()
            .collect();
        hits.sort_by_key(|c| c.next_follow_up_date);
        Ok(hits)
    }

    async fn customers_needing_attention(&self) -> Result<Vec<Customer>, AppError> {
        let data = self.data.read().await;
        Ok(data
            .customers
            .iter()
            .filter(|c| c.is_hot_lead || c.is_pinned)
            .cloned()
            .collect())
    }

    async fn create_note(&self, note: Note) -> Result<Note, AppError> {
        let mut data = self.data.write().await;
        if !data.customers.iter().any(|c| c.id == note.customer_id) {
            return Err(AppError::NotFound("Cliente"));
        }
        data.notes.push(note.clone());
        Ok(note)
    }

    async fn notes_for_customer(&self, customer_id: Uuid) -> Result<Vec<Note>, AppError> {
        let data = self.data.read().await;
        let mut notes: Vec<Note> = data
            .notes
            .iter()
            .rev()
            .filter(|n| n.customer_id == customer_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(notes)
    }

    async fn get_note(&self, id: Uuid) -> Result<Note, AppError> {
        self.data
            .read()
            .await
            .notes
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or(AppError::NotFound("Nota"))
    }

    async fn update_note(&self, note: Note) -> Result<Note, AppError> {
        let mut data = self.data.write().await;
        let slot = data
            .notes
            .iter_mut()
            .find(|n| n.id == note.id)
            .ok_or(AppError::NotFound("Nota"))?;
        *slot = note.clone();
        Ok(note)
    }

    async fn delete_note(&self, id: Uuid) -> Result<(), AppError> {
        let mut data = self.data.write().await;
        let before = data.notes.len();
        data.notes.retain(|n| n.id != id);
        if data.notes.len() == before {
            return Err(AppError::NotFound("Nota"));
        }
        Ok(())
    }

    async fn toggle_key_note(&self, id: Uuid) -> Result<Note, AppError> {
        let mut data = self.data.write().await;
        let note = data
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(AppError::NotFound("Nota"))?;
        note.is_key = !note.is_key;
        Ok(note.clone())
    }

    async fn create_email_log(&self, log: EmailLog) -> Result<EmailLog, AppError> {
        let mut data = self.data.write().await;
        if !data.customers.iter().any(|c| c.id == log.customer_id) {
            return Err(AppError::NotFound("Cliente"));
        }
        data.email_logs.push(log.clone());
        Ok(log)
    }

    async fn email_logs_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<EmailLog>, AppError> {
        let data = self.data.read().await;
        let mut logs: Vec<EmailLog> = data
            .email_logs
            .iter()
            .rev()
            .filter(|e| e.customer_id == customer_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(logs)
    }

    async fn delete_email_log(&self, id: Uuid) -> Result<(), AppError> {
        let mut data = self.data.write().await;
        let before = data.email_logs.len();
        data.email_logs.retain(|e| e.id != id);
        if data.email_logs.len() == before {
            return Err(AppError::NotFound("Registro de e-mail"));
        }
        Ok(())
    }

    async fn create_activity_log(&self, log: ActivityLog) -> Result<ActivityLog, AppError> {
        let mut data = self.data.write().await;
        if !data.customers.iter().any(|c| c.id == log.customer_id) {
            return Err(AppError::NotFound("Cliente"));
        }
        data.activity_logs.push(log.clone());
        Ok(log)
    }

    async fn activity_logs(&self, limit: Option<i64>) -> Result<Vec<ActivityLog>, AppError> {
        let data = self.data.read().await;
        // Em timestamps iguais, a entrada inserida por último vem primeiro
        // (a ordenação estável preserva a ordem reversa de inserção).
        let mut logs: Vec<ActivityLog> = data.activity_logs.iter().rev().cloned().collect();
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        if let Some(limit) = limit {
            logs.truncate(limit.max(0) as usize);
        }
        Ok(logs)
    }

    async fn activity_logs_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<ActivityLog>, AppError> {
        let data = self.data.read().await;
        let mut logs: Vec<ActivityLog> = data
            .activity_logs
            .iter()
            .rev()
            .filter(|a| a.customer_id == customer_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(logs)
    }
}
