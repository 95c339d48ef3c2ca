// src/db/pg_store.rs

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::record_store::RecordStore,
    models::{
        customer::{
            Customer, CustomerPriority, CustomerStatus, CustomerType, DirectImport, ValueTier,
        },
        logs::{ActivityLog, EmailLog},
        note::Note,
    },
};

/// Adaptador Postgres do `RecordStore`. Os enums são guardados como TEXT com
/// os rótulos canônicos; a conversão de volta é tolerante e cai nos padrões
/// documentados quando encontra um valor fora da tabela.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// --- LINHAS CRUAS (uma struct por tabela) ---

#[derive(FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    country: String,
    region: String,
    city: String,
    contact_person: String,
    email: String,
    phone: String,
    website: String,
    customer_type: String,
    status: String,
    priority: String,
    value_tier: String,
    direct_import: String,
    tags: Vec<String>,
    is_returning_customer: bool,
    is_hot_lead: bool,
    is_pinned: bool,
    last_follow_up_date: Option<NaiveDate>,
    next_follow_up_date: Option<NaiveDate>,
    requirements: String,
    last_contact_notes: String,
    key_meeting_points: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            country: row.country,
            region: row.region,
            city: row.city,
            contact_person: row.contact_person,
            email: row.email,
            phone: row.phone,
            website: row.website,
            customer_type: CustomerType::from_loose(&row.customer_type),
            status: CustomerStatus::from_loose(&row.status),
            priority: CustomerPriority::from_loose(&row.priority),
            value_tier: ValueTier::from_loose(&row.value_tier),
            direct_import: DirectImport::from_loose(&row.direct_import),
            tags: row.tags,
            is_returning_customer: row.is_returning_customer,
            is_hot_lead: row.is_hot_lead,
            is_pinned: row.is_pinned,
            last_follow_up_date: row.last_follow_up_date,
            next_follow_up_date: row.next_follow_up_date,
            requirements: row.requirements,
            last_contact_notes: row.last_contact_notes,
            key_meeting_points: row.key_meeting_points,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct NoteRow {
    id: Uuid,
    customer_id: Uuid,
    text: String,
    next_step: String,
    is_key: bool,
    images: Vec<String>,
    timestamp: DateTime<Utc>,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note {
            id: row.id,
            customer_id: row.customer_id,
            text: row.text,
            next_step: row.next_step,
            is_key: row.is_key,
            images: row.images,
            timestamp: row.timestamp,
        }
    }
}

#[derive(FromRow)]
struct EmailLogRow {
    id: Uuid,
    customer_id: Uuid,
    subject: String,
    content: String,
    sent_by: String,
    date: DateTime<Utc>,
}

impl From<EmailLogRow> for EmailLog {
    fn from(row: EmailLogRow) -> Self {
        EmailLog {
            id: row.id,
            customer_id: row.customer_id,
            subject: row.subject,
            content: row.content,
            sent_by: row.sent_by,
            date: row.date,
        }
    }
}

#[derive(FromRow)]
struct ActivityLogRow {
    id: Uuid,
    customer_id: Uuid,
    action: String,
    description: String,
    timestamp: DateTime<Utc>,
}

impl From<ActivityLogRow> for ActivityLog {
    fn from(row: ActivityLogRow) -> Self {
        ActivityLog {
            id: row.id,
            customer_id: row.customer_id,
            action: row.action,
            description: row.description,
            timestamp: row.timestamp,
        }
    }
}

// Violação de chave estrangeira quer dizer "o cliente referenciado não
// existe", que para o chamador é um 404.
fn map_fk_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
            return AppError::NotFound("Cliente");
        }
    }
    e.into()
}

#[async_trait]
impl RecordStore for PgStore {
    async fn create_customer(&self, customer: Customer) -> Result<Customer, AppError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO customers (
                id, name, country, region, city, contact_person, email, phone,
                website, customer_type, status, priority, value_tier,
                direct_import, tags, is_returning_customer, is_hot_lead,
                is_pinned, last_follow_up_date, next_follow_up_date,
                requirements, last_contact_notes, key_meeting_points,
                created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25
            )
            RETURNING *
            "#,
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.country)
        .bind(&customer.region)
        .bind(&customer.city)
        .bind(&customer.contact_person)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.website)
        .bind(customer.customer_type.as_str())
        .bind(customer.status.as_str())
        .bind(customer.priority.as_str())
        .bind(customer.value_tier.as_str())
        .bind(customer.direct_import.as_str())
        .bind(&customer.tags)
        .bind(customer.is_returning_customer)
        .bind(customer.is_hot_lead)
        .bind(customer.is_pinned)
        .bind(customer.last_follow_up_date)
        .bind(customer.next_follow_up_date)
        .bind(&customer.requirements)
        .bind(&customer.last_contact_notes)
        .bind(&customer.key_meeting_points)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT * FROM customers ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn get_customer(&self, id: Uuid) -> Result<Customer, AppError> {
        sqlx::query_as::<_, CustomerRow>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Customer::from)
            .ok_or(AppError::NotFound("Cliente"))
    }

    async fn update_customer(&self, customer: Customer) -> Result<Customer, AppError> {
        sqlx::query_as::<_, CustomerRow>(
            r#"
            UPDATE customers SET
                name = $2, country = $3, region = $4, city = $5,
                contact_person = $6, email = $7, phone = $8, website = $9,
                customer_type = $10, status = $11, priority = $12,
                value_tier = $13, direct_import = $14, tags = $15,
                is_returning_customer = $16, is_hot_lead = $17, is_pinned = $18,
                last_follow_up_date = $19, next_follow_up_date = $20,
                requirements = $21, last_contact_notes = $22,
                key_meeting_points = $23, updated_at = $24
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.country)
        .bind(&customer.region)
        .bind(&customer.city)
        .bind(&customer.contact_person)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.website)
        .bind(customer.customer_type.as_str())
        .bind(customer.status.as_str())
        .bind(customer.priority.as_str())
        .bind(customer.value_tier.as_str())
        .bind(customer.direct_import.as_str())
        .bind(&customer.tags)
        .bind(customer.is_returning_customer)
        .bind(customer.is_hot_lead)
        .bind(customer.is_pinned)
        .bind(customer.last_follow_up_date)
        .bind(customer.next_follow_up_date)
        .bind(&customer.requirements)
        .bind(&customer.last_contact_notes)
        .bind(&customer.key_meeting_points)
        .bind(customer.updated_at)
        .fetch_optional(&self.pool)
        .await?
        .map(Customer::from)
        .ok_or(AppError::NotFound("Cliente"))
    }

    async fn delete_customer(&self, id: Uuid) -> Result<(), AppError> {
        // Transação: ou o cliente some junto com todos os filhos, ou nada.
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM notes WHERE customer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM email_logs WHERE customer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM activity_logs WHERE customer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            // O drop da transação faz rollback.
            return Err(AppError::NotFound("Cliente"));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn toggle_hot_lead(&self, id: Uuid) -> Result<Customer, AppError> {
        sqlx::query_as::<_, CustomerRow>(
            "UPDATE customers SET is_hot_lead = NOT is_hot_lead, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Customer::from)
        .ok_or(AppError::NotFound("Cliente"))
    }

    async fn toggle_pinned(&self, id: Uuid) -> Result<Customer, AppError> {
        sqlx::query_as::<_, CustomerRow>(
            "UPDATE customers SET is_pinned = NOT is_pinned, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Customer::from)
        .ok_or(AppError::NotFound("Cliente"))
    }

    async fn customers_with_upcoming_follow_ups(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Customer>, AppError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT * FROM customers \
             WHERE next_follow_up_date BETWEEN $1 AND $2 \
             ORDER BY next_follow_up_date ASC",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn customers_needing_attention(&self) -> Result<Vec<Customer>, AppError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT * FROM customers \
             WHERE is_hot_lead OR is_pinned \
             ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn create_note(&self, note: Note) -> Result<Note, AppError> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            INSERT INTO notes (id, customer_id, text, next_step, is_key, images, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(note.id)
        .bind(note.customer_id)
        .bind(&note.text)
        .bind(&note.next_step)
        .bind(note.is_key)
        .bind(&note.images)
        .bind(note.timestamp)
        .fetch_one(&self.pool)
        .await
        .map_err(map_fk_violation)?;

        Ok(row.into())
    }

    async fn notes_for_customer(&self, customer_id: Uuid) -> Result<Vec<Note>, AppError> {
        let rows = sqlx::query_as::<_, NoteRow>(
            "SELECT * FROM notes WHERE customer_id = $1 ORDER BY timestamp DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Note::from).collect())
    }

    async fn get_note(&self, id: Uuid) -> Result<Note, AppError> {
        sqlx::query_as::<_, NoteRow>("SELECT * FROM notes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Note::from)
            .ok_or(AppError::NotFound("Nota"))
    }

    async fn update_note(&self, note: Note) -> Result<Note, AppError> {
        sqlx::query_as::<_, NoteRow>(
            "UPDATE notes SET text = $2, next_step = $3, is_key = $4, images = $5 \
             WHERE id = $1 RETURNING *",
        )
        .bind(note.id)
        .bind(&note.text)
        .bind(&note.next_step)
        .bind(note.is_key)
        .bind(&note.images)
        .fetch_optional(&self.pool)
        .await?
        .map(Note::from)
        .ok_or(AppError::NotFound("Nota"))
    }

    async fn delete_note(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Nota"));
        }
        Ok(())
    }

    async fn toggle_key_note(&self, id: Uuid) -> Result<Note, AppError> {
        sqlx::query_as::<_, NoteRow>(
            "UPDATE notes SET is_key = NOT is_key WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Note::from)
        .ok_or(AppError::NotFound("Nota"))
    }

    async fn create_email_log(&self, log: EmailLog) -> Result<EmailLog, AppError> {
        let row = sqlx::query_as::<_, EmailLogRow>(
            r#"
            INSERT INTO email_logs (id, customer_id, subject, content, sent_by, date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(log.id)
        .bind(log.customer_id)
        .bind(&log.subject)
        .bind(&log.content)
        .bind(&log.sent_by)
        .bind(log.date)
        .fetch_one(&self.pool)
        .await
        .map_err(map_fk_violation)?;

        Ok(row.into())
    }

    async fn email_logs_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<EmailLog>, AppError> {
        let rows = sqlx::query_as::<_, EmailLogRow>(
            "SELECT * FROM email_logs WHERE customer_id = $1 ORDER BY date DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EmailLog::from).collect())
    }

    async fn delete_email_log(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM email_logs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Registro de e-mail"));
        }
        Ok(())
    }

    async fn create_activity_log(&self, log: ActivityLog) -> Result<ActivityLog, AppError> {
        let row = sqlx::query_as::<_, ActivityLogRow>(
            r#"
            INSERT INTO activity_logs (id, customer_id, action, description, timestamp)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(log.id)
        .bind(log.customer_id)
        .bind(&log.action)
        .bind(&log.description)
        .bind(log.timestamp)
        .fetch_one(&self.pool)
        .await
        .map_err(map_fk_violation)?;

        Ok(row.into())
    }

    async fn activity_logs(&self, limit: Option<i64>) -> Result<Vec<ActivityLog>, AppError> {
        let rows = match limit {
            Some(limit) => {
                sqlx::query_as::<_, ActivityLogRow>(
                    "SELECT * FROM activity_logs ORDER BY timestamp DESC LIMIT $1",
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ActivityLogRow>(
                    "SELECT * FROM activity_logs ORDER BY timestamp DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(ActivityLog::from).collect())
    }

    async fn activity_logs_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<ActivityLog>, AppError> {
        let rows = sqlx::query_as::<_, ActivityLogRow>(
            "SELECT * FROM activity_logs WHERE customer_id = $1 ORDER BY timestamp DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ActivityLog::from).collect())
    }
}
