// src/models/logs.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- REGISTRO DE E-MAIL ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailLog {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub subject: String,
    pub content: String,
    pub sent_by: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailLogDraft {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Proposta comercial Q3")]
    pub subject: String,

    #[validate(length(min = 1, message = "required"))]
    pub content: String,

    #[serde(default)]
    pub sent_by: String,
}

impl EmailLog {
    pub fn from_draft(
        id: Uuid,
        customer_id: Uuid,
        draft: EmailLogDraft,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer_id,
            subject: draft.subject,
            content: draft.content,
            sent_by: draft.sent_by,
            date: now,
        }
    }
}

// --- TRILHA DE AUDITORIA ---
// Append-only: nunca editada nem apagada pelo usuário (só pela cascata
// de exclusão do cliente).

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub action: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}
