// src/models/note.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Anotação livre vinculada a exatamente um cliente. As imagens são payloads
// codificados inline (base64), na ordem em que foram anexadas.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub text: String,
    pub next_step: String,
    pub is_key: bool,
    pub images: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Ligou pedindo amostras do catálogo novo")]
    pub text: String,

    #[serde(default)]
    pub next_step: String,

    #[serde(default)]
    pub is_key: bool,

    #[serde(default)]
    pub images: Vec<String>,
}

impl Note {
    pub fn from_draft(
        id: Uuid,
        customer_id: Uuid,
        draft: NoteDraft,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer_id,
            text: draft.text,
            next_step: draft.next_step,
            is_key: draft.is_key,
            images: draft.images,
            timestamp: now,
        }
    }

    /// Edição completa: o vínculo com o cliente e o timestamp de criação
    /// nunca mudam.
    pub fn apply_draft(&mut self, draft: NoteDraft) {
        self.text = draft.text;
        self.next_step = draft.next_step;
        self.is_key = draft.is_key;
        self.images = draft.images;
    }
}
