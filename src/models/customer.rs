// src/models/customer.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- ENUMS ---
// Os rótulos canônicos ("Email Sent", "Meeting Scheduled"...) são os que
// circulam no JSON, no banco e no CSV exportado.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum CustomerType {
    Retailer,
    Distributor,
    Contractor,
    Designer,
    Architect,
    Builder,
    #[default]
    Other,
}

impl CustomerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerType::Retailer => "Retailer",
            CustomerType::Distributor => "Distributor",
            CustomerType::Contractor => "Contractor",
            CustomerType::Designer => "Designer",
            CustomerType::Architect => "Architect",
            CustomerType::Builder => "Builder",
            CustomerType::Other => "Other",
        }
    }

    /// Normalização frouxa usada pela importação e pela leitura do banco:
    /// compara em minúsculas e cai no padrão ("Other") se não reconhecer.
    pub fn from_loose(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "retailer" => CustomerType::Retailer,
            "distributor" => CustomerType::Distributor,
            "contractor" => CustomerType::Contractor,
            "designer" => CustomerType::Designer,
            "architect" => CustomerType::Architect,
            "builder" => CustomerType::Builder,
            _ => CustomerType::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum CustomerStatus {
    #[default]
    Lead,
    #[serde(rename = "Email Sent")]
    EmailSent,
    #[serde(rename = "Meeting Scheduled")]
    MeetingScheduled,
    Negotiation,
    Won,
    Lost,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Lead => "Lead",
            CustomerStatus::EmailSent => "Email Sent",
            CustomerStatus::MeetingScheduled => "Meeting Scheduled",
            CustomerStatus::Negotiation => "Negotiation",
            CustomerStatus::Won => "Won",
            CustomerStatus::Lost => "Lost",
        }
    }

    pub fn from_loose(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "lead" => CustomerStatus::Lead,
            "email sent" => CustomerStatus::EmailSent,
            "meeting scheduled" => CustomerStatus::MeetingScheduled,
            "negotiation" => CustomerStatus::Negotiation,
            "won" => CustomerStatus::Won,
            "lost" => CustomerStatus::Lost,
            _ => CustomerStatus::Lead,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum CustomerPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl CustomerPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerPriority::High => "High",
            CustomerPriority::Medium => "Medium",
            CustomerPriority::Low => "Low",
        }
    }

    pub fn from_loose(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "high" => CustomerPriority::High,
            "medium" => CustomerPriority::Medium,
            "low" => CustomerPriority::Low,
            _ => CustomerPriority::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum ValueTier {
    Premium,
    #[default]
    Standard,
    Basic,
    // O legado permite valor vazio, então preservamos a variante.
    #[serde(rename = "")]
    Unset,
}

impl ValueTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueTier::Premium => "Premium",
            ValueTier::Standard => "Standard",
            ValueTier::Basic => "Basic",
            ValueTier::Unset => "",
        }
    }

    pub fn from_loose(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "premium" => ValueTier::Premium,
            "standard" => ValueTier::Standard,
            "basic" => ValueTier::Basic,
            // O vazio é um membro do enum, não um valor desconhecido.
            "" => ValueTier::Unset,
            _ => ValueTier::Standard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum DirectImport {
    Yes,
    #[default]
    No,
    Distributor,
    #[serde(rename = "")]
    Unset,
}

impl DirectImport {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectImport::Yes => "Yes",
            DirectImport::No => "No",
            DirectImport::Distributor => "Distributor",
            DirectImport::Unset => "",
        }
    }

    pub fn from_loose(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "yes" => DirectImport::Yes,
            "no" => DirectImport::No,
            "distributor" => DirectImport::Distributor,
            "" => DirectImport::Unset,
            _ => DirectImport::No,
        }
    }
}

// --- CLIENTE (a entidade central) ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,

    pub name: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub website: String,

    pub customer_type: CustomerType,
    pub status: CustomerStatus,
    pub priority: CustomerPriority,
    pub value_tier: ValueTier,
    pub direct_import: DirectImport,

    pub tags: Vec<String>,

    pub is_returning_customer: bool,
    pub is_hot_lead: bool,
    pub is_pinned: bool,

    // Datas de acompanhamento são "dia de calendário", sem horário.
    #[schema(value_type = Option<String>, format = Date, example = "2025-06-01")]
    pub last_follow_up_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date, example = "2025-06-15")]
    pub next_follow_up_date: Option<NaiveDate>,

    pub requirements: String,
    pub last_contact_notes: String,
    pub key_meeting_points: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Materializa um cliente novo a partir do payload, aplicando os
    /// valores padrão para tudo que foi omitido.
    pub fn from_draft(id: Uuid, draft: CustomerDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            country: draft.country,
            region: draft.region,
            city: draft.city,
            contact_person: draft.contact_person,
            email: draft.email,
            phone: draft.phone,
            website: draft.website,
            customer_type: draft.customer_type,
            status: draft.status,
            priority: draft.priority,
            value_tier: draft.value_tier,
            direct_import: draft.direct_import,
            tags: draft.tags,
            is_returning_customer: draft.is_returning_customer,
            is_hot_lead: draft.is_hot_lead,
            is_pinned: draft.is_pinned,
            last_follow_up_date: draft.last_follow_up_date,
            next_follow_up_date: draft.next_follow_up_date,
            requirements: draft.requirements,
            last_contact_notes: draft.last_contact_notes,
            key_meeting_points: draft.key_meeting_points,
            created_at: now,
            updated_at: now,
        }
    }

    /// Substituição completa (PUT): id e created_at são imutáveis,
    /// updated_at é sempre renovado.
    pub fn apply_draft(&mut self, draft: CustomerDraft, now: DateTime<Utc>) {
        let created_at = self.created_at;
        let id = self.id;
        *self = Customer::from_draft(id, draft, now);
        self.created_at = created_at;
    }
}

// --- PAYLOAD DE CRIAÇÃO/EDIÇÃO ---

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Acme Surfaces")]
    pub name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "US")]
    pub country: String,

    #[serde(default)]
    pub region: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Los Angeles")]
    pub city: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Jane Doe")]
    pub contact_person: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "jane@acme.com")]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub website: String,

    #[serde(default)]
    pub customer_type: CustomerType,

    #[serde(default)]
    pub status: CustomerStatus,

    #[serde(default)]
    pub priority: CustomerPriority,

    #[serde(default)]
    pub value_tier: ValueTier,

    #[serde(default)]
    pub direct_import: DirectImport,

    #[serde(default)]
    #[schema(example = json!(["vip", "2025"]))]
    pub tags: Vec<String>,

    #[serde(default)]
    pub is_returning_customer: bool,

    #[serde(default)]
    pub is_hot_lead: bool,

    #[serde(default)]
    pub is_pinned: bool,

    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub last_follow_up_date: Option<NaiveDate>,

    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub next_follow_up_date: Option<NaiveDate>,

    #[serde(default)]
    pub requirements: String,

    #[serde(default)]
    pub last_contact_notes: String,

    #[serde(default)]
    pub key_meeting_points: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&CustomerStatus::EmailSent).unwrap();
        assert_eq!(json, "\"Email Sent\"");
        let back: CustomerStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CustomerStatus::EmailSent);
    }

    #[test]
    fn loose_parsing_falls_back_to_documented_defaults() {
        assert_eq!(CustomerType::from_loose("retailer"), CustomerType::Retailer);
        assert_eq!(CustomerType::from_loose("???"), CustomerType::Other);
        assert_eq!(CustomerStatus::from_loose("WON"), CustomerStatus::Won);
        assert_eq!(CustomerStatus::from_loose(""), CustomerStatus::Lead);
        assert_eq!(CustomerPriority::from_loose("urgent"), CustomerPriority::Medium);
        assert_eq!(ValueTier::from_loose("gold"), ValueTier::Standard);
        assert_eq!(DirectImport::from_loose("maybe"), DirectImport::No);
        // O vazio do legado é preservado, não normalizado para o padrão.
        assert_eq!(ValueTier::from_loose(""), ValueTier::Unset);
        assert_eq!(ValueTier::from_loose("  "), ValueTier::Unset);
        assert_eq!(DirectImport::from_loose(""), DirectImport::Unset);
    }

    #[test]
    fn draft_defaults_match_the_creation_table() {
        let draft: CustomerDraft = serde_json::from_value(serde_json::json!({
            "name": "Acme",
            "country": "US",
            "city": "LA",
            "contactPerson": "J",
            "email": "j@x.com",
        }))
        .unwrap();

        assert_eq!(draft.customer_type, CustomerType::Other);
        assert_eq!(draft.status, CustomerStatus::Lead);
        assert_eq!(draft.priority, CustomerPriority::Medium);
        assert_eq!(draft.value_tier, ValueTier::Standard);
        assert_eq!(draft.direct_import, DirectImport::No);
        assert!(draft.tags.is_empty());
        assert!(!draft.is_hot_lead);
        assert!(draft.next_follow_up_date.is_none());
        assert_eq!(draft.requirements, "");
    }
}
