// src/services/import.rs
//
// Importação em massa via CSV. Os cabeçalhos são reconhecidos por uma
// normalização frouxa (só alfanuméricos, minúsculas), então "Customer Name",
// "customer_name" e "CustomerName" caem todos na mesma coluna.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    models::customer::{
        CustomerDraft, CustomerPriority, CustomerStatus, CustomerType, DirectImport, ValueTier,
    },
    services::CustomerService,
};

// Apelidos aceitos por campo, já normalizados. O primeiro que tiver valor
// não-vazio na linha vence.
const NAME_KEYS: &[&str] = &["name", "customername", "company", "companyname", "cliente"];
const COUNTRY_KEYS: &[&str] = &["country", "pais"];
const REGION_KEYS: &[&str] = &["region", "state", "province", "regiao"];
const CITY_KEYS: &[&str] = &["city", "cidade"];
const CONTACT_KEYS: &[&str] = &["contactperson", "contact", "contactname", "contato"];
const EMAIL_KEYS: &[&str] = &["email", "emailaddress", "mail"];
const PHONE_KEYS: &[&str] = &["phone", "phonenumber", "telephone", "telefone"];
const WEBSITE_KEYS: &[&str] = &["website", "site", "url"];
const TYPE_KEYS: &[&str] = &["type", "customertype", "tipo"];
const STATUS_KEYS: &[&str] = &["status"];
const PRIORITY_KEYS: &[&str] = &["priority", "prioridade"];
const VALUE_TIER_KEYS: &[&str] = &["valuetier", "tier", "value"];
const DIRECT_IMPORT_KEYS: &[&str] = &["directimport", "import"];
const TAGS_KEYS: &[&str] = &["tags", "labels", "etiquetas"];
const RETURNING_KEYS: &[&str] = &["returningcustomer", "isreturningcustomer", "returning"];
const HOT_LEAD_KEYS: &[&str] = &["hotlead", "ishotlead"];
const PINNED_KEYS: &[&str] = &["pinned", "ispinned"];
const LAST_FOLLOW_UP_KEYS: &[&str] = &["lastfollowup", "lastfollowupdate"];
const NEXT_FOLLOW_UP_KEYS: &[&str] = &["nextfollowup", "nextfollowupdate", "followup"];
const REQUIREMENTS_KEYS: &[&str] = &["requirements", "requisitos", "needs"];
const LAST_CONTACT_KEYS: &[&str] = &["lastcontactnotes", "lastcontact", "notes"];
const KEY_MEETING_KEYS: &[&str] = &["keymeetingpoints", "meetingpoints", "meetingnotes"];

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub imported: usize,
    pub failed: usize,
}

/// Descarta tudo que não é alfanumérico e baixa para minúsculas.
fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Primeiro apelido com valor não-vazio.
fn field(row: &HashMap<String, String>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| row.get(*k))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .unwrap_or("")
        .to_string()
}

fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Coerção booleana do importador: vazio, "0", "false" e "no" (sem
/// distinção de maiúsculas) são falsos, qualquer outro texto é verdadeiro.
fn truthy(raw: &str) -> bool {
    !matches!(raw.trim().to_lowercase().as_str(), "" | "0" | "false" | "no")
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn draft_from_row(row: &HashMap<String, String>) -> CustomerDraft {
    CustomerDraft {
        name: field(row, NAME_KEYS),
        country: field(row, COUNTRY_KEYS),
        region: field(row, REGION_KEYS),
        city: field(row, CITY_KEYS),
        contact_person: field(row, CONTACT_KEYS),
        email: field(row, EMAIL_KEYS),
        phone: field(row, PHONE_KEYS),
        website: field(row, WEBSITE_KEYS),
        customer_type: CustomerType::from_loose(&field(row, TYPE_KEYS)),
        status: CustomerStatus::from_loose(&field(row, STATUS_KEYS)),
        priority: CustomerPriority::from_loose(&field(row, PRIORITY_KEYS)),
        value_tier: ValueTier::from_loose(&field(row, VALUE_TIER_KEYS)),
        direct_import: DirectImport::from_loose(&field(row, DIRECT_IMPORT_KEYS)),
        tags: parse_tags(&field(row, TAGS_KEYS)),
        is_returning_customer: truthy(&field(row, RETURNING_KEYS)),
        is_hot_lead: truthy(&field(row, HOT_LEAD_KEYS)),
        is_pinned: truthy(&field(row, PINNED_KEYS)),
        last_follow_up_date: parse_date(&field(row, LAST_FOLLOW_UP_KEYS)),
        next_follow_up_date: parse_date(&field(row, NEXT_FOLLOW_UP_KEYS)),
        requirements: field(row, REQUIREMENTS_KEYS),
        last_contact_notes: field(row, LAST_CONTACT_KEYS),
        key_meeting_points: field(row, KEY_MEETING_KEYS),
    }
}

#[derive(Clone)]
pub struct ImportService {
    customers: CustomerService,
}

impl ImportService {
    pub fn new(customers: CustomerService) -> Self {
        Self { customers }
    }

    /// Cada linha é independente: validação ou conflito em uma linha conta
    /// como falha e não interrompe as demais. CSV ilegível (sem cabeçalho,
    /// estrutura quebrada) aborta tudo com 400.
    pub async fn import_csv(&self, bytes: &[u8]) -> Result<ImportReport, AppError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::InvalidCsv(e.to_string()))?
            .iter()
            .map(normalize_key)
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(AppError::InvalidCsv("cabeçalho ausente".to_string()));
        }

        let mut imported = 0usize;
        let mut failed = 0usize;

        for record in reader.records() {
            let record = match record {
                Ok(r) => r,
                Err(_) => {
                    failed += 1;
                    continue;
                }
            };

            let row: HashMap<String, String> = headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.clone(), v.to_string()))
                .collect();

            match self.customers.create(draft_from_row(&row)).await {
                Ok(_) => imported += 1,
                Err(_) => failed += 1,
            }
        }

        Ok(ImportReport { imported, failed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (normalize_key(k), v.to_string()))
            .collect()
    }

    #[test]
    fn header_normalization_collapses_variants() {
        assert_eq!(normalize_key("Customer Name"), "customername");
        assert_eq!(normalize_key("customer_name"), "customername");
        assert_eq!(normalize_key("  Next Follow-up  "), "nextfollowup");
        assert_eq!(normalize_key("E-mail"), "email");
    }

    #[test]
    fn first_non_empty_alias_wins() {
        let r = row(&[
            ("Company", "Beta"),
            ("Contact", "K"),
            ("type", "retailer"),
            ("status", "won"),
        ]);
        let draft = draft_from_row(&r);
        assert_eq!(draft.name, "Beta");
        assert_eq!(draft.contact_person, "K");
        assert_eq!(draft.customer_type, CustomerType::Retailer);
        assert_eq!(draft.status, CustomerStatus::Won);
    }

    #[test]
    fn alias_precedence_follows_declaration_order() {
        // "name" vem antes de "company" na lista, então vence quando os
        // dois estão preenchidos.
        let r = row(&[("name", "Alpha"), ("Company", "Beta")]);
        assert_eq!(draft_from_row(&r).name, "Alpha");

        let r = row(&[("name", ""), ("Company", "Beta")]);
        assert_eq!(draft_from_row(&r).name, "Beta");
    }

    #[test]
    fn tags_split_on_commas_and_trim() {
        assert_eq!(parse_tags("vip, 2025 ,,  export"), ["vip", "2025", "export"]);
        assert!(parse_tags("   ").is_empty());
    }

    #[test]
    fn boolean_coercion_table() {
        for falsy in ["", "0", "false", "no", "FALSE", "No"] {
            assert!(!truthy(falsy), "{falsy:?} deveria ser falso");
        }
        for true_ish in ["1", "yes", "true", "sim", "x"] {
            assert!(truthy(true_ish), "{true_ish:?} deveria ser verdadeiro");
        }
    }

    #[test]
    fn dates_only_accept_iso_days() {
        assert_eq!(
            parse_date("2025-06-15"),
            NaiveDate::from_ymd_opt(2025, 6, 15)
        );
        assert!(parse_date("15/06/2025").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn unknown_enum_values_fall_back_to_defaults() {
        let r = row(&[
            ("name", "Acme"),
            ("type", "wholesaler"),
            ("priority", "urgent"),
            ("Value Tier", "gold"),
        ]);
        let draft = draft_from_row(&r);
        assert_eq!(draft.customer_type, CustomerType::Other);
        assert_eq!(draft.priority, CustomerPriority::Medium);
        assert_eq!(draft.value_tier, ValueTier::Standard);
    }
}
