// src/services/export.rs
//
// Exportação CSV da carteira. Os cabeçalhos abaixo são legíveis para humanos
// e, passados pela normalização do importador, voltam a cair nas mesmas
// colunas: exportar e reimportar preserva os dados.

use chrono::NaiveDate;

use crate::{common::error::AppError, models::customer::Customer};

const EXPORT_HEADERS: [&str; 22] = [
    "Customer Name",
    "Country",
    "Region",
    "City",
    "Contact Person",
    "Email",
    "Phone",
    "Website",
    "Type",
    "Status",
    "Priority",
    "Requirements",
    "Value Tier",
    "Direct Import",
    "Last Follow-up",
    "Next Follow-up",
    "Returning Customer",
    "Hot Lead",
    "Pinned",
    "Tags",
    "Last Contact Notes",
    "Key Meeting Points",
];

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn date_cell(value: Option<NaiveDate>) -> String {
    value.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// Nome sugerido para download, com a data do dia.
pub fn export_filename(today: NaiveDate) -> String {
    format!("snk_customers_{}.csv", today.format("%Y-%m-%d"))
}

pub fn export_csv(customers: &[Customer]) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(EXPORT_HEADERS)
        .map_err(anyhow::Error::new)?;

    for c in customers {
        let last_follow_up = date_cell(c.last_follow_up_date);
        let next_follow_up = date_cell(c.next_follow_up_date);
        let tags = c.tags.join(", ");
        let record: [&str; 22] = [
            c.name.as_str(),
            c.country.as_str(),
            c.region.as_str(),
            c.city.as_str(),
            c.contact_person.as_str(),
            c.email.as_str(),
            c.phone.as_str(),
            c.website.as_str(),
            c.customer_type.as_str(),
            c.status.as_str(),
            c.priority.as_str(),
            c.requirements.as_str(),
            c.value_tier.as_str(),
            c.direct_import.as_str(),
            &last_follow_up,
            &next_follow_up,
            yes_no(c.is_returning_customer),
            yes_no(c.is_hot_lead),
            yes_no(c.is_pinned),
            &tags,
            c.last_contact_notes.as_str(),
            c.key_meeting_points.as_str(),
        ];
        writer.write_record(record).map_err(anyhow::Error::new)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    String::from_utf8(bytes).map_err(|e| AppError::InternalServerError(e.into()))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::customer::{CustomerDraft, CustomerStatus};

    fn sample() -> Customer {
        let draft: CustomerDraft = serde_json::from_value(serde_json::json!({
            "name": "Acme, Inc.",
            "country": "US",
            "city": "LA",
            "contactPerson": "Jane",
            "email": "jane@acme.com",
            "tags": ["vip", "2025"],
            "isHotLead": true,
            "nextFollowUpDate": "2025-06-15",
        }))
        .unwrap();
        let mut c = Customer::from_draft(Uuid::new_v4(), draft, Utc::now());
        c.status = CustomerStatus::Won;
        c
    }

    #[test]
    fn header_row_is_stable() {
        let out = export_csv(&[]).unwrap();
        let first = out.lines().next().unwrap();
        assert!(first.starts_with("Customer Name,Country,Region,City"));
        assert!(first.ends_with("Tags,Last Contact Notes,Key Meeting Points"));
    }

    #[test]
    fn rows_use_canonical_labels_and_yes_no() {
        let out = export_csv(&[sample()]).unwrap();
        let row = out.lines().nth(1).unwrap();
        // Nome com vírgula sai entre aspas, tags viram lista separada por
        // vírgula, booleanos viram Yes/No.
        assert!(row.contains("\"Acme, Inc.\""));
        assert!(row.contains("Won"));
        assert!(row.contains("\"vip, 2025\""));
        assert!(row.contains("2025-06-15"));
        assert!(row.contains("Yes"));
    }

    #[test]
    fn filename_carries_the_day() {
        let day = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        assert_eq!(export_filename(day), "snk_customers_2025-06-10.csv");
    }
}
