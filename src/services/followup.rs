// src/services/followup.rs
//
// Agrupamento do calendário de follow-ups e classificação de urgência.
// A chave de agrupamento é o dia de calendário em nextFollowUpDate;
// clientes sem data ficam fora de todos os grupos.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    db::RecordStore,
    models::customer::Customer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum FollowUpUrgency {
    #[serde(rename = "overdue")]
    Overdue,
    #[serde(rename = "due-soon")]
    DueSoon,
    #[serde(rename = "future")]
    Future,
}

/// Para um dia D relativo a hoje T (normalizado para meia-noite):
/// D < T é atrasado, T <= D < T+7 vence em breve, D >= T+7 é futuro.
pub fn classify(day: NaiveDate, today: NaiveDate) -> FollowUpUrgency {
    if day < today {
        FollowUpUrgency::Overdue
    } else if day < today + Duration::days(7) {
        FollowUpUrgency::DueSoon
    } else {
        FollowUpUrgency::Future
    }
}

/// Agrupa por dia, em ordem cronológica. A ordem relativa dos clientes
/// dentro de cada dia é a da lista de entrada.
pub fn group_by_follow_up_date(customers: &[Customer]) -> BTreeMap<NaiveDate, Vec<Customer>> {
    let mut groups: BTreeMap<NaiveDate, Vec<Customer>> = BTreeMap::new();
    for customer in customers {
        if let Some(date) = customer.next_follow_up_date {
            groups.entry(date).or_default().push(customer.clone());
        }
    }
    groups
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpGroup {
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub urgency: FollowUpUrgency,
    pub customers: Vec<Customer>,
}

#[derive(Clone)]
pub struct FollowUpService {
    store: Arc<dyn RecordStore>,
}

impl FollowUpService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Clientes com follow-up em [hoje, hoje + days], inclusivo.
    pub async fn upcoming(&self, days: i64) -> Result<Vec<Customer>, AppError> {
        let today = Utc::now().date_naive();
        let to = today + Duration::days(days.max(0));
        self.store.customers_with_upcoming_follow_ups(today, to).await
    }

    /// Visão de calendário: um grupo por dia com a urgência do dia.
    pub async fn calendar(&self) -> Result<Vec<FollowUpGroup>, AppError> {
        let customers = self.store.list_customers().await?;
        let today = Utc::now().date_naive();
        Ok(group_by_follow_up_date(&customers)
            .into_iter()
            .map(|(date, customers)| FollowUpGroup {
                date,
                urgency: classify(date, today),
                customers,
            })
            .collect())
    }

    // Regra observada: só hot lead/fixado. Follow-ups atrasados NÃO entram
    // aqui até o produto decidir o contrário.
    pub async fn needing_attention(&self) -> Result<Vec<Customer>, AppError> {
        self.store.customers_needing_attention().await
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::models::customer::CustomerDraft;

    fn customer_with_follow_up(name: &str, date: Option<NaiveDate>) -> Customer {
        let draft: CustomerDraft = serde_json::from_value(serde_json::json!({
            "name": name,
            "country": "US",
            "city": "LA",
            "contactPerson": "J",
            "email": "j@x.com",
        }))
        .unwrap();
        let mut c = Customer::from_draft(Uuid::new_v4(), draft, Utc::now());
        c.next_follow_up_date = date;
        c
    }

    #[test]
    fn urgency_boundaries() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

        let yesterday = today - Duration::days(1);
        assert_eq!(classify(yesterday, today), FollowUpUrgency::Overdue);

        assert_eq!(classify(today, today), FollowUpUrgency::DueSoon);
        assert_eq!(classify(today + Duration::days(6), today), FollowUpUrgency::DueSoon);

        assert_eq!(classify(today + Duration::days(7), today), FollowUpUrgency::Future);
        assert_eq!(classify(today + Duration::days(10), today), FollowUpUrgency::Future);
    }

    #[test]
    fn grouping_excludes_customers_without_date() {
        let d1 = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 6, 12).unwrap();
        let list = vec![
            customer_with_follow_up("A", Some(d2)),
            customer_with_follow_up("B", None),
            customer_with_follow_up("C", Some(d1)),
            customer_with_follow_up("D", Some(d1)),
        ];

        let groups = group_by_follow_up_date(&list);
        assert_eq!(groups.len(), 2);

        let dates: Vec<NaiveDate> = groups.keys().copied().collect();
        assert_eq!(dates, [d1, d2]);

        let day_one: Vec<&str> = groups[&d1].iter().map(|c| c.name.as_str()).collect();
        assert_eq!(day_one, ["C", "D"]);
    }
}
