// src/services/filter.rs
//
// Motor de filtro/busca da lista de clientes. Função pura: mesma lista e
// mesma especificação produzem sempre a mesma sequência, na ordem relativa
// original (filtro estável, sem re-ordenação).

use serde::Deserialize;
use utoipa::IntoParams;

use crate::models::customer::Customer;

/// Especificação de filtro. Campo ausente ou vazio = sem restrição.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CustomerFilter {
    /// Busca textual, case-insensitive, sobre nome, tags e requisitos.
    pub search: Option<String>,
    pub country: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub customer_type: Option<String>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Todos os filtros ativos combinam com AND; a busca textual é um OR entre
/// as três projeções (nome, cada tag, requisitos). Igualdades são exatas e
/// sensíveis a maiúsculas, contra os rótulos canônicos dos enums.
pub fn matches(customer: &Customer, filter: &CustomerFilter) -> bool {
    let matches_search = match active(&filter.search) {
        None => true,
        Some(query) => {
            let query = query.to_lowercase();
            customer.name.to_lowercase().contains(&query)
                || customer
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&query))
                || customer.requirements.to_lowercase().contains(&query)
        }
    };

    let eq = |wanted: &Option<String>, actual: &str| {
        active(wanted).is_none_or(|w| w == actual)
    };

    matches_search
        && eq(&filter.country, &customer.country)
        && eq(&filter.status, customer.status.as_str())
        && eq(&filter.priority, customer.priority.as_str())
        && eq(&filter.customer_type, customer.customer_type.as_str())
}

pub fn filter_customers(mut customers: Vec<Customer>, filter: &CustomerFilter) -> Vec<Customer> {
    customers.retain(|c| matches(c, filter));
    customers
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::customer::{CustomerDraft, CustomerStatus};

    fn customer(name: &str, status: CustomerStatus, tags: &[&str], requirements: &str) -> Customer {
        let draft: CustomerDraft = serde_json::from_value(serde_json::json!({
            "name": name,
            "country": "US",
            "city": "LA",
            "contactPerson": "J",
            "email": "j@x.com",
            "requirements": requirements,
            "tags": tags,
        }))
        .unwrap();
        let mut c = Customer::from_draft(Uuid::new_v4(), draft, Utc::now());
        c.status = status;
        c
    }

    fn sample_list() -> Vec<Customer> {
        vec![
            customer("Acme", CustomerStatus::Won, &["vip"], "quartzo branco"),
            customer("Beta", CustomerStatus::Lead, &[], ""),
            customer("Gamma", CustomerStatus::Won, &[], ""),
            customer("Delta", CustomerStatus::Lead, &["VIP", "2025"], ""),
            customer("Epsilon", CustomerStatus::Won, &[], "mármore"),
        ]
    }

    #[test]
    fn empty_filter_is_identity() {
        let list = sample_list();
        let names: Vec<String> = list.iter().map(|c| c.name.clone()).collect();
        let filtered = filter_customers(list, &CustomerFilter::default());
        let after: Vec<String> = filtered.iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, after);
    }

    #[test]
    fn status_equality_keeps_original_order() {
        let filter = CustomerFilter {
            status: Some("Won".to_string()),
            ..Default::default()
        };
        let filtered = filter_customers(sample_list(), &filter);
        let names: Vec<&str> = filtered.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Acme", "Gamma", "Epsilon"]);
    }

    #[test]
    fn search_is_case_insensitive_over_name_tags_and_requirements() {
        let list = sample_list();

        let by_tag = filter_customers(
            list.clone(),
            &CustomerFilter {
                search: Some("vip".to_string()),
                ..Default::default()
            },
        );
        let names: Vec<&str> = by_tag.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Acme", "Delta"]);

        let by_requirements = filter_customers(
            list.clone(),
            &CustomerFilter {
                search: Some("MÁRMORE".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_requirements.len(), 1);
        assert_eq!(by_requirements[0].name, "Epsilon");

        let by_name = filter_customers(
            list,
            &CustomerFilter {
                search: Some("acm".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_name.len(), 1);
    }

    #[test]
    fn filters_combine_with_and() {
        let filter = CustomerFilter {
            search: Some("a".to_string()),
            status: Some("Won".to_string()),
            ..Default::default()
        };
        let filtered = filter_customers(sample_list(), &filter);
        // "a" casa com Acme, Beta, Gamma e Delta, mas o AND com status=Won
        // deixa só Acme e Gamma.
        let names: Vec<&str> = filtered.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Acme", "Gamma"]);
    }

    #[test]
    fn empty_string_means_no_constraint() {
        let filter = CustomerFilter {
            status: Some(String::new()),
            priority: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(filter_customers(sample_list(), &filter).len(), 5);
        // E igualdade é sensível a maiúsculas: "won" não casa com "Won".
        let lowercase = CustomerFilter {
            status: Some("won".to_string()),
            ..Default::default()
        };
        assert!(filter_customers(sample_list(), &lowercase).is_empty());
    }
}
