// src/services/dashboard_service.rs

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{common::error::AppError, db::RecordStore};

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_customers: usize,
    pub hot_leads: usize,
    pub scheduled_follow_ups: usize,
    pub due_today: usize,
}

/// Contadores agregados da visão inicial. Calculados na hora, sem cache.
#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn RecordStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        let customers = self.store.list_customers().await?;
        let today = Utc::now().date_naive();
        let week_end = today + Duration::days(7);

        let hot_leads = customers.iter().filter(|c| c.is_hot_lead).count();
        let scheduled_follow_ups = customers
            .iter()
            .filter(|c| {
                c.next_follow_up_date
                    .is_some_and(|d| d >= today && d <= week_end)
            })
            .count();
        let due_today = customers
            .iter()
            .filter(|c| c.next_follow_up_date == Some(today))
            .count();

        Ok(DashboardStats {
            total_customers: customers.len(),
            hot_leads,
            scheduled_follow_ups,
            due_today,
        })
    }
}
