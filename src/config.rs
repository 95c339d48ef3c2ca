// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{MemStore, PgStore, RecordStore},
    services::{
        ActivityRecorder, CustomerService, DashboardService, FollowUpService, ImportService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub customer_service: CustomerService,
    pub followup_service: FollowUpService,
    pub recorder: ActivityRecorder,
    pub import_service: ImportService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let store = Self::connect_store().await;
        Ok(Self::with_store(store))
    }

    /// Tenta o Postgres de DATABASE_URL; sem variável ou sem conexão, o
    /// serviço sobe mesmo assim com armazenamento em memória (volátil).
    async fn connect_store() -> Arc<dyn RecordStore> {
        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                tracing::warn!(
                    "DATABASE_URL não definida, usando armazenamento em memória (volátil)"
                );
                return Arc::new(MemStore::new());
            }
        };

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await;

        match pool {
            Ok(pool) => {
                if let Err(e) = sqlx::migrate!().run(&pool).await {
                    tracing::warn!(
                        "Falha ao rodar migrações ({e}), usando armazenamento em memória"
                    );
                    return Arc::new(MemStore::new());
                }
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
                Arc::new(PgStore::new(pool))
            }
            Err(e) => {
                tracing::warn!(
                    "Falha ao conectar no Postgres ({e}), usando armazenamento em memória"
                );
                Arc::new(MemStore::new())
            }
        }
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_store(store: Arc<dyn RecordStore>) -> Self {
        let recorder = ActivityRecorder::new(store.clone());
        let customer_service = CustomerService::new(store.clone(), recorder.clone());
        let followup_service = FollowUpService::new(store.clone());
        let import_service = ImportService::new(customer_service.clone());
        let dashboard_service = DashboardService::new(store);

        Self {
            customer_service,
            followup_service,
            recorder,
            import_service,
            dashboard_service,
        }
    }
}
